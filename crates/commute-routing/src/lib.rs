//! Routing half of the commute pipeline.
//!
//! Resolves addresses to coordinates, requests a traffic-aware driving
//! route, decodes the route's compressed polyline, and partitions the
//! decoded path into colored traffic segments for rendering.

pub mod error;
pub mod geocode;
pub mod polyline;
pub mod route;
pub mod traffic;

pub use error::{DecodeError, GeocodeError, RouteError};
pub use geocode::Geocoder;
pub use route::{Route, RouteClient};
pub use traffic::{segment, SegmentColor, SpeedCategory, TrafficInterval, TrafficSegment};
