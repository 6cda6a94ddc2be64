//! Composition of route, traffic, and weather into one view.
//!
//! The composer is the only entry point the presentation layer needs:
//! it geocodes both addresses, requests the traffic-aware route,
//! decodes and segments the path, and attaches weather to the three
//! waypoints. The resulting [`RouteView`] carries no transport shapes
//! and renders unchanged in a web template or a native GUI.

pub mod composer;
pub mod error;
pub mod view;

pub use composer::RouteWeatherComposer;
pub use error::ComposeError;
pub use view::{CongestionLevel, RouteSummary, RouteView, Waypoint};
