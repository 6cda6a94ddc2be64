//! Weather lookups for commute waypoints.
//!
//! One provider call per waypoint returns the current conditions plus
//! the forecast eight hours out, which is roughly "what it will be like
//! on the drive home".

pub mod error;
pub mod provider;
pub mod types;

pub use error::WeatherError;
pub use provider::WeatherProvider;
pub use types::{Forecast, WaypointWeather, WeatherSnapshot};
