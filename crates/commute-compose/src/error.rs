//! Composition error type.

use thiserror::Error;

use commute_routing::{DecodeError, GeocodeError, RouteError};
use commute_weather::WeatherError;

/// Failure of a whole composition run.
///
/// Composition is all-or-nothing: the first component failure aborts
/// the run and surfaces here with its specific kind intact. Nothing is
/// downgraded or retried.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl ComposeError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Geocode(e) => e.user_message(),
            Self::Route(e) => e.user_message(),
            Self::Decode(_) => "The route path could not be read.".to_string(),
            Self::Weather(e) => e.user_message(),
        }
    }
}
