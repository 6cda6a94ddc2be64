//! Weather-specific error types.
//!
//! Only transport and service failures are errors here. A forecast that
//! doesn't reach eight hours out is a normal outcome and is represented
//! in the data model, not the error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather service error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid weather response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { .. } => "The weather service is unavailable. Try again later.".to_string(),
            Self::Parse(_) => "The weather service sent an unexpected response.".to_string(),
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
        }
    }
}
