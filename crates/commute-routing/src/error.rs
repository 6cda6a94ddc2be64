//! Routing-specific error types.

use thiserror::Error;

/// Address resolution failures.
///
/// Carries the original address and the raw service status so failures
/// are diagnosable from the log line alone.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Could not resolve '{address}': geocoding service returned {status}")]
    NotFound { address: String, status: String },

    #[error("Invalid geocoding response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Route computation failures.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Routing service error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No route found between origin and destination")]
    NoRoute,

    #[error("Invalid duration value '{0}': expected integer seconds with 's' suffix")]
    InvalidDuration(String),

    #[error("Invalid routing response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Malformed encoded-polyline input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Encoded polyline ended mid-chunk at byte {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("Invalid polyline character at byte {offset}")]
    InvalidCharacter { offset: usize },
}

impl GeocodeError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { address, .. } => {
                format!("Could not find '{}' on the map. Check the address.", address)
            }
            Self::Parse(_) => "The geocoding service sent an unexpected response.".to_string(),
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
        }
    }
}

impl RouteError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { .. } => "The routing service is unavailable. Try again later.".to_string(),
            Self::NoRoute => "No drivable route was found.".to_string(),
            Self::InvalidDuration(_) | Self::Parse(_) => {
                "The routing service sent an unexpected response.".to_string()
            }
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
        }
    }
}
