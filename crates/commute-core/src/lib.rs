//! Shared foundation for the commute pipeline.
//!
//! Holds the geographic primitives every other crate speaks in, the
//! application configuration, and tracing initialization.

pub mod config;
pub mod types;

pub use config::{Config, DistanceUnit, ValidationResult};
pub use types::{Coordinate, WaypointRole};

use anyhow::Result;

/// Initialize tracing for the application.
///
/// Call once, from the binary entry point. Library crates only emit
/// events; they never install a subscriber.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("commute core initialized");
    Ok(())
}
