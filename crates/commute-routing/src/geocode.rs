//! Forward geocoding: resolve a free-text address to a coordinate.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::GeocodeError;
use commute_core::Coordinate;

const GEOCODE_API_BASE: &str = "https://maps.googleapis.com/maps/api/geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Client for the geocoding service.
///
/// The input address is not retained after resolution; callers get back
/// a plain [`Coordinate`].
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Geocoder {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: GEOCODE_API_BASE.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(api_key: &str, timeout: Duration, base_url: &str) -> Result<Self, GeocodeError> {
        let mut geocoder = Self::new(api_key, timeout)?;
        geocoder.base_url = base_url.to_string();
        Ok(geocoder)
    }

    /// Resolve an address to a coordinate.
    ///
    /// No retry: the caller decides whether to abort or report.
    ///
    /// # Errors
    ///
    /// [`GeocodeError::NotFound`] when the service reports a non-OK
    /// status or zero results; [`GeocodeError::Transport`] on network
    /// failure.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::NotFound {
                address: address.to_string(),
                status: format!("HTTP {}", status.as_u16()),
            });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        if body.status != "OK" {
            return Err(GeocodeError::NotFound {
                address: address.to_string(),
                status: body.status,
            });
        }

        let first = body.results.into_iter().next().ok_or_else(|| {
            GeocodeError::NotFound {
                address: address.to_string(),
                status: "OK (empty results)".to_string(),
            }
        })?;

        let coord = Coordinate::new(first.geometry.location.lat, first.geometry.location.lng);
        tracing::debug!(%coord, "resolved address");
        Ok(coord)
    }
}
