//! Traffic-aware route computation.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::RouteError;
use crate::traffic::{SpeedCategory, TrafficInterval};
use commute_core::Coordinate;

const ROUTES_API_BASE: &str = "https://routes.googleapis.com";

// Only the fields the pipeline consumes; anything else is wasted quota.
const FIELD_MASK: &str = "routes.duration,routes.staticDuration,routes.distanceMeters,\
                          routes.polyline.encodedPolyline,\
                          routes.travelAdvisory.speedReadingIntervals";

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoute {
    duration: Option<String>,
    static_duration: Option<String>,
    #[serde(default)]
    distance_meters: f64,
    polyline: Option<ApiPolyline>,
    travel_advisory: Option<ApiTravelAdvisory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPolyline {
    encoded_polyline: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTravelAdvisory {
    #[serde(default)]
    speed_reading_intervals: Vec<ApiSpeedInterval>,
}

// Zero-valued indices are omitted on the wire (proto3 defaults)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSpeedInterval {
    #[serde(default)]
    start_polyline_point_index: usize,
    end_polyline_point_index: Option<usize>,
    #[serde(default)]
    speed: SpeedCategory,
}

/// A single traffic-aware driving route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Travel time with current traffic, in seconds
    pub travel_duration_secs: u64,
    /// Travel time without traffic, in seconds (0 when the service
    /// omitted it)
    pub static_duration_secs: u64,
    pub distance_meters: f64,
    pub encoded_polyline: String,
    pub traffic_intervals: Vec<TrafficInterval>,
}

impl Route {
    /// Whole minutes with traffic, floored the way drivers read ETAs.
    pub fn duration_minutes(&self) -> u64 {
        self.travel_duration_secs / 60
    }

    /// Whole minutes without traffic.
    pub fn static_duration_minutes(&self) -> u64 {
        self.static_duration_secs / 60
    }

    /// Traffic duration over free-flow duration.
    ///
    /// With no usable static duration the ratio defaults to 1.0 ("no
    /// delay known") rather than dividing by zero.
    pub fn delay_ratio(&self) -> f64 {
        if self.static_duration_secs == 0 {
            1.0
        } else {
            self.travel_duration_secs as f64 / self.static_duration_secs as f64
        }
    }
}

/// Parse a service duration like `"1234s"` into integer seconds.
///
/// # Errors
///
/// [`RouteError::InvalidDuration`] when the suffix or digits are
/// malformed.
pub fn parse_duration_seconds(raw: &str) -> Result<u64, RouteError> {
    raw.strip_suffix('s')
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| RouteError::InvalidDuration(raw.to_string()))
}

/// Client for the routing service.
///
/// Always requests traffic-aware timing and on-polyline traffic
/// annotations; the caller gets back exactly one best [`Route`].
#[derive(Debug, Clone)]
pub struct RouteClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RouteClient {
    /// # Errors
    ///
    /// Returns [`RouteError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, RouteError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: ROUTES_API_BASE.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(api_key: &str, timeout: Duration, base_url: &str) -> Result<Self, RouteError> {
        let mut client = Self::new(api_key, timeout)?;
        client.base_url = base_url.to_string();
        Ok(client)
    }

    /// Compute the best traffic-aware driving route.
    ///
    /// # Errors
    ///
    /// [`RouteError::Api`] on a non-2xx response, [`RouteError::NoRoute`]
    /// when the response carries no routes, [`RouteError::Transport`] on
    /// network failure.
    #[instrument(skip(self), level = "info")]
    pub async fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Route, RouteError> {
        let url = format!("{}/directions/v2:computeRoutes", self.base_url);
        let body = serde_json::json!({
            "origin": { "location": { "latLng": {
                "latitude": origin.latitude,
                "longitude": origin.longitude,
            }}},
            "destination": { "location": { "latLng": {
                "latitude": destination.latitude,
                "longitude": destination.longitude,
            }}},
            "travelMode": "DRIVE",
            "routingPreference": "TRAFFIC_AWARE",
            "extraComputations": ["TRAFFIC_ON_POLYLINE"],
        });

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RoutesResponse = response
            .json()
            .await
            .map_err(|e| RouteError::Parse(e.to_string()))?;

        let api_route = parsed.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
        let route = Route::from_api(api_route)?;
        tracing::info!(
            minutes = route.duration_minutes(),
            intervals = route.traffic_intervals.len(),
            "route computed"
        );
        Ok(route)
    }
}

impl Route {
    fn from_api(api: ApiRoute) -> Result<Self, RouteError> {
        let travel_duration_secs = match api.duration {
            Some(raw) => parse_duration_seconds(&raw)?,
            None => 0,
        };
        // Missing static duration falls back to the traffic duration,
        // which keeps the delay ratio at exactly 1.0
        let static_duration_secs = match api.static_duration {
            Some(raw) => parse_duration_seconds(&raw)?,
            None => travel_duration_secs,
        };

        let encoded_polyline = api
            .polyline
            .map(|p| p.encoded_polyline)
            .unwrap_or_default();

        let traffic_intervals = api
            .travel_advisory
            .map(|advisory| {
                advisory
                    .speed_reading_intervals
                    .into_iter()
                    .map(|iv| TrafficInterval {
                        start_index: iv.start_polyline_point_index,
                        end_index: iv
                            .end_polyline_point_index
                            .unwrap_or(iv.start_polyline_point_index),
                        speed: iv.speed,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Route {
            travel_duration_secs,
            static_duration_secs,
            distance_meters: api.distance_meters,
            encoded_polyline,
            traffic_intervals,
        })
    }
}
