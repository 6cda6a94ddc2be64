//! Orchestration of the route-traffic-weather pipeline.

use std::time::Duration;

use chrono::Local;
use tracing::instrument;

use crate::error::ComposeError;
use crate::view::{format_distance, CongestionLevel, RouteSummary, RouteView, Waypoint};
use commute_core::{Config, Coordinate, DistanceUnit, WaypointRole};
use commute_routing::{polyline, traffic, Geocoder, RouteClient};
use commute_weather::WeatherProvider;

/// Orchestrates geocoding, routing, path decoding, traffic
/// segmentation, and weather lookups into one [`RouteView`].
///
/// Stateless between runs: every composition builds its entities fresh
/// and a failed run leaves nothing behind, so callers may simply invoke
/// it again.
#[derive(Debug, Clone)]
pub struct RouteWeatherComposer {
    geocoder: Geocoder,
    routes: RouteClient,
    weather: WeatherProvider,
    home_address: String,
    work_address: String,
    distance_unit: DistanceUnit,
}

impl RouteWeatherComposer {
    /// Build a composer with all three service clients against their
    /// production endpoints.
    ///
    /// # Errors
    ///
    /// Propagates the component error of whichever HTTP client failed
    /// to construct.
    pub fn from_config(config: &Config) -> Result<Self, ComposeError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        Ok(Self::new(
            Geocoder::new(&config.google_api_key, timeout)?,
            RouteClient::new(&config.google_api_key, timeout)?,
            WeatherProvider::new(&config.openweather_api_key, timeout)?,
            config,
        ))
    }

    /// Build a composer from ready-made clients (tests point these at
    /// mock servers).
    pub fn new(
        geocoder: Geocoder,
        routes: RouteClient,
        weather: WeatherProvider,
        config: &Config,
    ) -> Self {
        Self {
            geocoder,
            routes,
            weather,
            home_address: config.home_address.clone(),
            work_address: config.work_address.clone(),
            distance_unit: config.distance_unit,
        }
    }

    /// Compose a view for the configured home and work addresses.
    ///
    /// # Errors
    ///
    /// See [`compose_between`](Self::compose_between).
    pub async fn compose(&self) -> Result<RouteView, ComposeError> {
        self.compose_between(&self.home_address, &self.work_address)
            .await
    }

    /// Compose a view for an explicit origin/destination address pair.
    ///
    /// All-or-nothing: the first failing step aborts the run and no
    /// partial view is returned.
    ///
    /// # Errors
    ///
    /// [`ComposeError`] wrapping the most specific component error.
    #[instrument(skip(self), level = "info")]
    pub async fn compose_between(
        &self,
        home_address: &str,
        work_address: &str,
    ) -> Result<RouteView, ComposeError> {
        // Origin and destination geocodes are independent; run both
        // and fail fast on either
        let (origin, destination) = tokio::try_join!(
            self.geocoder.resolve(home_address),
            self.geocoder.resolve(work_address),
        )?;

        let route = self.routes.compute_route(origin, destination).await?;
        let path = polyline::decode(&route.encoded_polyline)?;
        let segments = traffic::segment(&path, &route.traffic_intervals);

        let midway = origin.midpoint(&destination);

        // One independent fetch per waypoint, at most three in flight
        let (home_weather, midway_weather, work_weather) = tokio::try_join!(
            self.weather.current_and_forecast(origin),
            self.weather.current_and_forecast(midway),
            self.weather.current_and_forecast(destination),
        )?;

        let delay_ratio = route.delay_ratio();
        let summary = RouteSummary {
            duration_minutes: route.duration_minutes(),
            static_duration_minutes: route.static_duration_minutes(),
            distance_label: format_distance(route.distance_meters, self.distance_unit),
            delay_ratio,
            congestion: CongestionLevel::from_delay_ratio(delay_ratio),
        };

        let waypoints = vec![
            waypoint(WaypointRole::Home, origin, home_weather),
            waypoint(WaypointRole::Midway, midway, midway_weather),
            waypoint(WaypointRole::Work, destination, work_weather),
        ];

        tracing::info!(
            duration = %summary.duration_label(),
            congestion = summary.congestion.css_name(),
            segments = segments.len(),
            "composition complete"
        );

        Ok(RouteView {
            generated_at: Local::now().format("%d/%m/%y %I:%M %p").to_string(),
            summary,
            segments,
            waypoints,
        })
    }
}

fn waypoint(
    role: WaypointRole,
    coordinate: Coordinate,
    weather: commute_weather::WaypointWeather,
) -> Waypoint {
    Waypoint {
        role,
        coordinate,
        weather,
    }
}
