//! Client for the one-call weather service.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{Forecast, WaypointWeather, WeatherSnapshot};
use commute_core::Coordinate;

const ONECALL_API_BASE: &str = "https://api.openweathermap.org/data/3.0";

/// Index into the hourly series for the "+8h" snapshot. The series
/// starts at the current hour, so index 8 is eight hours out.
const FORECAST_OFFSET_HOURS: usize = 8;

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: ApiObservation,
    #[serde(default)]
    hourly: Vec<ApiObservation>,
}

#[derive(Debug, Deserialize)]
struct ApiObservation {
    temp: f64,
    #[serde(default)]
    weather: Vec<ApiCondition>,
    /// Precipitation probability, hourly entries only
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
    icon: Option<String>,
}

/// Client for current + hourly-forecast weather at a coordinate.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    /// # Errors
    ///
    /// Returns [`WeatherError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: ONECALL_API_BASE.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(
        api_key: &str,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, WeatherError> {
        let mut provider = Self::new(api_key, timeout)?;
        provider.base_url = base_url.to_string();
        Ok(provider)
    }

    /// Fetch current conditions and the eight-hours-out forecast.
    ///
    /// A short hourly series is not an error: the +8h slot comes back
    /// [`Forecast::Unavailable`] with a displayable reason.
    ///
    /// # Errors
    ///
    /// [`WeatherError::Api`] on a non-2xx response,
    /// [`WeatherError::Transport`] on network failure.
    #[instrument(skip(self), level = "info")]
    pub async fn current_and_forecast(
        &self,
        coord: Coordinate,
    ) -> Result<WaypointWeather, WeatherError> {
        let url = format!("{}/onecall", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coord.latitude.to_string()),
                ("lon", coord.longitude.to_string()),
                ("units", "metric".to_string()),
                ("exclude", "minutely,daily,alerts".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: OneCallResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let weather = WaypointWeather::from(body);
        tracing::debug!(
            now = %weather.now.label(),
            later_available = weather.in_eight_hours.is_available(),
            "weather fetched"
        );
        Ok(weather)
    }
}

impl From<OneCallResponse> for WaypointWeather {
    fn from(body: OneCallResponse) -> Self {
        // The current observation never carries `pop`; the next hour's
        // probability stands in as departure context
        let now_pop = body.hourly.first().and_then(|h| h.pop);
        let now = snapshot_from(&body.current, now_pop);

        let in_eight_hours = match body.hourly.get(FORECAST_OFFSET_HOURS) {
            Some(hour) => Forecast::Available(snapshot_from(hour, hour.pop)),
            None => Forecast::Unavailable {
                reason: format!(
                    "Forecast data for {} hours later is unavailable.",
                    FORECAST_OFFSET_HOURS
                ),
            },
        };

        WaypointWeather {
            now,
            in_eight_hours,
        }
    }
}

fn snapshot_from(observation: &ApiObservation, pop: Option<f64>) -> WeatherSnapshot {
    let condition = observation.weather.first();
    WeatherSnapshot {
        temperature_celsius: observation.temp,
        description: condition
            .map(|c| capitalize(&c.description))
            .unwrap_or_default(),
        icon: condition.and_then(|c| c.icon.clone()),
        precipitation_probability: pop,
    }
}

/// Uppercase the first character, as the service reports descriptions
/// fully lowercased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(temp: f64, description: &str, pop: Option<f64>) -> ApiObservation {
        ApiObservation {
            temp,
            weather: vec![ApiCondition {
                description: description.to_string(),
                icon: Some("04d".to_string()),
            }],
            pop,
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("Rain"), "Rain");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_now_takes_precipitation_from_first_hour() {
        let body = OneCallResponse {
            current: observation(11.0, "overcast clouds", None),
            hourly: vec![observation(11.5, "light rain", Some(0.35))],
        };
        let weather = WaypointWeather::from(body);
        assert_eq!(weather.now.description, "Overcast clouds");
        assert_eq!(weather.now.precipitation_probability, Some(0.35));
    }

    #[test]
    fn test_no_hourly_means_no_precipitation_context() {
        let body = OneCallResponse {
            current: observation(11.0, "clear sky", None),
            hourly: vec![],
        };
        let weather = WaypointWeather::from(body);
        assert_eq!(weather.now.precipitation_probability, None);
    }

    #[test]
    fn test_eight_hour_forecast_uses_ninth_entry() {
        let mut hourly: Vec<ApiObservation> =
            (0..12).map(|i| observation(10.0 + f64::from(i), "mist", Some(0.1))).collect();
        hourly[8] = observation(18.0, "scattered clouds", Some(0.6));

        let body = OneCallResponse {
            current: observation(9.0, "mist", None),
            hourly,
        };
        let weather = WaypointWeather::from(body);

        match weather.in_eight_hours {
            Forecast::Available(snapshot) => {
                assert_eq!(snapshot.description, "Scattered clouds");
                assert_eq!(snapshot.precipitation_probability, Some(0.6));
                assert!((snapshot.temperature_celsius - 18.0).abs() < 1e-9);
            }
            Forecast::Unavailable { reason } => panic!("expected forecast, got: {reason}"),
        }
    }

    #[test]
    fn test_short_hourly_series_is_unavailable_not_error() {
        let body = OneCallResponse {
            current: observation(9.0, "mist", None),
            hourly: (0..8).map(|_| observation(10.0, "mist", None)).collect(),
        };
        let weather = WaypointWeather::from(body);

        match weather.in_eight_hours {
            Forecast::Unavailable { reason } => {
                assert_eq!(reason, "Forecast data for 8 hours later is unavailable.");
            }
            Forecast::Available(_) => panic!("eight entries must not reach index 8"),
        }
    }

    #[test]
    fn test_missing_condition_array_yields_empty_description() {
        let body = OneCallResponse {
            current: ApiObservation {
                temp: 5.0,
                weather: vec![],
                pop: None,
            },
            hourly: vec![],
        };
        let weather = WaypointWeather::from(body);
        assert_eq!(weather.now.description, "");
        assert_eq!(weather.now.icon, None);
    }
}
