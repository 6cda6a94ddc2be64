//! Weather data as the presentation layer consumes it.

use serde::{Deserialize, Serialize};

/// One observed or forecast weather state at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    /// Capitalized description, e.g. "Light rain"
    pub description: String,
    /// Service icon code, e.g. "10d"
    pub icon: Option<String>,
    /// Fraction in [0, 1]; `None` when the service gave no hourly data
    pub precipitation_probability: Option<f64>,
}

impl WeatherSnapshot {
    /// One-line label: `"12.3°C, Light rain, 40% chance of rain"`.
    pub fn label(&self) -> String {
        let mut label = format!("{:.1}°C, {}", self.temperature_celsius, self.description);
        if let Some(pop) = self.precipitation_probability {
            label.push_str(&format!(", {:.0}% chance of rain", pop * 100.0));
        }
        label
    }

    /// URL of the service's icon image, when an icon code is present.
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|code| format!("https://openweathermap.org/img/wn/{code}@2x.png"))
    }
}

/// A forecast slot that may legitimately not exist.
///
/// Short hourly series are a normal service response; the unavailable
/// case carries a human-readable reason for direct display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Forecast {
    Available(WeatherSnapshot),
    Unavailable { reason: String },
}

impl Forecast {
    pub fn is_available(&self) -> bool {
        matches!(self, Forecast::Available(_))
    }

    /// Label for display: the snapshot's label, or the reason.
    pub fn label(&self) -> String {
        match self {
            Forecast::Available(snapshot) => snapshot.label(),
            Forecast::Unavailable { reason } => reason.clone(),
        }
    }
}

/// Weather for one waypoint: conditions now and eight hours out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointWeather {
    pub now: WeatherSnapshot,
    pub in_eight_hours: Forecast,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pop: Option<f64>) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_celsius: 12.34,
            description: "Light rain".to_string(),
            icon: Some("10d".to_string()),
            precipitation_probability: pop,
        }
    }

    #[test]
    fn test_label_with_precipitation() {
        assert_eq!(
            snapshot(Some(0.4)).label(),
            "12.3°C, Light rain, 40% chance of rain"
        );
    }

    #[test]
    fn test_label_without_precipitation() {
        assert_eq!(snapshot(None).label(), "12.3°C, Light rain");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            snapshot(None).icon_url().as_deref(),
            Some("https://openweathermap.org/img/wn/10d@2x.png")
        );

        let mut no_icon = snapshot(None);
        no_icon.icon = None;
        assert_eq!(no_icon.icon_url(), None);
    }

    #[test]
    fn test_unavailable_forecast_label_is_the_reason() {
        let forecast = Forecast::Unavailable {
            reason: "Forecast data for 8 hours later is unavailable.".to_string(),
        };
        assert!(!forecast.is_available());
        assert_eq!(
            forecast.label(),
            "Forecast data for 8 hours later is unavailable."
        );
    }
}
