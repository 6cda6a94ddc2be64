//! The composed, presentation-ready model.

use serde::Serialize;

use commute_core::{Coordinate, DistanceUnit, WaypointRole};
use commute_routing::TrafficSegment;
use commute_weather::WaypointWeather;

const METERS_PER_MILE: f64 = 1609.344;

/// Overall congestion of the route, derived from the delay ratio.
///
/// This is the summary-level coloring scheme (ratio thresholds); the
/// per-segment colors come from the service's speed categories instead.
/// The two deliberately coexist: one describes the whole commute, the
/// other paints the line on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Green,
    Orange,
    Red,
}

impl CongestionLevel {
    /// Thresholds: under 1.1 free-flowing, under 1.5 slowed, else jammed.
    pub fn from_delay_ratio(ratio: f64) -> Self {
        if ratio < 1.1 {
            CongestionLevel::Green
        } else if ratio < 1.5 {
            CongestionLevel::Orange
        } else {
            CongestionLevel::Red
        }
    }

    pub fn css_name(&self) -> &'static str {
        match self {
            CongestionLevel::Green => "green",
            CongestionLevel::Orange => "orange",
            CongestionLevel::Red => "red",
        }
    }
}

/// Route timing and distance, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub duration_minutes: u64,
    pub static_duration_minutes: u64,
    /// Formatted per the configured unit, e.g. "15.0 mi" or "24.1 km"
    pub distance_label: String,
    pub delay_ratio: f64,
    pub congestion: CongestionLevel,
}

impl RouteSummary {
    /// ETA label, e.g. "20 min".
    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_minutes)
    }
}

/// Format a meter distance in the requested unit.
pub(crate) fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    match unit {
        DistanceUnit::Miles => format!("{:.1} mi", meters / METERS_PER_MILE),
        DistanceUnit::Kilometers => format!("{:.1} km", meters / 1000.0),
    }
}

/// One weather anchor: a named coordinate with its two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub role: WaypointRole,
    pub coordinate: Coordinate,
    pub weather: WaypointWeather,
}

/// Everything one composition run produces.
///
/// Request-scoped: built fresh each run, never cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    /// Human-readable composition time, e.g. "26/08/26 07:45 AM"
    pub generated_at: String,
    pub summary: RouteSummary,
    /// Colored path slices in route order; adjacent slices share their
    /// boundary point
    pub segments: Vec<TrafficSegment>,
    /// Home, Midway, Work — in route order
    pub waypoints: Vec<Waypoint>,
}

impl RouteView {
    /// Waypoint lookup by role.
    pub fn waypoint(&self, role: WaypointRole) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_congestion_thresholds() {
        assert_eq!(CongestionLevel::from_delay_ratio(1.0), CongestionLevel::Green);
        assert_eq!(CongestionLevel::from_delay_ratio(1.09), CongestionLevel::Green);
        assert_eq!(CongestionLevel::from_delay_ratio(1.1), CongestionLevel::Orange);
        assert_eq!(CongestionLevel::from_delay_ratio(1.49), CongestionLevel::Orange);
        assert_eq!(CongestionLevel::from_delay_ratio(1.5), CongestionLevel::Red);
        assert_eq!(CongestionLevel::from_delay_ratio(3.0), CongestionLevel::Red);
    }

    #[test]
    fn test_no_delay_scenario() {
        // 1200s with traffic over 1200s without: free-flowing, 20 min
        let summary = RouteSummary {
            duration_minutes: 1200 / 60,
            static_duration_minutes: 1200 / 60,
            distance_label: String::new(),
            delay_ratio: 1.0,
            congestion: CongestionLevel::from_delay_ratio(1.0),
        };
        assert_eq!(summary.congestion, CongestionLevel::Green);
        assert_eq!(summary.congestion.css_name(), "green");
        assert_eq!(summary.duration_label(), "20 min");
    }

    #[test]
    fn test_distance_label_miles() {
        assert_eq!(format_distance(24140.16, DistanceUnit::Miles), "15.0 mi");
    }

    #[test]
    fn test_distance_label_kilometers() {
        assert_eq!(format_distance(24140.0, DistanceUnit::Kilometers), "24.1 km");
    }
}
