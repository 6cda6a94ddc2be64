//! Geographic primitives shared across the pipeline.

use serde::{Deserialize, Serialize};

/// A point on the earth in floating-point degrees.
///
/// Immutable once produced; everything downstream (routing, weather,
/// segmentation) treats coordinates as values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Arithmetic mean of both axes.
    ///
    /// A straight-line approximation, not a point on any route. Good
    /// enough for anchoring a mid-journey weather lookup.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Named role of a weather-lookup anchor along the commute.
///
/// Ordered by position along the route: Home, Midway, Work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaypointRole {
    Home,
    Midway,
    Work,
}

impl WaypointRole {
    /// All roles in route order.
    pub const ALL: [WaypointRole; 3] = [
        WaypointRole::Home,
        WaypointRole::Midway,
        WaypointRole::Work,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WaypointRole::Home => "Home",
            WaypointRole::Midway => "Midway",
            WaypointRole::Work => "Work",
        }
    }
}

impl std::fmt::Display for WaypointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
