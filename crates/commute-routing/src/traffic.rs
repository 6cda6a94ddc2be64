//! Traffic-speed segmentation of a decoded route path.

use commute_core::Coordinate;
use serde::{Deserialize, Serialize};

/// Qualitative traffic speed reported by the routing service.
///
/// The wire values are SCREAMING_SNAKE_CASE strings; anything the
/// service adds later lands on `Unknown` instead of failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeedCategory {
    #[default]
    Normal,
    Slow,
    TrafficJam,
    #[serde(other)]
    Unknown,
}

/// A sub-range of the decoded path annotated with a speed category.
///
/// Indices are inclusive on both ends and refer to positions in the
/// decoded path. Consecutive intervals are contract-assumed ordered and
/// non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficInterval {
    pub start_index: usize,
    pub end_index: usize,
    pub speed: SpeedCategory,
}

/// Render color for one traffic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentColor {
    Blue,
    Orange,
    Red,
}

impl SegmentColor {
    /// CSS color name used by both renderers.
    pub fn css_name(&self) -> &'static str {
        match self {
            SegmentColor::Blue => "blue",
            SegmentColor::Orange => "orange",
            SegmentColor::Red => "red",
        }
    }
}

impl From<SpeedCategory> for SegmentColor {
    fn from(speed: SpeedCategory) -> Self {
        match speed {
            SpeedCategory::Slow => SegmentColor::Orange,
            SpeedCategory::TrafficJam => SegmentColor::Red,
            SpeedCategory::Normal | SpeedCategory::Unknown => SegmentColor::Blue,
        }
    }
}

/// A colored slice of the route path, ready to draw.
///
/// Only produced by [`segment`]; adjacent segments share their boundary
/// point so the drawn line is continuous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSegment {
    pub path: Vec<Coordinate>,
    pub color: SegmentColor,
}

/// Partition a decoded path into colored traffic segments.
///
/// Each interval becomes one segment holding `path[start..=end]`. With
/// no intervals the whole path becomes a single blue segment, so the
/// output is never empty when the path isn't. An empty path yields an
/// empty output. Pure and deterministic; no I/O.
pub fn segment(path: &[Coordinate], intervals: &[TrafficInterval]) -> Vec<TrafficSegment> {
    if path.is_empty() {
        return Vec::new();
    }

    if intervals.is_empty() {
        return vec![TrafficSegment {
            path: path.to_vec(),
            color: SegmentColor::Blue,
        }];
    }

    let last = path.len() - 1;
    intervals
        .iter()
        .filter_map(|interval| {
            // Clamp to the path; an interval entirely past the end is dropped
            if interval.start_index > last {
                tracing::warn!(
                    start = interval.start_index,
                    path_len = path.len(),
                    "traffic interval starts past end of path, skipping"
                );
                return None;
            }
            let end = interval.end_index.min(last);
            Some(TrafficSegment {
                path: path[interval.start_index..=end].to_vec(),
                color: interval.speed.into(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(52.0 + i as f64 * 0.01, -1.9))
            .collect()
    }

    fn interval(start: usize, end: usize, speed: SpeedCategory) -> TrafficInterval {
        TrafficInterval {
            start_index: start,
            end_index: end,
            speed,
        }
    }

    #[test]
    fn test_empty_intervals_yield_one_blue_segment() {
        let p = path(5);
        let segments = segment(&p, &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].color, SegmentColor::Blue);
        assert_eq!(segments[0].path, p);
    }

    #[test]
    fn test_empty_path_yields_empty_output() {
        let segments = segment(&[], &[interval(0, 3, SpeedCategory::Slow)]);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_adjacent_segments_share_boundary_point() {
        let p = path(7);
        let segments = segment(
            &p,
            &[
                interval(0, 3, SpeedCategory::Normal),
                interval(3, 6, SpeedCategory::TrafficJam),
            ],
        );
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].path.len(), 4);
        assert_eq!(segments[1].path.len(), 4);
        // Shared point: last of one is first of the next
        assert_eq!(segments[0].path[3], segments[1].path[0]);
    }

    #[test]
    fn test_color_mapping_is_total() {
        assert_eq!(SegmentColor::from(SpeedCategory::Normal), SegmentColor::Blue);
        assert_eq!(SegmentColor::from(SpeedCategory::Slow), SegmentColor::Orange);
        assert_eq!(
            SegmentColor::from(SpeedCategory::TrafficJam),
            SegmentColor::Red
        );
        assert_eq!(SegmentColor::from(SpeedCategory::Unknown), SegmentColor::Blue);
    }

    #[test]
    fn test_unrecognized_wire_speed_maps_to_unknown() {
        let speed: SpeedCategory = serde_json::from_str("\"SPEED_UNSPECIFIED\"").unwrap();
        assert_eq!(speed, SpeedCategory::Unknown);
        assert_eq!(SegmentColor::from(speed), SegmentColor::Blue);
    }

    #[test]
    fn test_interval_end_clamped_to_path() {
        let p = path(4);
        let segments = segment(&p, &[interval(1, 99, SpeedCategory::Slow)]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].path.len(), 3);
        assert_eq!(segments[0].color, SegmentColor::Orange);
    }

    #[test]
    fn test_interval_past_end_of_path_is_dropped() {
        let p = path(3);
        let segments = segment(&p, &[interval(10, 12, SpeedCategory::TrafficJam)]);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let p = path(10);
        let ivs = [
            interval(0, 4, SpeedCategory::Slow),
            interval(4, 9, SpeedCategory::Normal),
        ];
        assert_eq!(segment(&p, &ivs), segment(&p, &ivs));
    }

    #[test]
    fn test_css_names() {
        assert_eq!(SegmentColor::Blue.css_name(), "blue");
        assert_eq!(SegmentColor::Orange.css_name(), "orange");
        assert_eq!(SegmentColor::Red.css_name(), "red");
    }
}
