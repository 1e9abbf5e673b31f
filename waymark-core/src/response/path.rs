//! A single route alternative returned by the service.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A decoded path coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Elevation in metres when the request asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
}

/// A turn instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// Turn sign, e.g. `0` for continue, `-2` for left, `4` for finish.
    pub sign: i32,
    /// Human-readable description. Holds the street name when turn
    /// descriptions were disabled for the request.
    pub text: String,
    /// Street the instruction leads onto.
    pub street_name: String,
    /// Distance covered by this instruction in metres.
    pub distance: f64,
    /// Time covered by this instruction in milliseconds.
    pub time: u64,
    /// Inclusive range of indices into [`ResponsePath::points`].
    pub interval: (usize, usize),
    /// Roundabout exit taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_number: Option<u32>,
    /// Roundabout turn angle in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_angle: Option<f64>,
}

/// One entry of a path detail such as `street_name` or `max_speed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathDetail {
    /// First point index covered.
    pub from: usize,
    /// Last point index covered.
    pub to: usize,
    /// Detail value for this interval.
    pub value: Value,
}

/// A route alternative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponsePath {
    /// Length in metres.
    pub distance: f64,
    /// Duration in milliseconds.
    pub time: u64,
    /// Routing weight.
    pub weight: f64,
    /// Total ascent in metres.
    pub ascend: f64,
    /// Total descent in metres.
    pub descend: f64,
    /// Path geometry.
    pub points: Vec<PathPoint>,
    /// Request points snapped to the road network.
    pub snapped_waypoints: Vec<PathPoint>,
    /// `[min_lon, min_lat, max_lon, max_lat]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    /// Turn instructions.
    pub instructions: Vec<Instruction>,
    /// Visiting order of the request points when optimisation was requested.
    pub points_order: Vec<usize>,
    /// Free-text description lines.
    pub description: Vec<String>,
    /// Path details keyed by detail name.
    pub details: BTreeMap<String, Vec<PathDetail>>,
}

impl ResponsePath {
    /// The geometry covered by an instruction.
    ///
    /// Returns an empty slice when the interval lies outside the path.
    #[must_use]
    pub fn instruction_points(&self, instruction: &Instruction) -> &[PathPoint] {
        let (from, to) = instruction.interval;
        self.points.get(from..=to).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(lat: f64, lon: f64) -> PathPoint {
        PathPoint {
            lat,
            lon,
            ele: None,
        }
    }

    fn instruction(interval: (usize, usize)) -> Instruction {
        Instruction {
            sign: 0,
            text: "Continue".to_owned(),
            street_name: String::new(),
            distance: 10.0,
            time: 1_000,
            interval,
            exit_number: None,
            turn_angle: None,
        }
    }

    #[rstest]
    #[case((0, 1), 2)]
    #[case((2, 2), 1)]
    #[case((2, 5), 0)]
    fn slices_instruction_geometry(#[case] interval: (usize, usize), #[case] expected: usize) {
        let path = ResponsePath {
            points: vec![point(1.0, 1.0), point(1.1, 1.1), point(1.2, 1.2)],
            ..ResponsePath::default()
        };
        assert_eq!(path.instruction_points(&instruction(interval)).len(), expected);
    }
}
