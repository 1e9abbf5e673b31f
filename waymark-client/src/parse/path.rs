//! Wire shape of a single path and its conversion to [`ResponsePath`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use waymark_core::{Instruction, PathDetail, PathPoint, ResponsePath, polyline};

use crate::ClientError;

/// Multiplier assumed when a path does not state one.
const DEFAULT_POINTS_MULTIPLIER: f64 = 1e5;

/// Flags that influence how a path is read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathOptions {
    /// Encoded geometry carries a third elevation value.
    pub elevation: bool,
    /// Keep instruction texts; otherwise they are replaced by street names.
    pub turn_description: bool,
}

fn default_multiplier() -> f64 {
    DEFAULT_POINTS_MULTIPLIER
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct PathRepr {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    time: u64,
    #[serde(default)]
    weight: f64,
    #[serde(default)]
    ascend: f64,
    #[serde(default)]
    descend: f64,
    #[serde(default = "default_true")]
    points_encoded: bool,
    #[serde(default = "default_multiplier")]
    points_encoded_multiplier: f64,
    #[serde(default)]
    points: Option<Geometry>,
    #[serde(default)]
    snapped_waypoints: Option<Geometry>,
    #[serde(default)]
    bbox: Option<[f64; 4]>,
    #[serde(default)]
    instructions: Vec<InstructionRepr>,
    #[serde(default)]
    points_order: Vec<usize>,
    #[serde(default)]
    description: Vec<String>,
    #[serde(default)]
    details: BTreeMap<String, Vec<(usize, usize, Value)>>,
}

/// Geometry as either an encoded polyline or a GeoJSON `LineString`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Geometry {
    Encoded(String),
    LineString { coordinates: Vec<Vec<f64>> },
}

#[derive(Debug, Deserialize)]
struct InstructionRepr {
    #[serde(default)]
    sign: i32,
    #[serde(default)]
    text: String,
    #[serde(default)]
    street_name: String,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    time: u64,
    interval: (usize, usize),
    #[serde(default)]
    exit_number: Option<u32>,
    #[serde(default)]
    turn_angle: Option<f64>,
}

impl PathRepr {
    /// Convert into a [`ResponsePath`], decoding geometry as needed.
    pub(crate) fn into_path(self, options: PathOptions) -> Result<ResponsePath, ClientError> {
        let geometry = GeometryOptions {
            encoded: self.points_encoded,
            multiplier: self.points_encoded_multiplier,
            elevation: options.elevation,
        };
        let points = geometry.decode(self.points)?;
        let snapped_waypoints = geometry.decode(self.snapped_waypoints)?;

        let instructions = self
            .instructions
            .into_iter()
            .map(|instruction| Instruction {
                text: if options.turn_description {
                    instruction.text
                } else {
                    instruction.street_name.clone()
                },
                sign: instruction.sign,
                street_name: instruction.street_name,
                distance: instruction.distance,
                time: instruction.time,
                interval: instruction.interval,
                exit_number: instruction.exit_number,
                turn_angle: instruction.turn_angle,
            })
            .collect();

        let details = self
            .details
            .into_iter()
            .map(|(name, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|(from, to, value)| PathDetail { from, to, value })
                    .collect();
                (name, entries)
            })
            .collect();

        Ok(ResponsePath {
            distance: self.distance,
            time: self.time,
            weight: self.weight,
            ascend: self.ascend,
            descend: self.descend,
            points,
            snapped_waypoints,
            bbox: self.bbox,
            instructions,
            points_order: self.points_order,
            description: self.description,
            details,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct GeometryOptions {
    encoded: bool,
    multiplier: f64,
    elevation: bool,
}

impl GeometryOptions {
    fn decode(self, geometry: Option<Geometry>) -> Result<Vec<PathPoint>, ClientError> {
        match geometry {
            None => Ok(Vec::new()),
            Some(Geometry::Encoded(encoded)) if self.encoded => {
                Ok(polyline::decode(&encoded, self.elevation, self.multiplier)?)
            }
            Some(Geometry::Encoded(_)) => Err(malformed(
                "path geometry is a string but points_encoded is false",
            )),
            Some(Geometry::LineString { coordinates }) => coordinates
                .iter()
                .enumerate()
                .map(|(index, position)| {
                    position_to_point(position).ok_or_else(|| {
                        malformed(format!(
                            "path position {index} has {} ordinates, expected 2 or 3",
                            position.len()
                        ))
                    })
                })
                .collect(),
        }
    }
}

fn malformed(message: impl std::fmt::Display) -> ClientError {
    ClientError::Parse(<serde_json::Error as serde::de::Error>::custom(message))
}

/// GeoJSON positions are `[lon, lat]` or `[lon, lat, ele]`.
fn position_to_point(position: &[f64]) -> Option<PathPoint> {
    match *position {
        [lon, lat] => Some(PathPoint { lat, lon, ele: None }),
        [lon, lat, ele] => Some(PathPoint {
            lat,
            lon,
            ele: Some(ele),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const WITH_TEXT: PathOptions = PathOptions {
        elevation: false,
        turn_description: true,
    };

    fn parse(value: Value, options: PathOptions) -> ResponsePath {
        let repr: PathRepr = serde_json::from_value(value).expect("path repr");
        repr.into_path(options).expect("path")
    }

    #[rstest]
    fn decodes_encoded_points_with_multiplier() {
        let path = parse(
            json!({
                "distance": 1.5,
                "time": 2000,
                "points_encoded": true,
                "points_encoded_multiplier": 1e5,
                "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
                "bbox": [-126.453, 38.5, -120.2, 43.252]
            }),
            WITH_TEXT,
        );
        assert_eq!(path.points.len(), 3);
        assert_eq!(path.points[0].lat, 38.5);
        assert_eq!(path.points[2].lon, -126.453);
        assert_eq!(path.time, 2000);
        assert_eq!(path.bbox, Some([-126.453, 38.5, -120.2, 43.252]));
    }

    #[rstest]
    fn multiplier_defaults_to_classic_precision() {
        let path = parse(json!({"points": "_p~iF~ps|U"}), WITH_TEXT);
        assert_eq!(path.points.len(), 1);
        assert_eq!(path.points[0].lon, -120.2);
    }

    #[rstest]
    fn reads_geojson_line_string_with_elevation() {
        let path = parse(
            json!({
                "points_encoded": false,
                "points": {"type": "LineString", "coordinates": [[1.5, 42.5, 1100.0], [1.6, 42.6, 1120.5]]}
            }),
            WITH_TEXT,
        );
        assert_eq!(
            path.points[1],
            PathPoint {
                lat: 42.6,
                lon: 1.6,
                ele: Some(1120.5)
            }
        );
    }

    #[rstest]
    #[case(true, "Turn left onto Main Street")]
    #[case(false, "Main Street")]
    fn instruction_text_follows_turn_description(#[case] turn_description: bool, #[case] text: &str) {
        let path = parse(
            json!({
                "instructions": [{
                    "sign": -2,
                    "text": "Turn left onto Main Street",
                    "street_name": "Main Street",
                    "distance": 12.5,
                    "time": 3000,
                    "interval": [0, 1]
                }]
            }),
            PathOptions {
                elevation: false,
                turn_description,
            },
        );
        assert_eq!(path.instructions[0].text, text);
        assert_eq!(path.instructions[0].interval, (0, 1));
    }

    #[rstest]
    fn reads_details_and_order() {
        let path = parse(
            json!({
                "points_order": [0, 2, 1],
                "description": ["via A"],
                "details": {"street_name": [[0, 2, "Main Street"], [2, 4, null]]}
            }),
            WITH_TEXT,
        );
        assert_eq!(path.points_order, [0, 2, 1]);
        assert_eq!(path.description, ["via A"]);
        let names = &path.details["street_name"];
        assert_eq!(
            names[0],
            PathDetail {
                from: 0,
                to: 2,
                value: json!("Main Street")
            }
        );
        assert_eq!(names[1].value, Value::Null);
    }

    #[rstest]
    #[case(json!([[1.5], [1.6, 42.6]]))]
    #[case(json!([[1.5, 42.5], [1.6, 42.6, 1100.0, 7.0]]))]
    #[case(json!([[]]))]
    fn short_or_long_positions_are_parse_errors(#[case] coordinates: Value) {
        let repr: PathRepr = serde_json::from_value(json!({
            "points_encoded": false,
            "points": {"type": "LineString", "coordinates": coordinates}
        }))
        .expect("path repr");
        let err = repr.into_path(WITH_TEXT).expect_err("bad position");
        assert!(matches!(err, ClientError::Parse(_)), "unexpected error {err:?}");
    }

    #[rstest]
    fn corrupt_polyline_is_a_geometry_error() {
        let repr: PathRepr = serde_json::from_value(json!({"points": "_p~iF~"})).expect("path repr");
        let err = repr.into_path(WITH_TEXT).expect_err("truncated polyline");
        assert!(matches!(err, ClientError::Geometry(_)));
    }
}
