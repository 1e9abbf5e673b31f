//! Client-supplied rules adjusting routing cost.
//!
//! A [`CustomModel`] combines speed and priority [`Statement`]s with named
//! [`FeatureCollection`] areas those statements may reference. The JSON shape
//! follows the routing service:
//!
//! ```json
//! {
//!   "distance_influence": 69.0,
//!   "heading_penalty": 22.0,
//!   "areas": {"type": "FeatureCollection", "features": []},
//!   "priority": [{"if": "surface == DIRT", "multiply_by": "0.7"}],
//!   "speed": [{"if": "road_class == MOTORWAY", "limit_to": "80"}]
//! }
//! ```
//!
//! Unset numeric parameters are omitted rather than written as `null`, and an
//! explicit `null` reads back as `None`.

mod areas;
mod statement;

pub use areas::{AreaError, AreaGeometry, Feature, FeatureCollection};
pub use statement::{Keyword, Op, Statement};

use serde::{Deserialize, Serialize};

/// Speed, priority and area adjustments sent with a POST route request.
///
/// # Examples
///
/// ```
/// use waymark_core::{CustomModel, Op, Statement};
///
/// let model = CustomModel::new()
///     .add_to_speed(Statement::if_then("road_class == MOTORWAY", Op::Limit, "80"))
///     .with_distance_influence(69.0);
/// let json = serde_json::to_value(&model)?;
/// assert_eq!(json["distance_influence"], serde_json::json!(69.0));
/// assert!(json.get("heading_penalty").is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomModel {
    /// Weight of distance relative to time; `None` leaves the server default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_influence: Option<f64>,
    /// Penalty in seconds for violating a requested heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_penalty: Option<f64>,
    /// Areas referenced by statements as `in_<id>`.
    #[serde(default)]
    pub areas: FeatureCollection,
    /// Priority statements, evaluated in order.
    #[serde(default)]
    pub priority: Vec<Statement>,
    /// Speed statements, evaluated in order.
    #[serde(default)]
    pub speed: Vec<Statement>,
}

impl CustomModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a speed statement.
    #[must_use]
    pub fn add_to_speed(mut self, statement: Statement) -> Self {
        self.speed.push(statement);
        self
    }

    /// Append a priority statement.
    #[must_use]
    pub fn add_to_priority(mut self, statement: Statement) -> Self {
        self.priority.push(statement);
        self
    }

    /// Set the distance influence.
    #[must_use]
    pub fn with_distance_influence(mut self, value: f64) -> Self {
        self.distance_influence = Some(value);
        self
    }

    /// Set the heading penalty.
    #[must_use]
    pub fn with_heading_penalty(mut self, value: f64) -> Self {
        self.heading_penalty = Some(value);
        self
    }

    /// Replace the area collection.
    #[must_use]
    pub fn with_areas(mut self, areas: FeatureCollection) -> Self {
        self.areas = areas;
        self
    }

    /// Append one area.
    #[must_use]
    pub fn add_area(mut self, area: Feature) -> Self {
        self.areas.features.push(area);
        self
    }
}
