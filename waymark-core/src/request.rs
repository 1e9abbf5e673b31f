//! Route requests as built by callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CustomModel, GeoPoint, Hints};

/// Locale used when a request does not name one.
pub const DEFAULT_LOCALE: &str = "en_US";

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

/// Parameters for one route call.
///
/// Output options not modelled as fields (`instructions`, `calc_points`,
/// `elevation`, `optimize`, `type`, `timeout`, `turn_description`, ...) are
/// carried in [`Self::hints`] and fall back to the client's configuration.
///
/// # Examples
///
/// ```
/// use waymark_core::{GeoPoint, RouteRequest};
///
/// let request = RouteRequest::new(GeoPoint::new(42.509225, 1.534728), GeoPoint::new(42.512602, 1.551558))
///     .with_profile("car")
///     .with_headings(vec![10.0, 90.0]);
/// assert_eq!(request.points.len(), 2);
/// assert_eq!(request.locale, "en_US");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Points to visit, in order.
    #[serde(default)]
    pub points: Vec<GeoPoint>,
    /// Server-side routing profile; may be empty.
    #[serde(default)]
    pub profile: String,
    /// Preferred heading per point in degrees; `NaN` leaves a point free.
    #[serde(default)]
    pub headings: Vec<f64>,
    /// Street name hints per point.
    #[serde(default)]
    pub point_hints: Vec<String>,
    /// Side of the road per point.
    #[serde(default)]
    pub curbsides: Vec<String>,
    /// Road types the points must not snap to.
    #[serde(default)]
    pub snap_preventions: Vec<String>,
    /// Path details to return, e.g. `street_name`.
    #[serde(default)]
    pub path_details: Vec<String>,
    /// Routing algorithm; empty selects the server default.
    #[serde(default)]
    pub algorithm: String,
    /// Locale for instruction texts.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Cost adjustments. Only usable with POST requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_model: Option<CustomModel>,
    /// Additional options.
    #[serde(default)]
    pub hints: Hints,
}

impl Default for RouteRequest {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            profile: String::new(),
            headings: Vec::new(),
            point_hints: Vec::new(),
            curbsides: Vec::new(),
            snap_preventions: Vec::new(),
            path_details: Vec::new(),
            algorithm: String::new(),
            locale: default_locale(),
            custom_model: None,
            hints: Hints::new(),
        }
    }
}

impl RouteRequest {
    /// Create a request between two points.
    #[must_use]
    pub fn new(from: GeoPoint, to: GeoPoint) -> Self {
        Self {
            points: vec![from, to],
            ..Self::default()
        }
    }

    /// Append a point.
    #[must_use]
    pub fn add_point(mut self, point: GeoPoint) -> Self {
        self.points.push(point);
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set per-point headings.
    #[must_use]
    pub fn with_headings(mut self, headings: Vec<f64>) -> Self {
        self.headings = headings;
        self
    }

    /// Set per-point street name hints.
    #[must_use]
    pub fn with_point_hints(mut self, point_hints: Vec<String>) -> Self {
        self.point_hints = point_hints;
        self
    }

    /// Set per-point curbsides.
    #[must_use]
    pub fn with_curbsides(mut self, curbsides: Vec<String>) -> Self {
        self.curbsides = curbsides;
        self
    }

    /// Set snap preventions.
    #[must_use]
    pub fn with_snap_preventions(mut self, snap_preventions: Vec<String>) -> Self {
        self.snap_preventions = snap_preventions;
        self
    }

    /// Set requested path details.
    #[must_use]
    pub fn with_path_details(mut self, path_details: Vec<String>) -> Self {
        self.path_details = path_details;
        self
    }

    /// Set the routing algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Attach a custom model.
    #[must_use]
    pub fn with_custom_model(mut self, custom_model: CustomModel) -> Self {
        self.custom_model = Some(custom_model);
        self
    }

    /// Add or replace a hint.
    #[must_use]
    pub fn put_hint(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.hints.put(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_request_is_empty_with_locale() {
        let request = RouteRequest::default();
        assert!(request.points.is_empty());
        assert!(request.profile.is_empty());
        assert_eq!(request.locale, DEFAULT_LOCALE);
    }

    #[rstest]
    fn reads_minimal_json() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"points": [{"lat": 45.5, "lon": -73.6}, {"lat": 45.4, "lon": -73.7}],
                "profile": "car",
                "hints": {"instructions": false}}"#,
        )
        .expect("deserialise request");
        assert_eq!(request.points.len(), 2);
        assert_eq!(request.locale, DEFAULT_LOCALE);
        assert!(!request.hints.get_bool("instructions", true));
        assert!(request.custom_model.is_none());
    }

    #[rstest]
    fn builder_appends_points_in_order() {
        let request = RouteRequest::default()
            .add_point(GeoPoint::new(45.5, -73.6))
            .add_point(GeoPoint::new(45.4, -73.7))
            .put_hint("turn_description", false);
        assert_eq!(
            request.points,
            [GeoPoint::new(45.5, -73.6), GeoPoint::new(45.4, -73.7)]
        );
        assert!(request.hints.contains_key("turn_description"));
    }
}
