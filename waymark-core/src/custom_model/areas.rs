//! Named areas referenced by custom model conditions.
//!
//! Areas travel as a GeoJSON `FeatureCollection`. Geometries are held as
//! [`geo`] polygons, whose rings are closed on construction, so the first and
//! last position of every serialised ring are always identical.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while decoding GeoJSON areas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AreaError {
    /// The `type` member did not match the expected GeoJSON object.
    #[error("expected GeoJSON type {expected}, found {found}")]
    UnexpectedType {
        /// Type that was required.
        expected: &'static str,
        /// Type that was supplied.
        found: String,
    },
    /// A position had fewer than two ordinates.
    #[error("position must contain at least two numbers")]
    ShortPosition,
}

/// Polygonal geometry of an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryRepr", into = "GeometryRepr")]
pub enum AreaGeometry {
    /// A single polygon with optional holes.
    Polygon(Polygon<f64>),
    /// Several disjoint polygons.
    MultiPolygon(MultiPolygon<f64>),
}

impl From<Polygon<f64>> for AreaGeometry {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<MultiPolygon<f64>> for AreaGeometry {
    fn from(polygons: MultiPolygon<f64>) -> Self {
        Self::MultiPolygon(polygons)
    }
}

type Ring = Vec<Vec<f64>>;

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum GeometryRepr {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

impl From<AreaGeometry> for GeometryRepr {
    fn from(geometry: AreaGeometry) -> Self {
        match geometry {
            AreaGeometry::Polygon(polygon) => Self::Polygon {
                coordinates: polygon_rings(&polygon),
            },
            AreaGeometry::MultiPolygon(polygons) => Self::MultiPolygon {
                coordinates: polygons.0.iter().map(polygon_rings).collect(),
            },
        }
    }
}

impl TryFrom<GeometryRepr> for AreaGeometry {
    type Error = AreaError;

    fn try_from(repr: GeometryRepr) -> Result<Self, Self::Error> {
        match repr {
            GeometryRepr::Polygon { coordinates } => Ok(Self::Polygon(rings_polygon(coordinates)?)),
            GeometryRepr::MultiPolygon { coordinates } => {
                let polygons = coordinates
                    .into_iter()
                    .map(rings_polygon)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::MultiPolygon(MultiPolygon(polygons)))
            }
        }
    }
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Ring> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

fn rings_polygon(rings: Vec<Ring>) -> Result<Polygon<f64>, AreaError> {
    let mut line_strings = rings
        .into_iter()
        .map(ring_line_string)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let exterior = line_strings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Ok(Polygon::new(exterior, line_strings.collect()))
}

fn ring_line_string(ring: Ring) -> Result<LineString<f64>, AreaError> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(AreaError::ShortPosition),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// A single named area.
///
/// # Examples
///
/// ```
/// use geo::{LineString, Polygon};
/// use waymark_core::Feature;
///
/// let ring = LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
/// let area = Feature::new("square", Polygon::new(ring, vec![]));
/// let json = serde_json::to_value(&area)?;
/// assert_eq!(json["geometry"]["coordinates"][0][3], serde_json::json!([0.0, 0.0]));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureRepr", into = "FeatureRepr")]
pub struct Feature {
    /// Identifier used by custom model conditions, e.g. `in_area_1`.
    pub id: String,
    /// Area outline.
    pub geometry: AreaGeometry,
    /// Arbitrary properties forwarded untouched.
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Create an area without properties.
    #[must_use]
    pub fn new(id: impl Into<String>, geometry: impl Into<AreaGeometry>) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            properties: Map::new(),
        }
    }

    /// Attach a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[derive(Serialize, Deserialize)]
struct FeatureRepr {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    geometry: AreaGeometry,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

impl From<Feature> for FeatureRepr {
    fn from(feature: Feature) -> Self {
        Self {
            id: feature.id,
            kind: "Feature".to_owned(),
            geometry: feature.geometry,
            properties: Some(feature.properties),
        }
    }
}

impl TryFrom<FeatureRepr> for Feature {
    type Error = AreaError;

    fn try_from(repr: FeatureRepr) -> Result<Self, Self::Error> {
        expect_type("Feature", repr.kind)?;
        Ok(Self {
            id: repr.id,
            geometry: repr.geometry,
            properties: repr.properties.unwrap_or_default(),
        })
    }
}

/// Collection of named areas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CollectionRepr", into = "CollectionRepr")]
pub struct FeatureCollection {
    /// Areas in declaration order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Whether the collection holds no areas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Find an area by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|feature| feature.id == id)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CollectionRepr {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

impl From<FeatureCollection> for CollectionRepr {
    fn from(collection: FeatureCollection) -> Self {
        Self {
            kind: "FeatureCollection".to_owned(),
            features: collection.features,
        }
    }
}

impl TryFrom<CollectionRepr> for FeatureCollection {
    type Error = AreaError;

    fn try_from(repr: CollectionRepr) -> Result<Self, Self::Error> {
        expect_type("FeatureCollection", repr.kind)?;
        Ok(Self {
            features: repr.features,
        })
    }
}

fn expect_type(expected: &'static str, found: String) -> Result<(), AreaError> {
    if found == expected {
        Ok(())
    } else {
        Err(AreaError::UnexpectedType { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn open_square() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
            vec![],
        )
    }

    #[rstest]
    fn closes_rings_when_serialising(open_square: Polygon<f64>) {
        let json = serde_json::to_value(Feature::new("a", open_square)).expect("serialise area");
        let ring = json["geometry"]["coordinates"][0]
            .as_array()
            .expect("ring array");
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[rstest]
    fn writes_empty_properties_object(open_square: Polygon<f64>) {
        let json = serde_json::to_value(Feature::new("a", open_square)).expect("serialise area");
        assert_eq!(json["type"], json!("Feature"));
        assert_eq!(json["properties"], json!({}));
    }

    #[rstest]
    fn reads_null_properties_as_empty() {
        let feature: Feature = serde_json::from_value(json!({
            "id": "x",
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]},
            "properties": null
        }))
        .expect("deserialise area");
        assert!(feature.properties.is_empty());
        assert!(matches!(feature.geometry, AreaGeometry::Polygon(_)));
    }

    #[rstest]
    fn reads_multipolygons() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [{
                "id": "islands",
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]],
                    [[[5.0, 5.0], [5.0, 6.0], [6.0, 6.0], [5.0, 5.0]]]
                ]},
                "properties": {"name": "archipelago"}
            }]
        }))
        .expect("deserialise collection");
        let area = collection.get("islands").expect("area present");
        match &area.geometry {
            AreaGeometry::MultiPolygon(polygons) => assert_eq!(polygons.0.len(), 2),
            other => panic!("expected MultiPolygon, got {other:?}"),
        }
        assert_eq!(area.properties.get("name"), Some(&json!("archipelago")));
    }

    #[rstest]
    #[case(json!({"type": "Feature", "features": []}))]
    #[case(json!({"type": "FeatureCollection", "features": [{"id": "x", "type": "Feature",
        "geometry": {"type": "Polygon", "coordinates": [[[0.0], [1.0, 1.0], [0.0, 0.0]]]}}]}))]
    fn rejects_invalid_collections(#[case] value: Value) {
        assert!(serde_json::from_value::<FeatureCollection>(value).is_err());
    }
}
