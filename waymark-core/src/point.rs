//! Geographic points exchanged with the routing service.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A WGS84 position given as latitude and longitude in degrees.
///
/// # Examples
///
/// ```
/// use waymark_core::GeoPoint;
///
/// let point = GeoPoint::new(42.509225, 1.534728);
/// assert_eq!(point.to_query_value(), "42.509225,1.534728");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Render the point as `lat,lon` with six decimals of precision.
    ///
    /// Whole numbers keep a trailing `.0` so `45` renders as `45.0`.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{}",
            format_decimal(round6(self.lat)),
            format_decimal(round6(self.lon))
        )
    }

    /// The `[lon, lat]` pair used in JSON request bodies.
    #[must_use]
    pub const fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lon,
            y: point.lat,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}

/// Round to six decimal places, roughly ten centimetres at the equator.
#[must_use]
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Format a float the way the routing service expects decimal parameters.
///
/// Finite values always carry a fractional part (`10.0`, `1.5`). Magnitudes
/// outside `[1e-3, 1e7)` use an upper-case exponent with a fractional
/// mantissa (`1.0E7`, `2.5E-4`). `NaN` renders as `NaN` and infinities as
/// `Infinity`/`-Infinity`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }
    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}
