//! Decoding of encoded polylines returned in route paths.
//!
//! The service encodes coordinates with the Google polyline algorithm. The
//! coordinate precision is configurable via a multiplier (`1e5` classically,
//! `1e6` when the client asks for it); elevation, when present, is always
//! scaled by 100.

use thiserror::Error;

use crate::response::PathPoint;

/// Scale applied to encoded elevation values.
const ELEVATION_MULTIPLIER: f64 = 100.0;

/// Errors from [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The string ended in the middle of a value.
    #[error("encoded polyline is truncated at byte {offset}")]
    Truncated {
        /// Byte offset at which input ran out.
        offset: usize,
    },
    /// A byte outside the polyline alphabet was found.
    #[error("invalid polyline character {found:?} at byte {offset}")]
    InvalidCharacter {
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending character.
        found: char,
    },
    /// A value, or the running coordinate it is added to, does not fit into
    /// 64 bits.
    #[error("polyline value at byte {offset} overflows")]
    Overflow {
        /// Byte offset of the offending value.
        offset: usize,
    },
}

/// Decode a polyline into points.
///
/// With `with_elevation` each point consumes three values: latitude,
/// longitude and elevation.
///
/// # Examples
///
/// ```
/// use waymark_core::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", false, 1e5)?;
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[0].lat, 38.5);
/// assert_eq!(points[0].lon, -120.2);
/// # Ok::<(), waymark_core::polyline::PolylineError>(())
/// ```
pub fn decode(
    encoded: &str,
    with_elevation: bool,
    multiplier: f64,
) -> Result<Vec<PathPoint>, PolylineError> {
    let mut reader = ValueReader {
        bytes: encoded.as_bytes(),
        offset: 0,
    };
    let mut points = Vec::new();
    let (mut lat, mut lon, mut ele) = (0_i64, 0_i64, 0_i64);

    while !reader.is_done() {
        lat = reader.accumulate(lat)?;
        lon = reader.accumulate(lon)?;
        let elevation = if with_elevation {
            ele = reader.accumulate(ele)?;
            Some(ele as f64 / ELEVATION_MULTIPLIER)
        } else {
            None
        };
        points.push(PathPoint {
            lat: lat as f64 / multiplier,
            lon: lon as f64 / multiplier,
            ele: elevation,
        });
    }
    Ok(points)
}

struct ValueReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl ValueReader<'_> {
    const fn is_done(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Read the next delta and add it to `total`.
    fn accumulate(&mut self, total: i64) -> Result<i64, PolylineError> {
        let start = self.offset;
        let delta = self.next_value()?;
        total
            .checked_add(delta)
            .ok_or(PolylineError::Overflow { offset: start })
    }

    fn next_value(&mut self) -> Result<i64, PolylineError> {
        let mut result: i64 = 0;
        let mut shift: u32 = 0;
        loop {
            let Some(&byte) = self.bytes.get(self.offset) else {
                return Err(PolylineError::Truncated {
                    offset: self.offset,
                });
            };
            if !(63..=126).contains(&byte) {
                return Err(PolylineError::InvalidCharacter {
                    offset: self.offset,
                    found: char::from(byte),
                });
            }
            if shift > 58 {
                return Err(PolylineError::Overflow {
                    offset: self.offset,
                });
            }
            self.offset += 1;
            let chunk = i64::from(byte - 63);
            result |= (chunk & 0x1f) << shift;
            shift += 5;
            if chunk < 0x20 {
                break;
            }
        }
        Ok(if result & 1 == 0 {
            result >> 1
        } else {
            !(result >> 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_reference_polyline() {
        let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", false, 1e5).expect("decode");
        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.lat, p.lon)).collect();
        assert_eq!(
            coords,
            [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]
        );
        assert!(points.iter().all(|p| p.ele.is_none()));
    }

    #[rstest]
    fn decodes_elevation_with_fixed_scale() {
        // lat 1.0, lon 2.0 at 1e5, elevation 10.5 m => 1050
        let points = decode("_ibE_seKs`A", true, 1e5).expect("decode");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lat, 1.0);
        assert_eq!(points[0].lon, 2.0);
        assert_eq!(points[0].ele, Some(10.5));
    }

    #[rstest]
    fn empty_input_has_no_points() {
        assert!(decode("", false, 1e6).expect("decode").is_empty());
    }

    #[rstest]
    #[case("_p~iF", PolylineError::Truncated { offset: 5 })]
    #[case("_p~iF~ps|", PolylineError::Truncated { offset: 9 })]
    #[case("_p~iF ps|U", PolylineError::InvalidCharacter { offset: 5, found: ' ' })]
    fn rejects_malformed_input(#[case] encoded: &str, #[case] expected: PolylineError) {
        assert_eq!(decode(encoded, false, 1e5), Err(expected));
    }

    #[rstest]
    fn rejects_coordinates_that_overflow() {
        // Each 12-byte group decodes to -2^59; the seventeenth latitude sum
        // no longer fits and starts at value 32.
        let encoded = "~~~~~~~~~~~^".repeat(40);
        assert_eq!(
            decode(&encoded, false, 1e5),
            Err(PolylineError::Overflow { offset: 32 * 12 })
        );
    }
}
