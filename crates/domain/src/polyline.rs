//! Encoded polyline codec
//!
//! Implements the standard encoded-polyline algorithm at 1e5 precision:
//! every coordinate is scaled, delta-encoded against the previous point,
//! zig-zag signed, split into 5-bit groups with a continuation bit and
//! offset by 63 into printable ASCII.
//!
//! # Examples
//!
//! ```
//! use domain::polyline;
//!
//! let path = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").expect("valid polyline");
//! assert_eq!(path.len(), 3);
//! assert_eq!(polyline::encode(path.points()), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//! ```

use thiserror::Error;

use crate::entities::CoordinateSequence;
use crate::value_objects::Coordinate;

/// Scale factor between degrees and encoded integers
const PRECISION: f64 = 1e5;

/// Offset added to each 5-bit chunk
const ASCII_OFFSET: u8 = 63;

/// Continuation flag on a chunk
const CONTINUATION: i64 = 0x20;

/// Chunk payload mask
const CHUNK_MASK: i64 = 0x1f;

/// Largest shift before a varint can no longer fit an i64
const MAX_SHIFT: u32 = 60;

/// Errors produced while decoding a malformed polyline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// Character outside the encoded alphabet ('?' to '~')
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Byte offset in the input
        position: usize,
        /// Offending character
        character: char,
    },

    /// Input ended in the middle of a value or a coordinate pair
    #[error("polyline truncated at position {position}")]
    Truncated {
        /// Byte offset where more input was expected
        position: usize,
    },

    /// A single value used more chunks than fit in 64 bits
    #[error("value overflow at position {position}")]
    Overflow {
        /// Byte offset of the overflowing chunk
        position: usize,
    },

    /// Accumulated coordinate left the valid range
    #[error("decoded coordinate out of range: {latitude}, {longitude}")]
    OutOfRange {
        /// Decoded latitude
        latitude: String,
        /// Decoded longitude
        longitude: String,
    },
}

/// Decode an encoded polyline into an ordered path
///
/// Empty input yields an empty sequence.
///
/// # Errors
///
/// Returns a [`PolylineError`] when the input is not a well-formed polyline.
pub fn decode(encoded: &str) -> Result<CoordinateSequence, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat = lat
            .checked_add(next_value(encoded, &mut index)?)
            .ok_or(PolylineError::Overflow { position: index })?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated { position: index });
        }
        lon = lon
            .checked_add(next_value(encoded, &mut index)?)
            .ok_or(PolylineError::Overflow { position: index })?;

        let latitude = lat as f64 / PRECISION;
        let longitude = lon as f64 / PRECISION;
        let point =
            Coordinate::new(latitude, longitude).map_err(|_| PolylineError::OutOfRange {
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
            })?;
        points.push(point);
    }

    Ok(points.into())
}

/// Decode, treating any malformed input as "no path available"
#[must_use]
pub fn decode_lossy(encoded: &str) -> CoordinateSequence {
    decode(encoded).unwrap_or_default()
}

/// Encode a path at 1e5 precision
#[must_use]
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = scale(point.latitude());
        let lon = scale(point.longitude());
        push_value(&mut out, lat - prev_lat);
        push_value(&mut out, lon - prev_lon);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

/// Read one zig-zag varint starting at `index`, advancing past it
fn next_value(encoded: &str, index: &mut usize) -> Result<i64, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated { position: *index });
        };
        if !(ASCII_OFFSET..=b'~').contains(&byte) {
            let character = encoded[*index..].chars().next().unwrap_or('\u{fffd}');
            return Err(PolylineError::InvalidCharacter {
                position: *index,
                character,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: *index });
        }

        let chunk = i64::from(byte - ASCII_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk < CONTINUATION {
            break;
        }
    }

    Ok(if result & 1 == 0 {
        result >> 1
    } else {
        !(result >> 1)
    })
}

fn push_value(out: &mut String, value: i64) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= CONTINUATION {
        out.push(char::from(((CONTINUATION | (v & CHUNK_MASK)) as u8) + ASCII_OFFSET));
        v >>= 5;
    }
    out.push(char::from((v as u8) + ASCII_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<Coordinate> {
        vec![
            Coordinate::new_unchecked(38.5, -120.2),
            Coordinate::new_unchecked(40.7, -120.95),
            Coordinate::new_unchecked(43.252, -126.453),
        ]
    }

    #[test]
    fn decodes_reference_polyline() {
        let path = decode(REFERENCE).unwrap();
        assert_eq!(path.len(), 3);
        for (got, want) in path.points().iter().zip(reference_points()) {
            assert!(got.approx_eq(&want, 1e-5), "{got} != {want}");
        }
    }

    #[test]
    fn encodes_reference_polyline() {
        assert_eq!(encode(&reference_points()), REFERENCE);
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        assert!(decode("").unwrap().is_empty());
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn single_point() {
        let p = [Coordinate::new_unchecked(43.0731, -89.4012)];
        let path = decode(&encode(&p)).unwrap();
        assert_eq!(path.len(), 1);
        assert!(path.points()[0].approx_eq(&p[0], 1e-5));
    }

    #[test]
    fn zero_delta_points() {
        let p = [
            Coordinate::new_unchecked(1.0, 1.0),
            Coordinate::new_unchecked(1.0, 1.0),
        ];
        let encoded = encode(&p);
        assert!(encoded.ends_with("??"));
        assert_eq!(decode(&encoded).unwrap().len(), 2);
    }

    #[test]
    fn rejects_character_outside_alphabet() {
        let err = decode("_p~iF ps|U").unwrap_err();
        assert_eq!(
            err,
            PolylineError::InvalidCharacter {
                position: 5,
                character: ' '
            }
        );
    }

    #[test]
    fn rejects_multibyte_character() {
        assert!(matches!(
            decode("_p~iFé").unwrap_err(),
            PolylineError::InvalidCharacter { position: 5, .. }
        ));
    }

    #[test]
    fn rejects_truncated_value() {
        // '_' carries the continuation bit, so input ends mid-value
        assert!(matches!(
            decode("_").unwrap_err(),
            PolylineError::Truncated { position: 1 }
        ));
    }

    #[test]
    fn rejects_dangling_latitude() {
        assert!(matches!(
            decode("_p~iF").unwrap_err(),
            PolylineError::Truncated { position: 5 }
        ));
    }

    #[test]
    fn rejects_overflowing_value() {
        let long = "_".repeat(20);
        assert!(matches!(
            decode(&long).unwrap_err(),
            PolylineError::Overflow { .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinate() {
        let encoded = encode(&[Coordinate::new_unchecked(95.0, 0.0)]);
        assert!(matches!(
            decode(&encoded).unwrap_err(),
            PolylineError::OutOfRange { .. }
        ));
    }

    #[test]
    fn lossy_decode_maps_errors_to_empty() {
        assert!(decode_lossy("not a polyline!").is_empty());
        assert_eq!(decode_lossy(REFERENCE).len(), 3);
    }
}
