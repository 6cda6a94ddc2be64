//! Encoded-polyline codec (precision 5).
//!
//! The routing service compresses a route's path into a short ASCII
//! string: each coordinate is delta-encoded from the previous one,
//! scaled by 1e5, zigzag-signed, and packed five bits at a time with a
//! continuation bit, offset by 63 into printable characters. Decoding
//! preserves point order exactly — the traffic segmenter slices the
//! result by index.

use crate::error::DecodeError;
use commute_core::Coordinate;

const PRECISION: f64 = 1e5;

/// Decode an encoded polyline into an ordered coordinate sequence.
///
/// Coordinates are reconstructed to within 1e-5 degrees of the values
/// the service encoded.
///
/// # Errors
///
/// Returns [`DecodeError`] when the string ends mid-chunk or contains a
/// byte outside the base-32 alphabet.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut path = Vec::new();
    let mut idx = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while idx < bytes.len() {
        let (delta_lat, next) = decode_value(bytes, idx)?;
        let (delta_lng, next) = decode_value(bytes, next)?;
        lat += delta_lat;
        lng += delta_lng;
        idx = next;
        path.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(path)
}

/// Encode a coordinate sequence into the compact polyline form.
///
/// Inverse of [`decode`]; round-trips exactly for coordinates on the
/// 1e-5 degree grid.
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for coord in path {
        let lat = (coord.latitude * PRECISION).round() as i64;
        let lng = (coord.longitude * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Decode one zigzag varint chunk starting at `idx`.
fn decode_value(bytes: &[u8], mut idx: usize) -> Result<(i64, usize), DecodeError> {
    let mut accumulator: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(idx) else {
            return Err(DecodeError::UnexpectedEnd { offset: idx });
        };
        let chunk = i64::from(byte) - 63;
        if !(0..64).contains(&chunk) {
            return Err(DecodeError::InvalidCharacter { offset: idx });
        }
        // Scaled coordinates fit comfortably in 60 bits; longer runs
        // are garbage and would overflow the accumulator
        if shift >= 60 {
            return Err(DecodeError::InvalidCharacter { offset: idx });
        }
        idx += 1;
        accumulator |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    // Undo zigzag: low bit is the sign
    let value = if accumulator & 1 != 0 {
        !(accumulator >> 1)
    } else {
        accumulator >> 1
    };
    Ok((value, idx))
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((0x20 | (v & 0x1f)) + 63) as u8) as char);
        v >>= 5;
    }
    out.push(((v + 63) as u8) as char);
}
