//! Encoded-polyline codec.
//!
//! # Format
//!
//! The common "encoded polyline" format at fixed precision 1e-5 degrees:
//!
//! ```text
//! for each point:  lat delta, lng delta    (relative to previous point)
//! each delta:      zigzag (value << 1, inverted if negative)
//!                  split into 5-bit groups, least significant first
//!                  every group but the last carries continuation bit 0x20
//!                  each group emitted as ASCII (group + 63)
//! ```
//!
//! Decoding is strict: truncated groups, a latitude without its longitude,
//! characters outside `'?'..='~'`, values too long for 64 bits and running
//! coordinates that overflow are all reported as [`PathError::Malformed`]
//! instead of read past the end.

use hos_core::Coordinate;

use crate::{Path, PathError, PathResult};

/// Units per degree at precision 5.
const SCALE: f64 = 100_000.0;

const CHAR_OFFSET: u8 = 63;
const CONTINUATION: u64 = 0x20;
const GROUP_MASK: u64 = 0x1f;
/// Last valid character: `'~'` (63 + 0x3f).
const CHAR_MAX: u8 = CHAR_OFFSET + 0x3f;

/// Decode an encoded polyline into a [`Path`].
///
/// An empty string decodes to an empty path.
pub fn decode(encoded: &str) -> PathResult<Path> {
    let bytes = encoded.as_bytes();
    let mut pos = 0usize;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while pos < bytes.len() {
        lat = accumulate(lat, next_delta(bytes, &mut pos)?, pos)?;
        if pos >= bytes.len() {
            return Err(PathError::Malformed {
                position: pos,
                reason: "latitude without longitude",
            });
        }
        lng = accumulate(lng, next_delta(bytes, &mut pos)?, pos)?;

        points.push(Coordinate::new(lat as f64 / SCALE, lng as f64 / SCALE));
    }

    Ok(Path::new(points))
}

/// Apply a delta to a running coordinate without overflowing.
fn accumulate(value: i64, delta: i64, pos: usize) -> PathResult<i64> {
    value.checked_add(delta).ok_or(PathError::Malformed {
        position: pos,
        reason: "coordinate out of range",
    })
}

/// Read one zigzag varint starting at `*pos`, advancing past it.
fn next_delta(bytes: &[u8], pos: &mut usize) -> PathResult<i64> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(PathError::Malformed {
                position: *pos,
                reason: "input ends inside a value",
            });
        };
        if !(CHAR_OFFSET..=CHAR_MAX).contains(&byte) {
            return Err(PathError::Malformed {
                position: *pos,
                reason: "character outside encoding range",
            });
        }
        if shift >= u64::BITS {
            return Err(PathError::Malformed {
                position: *pos,
                reason: "value exceeds 64 bits",
            });
        }

        let chunk = (byte - CHAR_OFFSET) as u64;
        // The 13th group has room for four bits only.
        if shift + 5 > u64::BITS && (chunk & GROUP_MASK) >> (u64::BITS - shift) != 0 {
            return Err(PathError::Malformed {
                position: *pos,
                reason: "value exceeds 64 bits",
            });
        }
        *pos += 1;
        result |= (chunk & GROUP_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// Encode coordinates as a polyline string.  Inverse of [`decode`] up to
/// rounding to 1e-5 degrees.
pub fn encode<'a, I>(points: I) -> String
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for p in points {
        let lat = (p.lat * SCALE).round() as i64;
        let lng = (p.lng * SCALE).round() as i64;
        push_delta(&mut out, lat - prev_lat);
        push_delta(&mut out, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn push_delta(out: &mut String, delta: i64) {
    let zigzag = if delta < 0 { !(delta << 1) } else { delta << 1 };
    let mut value = zigzag as u64;
    while value >= CONTINUATION {
        out.push((((value & GROUP_MASK) | CONTINUATION) as u8 + CHAR_OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + CHAR_OFFSET) as char);
}
