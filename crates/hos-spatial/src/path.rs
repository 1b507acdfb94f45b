//! Ordered coordinate sequences and along-path interpolation.
//!
//! # Interpolation model
//!
//! Segment lengths are great-circle (haversine) miles, but the position
//! *within* a segment is a straight lat/lng blend.  Routed paths have
//! points every few hundred metres, where the two agree to well under the
//! encoding precision.

use hos_core::Coordinate;

use crate::{PathError, PathResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered route geometry, start → end.
///
/// Duplicate consecutive points are allowed and treated as zero-length
/// segments.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Coordinate>,
}

impl Path {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Join route legs in travel order.
    pub fn concat<I: IntoIterator<Item = Path>>(legs: I) -> Self {
        let mut path = Path::default();
        for leg in legs {
            path.extend(leg.points);
        }
        path
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Total haversine length in miles (0 for paths with < 2 points).
    pub fn length_miles(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_miles(w[1]))
            .sum()
    }

    /// The coordinate `target_miles` along the path.  See
    /// [`coordinate_at_distance`].
    pub fn coordinate_at_distance(&self, target_miles: f64) -> PathResult<Coordinate> {
        coordinate_at_distance(&self.points, target_miles)
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(points: Vec<Coordinate>) -> Self {
        Self { points }
    }
}

impl FromIterator<Coordinate> for Path {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

impl Extend<Coordinate> for Path {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ── Interpolation ─────────────────────────────────────────────────────────────

/// Locate the coordinate `target_miles` from the start of `path`.
///
/// - Empty `path` → [`PathError::EmptyPath`].
/// - `target_miles <= 0` → the first point.
/// - Past the end of the path → the last point (clamped, not an error).
/// - A zero-length segment that reaches the target yields its start point
///   rather than dividing by zero.
pub fn coordinate_at_distance(path: &[Coordinate], target_miles: f64) -> PathResult<Coordinate> {
    let (&first, _) = path.split_first().ok_or(PathError::EmptyPath)?;
    if target_miles <= 0.0 {
        return Ok(first);
    }

    let mut covered = 0.0;
    for w in path.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg_len = a.distance_miles(b);

        if covered + seg_len >= target_miles {
            if seg_len == 0.0 {
                return Ok(a);
            }
            let ratio = (target_miles - covered) / seg_len;
            return Ok(a.lerp(b, ratio));
        }

        covered += seg_len;
    }

    // Target lies beyond the end (or the path is a single point).
    Ok(path[path.len() - 1])
}
