//! Place stops on the route geometry.
//!
//! Walks the timeline keeping a running total of driven miles.  Each
//! non-driving segment happens where the truck stands at that moment, so it
//! gets the path coordinate at the running total.  Driving segments are
//! spans and stay unannotated.

use hos_schedule::Segment;
use hos_spatial::{Path, PathError};

/// Annotate every stop in `segments` with its coordinate on `path`.
///
/// Fails with [`PathError::EmptyPath`] if any stop must be placed on an
/// empty path; on error no segment is modified.
pub fn annotate_segments(segments: &mut [Segment], path: &Path) -> Result<(), PathError> {
    if path.is_empty() && segments.iter().any(|s| !s.is_driving()) {
        return Err(PathError::EmptyPath);
    }

    let mut driven = 0.0;
    for seg in segments.iter_mut() {
        if seg.is_driving() {
            driven += seg.distance_miles();
            seg.coordinate = None;
        } else {
            seg.coordinate = Some(path.coordinate_at_distance(driven)?);
        }
    }
    Ok(())
}
