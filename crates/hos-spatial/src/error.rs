//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `hos-spatial`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The encoded path could not be decoded.  `position` is the byte offset
    /// at which decoding failed.
    #[error("malformed encoded path at byte {position}: {reason}")]
    Malformed { position: usize, reason: &'static str },

    #[error("path has no points")]
    EmptyPath,
}

pub type PathResult<T> = Result<T, PathError>;
