//! Error type shared by raster construction, contour tracing and simplification.

use crate::cell::CellCode;
use crate::point::Vertex;
use thiserror::Error;

/// Errors raised while building rasters or tracing contours.
///
/// Everything except [`ContourError::SizeMismatch`] signals a broken segment
/// graph. Those never happen for a well-formed raster and abort the whole
/// trace instead of returning a partial ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContourError {
    #[error("raster size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("raster {width}x{height} exceeds the maximum side length of {max}")]
    RasterTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("segment starting at {vertex} (cell {code}) collides with an existing segment start")]
    DuplicateSegmentStart { vertex: Vertex, code: CellCode },

    #[error("segment ending at {vertex} (cell {code}) collides with an existing segment end")]
    DuplicateSegmentEnd { vertex: Vertex, code: CellCode },

    #[error(
        "segment #{segment} (cell {code}) <{start} -> {end}> in ring #{leader} has no next segment"
    )]
    MissingNext {
        segment: usize,
        code: CellCode,
        start: Vertex,
        end: Vertex,
        leader: usize,
    },

    #[error("segment #{segment} doesn't belong to ring #{expected} but to {found:?}")]
    LeaderMismatch {
        segment: usize,
        expected: usize,
        found: Option<usize>,
    },

    #[error("{count} segments left unclosed after a full raster scan")]
    StrandedSegments { count: usize },
}
