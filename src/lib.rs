//! # raster-contours
//!
//! Polygon boundaries of binary rasters via marching squares, plus a
//! topology-preserving simplifier.
//!
//! The tracer classifies every 2x2 neighborhood of samples, looks up the
//! boundary segments of that cell, and links them into rings while it scans.
//! Rings are emitted as soon as they close, so memory is bounded by the open
//! boundary of the current scan line rather than by the whole graph.
//!
//! ## Coordinates
//!
//! Output points are in raster pixel units with `y` growing downwards.
//! [`PixelOrigin::Center`] puts sample `(x, y)` at point `(x, y)`;
//! [`PixelOrigin::Corner`] shifts everything by half a pixel so pixel squares
//! span integral coordinates.
//!
//! Outer rings have a positive shoelace area and holes a negative one. Pixels
//! touching the raster edge keep square corners; elsewhere boundaries cut
//! pixel corners diagonally.
//!
//! ## Examples
//!
//! ### Tracing a mask
//!
//! ```
//! use raster_contours::{find_contour, ContourParams, PixelOrigin, RasterMask};
//!
//! let mask = RasterMask::from_ascii(
//!     "#####
//!      #...#
//!      #####",
//! );
//! let params = ContourParams {
//!     pixel_origin: PixelOrigin::Corner,
//!     ..ContourParams::default()
//! };
//!
//! let contour = find_contour(&mask, &params).unwrap();
//! // outer frame and the hole
//! assert_eq!(contour.rings.len(), 2);
//! ```
//!
//! ### Region maps with shared boundaries
//!
//! Trace every region of a label map with one [`ContourFinder`] so saddle
//! cells are cut the same way for all of them, then simplify the lot
//! together. Points where three or more regions meet are locked.
//!
//! ```
//! use raster_contours::{simplify, ContourFinder, ContourParams, SimplifyParams};
//!
//! let labels = [
//!     [0, 0, 1, 1],
//!     [0, 2, 2, 1],
//!     [2, 2, 1, 1],
//! ];
//! let mut finder = ContourFinder::new(ContourParams::default());
//! let contours = (0..3)
//!     .map(|label| finder.find_by(4, 3, |x, y| labels[y as usize][x as usize] == label))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let simplified = simplify(contours, &SimplifyParams { area_threshold: 0.5 });
//! assert_eq!(simplified.len(), 3);
//! ```
//!
//! ### GeoJSON
//!
//! ```
//! use raster_contours::{contour_to_feature, find_contour_by, ContourParams};
//!
//! let contour = find_contour_by(8, 8, |x, y| (x - 4).pow(2) + (y - 4).pow(2) < 9, &ContourParams::default()).unwrap();
//! let feature = contour_to_feature(&contour);
//! assert!(feature.geometry.is_some());
//! ```
//!
//! ## Logging
//!
//! Phase timings and counts go through the [`log`] facade at `debug` level,
//! ring closures at `trace` level. Install any logger to see them.

mod cell;
mod contour;
mod edge;
mod error;
mod export;
mod marching_squares;
mod point;
mod raster;
mod saddle;
pub mod segment_graph;
pub mod segment_table;
mod simplify;

pub use cell::CellCode;
pub use contour::{Contour, ContourParams, PixelOrigin, Ring};
pub use edge::{Direction, Segment, SegmentId};
pub use error::ContourError;
pub use export::{contour_to_feature, contours_to_feature_collection, signed_area};
pub use marching_squares::{
    do_concurrent, find_contour, find_contour_by, ContourFinder, MAX_RASTER_SIDE,
};
pub use point::{Point, Vertex};
pub use raster::{BinaryRaster, RasterMask};
pub use saddle::{FixedSaddle, SaddleConnectivity, SaddleMemory, SaddleResolver};
pub use simplify::{find_locked_points, simplify, simplify_ring, SimplifyParams};
