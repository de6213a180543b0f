use crate::point::Point;
use crate::raster::RasterMask;

/// A closed polygon ring. The first vertex implicitly follows the last.
pub type Ring = Vec<Point>;

/// Where raster sample `(x, y)` sits in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelOrigin {
    /// Sample `(x, y)` maps to point `(x, y)`.
    #[default]
    Center,
    /// Sample `(x, y)` maps to point `(x + 0.5, y + 0.5)`, so pixel squares
    /// span integral coordinates.
    Corner,
}

impl PixelOrigin {
    pub fn offset(self) -> f64 {
        match self {
            PixelOrigin::Center => 0.0,
            PixelOrigin::Corner => 0.5,
        }
    }
}

/// Contour tracing options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourParams {
    pub pixel_origin: PixelOrigin,
    /// Collapse collinear runs of unit steps into one edge.
    pub join_straight_segments: bool,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            pixel_origin: PixelOrigin::Center,
            join_straight_segments: true,
        }
    }
}

/// Rings traced from one raster.
///
/// Outer boundaries and hole boundaries come out of the same scan; with
/// `y` growing downwards, outer rings run clockwise on screen and holes
/// counter-clockwise. `border` has the raster size and marks every pixel
/// that sits next to a traced segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub rings: Vec<Ring>,
    pub border: RasterMask,
}

impl Contour {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            rings: Vec::new(),
            border: RasterMask::new(width, height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Vertex count summed over all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }
}
