use std::fmt;
use std::hash::{Hash, Hasher};

/// A segment endpoint in doubled raster space.
///
/// Raster coordinates are scaled by 2 so that cell corners, edge midpoints and
/// cell centers are all integral. Cell `(i, j)` spans `(2i, 2j)..=(2i + 2, 2j + 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Doubled-space origin of raster cell `(i, j)`.
    pub const fn cell_origin(i: i32, j: i32) -> Self {
        Self { x: i * 2, y: j * 2 }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Convert back to raster units, shifted by `origin_offset` on both axes.
    pub fn to_point(self, origin_offset: f64) -> Point {
        Point::new(
            f64::from(self.x) / 2.0 + origin_offset,
            f64::from(self.y) / 2.0 + origin_offset,
        )
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An output polygon vertex in raster pixel units.
///
/// Equality and hashing go through the bit pattern so points can key hash
/// maps; the constructor folds `-0.0` into `0.0` to keep both consistent.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x + 0.0,
            y: y + 0.0,
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl From<Point> for Vec<f64> {
    fn from(p: Point) -> Self {
        vec![p.x, p.y]
    }
}
