//! Binary raster input.
//!
//! The tracer only needs a boolean sampler: [`BinaryRaster`]. Any storage can
//! implement it (bitfields, quadtrees, thresholded images). [`RasterMask`] is
//! the dense row-major implementation shipped with the crate; contours also
//! use it for their border bitmask.

use crate::error::ContourError;

/// A 2D boolean sampler.
///
/// `get` must accept any coordinate; reads outside `width x height` return
/// `false` so the tracer can treat the outside world as background.
pub trait BinaryRaster {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn get(&self, x: i32, y: i32) -> bool;
}

impl<R: BinaryRaster + ?Sized> BinaryRaster for &R {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn get(&self, x: i32, y: i32) -> bool {
        (**self).get(x, y)
    }
}

/// Dense row-major boolean raster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl RasterMask {
    /// Create an all-unset mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    /// Wrap a row-major buffer of `width * height` samples.
    pub fn from_vec(width: usize, height: usize, data: Vec<bool>) -> Result<Self, ContourError> {
        let expected = width
            .checked_mul(height)
            .ok_or(ContourError::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(ContourError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a mask by sampling `f(x, y)` at every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Threshold a row-major value grid: a pixel is set where `threshold(value)` holds.
    pub fn from_threshold<T, F>(
        values: &[T],
        width: usize,
        height: usize,
        threshold: F,
    ) -> Result<Self, ContourError>
    where
        F: Fn(&T) -> bool,
    {
        let data = values.iter().map(threshold).collect();
        Self::from_vec(width, height, data)
    }

    /// Parse an ASCII picture, one row per line; `#` is set, anything else unset.
    ///
    /// Rows shorter than the widest one are padded with unset pixels.
    pub fn from_ascii(picture: &str) -> Self {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        Self::from_fn(width, rows.len(), |x, y| rows[y].chars().nth(x) == Some('#'))
    }

    /// Set a pixel; writes outside the raster are ignored.
    ///
    /// Returns whether the coordinate was inside the raster.
    pub fn set(&mut self, x: i32, y: i32, value: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// The same raster with every pixel flipped.
    pub fn complement(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| !v).collect(),
        }
    }

    /// Coordinates of all set pixels in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(i, _)| (i % width, i / width))
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

impl BinaryRaster for RasterMask {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|idx| self.data[idx])
    }
}
