use crate::raster::BinaryRaster;
use std::fmt;

/// Binary classification of a 2x2 sample neighborhood.
///
/// Cell `(i, j)` has corners at samples `(i, j)`, `(i + 1, j)`, `(i + 1, j + 1)`
/// and `(i, j + 1)`. Bit pattern: top-left(8) | top-right(4) | bottom-right(2) |
/// bottom-left(1), with `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCode(u8);

impl CellCode {
    pub const EMPTY: CellCode = CellCode(0b0000);
    pub const FULL: CellCode = CellCode(0b1111);

    pub const BOTTOM_LEFT: u8 = 0b0001;
    pub const BOTTOM_RIGHT: u8 = 0b0010;
    pub const TOP_RIGHT: u8 = 0b0100;
    pub const TOP_LEFT: u8 = 0b1000;

    /// Bottom-left and top-right set.
    pub const SADDLE_RISING: CellCode = CellCode(0b0101);
    /// Top-left and bottom-right set.
    pub const SADDLE_FALLING: CellCode = CellCode(0b1010);

    /// Wrap a raw code; bits above the low four are dropped.
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Classify cell `(i, j)` of `raster`. Out-of-range samples read as unset.
    pub fn classify<R: BinaryRaster + ?Sized>(raster: &R, i: i32, j: i32) -> Self {
        let mut bits = 0u8;
        if raster.get(i, j + 1) {
            bits |= Self::BOTTOM_LEFT;
        }
        if raster.get(i + 1, j + 1) {
            bits |= Self::BOTTOM_RIGHT;
        }
        if raster.get(i + 1, j) {
            bits |= Self::TOP_RIGHT;
        }
        if raster.get(i, j) {
            bits |= Self::TOP_LEFT;
        }
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Diagonal corners agree, orthogonal corners disagree.
    pub const fn is_saddle(self) -> bool {
        self.0 == Self::SADDLE_RISING.0 || self.0 == Self::SADDLE_FALLING.0
    }

    /// All corners set or all corners unset: no boundary crosses the cell.
    pub const fn is_uniform(self) -> bool {
        self.0 == Self::EMPTY.0 || self.0 == Self::FULL.0
    }

    /// The code the same cell has in the inverted raster.
    pub const fn complement(self) -> Self {
        Self(!self.0 & 0b1111)
    }

    pub const fn has(self, corner: u8) -> bool {
        self.0 & corner != 0
    }
}

impl fmt::Display for CellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterMask;

    #[test]
    fn test_cell_classification_bit_layout() {
        // tl=1 tr=0
        // bl=1 br=1
        let mask = RasterMask::from_ascii("#.\n##");

        let code = CellCode::classify(&mask, 0, 0);
        assert_eq!(code.bits(), 0b1011);
        assert!(code.has(CellCode::TOP_LEFT));
        assert!(!code.has(CellCode::TOP_RIGHT));
        assert!(code.has(CellCode::BOTTOM_RIGHT));
        assert!(code.has(CellCode::BOTTOM_LEFT));
    }

    #[test]
    fn test_cell_classification_outside_is_unset() {
        let mask = RasterMask::from_fn(1, 1, |_, _| true);

        // the single pixel is the bottom-right corner of cell (-1, -1)
        assert_eq!(CellCode::classify(&mask, -1, -1).bits(), 0b0010);
        assert_eq!(CellCode::classify(&mask, 0, -1).bits(), 0b0001);
        assert_eq!(CellCode::classify(&mask, -1, 0).bits(), 0b0100);
        assert_eq!(CellCode::classify(&mask, 0, 0).bits(), 0b1000);
        assert_eq!(CellCode::classify(&mask, 5, 5), CellCode::EMPTY);
    }

    #[test]
    fn test_cell_saddles_and_uniform() {
        let saddles: Vec<u8> = (0..16u8)
            .filter(|&b| CellCode::new(b).is_saddle())
            .collect();
        assert_eq!(saddles, vec![0b0101, 0b1010]);

        assert!(CellCode::EMPTY.is_uniform());
        assert!(CellCode::FULL.is_uniform());
        assert!(!CellCode::new(0b0110).is_uniform());
    }

    #[test]
    fn test_cell_complement() {
        assert_eq!(CellCode::SADDLE_RISING.complement(), CellCode::SADDLE_FALLING);
        assert_eq!(CellCode::new(0b0001).complement().bits(), 0b1110);
        assert_eq!(CellCode::EMPTY.complement(), CellCode::FULL);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellCode::new(0b0101).to_string(), "0101");
        assert_eq!(CellCode::new(0xff).to_string(), "1111");
    }
}
