//! Saddle cell disambiguation.
//!
//! Codes `0101` and `1010` have two set corners on one diagonal and two unset
//! corners on the other. Either the set corners connect through the cell
//! center or the unset ones do. Both readings keep every edge midpoint at
//! exactly one incoming and one outgoing segment; the policy only decides
//! which pair of diagonal cuts the cell emits.

use crate::cell::CellCode;
use std::collections::HashMap;

/// Resolved reading of a saddle cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaddleConnectivity {
    /// Set corners join through the cell center (8-connected foreground).
    #[default]
    Connected,
    /// Set corners stay apart, unset corners join (4-connected foreground).
    Separated,
}

/// Picks the reading of a saddle cell.
///
/// Called once per saddle cell, with the cell coordinates and its code. Must be
/// deterministic for a given raster and call sequence.
pub trait SaddleResolver {
    fn resolve(&mut self, cell: (i32, i32), code: CellCode) -> SaddleConnectivity;
}

impl<F> SaddleResolver for F
where
    F: FnMut((i32, i32), CellCode) -> SaddleConnectivity,
{
    fn resolve(&mut self, cell: (i32, i32), code: CellCode) -> SaddleConnectivity {
        self(cell, code)
    }
}

/// Always answers the same reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedSaddle(pub SaddleConnectivity);

impl SaddleResolver for FixedSaddle {
    fn resolve(&mut self, _cell: (i32, i32), _code: CellCode) -> SaddleConnectivity {
        self.0
    }
}

/// Remembers the first code seen at every saddle cell.
///
/// The first raster to hit a cell gets [`SaddleConnectivity::Connected`].
/// A later raster with the same code gets the same answer; one with the
/// complementary code gets [`SaddleConnectivity::Separated`]. Tracing
/// complementary region masks through one memory therefore cuts every saddle
/// along the same two diagonals, and neighboring regions share their boundary
/// vertex for vertex.
#[derive(Debug, Clone, Default)]
pub struct SaddleMemory {
    seen: HashMap<(i32, i32), CellCode>,
}

impl SaddleMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saddle cells remembered so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl SaddleResolver for SaddleMemory {
    fn resolve(&mut self, cell: (i32, i32), code: CellCode) -> SaddleConnectivity {
        let first = *self.seen.entry(cell).or_insert(code);
        if first == code {
            SaddleConnectivity::Connected
        } else {
            SaddleConnectivity::Separated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_saddle() {
        let mut fixed = FixedSaddle(SaddleConnectivity::Separated);
        assert_eq!(
            fixed.resolve((0, 0), CellCode::SADDLE_RISING),
            SaddleConnectivity::Separated
        );
        assert_eq!(FixedSaddle::default().0, SaddleConnectivity::Connected);
    }

    #[test]
    fn test_memory_switches_on_complement() {
        let mut memory = SaddleMemory::new();

        assert_eq!(
            memory.resolve((3, 4), CellCode::SADDLE_FALLING),
            SaddleConnectivity::Connected
        );
        assert_eq!(
            memory.resolve((3, 4), CellCode::SADDLE_FALLING),
            SaddleConnectivity::Connected
        );
        assert_eq!(
            memory.resolve((3, 4), CellCode::SADDLE_RISING),
            SaddleConnectivity::Separated
        );
        // other cells are independent
        assert_eq!(
            memory.resolve((4, 4), CellCode::SADDLE_RISING),
            SaddleConnectivity::Connected
        );
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_memory_clear_forgets_cells() {
        let mut memory = SaddleMemory::new();
        assert!(memory.is_empty());

        memory.resolve((0, 0), CellCode::SADDLE_RISING);
        assert!(!memory.is_empty());

        memory.clear();
        assert!(memory.is_empty());
        // the complement is now the first code seen
        assert_eq!(
            memory.resolve((0, 0), CellCode::SADDLE_FALLING),
            SaddleConnectivity::Connected
        );
    }

    #[test]
    fn test_closure_resolver() {
        let mut by_parity = |cell: (i32, i32), _code: CellCode| {
            if (cell.0 + cell.1) % 2 == 0 {
                SaddleConnectivity::Connected
            } else {
                SaddleConnectivity::Separated
            }
        };

        assert_eq!(
            by_parity.resolve((1, 1), CellCode::SADDLE_RISING),
            SaddleConnectivity::Connected
        );
        assert_eq!(
            by_parity.resolve((1, 2), CellCode::SADDLE_RISING),
            SaddleConnectivity::Separated
        );
    }
}
