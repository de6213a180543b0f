//! Cell code to boundary segment lookup.
//!
//! Offsets are given in doubled space relative to the cell origin `(2i, 2j)`:
//! `0` and `2` are the cell corners (raster samples), `1` is an edge midpoint
//! or, for `(1, 1)`, the cell center. Each entry is `[x1, y1, x2, y2]` and keeps
//! the set region on the right of the segment.
//!
//! Interior cells cut corners diagonally. Border cells (the ring of cells
//! straddling the raster edge) route through the cell center instead, so
//! pixels touching the raster edge keep square outer corners.

use crate::cell::CellCode;
use crate::edge::Segment;
use crate::point::Vertex;
use crate::raster::RasterMask;
use crate::saddle::{SaddleConnectivity, SaddleResolver};
use arrayvec::ArrayVec;

/// Segments emitted by a single cell. Four is the border table maximum.
pub type CellSegments = ArrayVec<Segment, 4>;

type Offsets = [i32; 4];

/// Interior table; saddle entries hold the connected reading.
const INTERIOR: [&[Offsets]; 16] = [
    /* 0000 */ &[],
    /* 0001 */ &[[0, 1, 1, 2]],
    /* 0010 */ &[[1, 2, 2, 1]],
    /* 0011 */ &[[0, 1, 2, 1]],
    /* 0100 */ &[[2, 1, 1, 0]],
    /* 0101 */ &[[0, 1, 1, 0], [2, 1, 1, 2]],
    /* 0110 */ &[[1, 2, 1, 0]],
    /* 0111 */ &[[0, 1, 1, 0]],
    /* 1000 */ &[[1, 0, 0, 1]],
    /* 1001 */ &[[1, 0, 1, 2]],
    /* 1010 */ &[[1, 0, 2, 1], [1, 2, 0, 1]],
    /* 1011 */ &[[1, 0, 2, 1]],
    /* 1100 */ &[[2, 1, 0, 1]],
    /* 1101 */ &[[2, 1, 1, 2]],
    /* 1110 */ &[[1, 2, 0, 1]],
    /* 1111 */ &[],
];

/// 0101 read as two lone corners: 0001 + 0100.
const SEPARATED_RISING: &[Offsets] = &[[0, 1, 1, 2], [2, 1, 1, 0]];

/// 1010 read as two lone corners: 1000 + 0010.
const SEPARATED_FALLING: &[Offsets] = &[[1, 0, 0, 1], [1, 2, 2, 1]];

const BORDER: [&[Offsets]; 16] = [
    /* 0000 */ &[],
    /* 0001 */ &[[0, 1, 1, 1], [1, 1, 1, 2]],
    /* 0010 */ &[[1, 2, 1, 1], [1, 1, 2, 1]],
    /* 0011 */ &[[0, 1, 2, 1]],
    /* 0100 */ &[[2, 1, 1, 1], [1, 1, 1, 0]],
    /* 0101 */ &[[0, 1, 0, 0], [0, 0, 1, 0], [2, 1, 2, 2], [2, 2, 1, 2]],
    /* 0110 */ &[[1, 2, 1, 0]],
    /* 0111 */ &[[0, 1, 0, 0], [0, 0, 1, 0]],
    /* 1000 */ &[[1, 0, 1, 1], [1, 1, 0, 1]],
    /* 1001 */ &[[1, 0, 1, 2]],
    /* 1010 */ &[[1, 0, 2, 0], [2, 0, 2, 1], [1, 2, 0, 2], [0, 2, 0, 1]],
    /* 1011 */ &[[1, 0, 2, 0], [2, 0, 2, 1]],
    /* 1100 */ &[[2, 1, 0, 1]],
    /* 1101 */ &[[2, 1, 2, 2], [2, 2, 1, 2]],
    /* 1110 */ &[[1, 2, 0, 2], [0, 2, 0, 1]],
    /* 1111 */ &[],
];

fn emit(i: i32, j: i32, code: CellCode, offsets: &[Offsets]) -> CellSegments {
    let origin = Vertex::cell_origin(i, j);
    offsets
        .iter()
        .map(|&[x1, y1, x2, y2]| Segment::new(code, origin.offset(x1, y1), origin.offset(x2, y2)))
        .collect()
}

/// Segments for interior cell `(i, j)`. Saddle codes consult `resolver`.
pub fn interior_segments<S>(i: i32, j: i32, code: CellCode, resolver: &mut S) -> CellSegments
where
    S: SaddleResolver + ?Sized,
{
    if !code.is_saddle() {
        return emit(i, j, code, INTERIOR[code.bits() as usize]);
    }

    let offsets = match (resolver.resolve((i, j), code), code) {
        (SaddleConnectivity::Connected, _) => INTERIOR[code.bits() as usize],
        (SaddleConnectivity::Separated, CellCode::SADDLE_RISING) => SEPARATED_RISING,
        (SaddleConnectivity::Separated, _) => SEPARATED_FALLING,
    };
    emit(i, j, code, offsets)
}

/// Segments for border cell `(i, j)`.
pub fn border_segments(i: i32, j: i32, code: CellCode) -> CellSegments {
    emit(i, j, code, BORDER[code.bits() as usize])
}

/// Mark the pixels of cell `(i, j)` that sit next to the boundary.
///
/// One- and two-corner codes mark their set corners; saddles and three-corner
/// codes mark the whole cell. Pixels outside `border` are skipped.
pub fn mark_border(border: &mut RasterMask, i: i32, j: i32, code: CellCode) {
    let corners: &[(i32, i32)] = match code.bits() {
        0b0001 => &[(0, 1)],
        0b0010 => &[(1, 1)],
        0b0100 => &[(1, 0)],
        0b1000 => &[(0, 0)],
        0b0011 => &[(0, 1), (1, 1)],
        0b0110 => &[(1, 0), (1, 1)],
        0b1100 => &[(0, 0), (1, 0)],
        0b1001 => &[(0, 0), (0, 1)],
        0b0000 | 0b1111 => &[],
        _ => &[(0, 0), (1, 0), (0, 1), (1, 1)],
    };

    for &(dx, dy) in corners {
        border.set(i + dx, j + dy, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saddle::FixedSaddle;
    use std::collections::HashMap;

    fn all_codes() -> impl Iterator<Item = CellCode> {
        (0..16u8).map(CellCode::new)
    }

    /// Net in/out balance per cell-edge midpoint: +1 for a start, -1 for an end.
    fn midpoint_balance(segments: &[Segment]) -> HashMap<Vertex, i32> {
        let mut balance = HashMap::new();
        for s in segments {
            *balance.entry(s.start).or_insert(0) += 1;
            *balance.entry(s.end).or_insert(0) -= 1;
        }
        balance.retain(|_, v| *v != 0);
        balance
    }

    #[test]
    fn test_interior_table_completeness() {
        let mut resolver = FixedSaddle::default();
        for code in all_codes() {
            let count = interior_segments(0, 0, code, &mut resolver).len();
            let expected = if code.is_uniform() {
                0
            } else if code.is_saddle() {
                2
            } else {
                1
            };
            assert_eq!(count, expected, "code {code}");
        }
    }

    #[test]
    fn test_border_table_uniform_codes_emit_nothing() {
        assert!(border_segments(0, 0, CellCode::EMPTY).is_empty());
        assert!(border_segments(0, 0, CellCode::FULL).is_empty());
        for code in all_codes().filter(|c| !c.is_uniform()) {
            assert!(!border_segments(0, 0, code).is_empty(), "code {code}");
        }
    }

    #[test]
    fn test_set_region_is_on_the_right() {
        // Corner samples sit at even offsets; the cross product of the segment
        // direction with the vector to a set corner must be positive (y down).
        let corners = [
            (CellCode::TOP_LEFT, (0, 0)),
            (CellCode::TOP_RIGHT, (2, 0)),
            (CellCode::BOTTOM_RIGHT, (2, 2)),
            (CellCode::BOTTOM_LEFT, (0, 2)),
        ];
        let mut resolver = FixedSaddle::default();

        for code in all_codes().filter(|c| !c.is_saddle()) {
            for s in interior_segments(0, 0, code, &mut resolver) {
                let (dx, dy) = (s.end.x - s.start.x, s.end.y - s.start.y);
                // midpoint of the segment, doubled again to stay integral
                let (mx, my) = (s.start.x + s.end.x, s.start.y + s.end.y);
                for &(bit, (cx, cy)) in &corners {
                    let cross = dx * (2 * cy - my) - dy * (2 * cx - mx);
                    if code.has(bit) {
                        assert!(cross > 0, "code {code}: set corner ({cx}, {cy}) not on the right");
                    }
                }
            }
        }
    }

    #[test]
    fn test_saddle_readings_balance_like_their_parts() {
        let mut connected = FixedSaddle(SaddleConnectivity::Connected);
        let mut separated = FixedSaddle(SaddleConnectivity::Separated);

        for code in [CellCode::SADDLE_RISING, CellCode::SADDLE_FALLING] {
            let a = interior_segments(0, 0, code, &mut connected);
            let b = interior_segments(0, 0, code, &mut separated);

            // both readings enter and leave the cell through the same midpoints
            assert_eq!(midpoint_balance(&a), midpoint_balance(&b), "code {code}");
            assert_eq!(midpoint_balance(&a).len(), 4);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_separated_saddle_is_complement_of_connected() {
        // The separated reading of a code traces the same lines as the
        // connected reading of its complement, walked backwards.
        let mut connected = FixedSaddle(SaddleConnectivity::Connected);
        let mut separated = FixedSaddle(SaddleConnectivity::Separated);

        for code in [CellCode::SADDLE_RISING, CellCode::SADDLE_FALLING] {
            let mut lines: Vec<_> = interior_segments(0, 0, code, &mut separated)
                .iter()
                .map(|s| (s.start, s.end))
                .collect();
            let mut reversed: Vec<_> = interior_segments(0, 0, code.complement(), &mut connected)
                .iter()
                .map(|s| (s.end, s.start))
                .collect();
            lines.sort();
            reversed.sort();
            assert_eq!(lines, reversed, "code {code}");
        }
    }

    #[test]
    fn test_border_segments_share_endpoints_with_interior() {
        let mut resolver = FixedSaddle::default();
        for code in all_codes().filter(|c| !c.is_uniform()) {
            let border = border_segments(1, 1, code);
            let interior = interior_segments(1, 1, code, &mut resolver);
            assert_eq!(
                midpoint_balance(&border),
                midpoint_balance(&interior),
                "code {code}"
            );
        }
    }

    #[test]
    fn test_segments_are_placed_at_cell_origin() {
        let segments = interior_segments(3, -1, CellCode::new(0b0011), &mut FixedSaddle::default());
        assert_eq!(segments[0].start, Vertex::new(6, -1));
        assert_eq!(segments[0].end, Vertex::new(8, -1));
    }

    #[test]
    fn test_mark_border() {
        let mut border = RasterMask::new(3, 3);

        mark_border(&mut border, 0, 0, CellCode::new(0b0011));
        assert_eq!(border.iter_set().collect::<Vec<_>>(), vec![(0, 1), (1, 1)]);

        mark_border(&mut border, 1, 1, CellCode::new(0b0111));
        assert_eq!(border.count(), 5);

        // outside pixels are dropped silently
        mark_border(&mut border, -1, -1, CellCode::new(0b1000));
        assert_eq!(border.count(), 5);
    }
}
