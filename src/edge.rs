use crate::cell::CellCode;
use crate::point::Vertex;

/// Index of a segment in the segment graph arena.
pub type SegmentId = usize;

/// Direction of a boundary segment, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Direction {
    /// Classify a doubled-space step. Returns `None` for a zero step.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, -1) => Some(Direction::LeftUp),
            (-1, 1) => Some(Direction::LeftDown),
            (1, -1) => Some(Direction::RightUp),
            (1, 1) => Some(Direction::RightDown),
            _ => None,
        }
    }
}

/// A directed boundary edge emitted by one cell.
///
/// The set region always lies on the right-hand side when walking from
/// `start` to `end`. Endpoints never change once created; `prev`, `next` and
/// `leader` are rewritten while the graph links chains together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub code: CellCode,
    pub direction: Direction,
    pub start: Vertex,
    pub end: Vertex,
    pub prev: Option<SegmentId>,
    pub next: Option<SegmentId>,
    pub leader: Option<SegmentId>,
}

impl Segment {
    /// Create an unlinked segment. `start` and `end` must differ.
    pub fn new(code: CellCode, start: Vertex, end: Vertex) -> Self {
        let direction = Direction::from_delta(end.x - start.x, end.y - start.y)
            .unwrap_or(Direction::Right);
        debug_assert!(start != end, "degenerate segment at {start}");

        Self {
            code,
            direction,
            start,
            end,
            prev: None,
            next: None,
            leader: None,
        }
    }

    /// Neither linked nor part of a chain yet.
    pub fn is_stranded(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}
