//! Incremental segment graph.
//!
//! Segments arrive in scan order and are linked to their neighbors as soon as
//! they appear. Every chain carries a ring leader; when a new segment joins two
//! ends of the same chain the ring is closed and can be extracted right away,
//! so no global pass over the graph is needed.
//!
//! Segments live in an arena and refer to each other by index. Two ordered
//! maps locate them by start and by end vertex. Both keys are unique: a vertex
//! is the start of at most one live segment and the end of at most one.

use crate::contour::Ring;
use crate::edge::{Segment, SegmentId};
use crate::error::ContourError;
use crate::point::Vertex;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct SegmentGraph {
    segments: Vec<Segment>,
    by_start: BTreeMap<Vertex, SegmentId>,
    by_end: BTreeMap<Vertex, SegmentId>,
}

impl SegmentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment by arena index, including already extracted ones.
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Total number of segments ever inserted.
    pub fn total(&self) -> usize {
        self.segments.len()
    }

    /// Segments inserted but not yet extracted as part of a ring.
    pub fn live(&self) -> usize {
        self.by_start.len()
    }

    pub fn find_by_start(&self, v: Vertex) -> Option<SegmentId> {
        self.by_start.get(&v).copied()
    }

    pub fn find_by_end(&self, v: Vertex) -> Option<SegmentId> {
        self.by_end.get(&v).copied()
    }

    /// Insert a segment and link it to its neighbors.
    ///
    /// Returns the ring leader when this segment closes a ring. The ring must
    /// then be pulled out with [`SegmentGraph::extract_ring`].
    pub fn insert(&mut self, mut segment: Segment) -> Result<Option<SegmentId>, ContourError> {
        if self.by_start.contains_key(&segment.start) {
            return Err(ContourError::DuplicateSegmentStart {
                vertex: segment.start,
                code: segment.code,
            });
        }
        if self.by_end.contains_key(&segment.end) {
            return Err(ContourError::DuplicateSegmentEnd {
                vertex: segment.end,
                code: segment.code,
            });
        }

        let prev = self.find_by_end(segment.start);
        let next = self.find_by_start(segment.end);

        let id = self.segments.len();
        segment.prev = prev;
        segment.next = next;
        segment.leader = None;
        self.by_start.insert(segment.start, id);
        self.by_end.insert(segment.end, id);
        self.segments.push(segment);

        // stranded segment, wait for neighbors
        if prev.is_none() && next.is_none() {
            return Ok(None);
        }

        let prev_leader = prev.and_then(|p| {
            self.segments[p].next = Some(id);
            self.segments[p].leader
        });
        let next_leader = next.and_then(|n| {
            self.segments[n].prev = Some(id);
            self.segments[n].leader
        });

        match (prev_leader, next_leader) {
            (None, None) => {
                // neighbors without a leader are lone segments
                for other in [prev, next].into_iter().flatten() {
                    self.segments[other].leader = Some(id);
                }
                self.segments[id].leader = Some(id);
            }
            (None, Some(leader)) => self.assign_backward(id, leader),
            (Some(leader), None) => self.assign_forward(id, leader),
            (Some(p), Some(n)) if p != n => self.assign_forward(id, p),
            (Some(leader), Some(_)) => {
                self.segments[id].leader = Some(leader);
                return Ok(Some(leader));
            }
        }

        Ok(None)
    }

    /// Write `leader` to `from` and everything reachable through `next`.
    fn assign_forward(&mut self, from: SegmentId, leader: SegmentId) {
        let mut cur = Some(from);
        let mut budget = self.segments.len();
        while let Some(c) = cur {
            if budget == 0 {
                break;
            }
            budget -= 1;
            self.segments[c].leader = Some(leader);
            cur = self.segments[c].next;
        }
    }

    /// Write `leader` to `from` and everything reachable through `prev`.
    fn assign_backward(&mut self, from: SegmentId, leader: SegmentId) {
        let mut cur = Some(from);
        let mut budget = self.segments.len();
        while let Some(c) = cur {
            if budget == 0 {
                break;
            }
            budget -= 1;
            self.segments[c].leader = Some(leader);
            cur = self.segments[c].prev;
        }
    }

    /// Walk the closed ring owned by `leader` once and emit its vertices.
    ///
    /// The first emitted vertex is the start of the ring's first corner
    /// segment (the leader itself when nothing is joined). With
    /// `join_straight`, a segment's start is dropped when it continues in the
    /// direction of its predecessor. Extracted segments leave the lookup maps.
    pub fn extract_ring(
        &mut self,
        leader: SegmentId,
        join_straight: bool,
        origin_offset: f64,
    ) -> Result<Ring, ContourError> {
        let mut ids = Vec::new();
        let mut cur = leader;
        loop {
            let Some(s) = self.segments.get(cur) else {
                return Err(ContourError::LeaderMismatch {
                    segment: cur,
                    expected: leader,
                    found: None,
                });
            };
            if s.leader != Some(leader) {
                return Err(ContourError::LeaderMismatch {
                    segment: cur,
                    expected: leader,
                    found: s.leader,
                });
            }
            ids.push(cur);

            let next = match s.next {
                Some(next) if ids.len() <= self.segments.len() => next,
                _ => {
                    return Err(ContourError::MissingNext {
                        segment: cur,
                        code: s.code,
                        start: s.start,
                        end: s.end,
                        leader,
                    })
                }
            };
            if next == leader {
                break;
            }
            cur = next;
        }

        let n = ids.len();
        let direction = |k: usize| self.segments[ids[k % n]].direction;
        let first = if join_straight {
            (0..n)
                .find(|&k| direction(k) != direction(k + n - 1))
                .unwrap_or(0)
        } else {
            0
        };

        let mut ring = Vec::with_capacity(n);
        for step in 0..n {
            let k = first + step;
            if step == 0 || !join_straight || direction(k) != direction(k + n - 1) {
                ring.push(self.segments[ids[k % n]].start.to_point(origin_offset));
            }
        }

        log::trace!(
            "[raster-contours] ring #{} closed: {} segments, {} vertices",
            leader,
            n,
            ring.len()
        );

        for id in ids {
            let (start, end) = (self.segments[id].start, self.segments[id].end);
            self.by_start.remove(&start);
            self.by_end.remove(&end);
        }

        Ok(ring)
    }
}
