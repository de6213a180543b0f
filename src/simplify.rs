//! Topology-preserving ring simplification.
//!
//! Vertices are removed in order of the area of the triangle they form with
//! their current neighbors, smallest first, until every remaining vertex
//! spans more than the area threshold. Junction vertices shared by more than
//! two ring occurrences are locked and never move, so rings that met at a
//! junction before simplification still meet there afterwards.

use crate::contour::{Contour, Ring};
use crate::point::Point;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;

/// Rings with at most this many vertices are left alone.
const MIN_SIMPLIFIED_RING: usize = 4;

/// Never reduce a ring below a triangle.
const MIN_LIVE_VERTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyParams {
    /// Vertices spanning at most this triangle area (square output units)
    /// are removed.
    pub area_threshold: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            area_threshold: 10.0,
        }
    }
}

/// Vertices occurring more than twice across all rings of all contours.
pub fn find_locked_points(contours: &[Contour]) -> HashSet<Point> {
    let mut cardinality: HashMap<Point, usize> = HashMap::new();
    for point in contours.iter().flat_map(|c| &c.rings).flatten() {
        *cardinality.entry(*point).or_insert(0) += 1;
    }

    cardinality
        .into_iter()
        .filter(|&(_, count)| count > 2)
        .map(|(point, _)| point)
        .collect()
}

/// Twice the area of triangle `(a, p, b)`.
fn double_area(a: Point, p: Point, b: Point) -> f64 {
    ((a.x - p.x) * (b.y - p.y) - (a.y - p.y) * (b.x - p.x)).abs()
}

#[derive(Debug, Clone, Copy)]
struct Node {
    prev: usize,
    next: usize,
    area: f64,
    locked: bool,
    alive: bool,
}

type Key = (OrderedFloat<f64>, OrderedFloat<f64>, OrderedFloat<f64>, usize);

struct Decimator<'a> {
    ring: &'a [Point],
    nodes: Vec<Node>,
    queue: BTreeSet<Key>,
}

impl<'a> Decimator<'a> {
    fn new(ring: &'a [Point], locked: &HashSet<Point>) -> Self {
        let n = ring.len();
        let nodes = (0..n)
            .map(|k| Node {
                prev: (k + n - 1) % n,
                next: (k + 1) % n,
                area: f64::INFINITY,
                locked: locked.contains(&ring[k]),
                alive: true,
            })
            .collect();

        let mut decimator = Self {
            ring,
            nodes,
            queue: BTreeSet::new(),
        };
        for k in 0..n {
            if !decimator.nodes[k].locked {
                decimator.nodes[k].area = decimator.area_at(k);
                decimator.queue.insert(decimator.key(k));
            }
        }
        decimator
    }

    fn area_at(&self, k: usize) -> f64 {
        let node = &self.nodes[k];
        double_area(self.ring[node.prev], self.ring[k], self.ring[node.next])
    }

    /// Ties go to the smaller `x`, then the smaller `y`.
    fn key(&self, k: usize) -> Key {
        let p = self.ring[k];
        (
            OrderedFloat(self.nodes[k].area),
            OrderedFloat(p.x),
            OrderedFloat(p.y),
            k,
        )
    }

    fn refresh(&mut self, k: usize) {
        if self.nodes[k].locked {
            return;
        }
        self.queue.remove(&self.key(k));
        self.nodes[k].area = self.area_at(k);
        self.queue.insert(self.key(k));
    }

    fn run(&mut self, limit: f64) {
        let mut live = self.ring.len();
        while live > MIN_LIVE_VERTICES {
            let Some(&first) = self.queue.first() else {
                break;
            };
            if !(first.0.into_inner() <= limit) {
                break;
            }
            self.queue.remove(&first);

            let k = first.3;
            let Node { prev, next, .. } = self.nodes[k];
            self.nodes[prev].next = next;
            self.nodes[next].prev = prev;
            self.nodes[k].alive = false;
            live -= 1;

            self.refresh(prev);
            self.refresh(next);
        }
    }

    fn into_ring(self) -> Ring {
        self.ring
            .iter()
            .zip(&self.nodes)
            .filter(|(_, node)| node.alive)
            .map(|(p, _)| *p)
            .collect()
    }
}

/// Simplify one ring, keeping `locked` vertices in place.
///
/// Rings with four vertices or fewer come back unchanged and no ring drops
/// below three vertices. Surviving vertices keep their original order.
///
/// The three-vertex floor wins over the threshold: once a ring is down to a
/// triangle, no vertex is removed however small its area.
pub fn simplify_ring(ring: &[Point], locked: &HashSet<Point>, area_threshold: f64) -> Ring {
    if ring.len() <= MIN_SIMPLIFIED_RING {
        return ring.to_vec();
    }

    let mut decimator = Decimator::new(ring, locked);
    decimator.run(2.0 * area_threshold);
    decimator.into_ring()
}

/// Simplify every ring of `contours` against a shared set of locked points.
///
/// Contours traced from the same raster domain should be simplified together
/// so that boundaries shared between them stay shared.
pub fn simplify(mut contours: Vec<Contour>, params: &SimplifyParams) -> Vec<Contour> {
    let start = Instant::now();
    let locked = find_locked_points(&contours);
    let before: usize = contours.iter().map(Contour::vertex_count).sum();

    contours
        .par_iter_mut()
        .flat_map(|contour| contour.rings.par_iter_mut())
        .for_each(|ring| *ring = simplify_ring(ring, &locked, params.area_threshold));

    let after: usize = contours.iter().map(Contour::vertex_count).sum();
    log::debug!(
        "[raster-contours] simplify: {} locked points, {} -> {} vertices in {:?}",
        locked.len(),
        before,
        after,
        start.elapsed()
    );

    contours
}
