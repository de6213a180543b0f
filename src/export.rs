//! GeoJSON export.
//!
//! Outer rings come out of the tracer with a positive shoelace area and holes
//! with a negative one. Read with `y` as northing that is counter-clockwise
//! exteriors and clockwise holes, which is what RFC 7946 asks for, so rings
//! are written in traced order.

use crate::contour::{Contour, Ring};
use crate::point::Point;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Position, Value as GeoValue};

/// Shoelace area, positive for outer rings and negative for holes.
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice = 0.0;
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}

/// Axis aligned bounds of a ring, used to skip point-in-polygon tests.
#[derive(Debug, Clone, Copy)]
struct BBox {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl BBox {
    fn from_ring(ring: &[Point]) -> Self {
        let mut bbox = Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in ring {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        bbox
    }

    fn is_inside(&self, other: &BBox) -> bool {
        self.min_x >= other.min_x
            && self.max_x <= other.max_x
            && self.min_y >= other.min_y
            && self.max_y <= other.max_y
    }
}

/// Ray casting test.
fn point_in_ring(point: Point, ring: &[Point]) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);

    for i in 0..ring.len() {
        let (one, two) = (ring[i], ring[j]);
        if ((one.y > point.y) != (two.y > point.y))
            && (point.x < (two.x - one.x) * (point.y - one.y) / (two.y - one.y) + one.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Most of `subject`'s vertices lie inside `container`.
///
/// Traced rings never touch, but simplified ones may cut a corner across a
/// neighbor, so a single stray vertex does not veto containment.
fn ring_in_ring(subject: &[Point], container: &[Point]) -> bool {
    let inside = subject
        .iter()
        .filter(|&&p| point_in_ring(p, container))
        .count();
    inside * 2 > subject.len()
}

/// Closed GeoJSON linear ring.
fn to_positions(ring: &[Point]) -> Vec<Position> {
    let mut positions: Vec<Position> = ring.iter().map(|&p| p.into()).collect();
    if let Some(first) = positions.first().cloned() {
        positions.push(first);
    }
    positions
}

/// Group rings into polygons: every hole joins the smallest outer ring
/// containing it.
fn nest_rings(rings: &[Ring]) -> Vec<Vec<Vec<Position>>> {
    struct Outer<'a> {
        ring: &'a [Point],
        area: f64,
        bbox: BBox,
        holes: Vec<&'a [Point]>,
    }

    let mut outers = Vec::new();
    let mut holes = Vec::new();
    for ring in rings {
        let area = signed_area(ring);
        if area > 0.0 {
            outers.push(Outer {
                ring,
                area,
                bbox: BBox::from_ring(ring),
                holes: Vec::new(),
            });
        } else if area < 0.0 {
            holes.push(ring.as_slice());
        } else {
            log::trace!("[raster-contours] skipping degenerate ring of {} vertices", ring.len());
        }
    }

    for hole in holes {
        let bbox = BBox::from_ring(hole);
        let owner = outers
            .iter_mut()
            .filter(|outer| bbox.is_inside(&outer.bbox) && ring_in_ring(hole, outer.ring))
            .min_by(|a, b| a.area.total_cmp(&b.area));

        match owner {
            Some(outer) => outer.holes.push(hole),
            None => log::debug!(
                "[raster-contours] dropping hole of {} vertices without an outer ring",
                hole.len()
            ),
        }
    }

    outers
        .into_iter()
        .map(|outer| {
            std::iter::once(outer.ring)
                .chain(outer.holes)
                .map(to_positions)
                .collect()
        })
        .collect()
}

/// Convert a contour to a `MultiPolygon` feature.
///
/// Properties carry the number of traced rings under `"rings"`.
pub fn contour_to_feature(contour: &Contour) -> Feature {
    let polygons = nest_rings(&contour.rings);

    let mut properties = JsonObject::new();
    properties.insert("rings".to_string(), serde_json::json!(contour.rings.len()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoValue::MultiPolygon(polygons))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Convert a list of contours, skipping empty ones.
///
/// Each feature records its position in `contours` under `"index"`.
pub fn contours_to_feature_collection(contours: &[Contour]) -> FeatureCollection {
    let features = contours
        .iter()
        .enumerate()
        .filter(|(_, contour)| !contour.is_empty())
        .map(|(index, contour)| {
            let mut feature = contour_to_feature(contour);
            if let Some(props) = feature.properties.as_mut() {
                props.insert("index".to_string(), serde_json::json!(index));
            }
            feature
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterMask;
    use approx::assert_relative_eq;

    fn ring(points: &[(f64, f64)]) -> Ring {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn square(x0: f64, y0: f64, size: f64, outer: bool) -> Ring {
        let mut r = ring(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ]);
        if !outer {
            r.reverse();
        }
        r
    }

    fn contour(rings: Vec<Ring>) -> Contour {
        Contour {
            rings,
            border: RasterMask::new(0, 0),
        }
    }

    fn polygons(feature: &Feature) -> &Vec<Vec<Vec<Position>>> {
        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(GeoValue::MultiPolygon(polygons)) => polygons,
            other => panic!("expected a MultiPolygon, got {other:?}"),
        }
    }

    #[test]
    fn test_signed_area() {
        assert_relative_eq!(signed_area(&square(0.0, 0.0, 2.0, true)), 4.0);
        assert_relative_eq!(signed_area(&square(0.0, 0.0, 2.0, false)), -4.0);
        assert_eq!(signed_area(&ring(&[(0.0, 0.0), (1.0, 1.0)])), 0.0);
    }

    #[test]
    fn test_point_in_ring() {
        let r = square(0.0, 0.0, 4.0, true);
        assert!(point_in_ring(Point::new(2.0, 2.0), &r));
        assert!(!point_in_ring(Point::new(5.0, 2.0), &r));
        assert!(!point_in_ring(Point::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_holes_go_to_smallest_container() {
        let c = contour(vec![
            square(0.0, 0.0, 10.0, true),
            square(1.0, 1.0, 8.0, false),
            square(2.0, 2.0, 6.0, true),
            square(3.0, 3.0, 1.0, false),
        ]);

        let feature = contour_to_feature(&c);
        let polygons = polygons(&feature);
        assert_eq!(polygons.len(), 2);

        // big frame with its hole, island with its own hole
        assert_eq!(polygons[0].len(), 2);
        assert_eq!(polygons[1].len(), 2);
        assert_eq!(polygons[1][1][0], vec![3.0, 4.0]);
    }

    #[test]
    fn test_rings_are_closed() {
        let feature = contour_to_feature(&contour(vec![square(0.0, 0.0, 1.0, true)]));
        let outer = &polygons(&feature)[0][0];

        assert_eq!(outer.len(), 5);
        assert_eq!(outer.first(), outer.last());
    }

    #[test]
    fn test_feature_properties() {
        let feature = contour_to_feature(&contour(vec![square(0.0, 0.0, 1.0, true)]));
        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["rings"], serde_json::json!(1));
    }

    #[test]
    fn test_collection_skips_empty_contours() {
        let contours = vec![
            contour(Vec::new()),
            contour(vec![square(0.0, 0.0, 1.0, true)]),
        ];

        let collection = contours_to_feature_collection(&contours);
        assert_eq!(collection.features.len(), 1);
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["index"], serde_json::json!(1));
    }
}
