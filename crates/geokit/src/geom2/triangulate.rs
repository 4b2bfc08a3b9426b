//! Ear-clipping triangulation of simple polygons with holes.
//!
//! Pipeline
//! 1. `correct()` the input (outer CCW, holes CW). Holes with fewer than three
//!    vertices or zero area are skipped.
//! 2. Holes are merged into the outer ring, rightmost hole first: the hole's
//!    rightmost vertex is bridged to the nearest ring vertex it can see. The
//!    bridge is walked twice, so the result is a single weakly simple ring.
//! 3. Ears are clipped until three vertices remain.
//!
//! Degeneracies
//! - Ears with twice-area `<= GeomCfg::eps_area` are never emitted.
//! - If a full pass finds no ear, one collinear vertex is dropped (area
//!   preserving). If there is none either, clipping stops and the triangles
//!   emitted so far are returned (partial result, logged at warn level).
//!
//! Code cross-refs: `Polygon2::correct`, `intersection::test_intersection`

use super::polygon::{point_segment_distance, ring_signed_area, segments_cross, Polygon2};
use super::types::GeomCfg;
use crate::point::{orient2, Point2};

/// Triangulate with default tolerances. Fewer than three outer vertices yield no triangles.
pub fn triangulate(polygon: &Polygon2) -> Vec<Polygon2> {
    triangulate_with(polygon, &GeomCfg::default())
}

pub fn triangulate_with(polygon: &Polygon2, cfg: &GeomCfg) -> Vec<Polygon2> {
    let poly = polygon.corrected();
    if poly.outer.len() < 3 {
        return Vec::new();
    }
    let mut ring = poly.outer;
    let mut holes: Vec<Vec<Point2>> = poly
        .inners
        .into_iter()
        .filter(|h| h.len() >= 3 && ring_signed_area(h).abs() > cfg.eps_area)
        .collect();
    holes.sort_by(|a, b| max_x(b).total_cmp(&max_x(a)));

    for k in 0..holes.len() {
        let (merged, pending) = holes.split_at(k + 1);
        if !merge_hole(&mut ring, &merged[k], pending) {
            tracing::warn!(hole = k, "no visible bridge vertex; hole skipped");
        }
    }
    clip_ears(&ring, cfg)
}

fn max_x(ring: &[Point2]) -> f64 {
    ring.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max)
}

/// Whether direction `a → b` starts inside the material at vertex `a`.
///
/// Material lies to the left of `prev → a → next` (CCW outer ring, CW hole).
fn locally_inside(prev: Point2, a: Point2, next: Point2, b: Point2) -> bool {
    let left_of_out = orient2(a, next, b) > 0.0;
    let left_of_in = orient2(prev, a, b) > 0.0;
    if orient2(prev, a, next) >= 0.0 {
        left_of_out && left_of_in
    } else {
        left_of_out || left_of_in
    }
}

/// Segment `m → v` crosses or grazes an edge of `ring` not incident to the given endpoints.
fn blocked_by(ring: &[Point2], m: Point2, v: Point2) -> bool {
    let n = ring.len();
    (0..n).any(|i| {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        if a == m || a == v || b == m || b == v {
            return false;
        }
        segments_cross(m, v, a, b)
            || point_segment_distance(a, m, v) == 0.0
            || point_segment_distance(b, m, v) == 0.0
    })
}

fn merge_hole(ring: &mut Vec<Point2>, hole: &[Point2], pending: &[Vec<Point2>]) -> bool {
    let hn = hole.len();
    let Some(mi) = (0..hn).max_by(|&i, &j| {
        hole[i]
            .x
            .total_cmp(&hole[j].x)
            .then(hole[i].y.total_cmp(&hole[j].y))
    }) else {
        return false;
    };
    let m = hole[mi];
    let (m_prev, m_next) = (hole[(mi + hn - 1) % hn], hole[(mi + 1) % hn]);

    let rn = ring.len();
    let mut order: Vec<usize> = (0..rn).collect();
    order.sort_by(|&i, &j| (ring[i] - m).norm_squared().total_cmp(&(ring[j] - m).norm_squared()));

    let bridge = order.into_iter().find(|&j| {
        let v = ring[j];
        if v == m {
            return false;
        }
        let (v_prev, v_next) = (ring[(j + rn - 1) % rn], ring[(j + 1) % rn]);
        locally_inside(v_prev, v, v_next, m)
            && locally_inside(m_prev, m, m_next, v)
            && !blocked_by(ring, m, v)
            && !blocked_by(hole, m, v)
            && !pending.iter().any(|h| blocked_by(h, m, v))
    });
    let Some(j) = bridge else {
        return false;
    };

    let v = ring[j];
    let mut spliced = Vec::with_capacity(rn + hn + 2);
    spliced.extend_from_slice(&ring[..=j]);
    spliced.extend_from_slice(&hole[mi..]);
    spliced.extend_from_slice(&hole[..=mi]);
    spliced.push(v);
    spliced.extend_from_slice(&ring[j + 1..]);
    *ring = spliced;
    true
}

#[inline]
fn in_triangle_inclusive(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    orient2(a, b, p) >= 0.0 && orient2(b, c, p) >= 0.0 && orient2(c, a, p) >= 0.0
}

fn is_ear(ring: &[Point2], idx: &[usize], pos: usize, eps_area: f64) -> bool {
    let n = idx.len();
    let a = ring[idx[(pos + n - 1) % n]];
    let b = ring[idx[pos]];
    let c = ring[idx[(pos + 1) % n]];
    if orient2(a, b, c) <= eps_area {
        return false;
    }
    idx.iter().map(|&k| ring[k]).all(|p| {
        // Bridge duplicates coincide with a corner and never block.
        p == a || p == b || p == c || !in_triangle_inclusive(p, a, b, c)
    })
}

fn clip_ears(ring: &[Point2], cfg: &GeomCfg) -> Vec<Polygon2> {
    let mut idx: Vec<usize> = (0..ring.len()).collect();
    let mut out = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut pos = 0usize;
    let mut misses = 0usize;

    while idx.len() > 3 {
        let n = idx.len();
        if is_ear(ring, &idx, pos, cfg.eps_area) {
            let (a, b, c) = (
                ring[idx[(pos + n - 1) % n]],
                ring[idx[pos]],
                ring[idx[(pos + 1) % n]],
            );
            out.push(Polygon2::new(vec![a, b, c]));
            idx.remove(pos);
            pos %= idx.len();
            misses = 0;
            continue;
        }
        pos = (pos + 1) % n;
        misses += 1;
        if misses < n {
            continue;
        }
        // Full pass without an ear: drop one zero-area vertex, or give up.
        let flat = (0..n).find(|&k| {
            let a = ring[idx[(k + n - 1) % n]];
            let b = ring[idx[k]];
            let c = ring[idx[(k + 1) % n]];
            orient2(a, b, c).abs() <= cfg.eps_area
        });
        match flat {
            Some(k) => {
                idx.remove(k);
                pos = 0;
                misses = 0;
            }
            None => {
                tracing::warn!(
                    remaining = n,
                    emitted = out.len(),
                    "no ear found; returning partial triangulation"
                );
                return out;
            }
        }
    }
    if idx.len() == 3 {
        let (a, b, c) = (ring[idx[0]], ring[idx[1]], ring[idx[2]]);
        if orient2(a, b, c) > cfg.eps_area {
            out.push(Polygon2::new(vec![a, b, c]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_area(tris: &[Polygon2]) -> f64 {
        tris.iter().map(|t| t.area()).sum()
    }

    fn m_shape() -> Polygon2 {
        Polygon2::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 2.0), (0.0, 4.0)])
    }

    fn slot_hole() -> Vec<Point2> {
        vec![
            Point2::new(1.0, 0.5),
            Point2::new(3.0, 0.5),
            Point2::new(3.0, 1.5),
            Point2::new(1.0, 1.5),
        ]
    }

    #[test]
    fn concave_m_shape() {
        let tris = triangulate(&m_shape());
        assert_eq!(tris.len(), 3);
        assert!((total_area(&tris) - 12.0).abs() < 1e-6);
        assert!(tris.iter().all(|t| ring_signed_area(&t.outer) > 0.0));
    }

    #[test]
    fn clockwise_input_is_corrected() {
        let mut p = m_shape();
        p.outer.reverse();
        let tris = triangulate(&p);
        assert!((total_area(&tris) - 12.0).abs() < 1e-6);
    }

    #[test]
    fn empty_and_point_holes_are_skipped() {
        let mut p = m_shape();
        p.inners.push(Vec::new());
        p.inners.push(vec![Point2::new(1.0, 1.0)]);
        let tris = triangulate(&p);
        assert!((total_area(&tris) - 12.0).abs() < 1e-6);
    }

    #[test]
    fn hole_area_is_subtracted() {
        let p = Polygon2::with_holes(m_shape().outer, vec![Vec::new(), slot_hole()]);
        let tris = triangulate(&p);
        assert!((total_area(&tris) - 10.0).abs() < 1e-6);
        // no triangle covers the hole
        let probe = Point2::new(2.0, 1.0);
        assert!(tris.iter().all(|t| !t.contains_point(probe, 0.0)));
        let material = Point2::new(0.5, 1.0);
        assert!(tris.iter().any(|t| t.contains_point(material, 0.0)));
    }

    #[test]
    fn two_holes() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let left = vec![
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 1.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 3.0),
        ];
        let right = vec![
            Point2::new(6.0, 1.0),
            Point2::new(8.0, 1.0),
            Point2::new(7.0, 3.0),
        ];
        let p = Polygon2::with_holes(outer, vec![left, right]);
        let tris = triangulate(&p);
        assert!((total_area(&tris) - p.area()).abs() < 1e-6);
        assert!((p.area() - 34.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_terminate() {
        assert!(triangulate(&Polygon2::default()).is_empty());
        assert!(triangulate(&Polygon2::from_xy(&[(0.0, 0.0), (1.0, 1.0)])).is_empty());
        // all collinear
        let line = Polygon2::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(triangulate(&line).is_empty());
        // repeated points
        let dup = Polygon2::from_xy(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        assert!(triangulate(&dup).is_empty());
    }

    #[test]
    fn collinear_vertices_keep_area() {
        let p = Polygon2::from_xy(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let tris = triangulate(&p);
        assert!((total_area(&tris) - 4.0).abs() < 1e-9);
    }
}
