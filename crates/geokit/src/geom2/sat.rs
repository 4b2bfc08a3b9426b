//! Separating Axis Theorem test for convex polygons.
//!
//! For two convex polygons it suffices to test the edge normals of both. The
//! polygons are disjoint iff their projections onto some normal do not overlap.
//!
//! Contact policy
//! - `Contact::Native`: only a strict gap (`max_a < min_b`) separates. Touching
//!   intervals overlap, so shared edges, shared vertices and a vertex resting on
//!   an edge are all reported as intersecting. GJK differs here.
//! - `Contact::Inclusive`: intervals must be apart by more than `eps_contact`
//!   (normals are unit length, so this is a distance).

use super::polygon::Polygon2;
use super::types::{Contact, GeomCfg};
use crate::point::Point2;

/// SAT test with default tolerances (`Contact::Native`).
pub fn intersects(a: &Polygon2, b: &Polygon2) -> bool {
    intersects_with(a, b, &GeomCfg::default())
}

pub fn intersects_with(a: &Polygon2, b: &Polygon2, cfg: &GeomCfg) -> bool {
    if a.outer.is_empty() || b.outer.is_empty() {
        return false;
    }
    let margin = match cfg.contact {
        Contact::Native => 0.0,
        Contact::Inclusive => cfg.eps_contact,
    };
    edge_normals(&a.outer)
        .chain(edge_normals(&b.outer))
        .all(|axis| !separates(&a.outer, &b.outer, axis, margin))
}

/// Unit outward normals of a CCW ring; zero-length edges are skipped.
pub fn edge_normals(ring: &[Point2]) -> impl Iterator<Item = Point2> + '_ {
    let n = ring.len();
    (0..n).filter_map(move |i| {
        let e = ring[(i + 1) % n] - ring[i];
        let len = e.norm();
        (len > 0.0).then(|| Point2::new(e.y, -e.x) / len)
    })
}

/// `[min, max]` of the projections of `pts` onto `axis`.
fn project(pts: &[Point2], axis: Point2) -> (f64, f64) {
    pts.iter()
        .map(|p| p.dot(&axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Projections on `axis` are apart by more than `margin`.
fn separates(a: &[Point2], b: &[Point2], axis: Point2, margin: f64) -> bool {
    let (min_a, max_a) = project(a, axis);
    let (min_b, max_b) = project(b, axis);
    max_a + margin < min_b || max_b + margin < min_a
}
