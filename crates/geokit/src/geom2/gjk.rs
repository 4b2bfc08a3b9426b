//! 2D GJK intersection test for convex polygons.
//!
//! Model
//! - Work in the Minkowski difference `A - B`; the polygons overlap iff it contains
//!   the origin. A simplex of up to three support points is grown toward the
//!   origin until it encloses it or a support point fails to pass the origin.
//!
//! Contact policy
//! - `Contact::Native`: a support point that only reaches the origin
//!   (`p·d <= 0`) ends the search with "no intersection". Shared edges, shared
//!   vertices and apex-to-apex contact come out as no intersection; a vertex
//!   resting on an edge may still enclose the origin and report one. SAT counts
//!   all of these as intersecting.
//! - The support and direction checks compare against exact zero. Contact slack
//!   lives in `GeomCfg::eps_contact` and only applies under `Contact::Inclusive`,
//!   so a `1e-12` overlap is already an intersection.
//! - `Contact::Inclusive`: a negative GJK answer is confirmed with the exact
//!   distance between the (then separated) polygons; a distance up to
//!   `GeomCfg::eps_contact` reports an intersection.
//!
//! Holes are ignored; inputs must be convex. The iteration cap returns `false`.

use super::polygon::{point_segment_distance, Polygon2};
use super::types::{Contact, GeomCfg};
use crate::point::Point2;

/// GJK test with default tolerances (`Contact::Native`).
pub fn intersects_convex(a: &Polygon2, b: &Polygon2) -> bool {
    intersects_convex_with(a, b, &GeomCfg::default())
}

pub fn intersects_convex_with(a: &Polygon2, b: &Polygon2, cfg: &GeomCfg) -> bool {
    if a.outer.is_empty() || b.outer.is_empty() {
        return false;
    }
    if gjk_overlap(a, b, cfg.max_gjk_iterations) {
        return true;
    }
    match cfg.contact {
        Contact::Native => false,
        Contact::Inclusive => separation(&a.outer, &b.outer) <= cfg.eps_contact,
    }
}

fn gjk_overlap(a: &Polygon2, b: &Polygon2, max_iterations: usize) -> bool {
    let support = |d: Point2| support_point(&a.outer, d) - support_point(&b.outer, -d);

    let mut d = a.centroid() - b.centroid();
    if d.norm_squared() == 0.0 {
        d = Point2::new(1.0, 0.0);
    }
    let mut simplex = Simplex::default();
    simplex.push(support(d));
    d = -simplex.last();

    for _ in 0..max_iterations {
        if d.norm_squared() == 0.0 {
            // Origin is a support point, i.e. on the boundary of A - B.
            return false;
        }
        let p = support(d);
        if p.dot(&d) <= 0.0 {
            return false;
        }
        simplex.push(p);
        if simplex.reduce(&mut d) {
            return true;
        }
    }
    false
}

/// Distance between two convex rings with disjoint interiors.
fn separation(a: &[Point2], b: &[Point2]) -> f64 {
    fn vertex_to_edges(pts: &[Point2], ring: &[Point2]) -> f64 {
        let n = ring.len();
        pts.iter()
            .flat_map(|&p| {
                (0..n).map(move |i| point_segment_distance(p, ring[i], ring[(i + 1) % n]))
            })
            .fold(f64::INFINITY, f64::min)
    }
    vertex_to_edges(a, b).min(vertex_to_edges(b, a))
}

/// Farthest vertex of `pts` along `d`.
fn support_point(pts: &[Point2], d: Point2) -> Point2 {
    let mut best = pts[0];
    let mut best_dot = best.dot(&d);
    for p in &pts[1..] {
        let v = p.dot(&d);
        if v > best_dot {
            best = *p;
            best_dot = v;
        }
    }
    best
}

/// Perpendicular of `v` pointing to the side of `toward`.
#[inline]
fn perp_toward(v: Point2, toward: Point2) -> Point2 {
    let n = Point2::new(-v.y, v.x);
    if n.dot(&toward) < 0.0 {
        -n
    } else {
        n
    }
}

/// GJK simplex in the Minkowski difference; the newest point is last.
struct Simplex {
    pts: [Point2; 3],
    len: usize,
}

impl Default for Simplex {
    fn default() -> Self {
        Self {
            pts: [Point2::zeros(); 3],
            len: 0,
        }
    }
}

impl Simplex {
    fn push(&mut self, p: Point2) {
        debug_assert!(self.len < 3);
        self.pts[self.len] = p;
        self.len += 1;
    }

    fn last(&self) -> Point2 {
        self.pts[self.len - 1]
    }

    fn set(&mut self, pts: &[Point2]) {
        self.pts[..pts.len()].copy_from_slice(pts);
        self.len = pts.len();
    }

    /// Keep the feature closest to the origin and aim `d` at it.
    /// Returns `true` once the triangle encloses the origin.
    fn reduce(&mut self, d: &mut Point2) -> bool {
        match self.len {
            2 => {
                let (b, a) = (self.pts[0], self.pts[1]);
                let ab = b - a;
                let ao = -a;
                if ab.dot(&ao) > 0.0 {
                    // Origin on the segment line probes an arbitrary side.
                    *d = perp_toward(ab, ao);
                } else {
                    self.set(&[a]);
                    *d = ao;
                }
                false
            }
            3 => {
                let (c, b, a) = (self.pts[0], self.pts[1], self.pts[2]);
                let ab = b - a;
                let ac = c - a;
                let ao = -a;
                let ab_out = perp_toward(ab, -ac);
                let ac_out = perp_toward(ac, -ab);
                if ab_out.dot(&ao) > 0.0 {
                    self.set(&[b, a]);
                    *d = ab_out;
                    false
                } else if ac_out.dot(&ao) > 0.0 {
                    self.set(&[c, a]);
                    *d = ac_out;
                    false
                } else {
                    true
                }
            }
            _ => false,
        }
    }
}
