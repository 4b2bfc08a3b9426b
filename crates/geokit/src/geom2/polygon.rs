//! Vertex-representation polygons with optional holes (`Polygon2`).
//!
//! Purpose
//! - Carry an outer ring plus inner rings (holes) as plain vertex lists, the
//!   input and output currency of triangulation and the convex tests.
//!
//! Conventions
//! - Rings are implicitly closed: the last vertex connects to the first. A
//!   repeated closing vertex is tolerated and removed by `correct()`.
//! - After `correct()`, the outer ring is counter-clockwise and holes are clockwise.
//!
//! Code cross-refs: `triangulate::triangulate`, `gjk::intersects_convex`, `sat::intersects`

use crate::point::{cross2, orient2, Point2};

/// Polygon with an outer ring and zero or more holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon2 {
    pub outer: Vec<Point2>,
    pub inners: Vec<Vec<Point2>>,
}

impl Polygon2 {
    #[inline]
    pub fn new(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            inners: Vec::new(),
        }
    }

    #[inline]
    pub fn with_holes(outer: Vec<Point2>, inners: Vec<Vec<Point2>>) -> Self {
        Self { outer, inners }
    }

    /// Build from `(x, y)` tuples; convenient in tests and examples.
    pub fn from_xy(outer: &[(f64, f64)]) -> Self {
        Self::new(outer.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Triangle with the given corners, oriented counter-clockwise.
    pub fn triangle(a: Point2, b: Point2, c: Point2) -> Self {
        if orient2(a, b, c) < 0.0 {
            Self::new(vec![a, c, b])
        } else {
            Self::new(vec![a, b, c])
        }
    }

    #[inline]
    pub fn is_triangle(&self) -> bool {
        self.outer.len() == 3 && self.inners.is_empty()
    }

    /// At least three outer vertices; the minimum for triangulation and intersection.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.outer.len() >= 3
    }

    /// Area of the outer ring minus the hole areas (non-negative).
    pub fn area(&self) -> f64 {
        let holes: f64 = self.inners.iter().map(|r| ring_signed_area(r).abs()).sum();
        ring_signed_area(&self.outer).abs() - holes
    }

    /// Normalize in place: drop repeated closing vertices, orient outer CCW and holes CW.
    pub fn correct(&mut self) {
        strip_closing_vertex(&mut self.outer);
        if ring_signed_area(&self.outer) < 0.0 {
            self.outer.reverse();
        }
        for ring in &mut self.inners {
            strip_closing_vertex(ring);
            if ring_signed_area(ring) > 0.0 {
                ring.reverse();
            }
        }
    }

    /// Owned copy passed through `correct()`.
    pub fn corrected(&self) -> Self {
        let mut out = self.clone();
        out.correct();
        out
    }

    /// Convexity of the outer ring (holes ignored). Collinear vertices are tolerated.
    pub fn is_convex(&self, eps: f64) -> bool {
        ring_is_convex(&self.outer, eps)
    }

    /// Outer ring and every hole are simple rings.
    pub fn is_simple(&self) -> bool {
        ring_is_simple(&self.outer) && self.inners.iter().all(|r| ring_is_simple(r))
    }

    /// Point membership: inside the outer ring and outside every hole (boundary counts).
    pub fn contains_point(&self, p: Point2, eps: f64) -> bool {
        ring_contains(&self.outer, p, eps, true)
            && self
                .inners
                .iter()
                .filter(|r| r.len() >= 3)
                .all(|r| !ring_contains(r, p, eps, false))
    }

    /// Area centroid of the outer ring, falling back to the vertex mean when degenerate.
    pub fn centroid(&self) -> Point2 {
        ring_centroid(&self.outer)
    }
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn ring_signed_area(ring: &[Point2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..ring.len() {
        a += cross2(ring[i], ring[(i + 1) % ring.len()]);
    }
    0.5 * a
}

pub(crate) fn strip_closing_vertex(ring: &mut Vec<Point2>) {
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
}

pub(crate) fn ring_is_convex(ring: &[Point2], eps: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0;
    for i in 0..n {
        let turn = orient2(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        if turn.abs() <= eps {
            continue;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Even-odd ray cast; points within `eps` of an edge return `on_boundary`.
pub(crate) fn ring_contains(
    ring: &[Point2],
    p: Point2,
    eps: f64,
    on_boundary: bool,
) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        if point_segment_distance(p, ring[i], ring[(i + 1) % n]) <= eps.abs() {
            return on_boundary;
        }
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub(crate) fn point_segment_distance(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Proper crossing of segments `ab` and `cd` (shared endpoints and collinear overlap excluded).
pub(crate) fn segments_cross(a: Point2, b: Point2, c: Point2, d: Point2) -> bool {
    let d1 = orient2(c, d, a);
    let d2 = orient2(c, d, b);
    let d3 = orient2(a, b, c);
    let d4 = orient2(a, b, d);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Simple ring: no two non-adjacent edges cross or touch, no repeated vertices.
pub fn ring_is_simple(ring: &[Point2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if ring[i] == ring[j] {
                return false;
            }
        }
    }
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            let (c, d) = (ring[j], ring[(j + 1) % n]);
            if segments_cross(a, b, c, d)
                || point_segment_distance(c, a, b) == 0.0
                || point_segment_distance(a, c, d) == 0.0
            {
                return false;
            }
        }
    }
    true
}

pub(crate) fn ring_centroid(ring: &[Point2]) -> Point2 {
    if ring.is_empty() {
        return Point2::zeros();
    }
    let mut a = 0.0;
    let mut c = Point2::zeros();
    for i in 0..ring.len() {
        let p = ring[i];
        let q = ring[(i + 1) % ring.len()];
        let w = cross2(p, q);
        a += w;
        c += (p + q) * w;
    }
    if a.abs() < 1e-18 {
        let sum: Point2 = ring.iter().sum();
        return sum / ring.len() as f64;
    }
    c / (3.0 * a)
}

/// Andrew's monotone chain convex hull (CCW, collinear points dropped).
pub(crate) fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2
            && orient2(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && orient2(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
