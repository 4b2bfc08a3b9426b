//! Point primitives and small point-level helpers.
//!
//! Points are plain nalgebra column vectors, so dot/cross/norm/normalize come
//! for free. Equality is exact; predicates that need slack take an explicit eps.

use nalgebra::{Vector2, Vector3};

use crate::error::GeomError;

pub type Point2 = Vector2<f64>;
pub type Point3 = Vector3<f64>;

/// Denominator threshold below which curvature is undefined.
const CURVATURE_EPS: f64 = 1e-8;

/// z-component of the 3D cross product of `a` and `b` (twice the signed triangle area).
#[inline]
pub fn cross2(a: Point2, b: Point2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `c` relative to the directed line `a → b` (positive: left turn).
#[inline]
pub fn orient2(a: Point2, b: Point2, c: Point2) -> f64 {
    cross2(b - a, c - a)
}

#[inline]
pub fn to_3d(p: Point2, z: f64) -> Point3 {
    Point3::new(p.x, p.y, z)
}

#[inline]
pub fn to_2d(p: Point3) -> Point2 {
    Point2::new(p.x, p.y)
}

#[inline]
pub fn calc_squared_distance2d(a: &Point3, b: &Point3) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[inline]
pub fn calc_distance2d(a: &Point3, b: &Point3) -> f64 {
    calc_squared_distance2d(a, b).sqrt()
}

#[inline]
pub fn calc_distance3d(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Signed curvature of the circle through three points (xy-plane only).
///
/// Positive for a counter-clockwise turn `p1 → p2 → p3`, zero for collinear points.
/// Errors if any two points coincide.
pub fn calc_curvature(p1: &Point3, p2: &Point3, p3: &Point3) -> Result<f64, GeomError> {
    let denominator =
        calc_distance2d(p1, p2) * calc_distance2d(p2, p3) * calc_distance2d(p3, p1);
    if denominator.abs() < CURVATURE_EPS {
        return Err(GeomError::degenerate(
            "points are too close for curvature calculation",
        ));
    }
    let turn = orient2(to_2d(*p1), to_2d(*p2), to_2d(*p3));
    Ok(2.0 * turn / denominator)
}

/// Intersection point of segments `p1p2` and `p3p4` in the xy-plane.
///
/// The z-coordinate is interpolated along `p1p2`. Parallel, collinear and
/// zero-length segments have no single intersection point and yield `None`.
/// Touching at an endpoint counts.
pub fn segment_intersection(p1: &Point3, p2: &Point3, p3: &Point3, p4: &Point3) -> Option<Point3> {
    let d1 = to_2d(p2 - p1);
    let d2 = to_2d(p4 - p3);
    let denom = cross2(d1, d2);
    if denom == 0.0 {
        return None;
    }
    let w = to_2d(p3 - p1);
    let t = cross2(w, d2) / denom;
    let s = cross2(w, d1) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&s) {
        return None;
    }
    Some(p1 + (p2 - p1) * t)
}
