//! Intersection of arbitrary (concave, holed) polygons via their triangulations.
//!
//! The convex test is a plain function value, so GJK, SAT or a configured
//! closure can be plugged in. Pairwise cost is `|A| × |B|` triangles, which is
//! fine for the tens of triangles seen in planning footprints.

use super::gjk::intersects_convex_with;
use super::polygon::Polygon2;
use super::sat;
use super::triangulate::triangulate_with;
use super::types::GeomCfg;

/// Convex test used on triangle pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Gjk,
    Sat,
}

/// `true` iff some triangle of `a` intersects some triangle of `b` according to `test`.
pub fn test_intersection<F>(a: &[Polygon2], b: &[Polygon2], test: F) -> bool
where
    F: Fn(&Polygon2, &Polygon2) -> bool,
{
    a.iter().any(|ta| b.iter().any(|tb| test(ta, tb)))
}

/// Triangulate both polygons and run `test_intersection` with the chosen method.
pub fn intersects(a: &Polygon2, b: &Polygon2, method: Method) -> bool {
    intersects_with(a, b, method, &GeomCfg::default())
}

pub fn intersects_with(a: &Polygon2, b: &Polygon2, method: Method, cfg: &GeomCfg) -> bool {
    let ta = triangulate_with(a, cfg);
    let tb = triangulate_with(b, cfg);
    match method {
        Method::Gjk => test_intersection(&ta, &tb, |x, y| intersects_convex_with(x, y, cfg)),
        Method::Sat => test_intersection(&ta, &tb, |x, y| sat::intersects_with(x, y, cfg)),
    }
}
