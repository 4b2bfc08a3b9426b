//! 2D polygon geometry: generation, triangulation and intersection tests.
//!
//! Purpose
//! - Decide whether two polygons (convex, concave, with holes) overlap, using
//!   two independent convex tests (GJK and SAT) over ear-clipped triangulations.
//! - Generate random convex/concave polygons to stress and cross-check them.
//!
//! Conventions
//! - `Polygon2` rings are open (no repeated closing vertex); `correct()` makes the
//!   outer ring CCW and holes CW. Convex tests assume corrected convex input.
//! - Touching (shared edge/vertex) is a boundary case controlled by
//!   `GeomCfg::contact`. Under the default `Contact::Native` GJK and SAT may
//!   classify exact contact differently; `Contact::Inclusive` makes both count it.
//!
//! Code cross-refs: `Polygon2`, `GeomCfg`, `triangulate`, `intersects_convex`,
//! `sat::intersects`, `test_intersection`

pub mod gjk;
pub mod intersection;
pub mod polygon;
pub mod rand;
pub mod sat;
pub mod triangulate;
mod types;

pub use gjk::{intersects_convex, intersects_convex_with};
pub use intersection::{intersects, intersects_with, test_intersection, Method};
pub use polygon::{ring_is_simple, ring_signed_area, Polygon2};
pub use self::rand::{
    random_concave_polygon, random_convex_polygon, PolygonGenerator, ReplayToken,
};
pub use triangulate::{triangulate, triangulate_with};
pub use types::{Contact, GeomCfg};

#[cfg(test)]
mod tests_crossval;
