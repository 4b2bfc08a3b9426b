//! Polygon geometry core for the planning stack.
//!
//! - `point`: 2D/3D point helpers (distances, curvature, segment intersection).
//! - `geom2`: polygons, random generation, ear-clipping triangulation and the
//!   GJK/SAT convex intersection tests composed over triangulations.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; prefer
//!   clearer names over compatibility when reshaping it.
//! - Library code logs through `tracing` and never installs a subscriber.

pub mod error;
pub mod geom2;
pub mod point;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::GeomError;
pub use geom2::{Contact, GeomCfg, Polygon2};
pub use point::{Point2, Point3};

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::GeomError;
    pub use crate::geom2::rand::{
        PolygonGenerator, PolygonParams, PolygonSample, ReplayToken, Shape, VertexCount,
    };
    pub use crate::geom2::{
        intersects, intersects_convex, intersects_convex_with, intersects_with,
        random_concave_polygon, random_convex_polygon, sat, test_intersection, triangulate,
        triangulate_with, Contact, GeomCfg, Method, Polygon2,
    };
    pub use crate::point::{
        calc_curvature, calc_distance2d, calc_distance3d, calc_squared_distance2d, cross2,
        segment_intersection, to_2d, to_3d, Point2, Point3,
    };
}
