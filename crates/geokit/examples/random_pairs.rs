//! Show random polygon pairs and how the intersection tests classify them.
//!
//! Usage:
//!   cargo run -p geokit --example random_pairs -- convex
//!   cargo run -p geokit --example random_pairs -- concave
//!
//! Prints a few samples with vertex counts, triangle counts and the GJK/SAT verdicts.

use geokit::geom2::rand::{PolygonGenerator, PolygonParams, Shape, VertexCount};
use geokit::geom2::{intersects, triangulate, Method};

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "convex".to_string());
    let shape = match mode.as_str() {
        "convex" => Shape::Convex,
        "concave" => Shape::Concave,
        _ => {
            eprintln!("usage: random_pairs [convex|concave]");
            return;
        }
    };
    let params = PolygonParams {
        shape,
        vertex_count: VertexCount::Uniform { min: 4, max: 9 },
        max_coordinate: 1000.0,
    };
    let mut gen = PolygonGenerator::new(params, 2025).unwrap();
    let mut shown = 0;
    while shown < 5 {
        let (Some(a), Some(b)) = (gen.generate_next(), gen.generate_next()) else {
            continue;
        };
        println!(
            "pair {shown}: n=({}, {}), tris=({}, {}), gjk={}, sat={} (seeds {}, {})",
            a.polygon.outer.len(),
            b.polygon.outer.len(),
            triangulate(&a.polygon).len(),
            triangulate(&b.polygon).len(),
            intersects(&a.polygon, &b.polygon, Method::Gjk),
            intersects(&a.polygon, &b.polygon, Method::Sat),
            a.seed,
            b.seed,
        );
        shown += 1;
    }
}
