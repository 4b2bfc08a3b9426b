//! GJK vs SAT agreement experiment over random polygon sets.
//!
//! For each vertex count, draw `count` polygons, triangulate them once, then
//! test every unordered pair with both methods. Convex sets are tested
//! directly; concave sets go through `test_intersection` on the triangulations.

use anyhow::Result;
use geokit::geom2::rand::{PolygonGenerator, PolygonParams, Shape, VertexCount};
use geokit::geom2::{intersects_convex, sat, test_intersection, triangulate, Polygon2};
use polars::prelude::*;
use std::time::Instant;

#[derive(Clone, Copy, Debug)]
pub struct CrossvalParams {
    pub shape: Shape,
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub count: usize,
    pub max_coordinate: f64,
    pub seed: u64,
}

/// One row of the result table (per vertex count).
#[derive(Clone, Debug, PartialEq)]
pub struct CrossvalRow {
    pub vertices: u32,
    pub polygons: u32,
    pub pairs: u64,
    pub gjk_hits: u64,
    pub sat_hits: u64,
    pub disagreements: u64,
    pub triangulate_ms: f64,
    pub gjk_ms: f64,
    pub sat_ms: f64,
}

pub fn run(params: &CrossvalParams) -> Result<Vec<CrossvalRow>> {
    let mut rows = Vec::with_capacity(params.max_vertices.saturating_sub(params.min_vertices) + 1);
    for n in params.min_vertices..=params.max_vertices {
        let gen_params = PolygonParams {
            shape: params.shape,
            vertex_count: VertexCount::Fixed(n),
            max_coordinate: params.max_coordinate,
        };
        let mut gen = PolygonGenerator::new(gen_params, params.seed ^ n as u64)?;
        let polys: Vec<Polygon2> = (0..params.count)
            .filter_map(|_| gen.generate_next())
            .map(|s| s.polygon)
            .collect();
        if polys.len() < params.count {
            tracing::warn!(
                vertices = n,
                requested = params.count,
                produced = polys.len(),
                "some draws failed"
            );
        }
        let row = match params.shape {
            Shape::Convex => convex_row(n, &polys),
            Shape::Concave => concave_row(n, &polys),
        };
        tracing::info!(
            vertices = n,
            pairs = row.pairs,
            gjk_hits = row.gjk_hits,
            sat_hits = row.sat_hits,
            disagreements = row.disagreements,
            "crossval"
        );
        rows.push(row);
    }
    Ok(rows)
}

fn pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (i + 1..len).map(move |j| (i, j)))
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1e3)
}

fn tally(
    n: usize,
    polygons: usize,
    triangulate_ms: f64,
    gjk: (Vec<bool>, f64),
    sat: (Vec<bool>, f64),
) -> CrossvalRow {
    let (gjk, gjk_ms) = gjk;
    let (sat, sat_ms) = sat;
    CrossvalRow {
        vertices: n as u32,
        polygons: polygons as u32,
        pairs: gjk.len() as u64,
        gjk_hits: hits(&gjk),
        sat_hits: hits(&sat),
        disagreements: gjk.iter().zip(&sat).filter(|(a, b)| a != b).count() as u64,
        triangulate_ms,
        gjk_ms,
        sat_ms,
    }
}

fn hits(v: &[bool]) -> u64 {
    v.iter().filter(|&&b| b).count() as u64
}

fn convex_row(n: usize, polys: &[Polygon2]) -> CrossvalRow {
    let gjk = timed(|| {
        pairs(polys.len())
            .map(|(i, j)| intersects_convex(&polys[i], &polys[j]))
            .collect::<Vec<_>>()
    });
    let sat = timed(|| {
        pairs(polys.len())
            .map(|(i, j)| sat::intersects(&polys[i], &polys[j]))
            .collect::<Vec<_>>()
    });
    tally(n, polys.len(), 0.0, gjk, sat)
}

fn concave_row(n: usize, polys: &[Polygon2]) -> CrossvalRow {
    let (tris, triangulate_ms) = timed(|| polys.iter().map(triangulate).collect::<Vec<_>>());
    let gjk = timed(|| {
        pairs(tris.len())
            .map(|(i, j)| test_intersection(&tris[i], &tris[j], intersects_convex))
            .collect::<Vec<_>>()
    });
    let sat = timed(|| {
        pairs(tris.len())
            .map(|(i, j)| test_intersection(&tris[i], &tris[j], sat::intersects))
            .collect::<Vec<_>>()
    });
    tally(n, polys.len(), triangulate_ms, gjk, sat)
}

pub fn to_frame(rows: &[CrossvalRow]) -> PolarsResult<DataFrame> {
    df!(
        "vertices" => rows.iter().map(|r| r.vertices).collect::<Vec<_>>(),
        "polygons" => rows.iter().map(|r| r.polygons).collect::<Vec<_>>(),
        "pairs" => rows.iter().map(|r| r.pairs).collect::<Vec<_>>(),
        "gjk_hits" => rows.iter().map(|r| r.gjk_hits).collect::<Vec<_>>(),
        "sat_hits" => rows.iter().map(|r| r.sat_hits).collect::<Vec<_>>(),
        "disagreements" => rows.iter().map(|r| r.disagreements).collect::<Vec<_>>(),
        "triangulate_ms" => rows.iter().map(|r| r.triangulate_ms).collect::<Vec<_>>(),
        "gjk_ms" => rows.iter().map(|r| r.gjk_ms).collect::<Vec<_>>(),
        "sat_ms" => rows.iter().map(|r| r.sat_ms).collect::<Vec<_>>()
    )
}
