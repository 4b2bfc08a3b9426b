//! Random convex and concave polygons in `[0, max_coordinate]²`.
//!
//! Purpose
//! - Stress-test inputs for triangulation and the convex intersection tests.
//!
//! Model
//! - Convex: Valtr's construction. Sorted random x/y samples are split into two
//!   chains, turned into edge vectors, angle-sorted and laid end to end. The
//!   result is convex with exactly `n` vertices and spans the sampled x/y range,
//!   so it stays inside the bound. Collinear draws are rejected via the hull.
//! - Concave: take a convex draw and pull one vertex toward the centroid past the
//!   chord of its neighbours. Angles around the centroid are preserved, so the
//!   result stays star-shaped (simple) and gains one reflex vertex.
//! - The RNG is always passed in. `ReplayToken` and `PolygonGenerator` give
//!   reproducible streams for experiments.
//!
//! Code cross-refs: `Polygon2`, `polygon::convex_hull`, `GeomCfg::max_concave_attempts`

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use super::polygon::{convex_hull, ring_is_convex, ring_is_simple, ring_signed_area, Polygon2};
use super::types::GeomCfg;
use crate::error::GeomError;
use crate::point::{cross2, orient2, Point2};

/// Valtr draws retried before falling back to a regular polygon.
const MAX_CONVEX_ATTEMPTS: usize = 32;

/// Random convex polygon with exactly `vertices` CCW vertices in `[0, max_coordinate]²`.
///
/// Returns an empty (invalid) polygon for `vertices < 3` or a non-positive bound.
pub fn random_convex_polygon<R: Rng + ?Sized>(
    rng: &mut R,
    vertices: usize,
    max_coordinate: f64,
) -> Polygon2 {
    if vertices < 3 || !(max_coordinate.is_finite() && max_coordinate > 0.0) {
        return Polygon2::default();
    }
    for _ in 0..MAX_CONVEX_ATTEMPTS {
        let pts = valtr_polygon(rng, vertices, max_coordinate);
        let hull = convex_hull(&pts);
        if hull.len() == vertices {
            return Polygon2::new(hull);
        }
    }
    tracing::debug!(vertices, "valtr draws degenerate, using regular polygon");
    regular_polygon(vertices, max_coordinate, rng.gen::<f64>() * std::f64::consts::TAU)
}

/// Random simple polygon with `vertices` CCW vertices and at least one reflex vertex.
///
/// `None` when no valid polygon was built within `GeomCfg::max_concave_attempts`,
/// or for `vertices < 4`. Callers are expected to skip absent draws.
pub fn random_concave_polygon<R: Rng + ?Sized>(
    rng: &mut R,
    vertices: usize,
    max_coordinate: f64,
) -> Option<Polygon2> {
    random_concave_polygon_with(rng, vertices, max_coordinate, &GeomCfg::default())
}

pub fn random_concave_polygon_with<R: Rng + ?Sized>(
    rng: &mut R,
    vertices: usize,
    max_coordinate: f64,
    cfg: &GeomCfg,
) -> Option<Polygon2> {
    if vertices < 4 {
        return None;
    }
    for attempt in 0..cfg.max_concave_attempts {
        let base = random_convex_polygon(rng, vertices, max_coordinate);
        if !base.is_valid() {
            return None;
        }
        if let Some(poly) = dent_inward(rng, &base, cfg) {
            return Some(poly);
        }
        tracing::debug!(attempt, vertices, "concave candidate rejected");
    }
    None
}

fn dent_inward<R: Rng + ?Sized>(rng: &mut R, base: &Polygon2, cfg: &GeomCfg) -> Option<Polygon2> {
    let n = base.outer.len();
    let c = base.centroid();
    let k = rng.gen_range(0..n);
    let prev = base.outer[(k + n - 1) % n];
    let v = base.outer[k];
    let next = base.outer[(k + 1) % n];
    let dir = c - v;
    let denom = cross2(next - prev, dir);
    if denom.abs() <= cfg.eps_area {
        return None;
    }
    // v + t·dir lies on the chord prev→next at t_chord.
    let t_chord = -orient2(prev, next, v) / denom;
    if !(t_chord > 0.0 && t_chord < 1.0) {
        return None;
    }
    let u = rng.gen_range(0.1..0.9);
    let t = t_chord + (1.0 - t_chord) * u;
    let mut outer = base.outer.clone();
    outer[k] = v + dir * t;
    let ok = !ring_is_convex(&outer, cfg.eps_area)
        && ring_is_simple(&outer)
        && ring_signed_area(&outer) > cfg.eps_area;
    ok.then(|| Polygon2::new(outer))
}

/// Valtr's random convex polygon on samples drawn from `[0, bound]`.
fn valtr_polygon<R: Rng + ?Sized>(rng: &mut R, n: usize, bound: f64) -> Vec<Point2> {
    let mut xs: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..=bound)).collect();
    let mut ys: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..=bound)).collect();
    xs.sort_by(f64::total_cmp);
    ys.sort_by(f64::total_cmp);
    let dx = chain_components(rng, &xs);
    let mut dy = chain_components(rng, &ys);
    dy.shuffle(rng);
    let mut edges: Vec<Vector2<f64>> = dx
        .into_iter()
        .zip(dy)
        .map(|(x, y)| Vector2::new(x, y))
        .collect();
    edges.sort_by(|a, b| a.y.atan2(a.x).total_cmp(&b.y.atan2(b.x)));

    let mut pts = Vec::with_capacity(n);
    let mut cur = Point2::zeros();
    for e in &edges {
        pts.push(cur);
        cur += e;
    }
    // Shift so the bounding box starts at the smallest samples.
    let min_x = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let shift = Point2::new(xs[0] - min_x, ys[0] - min_y);
    for p in &mut pts {
        *p += shift;
    }
    pts
}

/// Split sorted samples into two monotone chains and return the signed steps.
fn chain_components<R: Rng + ?Sized>(rng: &mut R, sorted: &[f64]) -> Vec<f64> {
    let n = sorted.len();
    let (lo, hi) = (sorted[0], sorted[n - 1]);
    let mut out = Vec::with_capacity(n);
    let mut last_top = lo;
    let mut last_bot = lo;
    for &v in &sorted[1..n - 1] {
        if rng.gen::<bool>() {
            out.push(v - last_top);
            last_top = v;
        } else {
            out.push(last_bot - v);
            last_bot = v;
        }
    }
    out.push(hi - last_top);
    out.push(last_bot - hi);
    out
}

fn regular_polygon(n: usize, bound: f64, phase: f64) -> Polygon2 {
    let r = 0.5 * bound;
    let delta = std::f64::consts::TAU / n as f64;
    Polygon2::new(
        (0..n)
            .map(|k| {
                let th = phase + k as f64 * delta;
                Point2::new(r + r * th.cos(), r + r * th.sin())
            })
            .collect(),
    )
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    /// Deterministic RNG for this `(seed, index)` pair.
    #[inline]
    pub fn rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn min(&self) -> usize {
        match *self {
            VertexCount::Fixed(n) => n,
            VertexCount::Uniform { min, .. } => min,
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n,
            VertexCount::Uniform { min, max } => rng.gen_range(min..=max.max(min)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Convex,
    Concave,
}

/// Parameters of a reproducible polygon stream.
#[derive(Clone, Copy, Debug)]
pub struct PolygonParams {
    pub shape: Shape,
    pub vertex_count: VertexCount,
    pub max_coordinate: f64,
}

impl PolygonParams {
    fn validate(&self) -> Result<(), GeomError> {
        let needed = match self.shape {
            Shape::Convex => 3,
            Shape::Concave => 4,
        };
        if self.vertex_count.min() < needed {
            return Err(GeomError::invalid(format!(
                "{:?} polygons need at least {needed} vertices",
                self.shape
            )));
        }
        if !(self.max_coordinate.is_finite() && self.max_coordinate > 0.0) {
            return Err(GeomError::invalid("max_coordinate must be finite and > 0"));
        }
        Ok(())
    }
}

/// A drawn polygon plus the seed that regenerates it.
#[derive(Clone, Debug)]
pub struct PolygonSample {
    pub polygon: Polygon2,
    pub seed: u64,
}

/// Seeded polygon stream; every sample carries its own replay seed.
pub struct PolygonGenerator {
    params: PolygonParams,
    cfg: GeomCfg,
    master_rng: StdRng,
}

impl PolygonGenerator {
    pub fn new(params: PolygonParams, seed: u64) -> Result<Self, GeomError> {
        params.validate()?;
        Ok(Self {
            params,
            cfg: GeomCfg::default(),
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn params(&self) -> &PolygonParams {
        &self.params
    }

    /// Next draw; `None` when a concave draw failed (the stream continues).
    pub fn generate_next(&mut self) -> Option<PolygonSample> {
        let seed = self.master_rng.next_u64();
        self.regenerate(seed)
            .map(|polygon| PolygonSample { polygon, seed })
    }

    pub fn regenerate(&self, seed: u64) -> Option<Polygon2> {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = self.params.vertex_count.sample(&mut rng);
        match self.params.shape {
            Shape::Convex => Some(random_convex_polygon(
                &mut rng,
                n,
                self.params.max_coordinate,
            )),
            Shape::Concave => {
                random_concave_polygon_with(&mut rng, n, self.params.max_coordinate, &self.cfg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_bounds(p: &Polygon2, bound: f64) -> bool {
        p.outer
            .iter()
            .all(|v| (0.0..=bound).contains(&v.x) && (0.0..=bound).contains(&v.y))
    }

    #[test]
    fn convex_draws_have_exact_count_and_orientation() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 3..10 {
            for _ in 0..50 {
                let p = random_convex_polygon(&mut rng, n, 1000.0);
                assert_eq!(p.outer.len(), n);
                assert!(p.is_convex(0.0));
                assert!(ring_signed_area(&p.outer) > 0.0);
                assert!(in_bounds(&p, 1000.0 + 1e-9));
            }
        }
    }

    #[test]
    fn convex_rejects_bad_params() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!random_convex_polygon(&mut rng, 2, 10.0).is_valid());
        assert!(!random_convex_polygon(&mut rng, 5, 0.0).is_valid());
    }

    #[test]
    fn concave_draws_are_simple_and_reflex() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut produced = 0;
        for n in 4..10 {
            for _ in 0..30 {
                if let Some(p) = random_concave_polygon(&mut rng, n, 1000.0) {
                    produced += 1;
                    assert_eq!(p.outer.len(), n);
                    assert!(!p.is_convex(1e-12));
                    assert!(ring_is_simple(&p.outer));
                    assert!(ring_signed_area(&p.outer) > 0.0);
                    assert!(in_bounds(&p, 1000.0 + 1e-9));
                }
            }
        }
        assert!(produced > 0);
        assert!(random_concave_polygon(&mut rng, 3, 1000.0).is_none());
    }

    #[test]
    fn replay_is_reproducible() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = random_convex_polygon(&mut tok.rng(), 8, 100.0);
        let b = random_convex_polygon(&mut tok.rng(), 8, 100.0);
        assert_eq!(a, b);
        let other = random_convex_polygon(&mut ReplayToken { seed: 42, index: 8 }.rng(), 8, 100.0);
        assert_ne!(a, other);
    }

    #[test]
    fn generator_stream_regenerates_samples() {
        let params = PolygonParams {
            shape: Shape::Concave,
            vertex_count: VertexCount::Uniform { min: 4, max: 9 },
            max_coordinate: 1000.0,
        };
        let mut gen = PolygonGenerator::new(params, 2025).unwrap();
        let mut seen = 0;
        for _ in 0..20 {
            if let Some(sample) = gen.generate_next() {
                seen += 1;
                assert_eq!(gen.regenerate(sample.seed), Some(sample.polygon));
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn generator_validates_params() {
        let bad = PolygonParams {
            shape: Shape::Concave,
            vertex_count: VertexCount::Fixed(3),
            max_coordinate: 10.0,
        };
        assert!(matches!(
            PolygonGenerator::new(bad, 0),
            Err(GeomError::InvalidParams { .. })
        ));
        let bad_bound = PolygonParams {
            shape: Shape::Convex,
            vertex_count: VertexCount::Fixed(5),
            max_coordinate: f64::NAN,
        };
        assert!(PolygonGenerator::new(bad_bound, 0).is_err());
    }
}
