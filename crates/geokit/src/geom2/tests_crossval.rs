//! Cross-validation of GJK, SAT and triangulation against `geo`.
//!
//! Random floats make exact contact a measure-zero event, so the tolerance
//! below only absorbs the rare touching/grazing pair.

use super::polygon::point_segment_distance;
use super::*;
use crate::point::Point2;
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use geo::{Area, Intersects, LineString};
use proptest::prelude::*;

const MAX_COORD: f64 = 1000.0;
const PAIRS_PER_COUNT: usize = 300;

fn ring(r: &[Point2]) -> LineString<f64> {
    LineString::from(r.iter().map(|v| (v.x, v.y)).collect::<Vec<_>>())
}

fn to_geo(p: &Polygon2) -> geo::Polygon<f64> {
    geo::Polygon::new(ring(&p.outer), p.inners.iter().map(|h| ring(h)).collect())
}

/// At most one disagreement per thousand pairs.
fn within_tolerance(mismatches: usize, total: usize) -> bool {
    mismatches * 1000 <= total
}

#[test]
fn convex_pairs_agree_with_geo() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let (mut total, mut gjk_bad, mut sat_bad, mut hits) = (0usize, 0usize, 0usize, 0usize);
    for n in 3..=9 {
        for _ in 0..PAIRS_PER_COUNT {
            let a = random_convex_polygon(&mut rng, n, MAX_COORD);
            let b = random_convex_polygon(&mut rng, n, MAX_COORD);
            let truth = to_geo(&a).intersects(&to_geo(&b));
            total += 1;
            hits += usize::from(truth);
            gjk_bad += usize::from(intersects_convex(&a, &b) != truth);
            sat_bad += usize::from(sat::intersects(&a, &b) != truth);
        }
    }
    assert!(within_tolerance(gjk_bad, total), "gjk {gjk_bad}/{total}");
    assert!(within_tolerance(sat_bad, total), "sat {sat_bad}/{total}");
    // both outcomes are exercised
    assert!(hits > 0 && hits < total, "hits {hits}/{total}");
}

#[test]
fn concave_pairs_agree_with_geo_via_triangulation() {
    let mut rng = StdRng::seed_from_u64(0xBEEF);
    let (mut total, mut gjk_bad, mut sat_bad) = (0usize, 0usize, 0usize);
    for n in 4..=9 {
        for _ in 0..PAIRS_PER_COUNT / 3 {
            let (Some(a), Some(b)) = (
                random_concave_polygon(&mut rng, n, MAX_COORD),
                random_concave_polygon(&mut rng, n, MAX_COORD),
            ) else {
                continue;
            };
            let truth = to_geo(&a).intersects(&to_geo(&b));
            let (ta, tb) = (triangulate(&a), triangulate(&b));
            total += 1;
            gjk_bad += usize::from(test_intersection(&ta, &tb, intersects_convex) != truth);
            sat_bad += usize::from(test_intersection(&ta, &tb, sat::intersects) != truth);
        }
    }
    assert!(total > 0);
    assert!(within_tolerance(gjk_bad, total), "gjk {gjk_bad}/{total}");
    assert!(within_tolerance(sat_bad, total), "sat {sat_bad}/{total}");
}

#[test]
fn polygon_area_matches_geo() {
    let holed = Polygon2::with_holes(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(0.0, 4.0),
        ],
        vec![vec![
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 1.0),
            Point2::new(3.0, 3.0),
        ]],
    );
    assert!((holed.area() - to_geo(&holed).unsigned_area()).abs() < 1e-9);
}

/// Convex outer ring with one or two small convex holes inside its inscribed disk.
fn holed_polygon(rng: &mut StdRng, n: usize, holes: usize) -> Option<Polygon2> {
    let outer = random_convex_polygon(rng, n, MAX_COORD);
    let c = outer.centroid();
    let m = outer.outer.len();
    let r = (0..m)
        .map(|i| point_segment_distance(c, outer.outer[i], outer.outer[(i + 1) % m]))
        .fold(f64::INFINITY, f64::min);
    if r < 1.0 {
        return None;
    }
    // (center offset, half size) as fractions of r; both layouts stay within 0.76 r
    let layout: &[(f64, f64)] = if holes == 1 {
        &[(0.0, 0.45)]
    } else {
        &[(-0.5, 0.225), (0.5, 0.225)]
    };
    let mut inners: Vec<Vec<Point2>> = Vec::with_capacity(layout.len());
    for &(dx, half) in layout {
        let k = 3 + rng.gen_range(0..4);
        let unit = random_convex_polygon(rng, k, 1.0);
        let center = c + Point2::new(dx * r, 0.0);
        inners.push(
            unit.outer
                .iter()
                .map(|q| center + (q - Point2::new(0.5, 0.5)) * (2.0 * half * r))
                .collect(),
        );
    }
    Some(Polygon2::with_holes(outer.outer, inners))
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn triangulation_conserves_area(seed in any::<u64>(), n in 4usize..=12) {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(p) = random_concave_polygon(&mut rng, n, MAX_COORD) {
            let tris = triangulate(&p);
            let sum: f64 = tris.iter().map(|t| t.area()).sum();
            let expected = to_geo(&p).unsigned_area();
            prop_assert!((sum - expected).abs() <= 1e-9 * expected.max(1.0));
            prop_assert!(tris.iter().all(|t| t.is_triangle()));
        }
    }

    #[test]
    fn triangulation_conserves_area_with_holes(
        seed in any::<u64>(),
        n in 4usize..=9,
        holes in 1usize..=2,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(p) = holed_polygon(&mut rng, n, holes) {
            let tris = triangulate(&p);
            let sum: f64 = tris.iter().map(|t| t.area()).sum();
            let expected = to_geo(&p).unsigned_area();
            prop_assert!(expected > 0.0);
            prop_assert!((sum - expected).abs() <= 1e-9 * expected.max(1.0));
            prop_assert!((p.area() - expected).abs() <= 1e-9 * expected.max(1.0));
            // hole centers are not covered
            for hole in &p.inners {
                let c = Polygon2::new(hole.clone()).centroid();
                prop_assert!(tris.iter().all(|t| !t.contains_point(c, 0.0)));
            }
        }
    }

    #[test]
    fn gjk_and_sat_agree_on_convex_draws(seed in any::<u64>(), n in 3usize..=9, m in 3usize..=9) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = random_convex_polygon(&mut rng, n, MAX_COORD);
        let b = random_convex_polygon(&mut rng, m, MAX_COORD);
        prop_assert_eq!(intersects_convex(&a, &b), sat::intersects(&a, &b));
    }
}
