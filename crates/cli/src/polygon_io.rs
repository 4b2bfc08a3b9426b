//! JSON documents for polygons and triangle lists.

use anyhow::{Context, Result};
use geokit::{Point2, Polygon2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::provenance::ensure_parent;

/// Serialized polygon: open rings of `[x, y]` pairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonDoc {
    pub outer: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inners: Vec<Vec<[f64; 2]>>,
    /// Replay seed when the polygon was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn ring_doc(ring: &[Point2]) -> Vec<[f64; 2]> {
    ring.iter().map(|p| [p.x, p.y]).collect()
}

fn ring_points(ring: &[[f64; 2]]) -> Vec<Point2> {
    ring.iter().map(|&[x, y]| Point2::new(x, y)).collect()
}

impl From<&Polygon2> for PolygonDoc {
    fn from(p: &Polygon2) -> Self {
        Self {
            outer: ring_doc(&p.outer),
            inners: p.inners.iter().map(|h| ring_doc(h)).collect(),
            seed: None,
        }
    }
}

impl From<&PolygonDoc> for Polygon2 {
    fn from(doc: &PolygonDoc) -> Self {
        Polygon2::with_holes(
            ring_points(&doc.outer),
            doc.inners.iter().map(|h| ring_points(h)).collect(),
        )
    }
}

pub fn read_polygon(path: &Path) -> Result<PolygonDoc> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn polygon_doc_roundtrips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poly.json");
        let poly = Polygon2::with_holes(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(4.0, 4.0),
            ],
            vec![vec![
                Point2::new(2.0, 1.0),
                Point2::new(3.0, 1.0),
                Point2::new(3.0, 2.0),
            ]],
        );
        let doc = PolygonDoc {
            seed: Some(9),
            ..PolygonDoc::from(&poly)
        };
        write_json(&path, &doc).unwrap();
        let back = read_polygon(&path).unwrap();
        assert_eq!(back, doc);
        assert_eq!(Polygon2::from(&back), poly);
    }

    #[test]
    fn holes_and_seed_are_optional() {
        let doc: PolygonDoc = serde_json::from_str(r#"{"outer": [[0,0],[1,0],[0,1]]}"#).unwrap();
        assert!(doc.inners.is_empty());
        assert_eq!(doc.seed, None);
        assert_eq!(Polygon2::from(&doc).outer.len(), 3);
    }
}
