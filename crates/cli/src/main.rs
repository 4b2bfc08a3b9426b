use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use geokit::geom2::rand::{PolygonGenerator, PolygonParams, Shape, VertexCount};
use geokit::geom2::triangulate;
use geokit::Polygon2;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod crossval;
mod polygon_io;
mod provenance;

use polygon_io::{read_polygon, write_json, PolygonDoc};
use provenance::{ensure_parent, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "geokit")]
#[command(about = "Polygon generation, triangulation and intersection experiments")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeArg {
    Convex,
    Concave,
}

impl From<ShapeArg> for Shape {
    fn from(s: ShapeArg) -> Self {
        match s {
            ShapeArg::Convex => Shape::Convex,
            ShapeArg::Concave => Shape::Concave,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Write a random convex polygon as JSON
    Convex {
        #[arg(long, default_value_t = 6)]
        vertices: usize,
        #[arg(long, default_value_t = 1000.0)]
        max_coordinate: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Write a random concave polygon as JSON
    Concave {
        #[arg(long, default_value_t = 6)]
        vertices: usize,
        #[arg(long, default_value_t = 1000.0)]
        max_coordinate: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Triangulate a polygon JSON file into a JSON list of triangles
    Triangulate {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Compare GJK and SAT over random polygon pairs; writes a CSV (or .parquet) table
    Crossval {
        #[arg(long, value_enum, default_value_t = ShapeArg::Convex)]
        shape: ShapeArg,
        #[arg(long, default_value_t = 3)]
        min_vertices: usize,
        #[arg(long, default_value_t = 9)]
        max_vertices: usize,
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value_t = 1000.0)]
        max_coordinate: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block, optionally summarizing a crossval CSV
    Report {
        #[arg(long)]
        table: Option<String>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Convex {
            vertices,
            max_coordinate,
            seed,
            out,
        } => generate(Shape::Convex, vertices, max_coordinate, seed, &out),
        Action::Concave {
            vertices,
            max_coordinate,
            seed,
            out,
        } => generate(Shape::Concave, vertices, max_coordinate, seed, &out),
        Action::Triangulate { input, out } => triangulate_file(&input, &out),
        Action::Crossval {
            shape,
            min_vertices,
            max_vertices,
            count,
            max_coordinate,
            seed,
            out,
        } => crossval_table(
            &crossval::CrossvalParams {
                shape: shape.into(),
                min_vertices,
                max_vertices,
                count,
                max_coordinate,
                seed,
            },
            &out,
        ),
        Action::Report { table } => report(table.as_deref()),
    }
}

fn generate(shape: Shape, vertices: usize, max_coordinate: f64, seed: u64, out: &str) -> Result<()> {
    tracing::info!(?shape, vertices, max_coordinate, seed, out, "generate");
    let params = PolygonParams {
        shape,
        vertex_count: VertexCount::Fixed(vertices),
        max_coordinate,
    };
    let mut gen = PolygonGenerator::new(params, seed)?;
    let Some(sample) = gen.generate_next() else {
        bail!("no {shape:?} polygon with {vertices} vertices within the attempt budget");
    };
    let doc = PolygonDoc {
        seed: Some(sample.seed),
        ..PolygonDoc::from(&sample.polygon)
    };
    let out_path = Path::new(out);
    write_json(out_path, &doc)?;
    write_sidecar(
        out_path,
        Payload::new(serde_json::json!({
            "cmd": "generate",
            "shape": format!("{shape:?}"),
            "vertices": vertices,
            "max_coordinate": max_coordinate,
            "seed": seed,
        })),
    )?;
    Ok(())
}

fn triangulate_file(input: &str, out: &str) -> Result<()> {
    let doc = read_polygon(Path::new(input))?;
    let poly = Polygon2::from(&doc);
    let tris = triangulate(&poly);
    tracing::info!(
        input,
        out,
        vertices = poly.outer.len(),
        holes = poly.inners.len(),
        triangles = tris.len(),
        "triangulate"
    );
    let docs: Vec<PolygonDoc> = tris.iter().map(PolygonDoc::from).collect();
    let out_path = Path::new(out);
    write_json(out_path, &docs)?;
    write_sidecar(
        out_path,
        Payload::new(serde_json::json!({ "cmd": "triangulate" })).with_input(input),
    )?;
    Ok(())
}

fn crossval_table(params: &crossval::CrossvalParams, out: &str) -> Result<()> {
    tracing::info!(?params, out, "crossval");
    let rows = crossval::run(params)?;
    let mut df = crossval::to_frame(&rows)?;
    let out_path = Path::new(out);
    ensure_parent(out_path)?;
    let mut file = File::create(out_path).with_context(|| format!("creating {out}"))?;
    if out.ends_with(".parquet") {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    }
    let disagreements: u64 = rows.iter().map(|r| r.disagreements).sum();
    let pairs: u64 = rows.iter().map(|r| r.pairs).sum();
    tracing::info!(pairs, disagreements, "crossval_done");
    write_sidecar(
        out_path,
        Payload::new(serde_json::json!({
            "cmd": "crossval",
            "shape": format!("{:?}", params.shape),
            "min_vertices": params.min_vertices,
            "max_vertices": params.max_vertices,
            "count": params.count,
            "max_coordinate": params.max_coordinate,
            "seed": params.seed,
        })),
    )?;
    Ok(())
}

fn report(table: Option<&str>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "geokit_version": geokit::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    if let Some(table) = table {
        let summary = LazyCsvReader::new(table)
            .with_infer_schema_length(Some(100))
            .finish()?
            .select([
                col("pairs").sum(),
                col("gjk_hits").sum(),
                col("sat_hits").sum(),
                col("disagreements").sum(),
            ])
            .collect()?;
        tracing::info!(table, "crossval_summary");
        println!("{summary}");
    }
    Ok(())
}
