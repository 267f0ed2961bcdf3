use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Args;
use geogram_graph::{graph_from_segments, segments_from_json, GeometricGraph};
use geogram_induce::read_json;
use log::info;

use crate::write_json;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// JSON file holding `[[p, q], ...]` segments.
    #[arg(long)]
    pub segments: PathBuf,
    /// Destination of the graph JSON.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &BuildArgs) -> Result<(), Box<dyn Error>> {
    let graph = load_segments_graph(&args.segments)?;
    info!(
        "built graph with {} vertices and {} edges",
        graph.n_vertices(),
        graph.n_edges()
    );
    write_json(&args.out, &graph)
}

/// Reads a segment list and merges shared endpoints into a graph.
pub fn load_segments_graph(path: &Path) -> Result<GeometricGraph, Box<dyn Error>> {
    let segments = segments_from_json(&read_json(path)?)?;
    let dim = segments
        .first()
        .map(|[p, _]| p.len())
        .ok_or("segment list is empty")?;
    Ok(graph_from_segments(&segments, dim)?)
}
