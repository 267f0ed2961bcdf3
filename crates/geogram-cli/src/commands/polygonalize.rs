use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use geogram_core::Point;
use geogram_graph::polygonalize_trajectory;
use geogram_induce::read_json;
use log::info;

use crate::write_json;

#[derive(Args, Debug)]
pub struct PolygonalizeArgs {
    /// JSON file holding the trajectory as a list of samples.
    #[arg(long)]
    pub trajectory: PathBuf,
    /// Dimension of every sample.
    #[arg(long, default_value_t = 2)]
    pub dim: usize,
    /// Destination of the segments JSON.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &PolygonalizeArgs) -> Result<(), Box<dyn Error>> {
    let trajectory: Vec<Point> = serde_json::from_str(&read_json(&args.trajectory)?)?;
    let segments = polygonalize_trajectory(&trajectory, args.dim)?;
    info!("{} samples became {} segments", trajectory.len(), segments.len());
    write_json(&args.out, &segments)
}
