use std::error::Error;

use clap::{Parser, Subcommand};
use geogram_cli::commands::{
    build::{self, BuildArgs},
    induce::{self, InduceArgs},
    polygonalize::{self, PolygonalizeArgs},
};

#[derive(Parser, Debug)]
#[command(name = "geogram", about = "Structural grammar induction over geometric graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a geometric graph from a JSON list of segments.
    Build(BuildArgs),
    /// Turn a sampled trajectory into consecutive segments.
    Polygonalize(PolygonalizeArgs),
    /// Discover isogroups and encode them as a grammar.
    Induce(InduceArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => build::run(&args),
        Command::Polygonalize(args) => polygonalize::run(&args),
        Command::Induce(args) => induce::run(&args),
    }
}
