use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use geogram_graph::{graph_from_json, identity_hash};
use geogram_induce::{
    grammar_to_json, policies, read_json, report_to_json, write_json as write_text,
    AnalyzerConfig, DegeneratePolicy, GraphAnalyzer, GraphGrammarEncoder,
};
use geogram_iso::RotationAlignment;
use log::info;
use serde_json::json;

use crate::commands::build::load_segments_graph;
use crate::write_json;

#[derive(Args, Debug)]
pub struct InduceArgs {
    /// Graph JSON produced by `geogram build`.
    #[arg(long, conflicts_with = "segments", required_unless_present = "segments")]
    pub graph: Option<PathBuf>,
    /// Segment list to build the graph from.
    #[arg(long)]
    pub segments: Option<PathBuf>,
    /// Output directory for isogroups, grammar and summary.
    #[arg(long)]
    pub out: PathBuf,
    /// Stop extending once subgraphs reach this many edges.
    #[arg(long)]
    pub max_order: Option<usize>,
    /// Stop generating once this many isogroups exist.
    #[arg(long)]
    pub max_groups: Option<usize>,
    /// Drop isogroups with fewer members than this after every pass.
    #[arg(long)]
    pub min_support: Option<usize>,
    /// Rotate 2-D candidates so their anchor lies on the +x axis.
    #[arg(long)]
    pub align_rotation: bool,
    /// Discard passes with coincident candidate vertices instead of failing.
    #[arg(long)]
    pub skip_degenerate: bool,
}

impl InduceArgs {
    fn config(&self) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::default();
        if let Some(order) = self.max_order {
            config = config.with_detection_stop(policies::max_order(order));
        }
        if let Some(groups) = self.max_groups {
            config = config.with_generation_stop(policies::max_groups(groups));
        }
        if let Some(support) = self.min_support {
            config = config.with_filter(policies::min_support(support));
        }
        if self.align_rotation {
            config = config.with_rotation(RotationAlignment::AnchorToAxis);
        }
        if self.skip_degenerate {
            config = config.with_degenerate(DegeneratePolicy::SkipPass);
        }
        config
    }
}

pub fn run(args: &InduceArgs) -> Result<(), Box<dyn Error>> {
    let graph = match (&args.graph, &args.segments) {
        (Some(path), _) => graph_from_json(&read_json(path)?)?,
        (None, Some(path)) => load_segments_graph(path)?,
        (None, None) => return Err("either --graph or --segments is required".into()),
    };
    fs::create_dir_all(&args.out)?;

    let config = args.config();
    let report = GraphAnalyzer::new().run(&graph, &config)?;
    let grammar = GraphGrammarEncoder::new().encode(&report.isogroups)?;

    write_text(&args.out.join("isogroups.json"), &report_to_json(&report)?)?;
    write_text(&args.out.join("grammar.json"), &grammar_to_json(&grammar)?)?;

    let summary = json!({
        "graph_id": identity_hash(&graph),
        "vertices": graph.n_vertices(),
        "edges": graph.n_edges(),
        "order": report.order,
        "passes": report.passes,
        "groups": report.isogroups.group_sizes(),
        "rules": grammar.len(),
    });
    write_json(args.out.join("summary.json"), &summary)?;
    info!(
        "wrote {} isogroups and {} rules to {}",
        report.isogroups.size(),
        grammar.len(),
        args.out.display()
    );
    Ok(())
}
