#![deny(missing_docs)]
#![doc = "Isogroup discovery over geometric graphs and grammar encoding of the results."]

/// Order-by-order frontier expansion.
pub mod analyzer;
/// Typed analyzer configuration.
pub mod config;
/// Per-run analyzer state.
pub mod context;
/// Grammar induction from isogroups.
pub mod encoder;
/// Symbols, production rules and growth points.
pub mod grammar;
/// Isomorphism groups of placed subgraphs.
pub mod isogroup;
/// Subgraphs together with their placement in the analysed graph.
pub mod placed;
/// Built-in stop and filter policies.
pub mod policies;
/// JSON import and export helpers.
pub mod serde_io;

pub use analyzer::{AnalysisReport, GraphAnalyzer};
pub use config::{AnalyzerConfig, DegeneratePolicy, FilterPolicy, FilterScope, StopPolicy};
pub use context::AnalyzerContext;
pub use encoder::GraphGrammarEncoder;
pub use grammar::{ConnectionProperty, Grammar, GrowthPoint, ProductionRule, Symbol, SymbolEntry};
pub use isogroup::{classify_graphs, Isogroup, Isogroups};
pub use placed::{ensure_anchor_stable, PlacedGraph, PlacedGraphRepr, ANCHOR_INDEX};
pub use serde_io::{
    grammar_from_json, grammar_to_json, isogroups_from_json, isogroups_to_json, read_json,
    report_to_json, write_json, GroupExport, IsogroupsExport, ISOGROUPS_SCHEMA_VERSION,
};
