use std::collections::HashMap;

use geogram_core::{ErrorInfo, GeogramError, Result};
use geogram_graph::{identity_hash, GeometricGraph};
use log::{debug, info};

use crate::grammar::{Grammar, GrowthPoint, ProductionRule, Symbol, SymbolEntry};
use crate::isogroup::Isogroups;
use crate::placed::ANCHOR_INDEX;

/// Turns isogroups into a grammar with one production per distinct graph.
///
/// Graphs are memoised by exact equality: identical placements share a
/// symbol, while isomorphic graphs at different positions get their own.
#[derive(Debug, Clone, Default)]
pub struct GraphGrammarEncoder {
    _private: (),
}

impl GraphGrammarEncoder {
    /// Creates an encoder with the default `S1, S2, ...` alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder drawing symbols from a caller-supplied alphabet.
    pub fn from_alphabet<S: AsRef<str>>(alphabet: &[S]) -> Result<Self> {
        Err(GeogramError::unsupported(
            "encoder-alphabet",
            "custom symbol alphabets are not supported",
        )
        .with_context("symbols", alphabet.len())
        .with_hint("use GraphGrammarEncoder::new for S<n> symbols"))
    }

    /// Encodes every graph of every group, in group then member order.
    pub fn encode(&self, groups: &Isogroups) -> Result<Grammar> {
        let mut grammar = Grammar::default();
        let mut seen: HashMap<String, Vec<usize>> = HashMap::new();

        for (group_index, group) in groups.iter().enumerate() {
            for graph in group.graphs() {
                let id = identity_hash(graph);
                let known = seen.get(&id).map_or(false, |rules| {
                    rules.iter().any(|&rule| grammar.rules[rule].graph == *graph)
                });
                if known {
                    continue;
                }

                let lhs = Symbol::new(symbol_index(grammar.rules.len())?);
                let growth_point = growth_point_for(graph)?;
                debug!("{lhs} <- group {group_index} ({} edges)", graph.n_edges());
                grammar.symbols.insert(
                    lhs,
                    SymbolEntry {
                        representative_id: id.clone(),
                        growth_point: growth_point.clone(),
                    },
                );
                seen.entry(id.clone()).or_default().push(grammar.rules.len());
                grammar.rules.push(ProductionRule {
                    lhs,
                    graph: graph.clone(),
                    graph_id: id,
                    group: group_index,
                    growth_point,
                });
            }
        }

        info!(
            "encoded {} graphs from {} groups into {} rules",
            groups.total_graphs(),
            groups.size(),
            grammar.len()
        );
        Ok(grammar)
    }
}

fn symbol_index(allocated: usize) -> Result<u32> {
    u32::try_from(allocated + 1).map_err(|_| {
        GeogramError::Invariant(ErrorInfo::new(
            "symbol-overflow",
            "symbol indices are exhausted",
        ))
    })
}

fn growth_point_for(graph: &GeometricGraph) -> Result<GrowthPoint> {
    let anchor = graph.vertex(ANCHOR_INDEX).ok_or_else(|| {
        GeogramError::Invariant(
            ErrorInfo::new("missing-anchor", "representative graph has no anchor vertex")
                .with_context("vertices", graph.n_vertices()),
        )
    })?;
    GrowthPoint::placeholder(graph.dim(), anchor)
}
