use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use geogram_core::{ErrorInfo, GeogramError, Point};
use geogram_graph::{identity_hash, GeometricGraph};
use serde::{Deserialize, Serialize};

/// Nonterminal symbol `S<n>`; symbols order by their numeric index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Symbol(u32);

impl Symbol {
    /// Creates the symbol with the given index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the numeric index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = GeogramError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.strip_prefix('S')
            .and_then(|digits| digits.parse().ok())
            .map(Symbol)
            .ok_or_else(|| {
                GeogramError::serde("symbol-parse", "symbols are written as S<index>")
                    .with_context("symbol", text)
            })
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

impl TryFrom<String> for Symbol {
    type Error = GeogramError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// How a growth point attaches to the host graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionProperty {
    /// Coordinates of the growth-point vertex.
    pub vertex: Point,
    /// Placement transform (dim x dim); zero until a transform is learned.
    pub transform: Vec<Vec<f64>>,
    /// Anchor position in the representative graph.
    pub position: Point,
}

/// Placeholder describing where a production may attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// One-vertex graph at the origin.
    pub graph: GeometricGraph,
    /// Connection data, one entry per attachment vertex.
    pub connections: Vec<ConnectionProperty>,
}

impl GrowthPoint {
    /// Builds the placeholder for a representative whose anchor sits at `anchor`.
    pub fn placeholder(dim: usize, anchor: &[f64]) -> Result<Self, GeogramError> {
        let origin = vec![0.0; dim];
        let graph = GeometricGraph::new(vec![origin.clone()], Vec::new(), dim)?;
        let connection = ConnectionProperty {
            vertex: origin,
            transform: vec![vec![0.0; dim]; dim],
            position: anchor.to_vec(),
        };
        Ok(Self {
            graph,
            connections: vec![connection],
        })
    }
}

/// A production `lhs -> graph`, tagged with the isogroup it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRule {
    /// Left-hand nonterminal.
    pub lhs: Symbol,
    /// Representative graph.
    pub graph: GeometricGraph,
    /// Identity hash of `graph`.
    pub graph_id: String,
    /// Index of the isogroup the representative was first seen in.
    pub group: usize,
    /// Attachment placeholder.
    pub growth_point: GrowthPoint,
}

/// Per-symbol bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Identity hash of the representative graph.
    pub representative_id: String,
    /// Attachment placeholder of the symbol.
    pub growth_point: GrowthPoint,
}

/// Symbol table and ordered production rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Every allocated symbol.
    pub symbols: BTreeMap<Symbol, SymbolEntry>,
    /// Rules in allocation order.
    pub rules: Vec<ProductionRule>,
}

impl Grammar {
    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Symbol assigned to a graph exactly equal to `graph`, if any.
    pub fn symbol_for(&self, graph: &GeometricGraph) -> Option<Symbol> {
        let id = identity_hash(graph);
        self.rules
            .iter()
            .find(|rule| rule.graph_id == id && rule.graph == *graph)
            .map(|rule| rule.lhs)
    }

    /// Rule whose left-hand side is `symbol`.
    pub fn rule(&self, symbol: Symbol) -> Option<&ProductionRule> {
        self.rules.iter().find(|rule| rule.lhs == symbol)
    }

    /// Checks that the symbol table and the rules describe each other.
    pub fn validate(&self) -> Result<(), GeogramError> {
        if self.symbols.len() != self.rules.len() {
            return Err(GeogramError::Invariant(
                ErrorInfo::new("grammar-size", "every rule needs exactly one symbol entry")
                    .with_context("symbols", self.symbols.len())
                    .with_context("rules", self.rules.len()),
            ));
        }
        for rule in &self.rules {
            let matches = self
                .symbols
                .get(&rule.lhs)
                .map_or(false, |entry| entry.representative_id == rule.graph_id);
            if !matches {
                return Err(GeogramError::Invariant(
                    ErrorInfo::new("grammar-symbol", "rule has no matching symbol entry")
                        .with_context("symbol", rule.lhs),
                ));
            }
        }
        Ok(())
    }
}
