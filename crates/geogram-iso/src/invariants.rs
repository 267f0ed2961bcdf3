use std::hash::Hasher;

use geogram_graph::GeometricGraph;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

use crate::canonical::AbstractGraph;

/// Isomorphism invariants of a graph's topology.
///
/// Any two isomorphic graphs share these values, so a mismatch proves the
/// graphs are not isomorphic without running the bijection search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralInvariants {
    /// Embedding dimension.
    pub dim: usize,
    /// Number of vertices.
    pub n_vertices: usize,
    /// Number of edges including duplicates.
    pub n_edges: usize,
    /// Degree sequence sorted in descending order.
    pub degree_sequence: Vec<usize>,
    /// Self-loop counts sorted in descending order.
    pub loop_sequence: Vec<u32>,
}

impl StructuralInvariants {
    /// Computes the invariants of a geometric graph.
    pub fn of(graph: &GeometricGraph) -> Self {
        Self::from_abstract(graph.dim(), graph.n_edges(), &AbstractGraph::from_geometric(graph))
    }

    pub(crate) fn from_abstract(dim: usize, n_edges: usize, graph: &AbstractGraph) -> Self {
        let degree_sequence = graph.degrees().iter().copied().sorted_unstable_by(|a, b| b.cmp(a)).collect();
        let loop_sequence = (0..graph.len())
            .map(|v| graph.loops(v))
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect();
        Self {
            dim,
            n_vertices: graph.len(),
            n_edges,
            degree_sequence,
            loop_sequence,
        }
    }

    /// Folds the invariants into a 64-bit key with SipHash-1-3 and zero keys.
    ///
    /// The key is stable across platforms and runs.
    pub fn key(&self) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        hasher.write_u64(self.dim as u64);
        hasher.write_u64(self.n_vertices as u64);
        hasher.write_u64(self.n_edges as u64);
        for &degree in &self.degree_sequence {
            hasher.write_u64(degree as u64);
        }
        for &loops in &self.loop_sequence {
            hasher.write_u32(loops);
        }
        hasher.finish()
    }
}

/// Shorthand for `StructuralInvariants::of(graph).key()`.
pub fn invariant_key(graph: &GeometricGraph) -> u64 {
    StructuralInvariants::of(graph).key()
}
