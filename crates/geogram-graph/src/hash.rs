use sha2::{Digest, Sha256};

use crate::geometric::GeometricGraph;
use crate::segments::coordinate_key;

/// Computes the placement-sensitive identity hash of a graph.
///
/// Two graphs that compare equal produce the same digest: coordinates are
/// hashed bit-exactly in vertex order and edges as a sorted, orientation-free
/// multiset.
pub fn identity_hash(graph: &GeometricGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"geogram:graph:v1");
    hasher.update((graph.dim() as u64).to_le_bytes());

    hasher.update((graph.n_vertices() as u64).to_le_bytes());
    for vertex in graph.vertices() {
        for bits in coordinate_key(vertex) {
            hasher.update(bits.to_le_bytes());
        }
    }

    let edges = graph.edge_multiset();
    hasher.update((edges.len() as u64).to_le_bytes());
    for [u, v] in edges {
        hasher.update((u as u64).to_le_bytes());
        hasher.update((v as u64).to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
