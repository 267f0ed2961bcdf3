use geogram_graph::GeometricGraph;

/// Geometry-free view of a [`GeometricGraph`]: vertices `0..n` and edge
/// multiplicities, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractGraph {
    /// Symmetric multiplicity matrix; the diagonal counts self-loops once each.
    adjacency: Vec<Vec<u32>>,
    /// Degree of every vertex with self-loops counted twice.
    degrees: Vec<usize>,
}

impl AbstractGraph {
    /// Drops the coordinates of `graph` and keeps its topology.
    pub fn from_geometric(graph: &GeometricGraph) -> Self {
        let n = graph.n_vertices();
        let mut adjacency = vec![vec![0u32; n]; n];
        let mut degrees = vec![0usize; n];
        for &[u, v] in graph.edges() {
            if u == v {
                adjacency[u][u] += 1;
            } else {
                adjacency[u][v] += 1;
                adjacency[v][u] += 1;
            }
            degrees[u] += 1;
            degrees[v] += 1;
        }
        Self { adjacency, degrees }
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Returns whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Number of edges joining `u` and `v` (self-loops when `u == v`).
    pub fn multiplicity(&self, u: usize, v: usize) -> u32 {
        self.adjacency[u][v]
    }

    /// Degree of `vertex` with self-loops counted twice.
    pub fn degree(&self, vertex: usize) -> usize {
        self.degrees[vertex]
    }

    /// Degrees of every vertex in id order.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Number of self-loops at `vertex`.
    pub fn loops(&self, vertex: usize) -> u32 {
        self.adjacency[vertex][vertex]
    }
}
