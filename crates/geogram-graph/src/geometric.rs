use std::fmt;

use geogram_core::{GeogramError, Point, Result};
use serde::{Deserialize, Serialize};

use crate::serialization::SerializableGraph;

/// Undirected geometric graph with vertices embedded in R^dim.
///
/// Vertex ids are positions in the vertex list. Edges are stored in insertion
/// order as index pairs; duplicates are tolerated. Every vertex is validated
/// against `dim` when the graph is built, so downstream code never re-checks
/// coordinate widths. Deserialization goes through the same validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "SerializableGraph", try_from = "SerializableGraph")]
pub struct GeometricGraph {
    dim: usize,
    vertices: Vec<Point>,
    edges: Vec<[usize; 2]>,
}

impl GeometricGraph {
    /// Builds a graph after validating coordinate widths and edge endpoints.
    pub fn new(vertices: Vec<Point>, edges: Vec<[usize; 2]>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(GeogramError::shape(
                "zero-dimension",
                "geometric graphs require a positive dimension",
            ));
        }
        for (index, vertex) in vertices.iter().enumerate() {
            validate_point(vertex, dim).map_err(|err| err.with_context("vertex", index))?;
        }
        for (position, edge) in edges.iter().enumerate() {
            validate_edge(*edge, vertices.len()).map_err(|err| err.with_context("edge", position))?;
        }
        Ok(Self {
            dim,
            vertices,
            edges,
        })
    }

    /// Creates a graph without vertices or edges.
    pub fn empty(dim: usize) -> Result<Self> {
        Self::new(Vec::new(), Vec::new(), dim)
    }

    /// Returns the embedding dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the number of vertices.
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges, duplicates included.
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the vertex coordinates in id order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Returns the coordinates of a single vertex.
    pub fn vertex(&self, index: usize) -> Option<&[f64]> {
        self.vertices.get(index).map(Vec::as_slice)
    }

    /// Returns the edge list in insertion order.
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Appends a vertex and returns its id.
    pub fn push_vertex(&mut self, point: Point) -> Result<usize> {
        validate_point(&point, self.dim).map_err(|err| err.with_context("vertex", self.n_vertices()))?;
        self.vertices.push(point);
        Ok(self.vertices.len() - 1)
    }

    /// Appends an edge between two existing vertices.
    pub fn push_edge(&mut self, u: usize, v: usize) -> Result<()> {
        validate_edge([u, v], self.vertices.len())
            .map_err(|err| err.with_context("edge", self.edges.len()))?;
        self.edges.push([u, v]);
        Ok(())
    }

    /// Replaces every vertex coordinate while keeping ids and edges intact.
    pub fn set_vertices(&mut self, vertices: Vec<Point>) -> Result<()> {
        if vertices.len() != self.vertices.len() {
            return Err(GeogramError::shape(
                "vertex-count-mismatch",
                "replacement coordinates must keep the vertex count",
            )
            .with_context("expected", self.vertices.len())
            .with_context("actual", vertices.len()));
        }
        for (index, vertex) in vertices.iter().enumerate() {
            validate_point(vertex, self.dim).map_err(|err| err.with_context("vertex", index))?;
        }
        self.vertices = vertices;
        Ok(())
    }

    /// Returns the positions of the edges touching `vertex`, in edge list order.
    pub fn incident_edges(&self, vertex: usize) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, [u, v])| *u == vertex || *v == vertex)
            .map(|(position, _)| position)
            .collect()
    }

    /// Builds the incidence list of every vertex in one sweep over the edges.
    pub fn incidence_lists(&self) -> Vec<Vec<usize>> {
        let mut lists = vec![Vec::new(); self.vertices.len()];
        for (position, &[u, v]) in self.edges.iter().enumerate() {
            lists[u].push(position);
            if v != u {
                lists[v].push(position);
            }
        }
        lists
    }

    /// Returns whether any edge joins `u` and `v`, in either orientation.
    pub fn has_edge_between(&self, u: usize, v: usize) -> bool {
        self.edges
            .iter()
            .any(|&[a, b]| (a == u && b == v) || (a == v && b == u))
    }

    /// Returns the degree of a vertex; self-loops count twice.
    pub fn degree(&self, vertex: usize) -> usize {
        self.edges
            .iter()
            .map(|&[u, v]| usize::from(u == vertex) + usize::from(v == vertex))
            .sum()
    }

    /// Returns the distinct neighbours of a vertex in first-seen order.
    pub fn neighbours(&self, vertex: usize) -> Vec<usize> {
        let mut seen = Vec::new();
        for &[u, v] in &self.edges {
            let other = if u == vertex {
                v
            } else if v == vertex {
                u
            } else {
                continue;
            };
            if !seen.contains(&other) {
                seen.push(other);
            }
        }
        seen
    }

    /// Looks up a vertex by exact coordinate equality.
    pub fn find_vertex(&self, point: &[f64]) -> Option<usize> {
        self.vertices
            .iter()
            .position(|vertex| vertex.as_slice() == point)
    }

    /// Returns the edges as sorted, orientation-free pairs.
    pub(crate) fn edge_multiset(&self) -> Vec<[usize; 2]> {
        let mut pairs: Vec<[usize; 2]> = self
            .edges
            .iter()
            .map(|&[u, v]| if u <= v { [u, v] } else { [v, u] })
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Equality is placement sensitive: identical vertex sequences and identical
/// edge multisets (edge orientation and list order are ignored).
impl PartialEq for GeometricGraph {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim
            && self.vertices == other.vertices
            && self.edge_multiset() == other.edge_multiset()
    }
}

impl fmt::Display for GeometricGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(size: {}, V = [", self.n_vertices())?;
        for (idx, vertex) in self.vertices.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{vertex:?}")?;
        }
        write!(f, "], E = {:?})", self.edges)
    }
}

fn validate_point(point: &[f64], dim: usize) -> Result<()> {
    if point.len() != dim {
        return Err(GeogramError::shape(
            "dimension-mismatch",
            "vertex width does not match the declared dimension",
        )
        .with_context("dim", dim)
        .with_context("width", point.len()));
    }
    if point.iter().any(|value| !value.is_finite()) {
        return Err(GeogramError::shape(
            "non-finite-coordinate",
            "vertex coordinates must be finite",
        ));
    }
    Ok(())
}

fn validate_edge([u, v]: [usize; 2], n_vertices: usize) -> Result<()> {
    if u >= n_vertices || v >= n_vertices {
        return Err(GeogramError::shape(
            "edge-out-of-range",
            "edge endpoint does not name an existing vertex",
        )
        .with_context("endpoints", format!("{u},{v}"))
        .with_context("vertices", n_vertices));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> GeometricGraph {
        GeometricGraph::new(
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]],
            vec![[0, 1], [1, 2], [2, 3], [3, 0]],
            2,
        )
        .unwrap()
    }

    #[test]
    fn incidence_follows_edge_order() {
        let graph = square();
        assert_eq!(graph.incident_edges(0), vec![0, 3]);
        assert_eq!(graph.incidence_lists()[2], vec![1, 2]);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.neighbours(0), vec![1, 3]);
    }

    #[test]
    fn self_loops_count_twice_but_list_once() {
        let graph = GeometricGraph::new(vec![vec![0.0]], vec![[0, 0]], 1).unwrap();
        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.incidence_lists()[0], vec![0]);
    }

    #[test]
    fn equality_ignores_edge_orientation_and_order() {
        let a = square();
        let b = GeometricGraph::new(
            a.vertices().to_vec(),
            vec![[0, 3], [3, 2], [2, 1], [1, 0]],
            2,
        )
        .unwrap();
        assert_eq!(a, b);
        let mut c = a.clone();
        c.push_edge(0, 2).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn set_vertices_keeps_count() {
        let mut graph = square();
        let err = graph.set_vertices(vec![vec![0.0, 0.0]]).unwrap_err();
        assert_eq!(err.info().code, "vertex-count-mismatch");
    }
}
