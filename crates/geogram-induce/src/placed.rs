use geogram_core::{ErrorInfo, GeogramError, Result};
use geogram_graph::GeometricGraph;
use geogram_iso::invariant_key;
use serde::{Deserialize, Serialize};

/// Local index of the anchor vertex inside every candidate subgraph.
///
/// Expansion only ever appends vertices and the normaliser never reorders
/// them, so the anchor chosen at order 1 stays at this index for good.
pub const ANCHOR_INDEX: usize = 0;

/// A candidate subgraph together with its placement in the analysed graph.
///
/// `graph` holds the (possibly normalised) local geometry while `origin[i]`
/// names the global vertex that local vertex `i` was taken from. Serde goes
/// through [`PlacedGraphRepr`], so loading re-runs [`PlacedGraph::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PlacedGraphRepr", try_from = "PlacedGraphRepr")]
pub struct PlacedGraph {
    graph: GeometricGraph,
    origin: Vec<usize>,
    invariant: u64,
}

impl PlacedGraph {
    /// Wraps a subgraph and its origin map; both must list the same, non-empty vertex set.
    pub fn new(graph: GeometricGraph, origin: Vec<usize>) -> Result<Self> {
        if graph.n_vertices() == 0 {
            return Err(GeogramError::Invariant(ErrorInfo::new(
                "empty-placement",
                "placed graphs need an anchor vertex",
            )));
        }
        if graph.n_vertices() != origin.len() {
            return Err(GeogramError::Invariant(
                ErrorInfo::new("origin-length", "origin map must cover every local vertex")
                    .with_context("vertices", graph.n_vertices())
                    .with_context("origin", origin.len()),
            ));
        }
        let invariant = invariant_key(&graph);
        Ok(Self {
            graph,
            origin,
            invariant,
        })
    }

    /// Builds the order-1 subgraph for the global edge at `position`, in global coordinates.
    pub fn single_edge(global: &GeometricGraph, position: usize) -> Result<Self> {
        let [u, v] = global.edges().get(position).copied().ok_or_else(|| {
            GeogramError::shape("edge-out-of-range", "no edge at this position")
                .with_context("edge", position)
        })?;
        // A self-loop yields a single vertex looping onto itself.
        let origin = if u == v { vec![u] } else { vec![u, v] };
        let local = if u == v { [0, 0] } else { [0, 1] };
        let vertices = origin.iter().map(|&id| global.vertices()[id].clone()).collect();
        let graph = GeometricGraph::new(vertices, vec![local], global.dim())?;
        Self::new(graph, origin)
    }

    /// Returns the local geometry.
    pub fn graph(&self) -> &GeometricGraph {
        &self.graph
    }

    /// Returns the global vertex id of every local vertex.
    pub fn origin(&self) -> &[usize] {
        &self.origin
    }

    /// Returns the global vertex id the anchor was taken from.
    pub fn anchor_origin(&self) -> usize {
        self.origin[ANCHOR_INDEX]
    }

    /// Returns the cached structural invariant key of the subgraph.
    pub fn invariant_key(&self) -> u64 {
        self.invariant
    }

    /// Consumes the wrapper and returns the local geometry.
    pub fn into_graph(self) -> GeometricGraph {
        self.graph
    }

    /// Grows the subgraph by the global edge joining the anchor to `far`.
    ///
    /// Returns `None` when the subgraph already holds an edge between the
    /// anchor and `far`. The copy is rebuilt from global coordinates so every
    /// candidate is normalised from its true placement.
    pub fn extended_with(&self, global: &GeometricGraph, far: usize) -> Result<Option<Self>> {
        let existing = self.origin.iter().position(|&id| id == far);
        if let Some(local) = existing {
            if self.graph.has_edge_between(ANCHOR_INDEX, local) {
                return Ok(None);
            }
        }

        let vertices = self
            .origin
            .iter()
            .map(|&id| global.vertices()[id].clone())
            .collect();
        let mut graph = GeometricGraph::new(vertices, self.graph.edges().to_vec(), global.dim())?;
        let mut origin = self.origin.clone();
        let local = match existing {
            Some(local) => local,
            None => {
                origin.push(far);
                graph.push_vertex(global.vertices()[far].clone())?
            }
        };
        graph.push_edge(ANCHOR_INDEX, local)?;
        Self::new(graph, origin).map(Some)
    }

    /// Swaps in normalised geometry after checking that the anchor stayed put.
    pub fn with_normalized(self, normalized: GeometricGraph) -> Result<Self> {
        ensure_anchor_stable(&self.graph, &normalized)?;
        Ok(Self {
            graph: normalized,
            origin: self.origin,
            invariant: self.invariant,
        })
    }
}

/// Serde mirror of [`PlacedGraph`]; the invariant key is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedGraphRepr {
    /// Local geometry.
    pub graph: GeometricGraph,
    /// Global vertex id of every local vertex.
    pub origin: Vec<usize>,
}

impl From<PlacedGraph> for PlacedGraphRepr {
    fn from(placed: PlacedGraph) -> Self {
        Self {
            graph: placed.graph,
            origin: placed.origin,
        }
    }
}

impl TryFrom<PlacedGraphRepr> for PlacedGraph {
    type Error = GeogramError;

    fn try_from(repr: PlacedGraphRepr) -> Result<Self> {
        PlacedGraph::new(repr.graph, repr.origin)
    }
}

/// Fails unless `after` keeps the vertex count and edge list of `before`.
///
/// Edges are expressed in local indices, so an unchanged edge list proves that
/// no vertex (the anchor included) was moved to another index.
pub fn ensure_anchor_stable(before: &GeometricGraph, after: &GeometricGraph) -> Result<()> {
    if before.n_vertices() != after.n_vertices() || before.edges() != after.edges() {
        return Err(GeogramError::Invariant(
            ErrorInfo::new("anchor-moved", "normalisation changed the vertex layout")
                .with_context("vertices_before", before.n_vertices())
                .with_context("vertices_after", after.n_vertices())
                .with_hint("normalisers must preserve vertex order and edges"),
        ));
    }
    Ok(())
}
