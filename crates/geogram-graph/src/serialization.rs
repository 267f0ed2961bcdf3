use geogram_core::{GeogramError, Point, Result};
use serde::{Deserialize, Serialize};

use crate::geometric::GeometricGraph;
use crate::segments::Segment;

/// Schema version written alongside serialized graphs.
pub const GRAPH_SCHEMA_VERSION: u32 = 1;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &GeometricGraph) -> Result<Vec<u8>> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| GeogramError::serde("serialize-bytes", err.to_string()))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<GeometricGraph> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| GeogramError::serde("deserialize-bytes", err.to_string()))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &GeometricGraph) -> Result<String> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GeogramError::serde("serialize-json", err.to_string()))
}

/// Restores a graph from a JSON string, re-running construction checks.
pub fn graph_from_json(json: &str) -> Result<GeometricGraph> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| GeogramError::serde("deserialize-json", err.to_string()))?;
    serializable.into_graph()
}

/// Serializes a segment list as nested JSON arrays.
pub fn segments_to_json(segments: &[Segment]) -> Result<String> {
    serde_json::to_string_pretty(segments)
        .map_err(|err| GeogramError::serde("serialize-json", err.to_string()))
}

/// Parses a segment list of the form `[[[x, y], [x, y]], ...]`.
pub fn segments_from_json(json: &str) -> Result<Vec<Segment>> {
    serde_json::from_str(json)
        .map_err(|err| GeogramError::serde("deserialize-json", err.to_string()))
}

/// Serde mirror of [`GeometricGraph`] used by the JSON and binary encoders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableGraph {
    /// Schema version of the payload.
    #[serde(default = "default_schema")]
    pub schema_version: u32,
    /// Embedding dimension.
    pub dim: usize,
    /// Vertex coordinates in id order.
    pub vertices: Vec<Point>,
    /// Edge list as index pairs.
    pub edges: Vec<[usize; 2]>,
}

impl SerializableGraph {
    /// Captures the contents of a graph.
    pub fn from_graph(graph: &GeometricGraph) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA_VERSION,
            dim: graph.dim(),
            vertices: graph.vertices().to_vec(),
            edges: graph.edges().to_vec(),
        }
    }

    /// Rebuilds and validates the graph.
    pub fn into_graph(self) -> Result<GeometricGraph> {
        if self.schema_version > GRAPH_SCHEMA_VERSION {
            return Err(GeogramError::serde(
                "schema-version",
                "graph payload was written by a newer schema",
            )
            .with_context("found", self.schema_version)
            .with_context("supported", GRAPH_SCHEMA_VERSION));
        }
        GeometricGraph::new(self.vertices, self.edges, self.dim)
    }
}

impl From<GeometricGraph> for SerializableGraph {
    fn from(graph: GeometricGraph) -> Self {
        Self::from_graph(&graph)
    }
}

impl TryFrom<SerializableGraph> for GeometricGraph {
    type Error = GeogramError;

    fn try_from(value: SerializableGraph) -> Result<Self> {
        value.into_graph()
    }
}

fn default_schema() -> u32 {
    GRAPH_SCHEMA_VERSION
}
