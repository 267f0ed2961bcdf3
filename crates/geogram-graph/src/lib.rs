#![deny(missing_docs)]

//! Geometric graph container and builders for the geogram induction engine.
//!
//! A [`GeometricGraph`] is a plain value: vertex coordinates in R^dim, an edge
//! list of index pairs and the dimension. Builders turn raw segment lists and
//! trajectories into graphs; the identity hash and serializers are placement
//! sensitive and never consider isomorphism.

mod generators;
mod geometric;
mod hash;
mod segments;
mod serialization;

pub use generators::{gen_cycle, gen_grid, gen_matching, gen_random};
pub use geometric::GeometricGraph;
pub use hash::identity_hash;
pub use segments::{graph_from_segments, polygonalize_trajectory, Segment};
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, segments_from_json,
    segments_to_json, SerializableGraph, GRAPH_SCHEMA_VERSION,
};
