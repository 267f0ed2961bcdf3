use std::collections::HashMap;

use geogram_core::{GeogramError, Point, Result};

use crate::geometric::GeometricGraph;

/// A straight line segment given by its start and end point.
pub type Segment = [Point; 2];

/// Builds a graph from a segment list, merging endpoints with identical coordinates.
///
/// Vertices are numbered in order of first appearance and every segment
/// becomes one edge, so the edge list mirrors the segment list.
pub fn graph_from_segments(segments: &[Segment], dim: usize) -> Result<GeometricGraph> {
    if segments.is_empty() {
        return Err(GeogramError::shape(
            "empty-segments",
            "at least one segment is required to build a graph",
        ));
    }

    let mut vertices: Vec<Point> = Vec::new();
    let mut index_of: HashMap<Vec<u64>, usize> = HashMap::new();
    let mut edges = Vec::with_capacity(segments.len());

    for (position, [start, end]) in segments.iter().enumerate() {
        let mut endpoints = [0usize; 2];
        for (slot, point) in [start, end].into_iter().enumerate() {
            if point.len() != dim {
                return Err(GeogramError::shape(
                    "dimension-mismatch",
                    "segment endpoint width does not match the declared dimension",
                )
                .with_context("segment", position)
                .with_context("dim", dim)
                .with_context("width", point.len()));
            }
            let key = coordinate_key(point);
            endpoints[slot] = *index_of.entry(key).or_insert_with(|| {
                vertices.push(point.clone());
                vertices.len() - 1
            });
        }
        edges.push(endpoints);
    }

    GeometricGraph::new(vertices, edges, dim)
}

/// Expands a trajectory of multi-valued samples into connecting segments.
///
/// Each sample is a flat coordinate list holding one or more points of width
/// `dim`. Every point of sample `i` is joined to every point of sample `i + 1`;
/// the later sample's points form the outer loop.
pub fn polygonalize_trajectory(trajectory: &[Vec<f64>], dim: usize) -> Result<Vec<Segment>> {
    if dim == 0 {
        return Err(GeogramError::shape(
            "zero-dimension",
            "trajectories require a positive dimension",
        ));
    }
    let samples = trajectory
        .iter()
        .enumerate()
        .map(|(index, flat)| split_points(flat, dim).map_err(|err| err.with_context("sample", index)))
        .collect::<Result<Vec<_>>>()?;

    let mut segments = Vec::new();
    for pair in samples.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        for to in next {
            for from in current {
                segments.push([from.clone(), to.clone()]);
            }
        }
    }
    Ok(segments)
}

fn split_points(flat: &[f64], dim: usize) -> Result<Vec<Point>> {
    if flat.is_empty() || flat.len() % dim != 0 {
        return Err(GeogramError::shape(
            "dimension-mismatch",
            "sample length must be a positive multiple of the dimension",
        )
        .with_context("dim", dim)
        .with_context("length", flat.len()));
    }
    Ok(flat.chunks(dim).map(<[f64]>::to_vec).collect())
}

/// Bit-exact key for a coordinate vector; `-0.0` and `0.0` share a key.
pub(crate) fn coordinate_key(point: &[f64]) -> Vec<u64> {
    point
        .iter()
        .map(|&value| {
            let value = if value == 0.0 { 0.0f64 } else { value };
            value.to_bits()
        })
        .collect()
}
