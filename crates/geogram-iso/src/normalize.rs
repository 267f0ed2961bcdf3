use geogram_core::{GeogramError, Point, Result, DEGENERATE_GEOMETRY};
use geogram_graph::GeometricGraph;
use log::debug;
use nalgebra::{DMatrix, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Optional rotational canonicalisation applied after centring and scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationAlignment {
    /// Leave orientation untouched.
    #[default]
    Disabled,
    /// Rotate 2-D graphs so the anchor (first vertex off the centroid) lies on the +x axis.
    AnchorToAxis,
}

/// Translation, scale and optional rotation normaliser for candidate graphs.
///
/// Only coordinates change: vertex order and edges are preserved, so the
/// anchor stays at index 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    rotation: RotationAlignment,
}

impl Normalizer {
    /// Creates a normaliser with the given rotation policy.
    pub fn new(rotation: RotationAlignment) -> Self {
        Self { rotation }
    }

    /// Returns the configured rotation policy.
    pub fn rotation(&self) -> RotationAlignment {
        self.rotation
    }

    /// Normalises every graph, failing on the first degenerate one.
    pub fn normalize(&self, graphs: &[GeometricGraph]) -> Result<Vec<GeometricGraph>> {
        graphs
            .iter()
            .enumerate()
            .map(|(index, graph)| {
                self.normalize_graph(graph)
                    .map_err(|err| err.with_context("candidate", index))
            })
            .collect()
    }

    /// Returns a normalised copy of `graph`.
    pub fn normalize_graph(&self, graph: &GeometricGraph) -> Result<GeometricGraph> {
        if self.rotation == RotationAlignment::AnchorToAxis && graph.dim() != 2 {
            return Err(GeogramError::unsupported(
                "rotation-alignment",
                "anchor rotation alignment is only implemented for 2-D graphs",
            )
            .with_context("dim", graph.dim())
            .with_hint("use RotationAlignment::Disabled for this input"));
        }
        if graph.n_vertices() == 0 {
            return Err(degenerate(graph, 0.0));
        }

        let mut coords = coordinate_matrix(graph);
        let centroid = coords.row_mean();
        for mut row in coords.row_iter_mut() {
            row -= &centroid;
        }

        let scale = coords.norm();
        if scale <= zero_scale_threshold(graph) {
            return Err(degenerate(graph, scale));
        }
        coords /= scale;

        if self.rotation == RotationAlignment::AnchorToAxis {
            align_anchor(&mut coords);
        }

        let mut normalized = graph.clone();
        normalized.set_vertices(matrix_rows(&coords))?;
        Ok(normalized)
    }
}

/// Normalises `graphs` with rotation alignment disabled.
pub fn normalize(graphs: &[GeometricGraph]) -> Result<Vec<GeometricGraph>> {
    Normalizer::default().normalize(graphs)
}

/// Mean of the vertex coordinates.
pub fn centroid(graph: &GeometricGraph) -> Point {
    let coords = coordinate_matrix(graph);
    coords.row_mean().iter().copied().collect()
}

/// Frobenius norm of the coordinate matrix (rows are vertices).
pub fn frobenius_norm(graph: &GeometricGraph) -> f64 {
    coordinate_matrix(graph).norm()
}

fn coordinate_matrix(graph: &GeometricGraph) -> DMatrix<f64> {
    DMatrix::from_fn(graph.n_vertices(), graph.dim(), |row, col| {
        graph.vertices()[row][col]
    })
}

fn matrix_rows(coords: &DMatrix<f64>) -> Vec<Point> {
    coords
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

// Centring coincident points leaves rounding residue proportional to their magnitude.
fn zero_scale_threshold(graph: &GeometricGraph) -> f64 {
    let magnitude = graph
        .vertices()
        .iter()
        .flatten()
        .fold(1.0f64, |acc, value| acc.max(value.abs()));
    let entries = (graph.n_vertices() * graph.dim()) as f64;
    f64::EPSILON * magnitude * entries
}

fn align_anchor(coords: &mut DMatrix<f64>) {
    let reference = coords
        .row_iter()
        .map(|row| Vector2::new(row[0], row[1]))
        .find(|v| v.norm() > f64::EPSILON);
    let Some(reference) = reference else {
        return;
    };
    let rotation = Rotation2::new(-reference.y.atan2(reference.x));
    for mut row in coords.row_iter_mut() {
        let rotated = rotation * Vector2::new(row[0], row[1]);
        row[0] = rotated.x;
        row[1] = rotated.y;
    }
}

fn degenerate(graph: &GeometricGraph, scale: f64) -> GeogramError {
    debug!(
        "degenerate candidate: {} vertices, scale {scale:e}",
        graph.n_vertices()
    );
    GeogramError::geometry(
        DEGENERATE_GEOMETRY,
        "normalisation scale factor is zero; all vertices coincide",
    )
    .with_context("vertices", graph.n_vertices())
    .with_context("scale", scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GeometricGraph {
        GeometricGraph::new(
            vec![vec![2.0, 1.0], vec![4.0, 1.0], vec![3.0, 5.0]],
            vec![[0, 1], [1, 2], [2, 0]],
            2,
        )
        .unwrap()
    }

    #[test]
    fn centres_and_scales() {
        let normalized = Normalizer::default().normalize_graph(&triangle()).unwrap();
        let c = centroid(&normalized);
        assert!(c.iter().all(|value| value.abs() < 1e-12));
        assert!((frobenius_norm(&normalized) - 1.0).abs() < 1e-12);
        assert_eq!(normalized.edges(), triangle().edges());
    }

    #[test]
    fn anchor_alignment_puts_anchor_on_axis() {
        let normalizer = Normalizer::new(RotationAlignment::AnchorToAxis);
        let normalized = normalizer.normalize_graph(&triangle()).unwrap();
        let anchor = normalized.vertex(0).unwrap();
        assert!(anchor[0] > 0.0);
        assert!(anchor[1].abs() < 1e-12);
        assert!((frobenius_norm(&normalized) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn alignment_rejects_other_dimensions() {
        let graph =
            GeometricGraph::new(vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0]], vec![[0, 1]], 3)
                .unwrap();
        let err = Normalizer::new(RotationAlignment::AnchorToAxis)
            .normalize_graph(&graph)
            .unwrap_err();
        assert!(matches!(err, GeogramError::Unsupported(info) if info.code == "rotation-alignment"));
    }

    #[test]
    fn degenerate_boundary_scales_with_magnitude() {
        // Threshold for two planar points near the origin is 4 * EPSILON (about 8.9e-16).
        let segment = |length: f64| {
            GeometricGraph::new(vec![vec![0.0, 0.0], vec![length, 0.0]], vec![[0, 1]], 2).unwrap()
        };
        let tiny = Normalizer::default().normalize_graph(&segment(1e-15)).unwrap_err();
        assert!(tiny.is_degenerate_geometry());
        let small = Normalizer::default().normalize_graph(&segment(1e-12)).unwrap();
        assert!((frobenius_norm(&small) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_points_with_rounding_residue_are_degenerate() {
        let graph = GeometricGraph::new(
            vec![vec![0.1, 0.7], vec![0.1, 0.7], vec![0.1, 0.7]],
            vec![[0, 1], [1, 2]],
            2,
        )
        .unwrap();
        let err = Normalizer::default().normalize_graph(&graph).unwrap_err();
        assert!(err.is_degenerate_geometry());
    }
}
