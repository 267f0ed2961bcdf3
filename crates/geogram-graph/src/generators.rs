use geogram_core::{GeogramError, Point, Result};
use rand::Rng;

use crate::geometric::GeometricGraph;

/// Generates a closed polygon with `n` vertices evenly spaced on a circle.
pub fn gen_cycle(n: usize, radius: f64) -> Result<GeometricGraph> {
    if n < 3 {
        return Err(GeogramError::shape(
            "cycle-too-small",
            "a cycle requires at least three vertices",
        )
        .with_context("n", n));
    }
    let vertices: Vec<Point> = (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            vec![radius * angle.cos(), radius * angle.sin()]
        })
        .collect();
    let edges = (0..n).map(|i| [i, (i + 1) % n]).collect();
    GeometricGraph::new(vertices, edges, 2)
}

/// Generates a `rows x cols` lattice of unit spacing with horizontal edges
/// listed before vertical ones.
pub fn gen_grid(rows: usize, cols: usize) -> Result<GeometricGraph> {
    if rows == 0 || cols == 0 {
        return Err(GeogramError::shape(
            "empty-grid",
            "grid generators need at least one row and one column",
        ));
    }
    let index = |r: usize, c: usize| r * cols + c;
    let mut vertices = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            vertices.push(vec![c as f64, r as f64]);
        }
    }
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols.saturating_sub(1) {
            edges.push([index(r, c), index(r, c + 1)]);
        }
    }
    for r in 0..rows.saturating_sub(1) {
        for c in 0..cols {
            edges.push([index(r, c), index(r + 1, c)]);
        }
    }
    GeometricGraph::new(vertices, edges, 2)
}

/// Generates `pairs` disjoint unit segments (no two edges share a vertex).
pub fn gen_matching(pairs: usize) -> Result<GeometricGraph> {
    let mut vertices = Vec::with_capacity(pairs * 2);
    let mut edges = Vec::with_capacity(pairs);
    for i in 0..pairs {
        let x = 2.0 * i as f64;
        vertices.push(vec![x, 0.0]);
        vertices.push(vec![x, 1.0]);
        edges.push([2 * i, 2 * i + 1]);
    }
    GeometricGraph::new(vertices, edges, 2)
}

/// Generates a random graph on integer lattice points of `[0, extent)^dim`.
///
/// Self-loops are never produced; duplicate edges may be.
pub fn gen_random<R: Rng + ?Sized>(
    n_vertices: usize,
    n_edges: usize,
    dim: usize,
    extent: u32,
    rng: &mut R,
) -> Result<GeometricGraph> {
    if n_vertices < 2 && n_edges > 0 {
        return Err(GeogramError::shape(
            "too-few-vertices",
            "edges require at least two vertices",
        )
        .with_context("vertices", n_vertices));
    }
    let extent = extent.max(1);
    let vertices: Vec<Point> = (0..n_vertices)
        .map(|_| (0..dim).map(|_| f64::from(rng.gen_range(0..extent))).collect())
        .collect();
    let mut edges = Vec::with_capacity(n_edges);
    while edges.len() < n_edges {
        let u = rng.gen_range(0..n_vertices);
        let v = rng.gen_range(0..n_vertices);
        if u != v {
            edges.push([u, v]);
        }
    }
    GeometricGraph::new(vertices, edges, dim)
}
