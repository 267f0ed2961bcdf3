use geogram_graph::GeometricGraph;
use log::trace;

use crate::canonical::AbstractGraph;
use crate::invariants::StructuralInvariants;

/// Decides whether two geometric graphs belong to the same isomorphism class.
pub trait Classifier {
    /// Returns whether `a` and `b` share the same class. Must be reflexive and symmetric.
    fn is_isomorphic(&self, a: &GeometricGraph, b: &GeometricGraph) -> bool;

    /// Returns whether a match implies equal [`StructuralInvariants`].
    ///
    /// When true, callers may skip candidates whose invariant keys differ
    /// without changing the outcome of a scan.
    fn respects_invariants(&self) -> bool {
        false
    }
}

/// Exact topological isomorphism test; geometry is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralClassifier;

impl Classifier for StructuralClassifier {
    fn is_isomorphic(&self, a: &GeometricGraph, b: &GeometricGraph) -> bool {
        is_isomorphic(a, b)
    }

    fn respects_invariants(&self) -> bool {
        true
    }
}

/// Returns whether an adjacency-preserving bijection between `g1` and `g2` exists.
pub fn is_isomorphic(g1: &GeometricGraph, g2: &GeometricGraph) -> bool {
    find_isomorphism(g1, g2).is_some()
}

/// Searches for a vertex bijection `mapping[v1] = v2` preserving edge multiplicities.
pub fn find_isomorphism(g1: &GeometricGraph, g2: &GeometricGraph) -> Option<Vec<usize>> {
    if g1.dim() != g2.dim()
        || g1.n_vertices() != g2.n_vertices()
        || g1.n_edges() != g2.n_edges()
    {
        return None;
    }

    let a = AbstractGraph::from_geometric(g1);
    let b = AbstractGraph::from_geometric(g2);
    let inv_a = StructuralInvariants::from_abstract(g1.dim(), g1.n_edges(), &a);
    let inv_b = StructuralInvariants::from_abstract(g2.dim(), g2.n_edges(), &b);
    if inv_a != inv_b {
        trace!("invariants differ; skipping bijection search");
        return None;
    }

    let mut search = BijectionSearch::new(&a, &b);
    if search.extend(0) {
        Some(search.into_mapping())
    } else {
        None
    }
}

struct BijectionSearch<'a> {
    a: &'a AbstractGraph,
    b: &'a AbstractGraph,
    order: Vec<usize>,
    mapping: Vec<Option<usize>>,
    used: Vec<bool>,
}

impl<'a> BijectionSearch<'a> {
    fn new(a: &'a AbstractGraph, b: &'a AbstractGraph) -> Self {
        let n = a.len();
        let mut order: Vec<usize> = (0..n).collect();
        // High degree first prunes the search tree fastest.
        order.sort_by(|&x, &y| a.degree(y).cmp(&a.degree(x)).then(x.cmp(&y)));
        Self {
            a,
            b,
            order,
            mapping: vec![None; n],
            used: vec![false; n],
        }
    }

    fn extend(&mut self, depth: usize) -> bool {
        if depth == self.order.len() {
            return true;
        }
        let u = self.order[depth];
        for candidate in 0..self.b.len() {
            if self.used[candidate] || !self.consistent(depth, u, candidate) {
                continue;
            }
            self.mapping[u] = Some(candidate);
            self.used[candidate] = true;
            if self.extend(depth + 1) {
                return true;
            }
            self.mapping[u] = None;
            self.used[candidate] = false;
        }
        false
    }

    fn consistent(&self, depth: usize, u: usize, candidate: usize) -> bool {
        if self.a.degree(u) != self.b.degree(candidate) || self.a.loops(u) != self.b.loops(candidate)
        {
            return false;
        }
        self.order[..depth]
            .iter()
            .all(|&mapped| match self.mapping[mapped] {
                Some(image) => {
                    self.a.multiplicity(u, mapped) == self.b.multiplicity(candidate, image)
                }
                None => false,
            })
    }

    fn into_mapping(self) -> Vec<usize> {
        self.mapping.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn graph(n: usize, edges: &[[usize; 2]]) -> GeometricGraph {
        let vertices = (0..n).map(|i| vec![i as f64, (i * i) as f64]).collect();
        GeometricGraph::new(vertices, edges.to_vec(), 2).unwrap()
    }

    fn brute_force(g1: &GeometricGraph, g2: &GeometricGraph) -> bool {
        if g1.n_vertices() != g2.n_vertices() || g1.n_edges() != g2.n_edges() {
            return false;
        }
        let a = AbstractGraph::from_geometric(g1);
        let b = AbstractGraph::from_geometric(g2);
        let n = a.len();
        (0..n).permutations(n).any(|perm| {
            (0..n).all(|u| (0..n).all(|v| a.multiplicity(u, v) == b.multiplicity(perm[u], perm[v])))
        })
    }

    #[test]
    fn path_and_star_differ() {
        let path = graph(4, &[[0, 1], [1, 2], [2, 3]]);
        let star = graph(4, &[[0, 1], [0, 2], [0, 3]]);
        assert!(!is_isomorphic(&path, &star));
        assert!(is_isomorphic(&path, &graph(4, &[[3, 1], [1, 0], [0, 2]])));
    }

    #[test]
    fn same_degrees_different_topology() {
        // Hexagon versus two triangles: 2-regular on six vertices.
        let hexagon = graph(6, &[[0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 0]]);
        let triangles = graph(6, &[[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3]]);
        assert!(!is_isomorphic(&hexagon, &triangles));
        assert!(!brute_force(&hexagon, &triangles));
    }

    #[test]
    fn mapping_preserves_adjacency() {
        let g1 = graph(4, &[[0, 1], [1, 2], [2, 0], [2, 3]]);
        let g2 = graph(4, &[[3, 2], [2, 1], [1, 3], [0, 1]]);
        let mapping = find_isomorphism(&g1, &g2).unwrap();
        for &[u, v] in g1.edges() {
            assert!(g2.has_edge_between(mapping[u], mapping[v]));
        }
    }

    #[test]
    fn multiplicity_matters() {
        let doubled = graph(2, &[[0, 1], [0, 1]]);
        let looped = graph(2, &[[0, 1], [0, 0]]);
        assert!(!is_isomorphic(&doubled, &looped));
        assert!(is_isomorphic(&doubled, &graph(2, &[[1, 0], [0, 1]])));
    }

    #[test]
    fn agrees_with_exhaustive_search_on_small_graphs() {
        let edge_sets: Vec<Vec<[usize; 2]>> = vec![
            vec![[0, 1], [1, 2], [2, 3], [3, 4]],
            vec![[0, 1], [0, 2], [0, 3], [0, 4]],
            vec![[0, 1], [1, 2], [2, 0], [3, 4]],
            vec![[4, 3], [1, 2], [2, 0], [0, 1]],
            vec![[0, 1], [1, 2], [2, 3], [3, 1]],
            vec![[2, 4], [4, 3], [3, 1], [1, 4]],
        ];
        for (i, e1) in edge_sets.iter().enumerate() {
            for e2 in &edge_sets[i..] {
                let g1 = graph(5, e1);
                let g2 = graph(5, e2);
                assert_eq!(is_isomorphic(&g1, &g2), brute_force(&g1, &g2), "{e1:?} vs {e2:?}");
            }
        }
    }
}
