//! Ready-made stop and filter policies for [`crate::AnalyzerConfig`].

use std::time::Duration;

use crate::context::AnalyzerContext;
use crate::isogroup::Isogroups;

/// Stops once subgraphs of order `n` exist.
pub fn max_order(n: usize) -> impl Fn(&AnalyzerContext<'_>) -> bool {
    move |ctx| ctx.order() >= n
}

/// Stops after `n` expansion passes.
pub fn max_passes(n: usize) -> impl Fn(&AnalyzerContext<'_>) -> bool {
    move |ctx| ctx.passes() >= n
}

/// Stops once the global result holds at least `n` groups.
pub fn max_groups(n: usize) -> impl Fn(&AnalyzerContext<'_>) -> bool {
    move |ctx| ctx.global().size() >= n
}

/// Stops once the run has taken longer than `limit`.
pub fn max_elapsed(limit: Duration) -> impl Fn(&AnalyzerContext<'_>) -> bool {
    move |ctx| ctx.elapsed() >= limit
}

/// Drops groups with fewer than `k` members.
pub fn min_support(k: usize) -> impl Fn(Isogroups) -> Isogroups {
    move |mut groups| {
        groups.retain(|group| group.len() >= k);
        groups
    }
}

/// Keeps the `n` largest groups; ties and survivors keep their original order.
pub fn keep_largest(n: usize) -> impl Fn(Isogroups) -> Isogroups {
    move |groups| {
        let mut ranked: Vec<(usize, usize)> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| (index, group.len()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut keep = vec![false; ranked.len()];
        for &(index, _) in ranked.iter().take(n) {
            keep[index] = true;
        }
        groups
            .into_iter()
            .zip(keep)
            .filter_map(|(group, kept)| kept.then_some(group))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isogroup::Isogroup;
    use crate::placed::PlacedGraph;
    use geogram_graph::GeometricGraph;

    fn groups_of(sizes: &[usize]) -> Isogroups {
        let graph = GeometricGraph::new(vec![vec![0.0], vec![1.0]], vec![[0, 1]], 1).unwrap();
        let placed = PlacedGraph::new(graph, vec![0, 1]).unwrap();
        sizes
            .iter()
            .map(|&size| Isogroup::from(vec![placed.clone(); size]))
            .collect()
    }

    #[test]
    fn min_support_drops_small_groups() {
        let filtered = min_support(2)(groups_of(&[1, 3, 2, 1]));
        assert_eq!(filtered.group_sizes(), vec![3, 2]);
    }

    #[test]
    fn keep_largest_is_stable() {
        let filtered = keep_largest(2)(groups_of(&[2, 5, 2, 1]));
        assert_eq!(filtered.group_sizes(), vec![2, 5]);
        assert_eq!(keep_largest(10)(groups_of(&[1, 2])).group_sizes(), vec![1, 2]);
        assert!(keep_largest(0)(groups_of(&[1, 2])).is_empty());
    }
}
