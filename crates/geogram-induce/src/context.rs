use std::time::{Duration, Instant};

use geogram_graph::GeometricGraph;

use crate::isogroup::Isogroups;

/// Mutable state of one analysis run, visible to stop policies.
///
/// `global` accumulates every isogroup discovered so far while `frontier`
/// holds only the groups of the current highest order.
#[derive(Debug)]
pub struct AnalyzerContext<'g> {
    pub(crate) graph: &'g GeometricGraph,
    pub(crate) incidence: Vec<Vec<usize>>,
    pub(crate) global: Isogroups,
    pub(crate) frontier: Isogroups,
    pub(crate) order: usize,
    pub(crate) passes: usize,
    pub(crate) last_group_count: Option<usize>,
    pub(crate) expanded: bool,
    started: Instant,
}

impl<'g> AnalyzerContext<'g> {
    pub(crate) fn new(graph: &'g GeometricGraph) -> Self {
        Self {
            graph,
            incidence: graph.incidence_lists(),
            global: Isogroups::new(),
            frontier: Isogroups::new(),
            order: 0,
            passes: 0,
            last_group_count: None,
            expanded: false,
            started: Instant::now(),
        }
    }

    /// The graph being analysed.
    pub fn graph(&self) -> &GeometricGraph {
        self.graph
    }

    /// Every isogroup discovered so far.
    pub fn global(&self) -> &Isogroups {
        &self.global
    }

    /// Isogroups of the current highest order.
    pub fn frontier(&self) -> &Isogroups {
        &self.frontier
    }

    /// Current highest subgraph order (edge count); 0 before initialisation.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of expansion passes attempted.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Global group count recorded at the start of the last detection round.
    pub fn last_group_count(&self) -> Option<usize> {
        self.last_group_count
    }

    /// Whether the most recent pass produced candidates.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Wall-clock time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub(crate) fn into_global(self) -> Isogroups {
        self.global
    }
}
