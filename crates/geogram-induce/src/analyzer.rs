use geogram_core::Result;
use geogram_graph::GeometricGraph;
use geogram_iso::{Classifier, Normalizer, StructuralClassifier};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{AnalyzerConfig, DegeneratePolicy, FilterScope};
use crate::context::AnalyzerContext;
use crate::isogroup::{Isogroup, Isogroups};
use crate::placed::PlacedGraph;

/// Outcome of a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Every isogroup discovered, lowest order first.
    pub isogroups: Isogroups,
    /// Highest order reached.
    pub order: usize,
    /// Number of expansion passes attempted.
    pub passes: usize,
}

/// Discovers isogroups of connected subgraphs by growing them one edge at a time.
///
/// Order-1 subgraphs are the single edges of the input. Every later pass
/// extends each frontier subgraph by one edge incident to its anchor vertex,
/// normalises the candidates and classifies them with `C`.
#[derive(Debug, Clone, Default)]
pub struct GraphAnalyzer<C: Classifier = StructuralClassifier> {
    classifier: C,
}

impl GraphAnalyzer {
    /// Creates an analyzer using [`StructuralClassifier`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Classifier> GraphAnalyzer<C> {
    /// Creates an analyzer with a custom classifier.
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// Returns the classifier in use.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Runs the analysis and returns the accumulated isogroups.
    pub fn analyze(&self, graph: &GeometricGraph, config: &AnalyzerConfig) -> Result<Isogroups> {
        self.run(graph, config).map(|report| report.isogroups)
    }

    /// Runs the analysis and returns the isogroups with run statistics.
    pub fn run(&self, graph: &GeometricGraph, config: &AnalyzerConfig) -> Result<AnalysisReport> {
        debug!(
            "analysing graph with {} vertices and {} edges ({config:?})",
            graph.n_vertices(),
            graph.n_edges()
        );
        let mut ctx = AnalyzerContext::new(graph);
        self.generate_initial_isogroups(&mut ctx)?;

        while self.more_isogroups(&ctx, config) {
            ctx.last_group_count = Some(ctx.global.size());
            self.isogroup_detection(&mut ctx, config)?;
            self.isogroup_selection(&ctx);
        }

        info!(
            "analysis finished: {} groups, {} graphs, order {}, {} passes in {:?}",
            ctx.global.size(),
            ctx.global.total_graphs(),
            ctx.order,
            ctx.passes,
            ctx.elapsed()
        );
        let order = ctx.order;
        let passes = ctx.passes;
        Ok(AnalysisReport {
            isogroups: ctx.into_global(),
            order,
            passes,
        })
    }

    fn generate_initial_isogroups(&self, ctx: &mut AnalyzerContext<'_>) -> Result<()> {
        if ctx.graph.n_edges() == 0 {
            debug!("graph has no edges; nothing to analyse");
            return Ok(());
        }
        let members = (0..ctx.graph.n_edges())
            .map(|position| PlacedGraph::single_edge(ctx.graph, position))
            .collect::<Result<Vec<_>>>()?;
        let group = Isogroup::from(members);
        info!("order 1: {} single-edge subgraphs", group.len());

        let mut initial = Isogroups::new();
        initial.add_group(group);
        ctx.global = initial.clone();
        ctx.frontier = initial;
        ctx.order = 1;
        Ok(())
    }

    fn more_isogroups(&self, ctx: &AnalyzerContext<'_>, config: &AnalyzerConfig) -> bool {
        if ctx.last_group_count == Some(ctx.global.size()) {
            debug!("no new isogroups since the last round");
            return false;
        }
        if config.generation_stop(ctx) {
            debug!("generation stop policy fired at order {}", ctx.order);
            return false;
        }
        true
    }

    fn isogroup_detection(
        &self,
        ctx: &mut AnalyzerContext<'_>,
        config: &AnalyzerConfig,
    ) -> Result<()> {
        let mut rounds = 0usize;
        loop {
            if rounds > 0 && !ctx.expanded {
                break;
            }
            if config.detection_stop(ctx) {
                debug!("detection stop policy fired at order {}", ctx.order);
                break;
            }
            self.vertex_expansion(ctx, config)?;
            rounds += 1;
        }
        Ok(())
    }

    /// One expansion pass; state is only committed once every step succeeded.
    fn vertex_expansion(
        &self,
        ctx: &mut AnalyzerContext<'_>,
        config: &AnalyzerConfig,
    ) -> Result<()> {
        let candidates = self.enumerate_candidates(ctx)?;
        let next_order = ctx.order + 1;
        debug!("order {next_order}: {} candidates", candidates.len());

        let normalizer = Normalizer::new(config.rotation);
        let mut next = Isogroups::new();
        for (index, candidate) in candidates.into_iter().enumerate() {
            let normalized = match normalizer.normalize_graph(candidate.graph()) {
                Ok(normalized) => normalized,
                Err(err)
                    if err.is_degenerate_geometry()
                        && config.degenerate == DegeneratePolicy::SkipPass =>
                {
                    warn!("skipping order {next_order} pass: {}", err.info().message);
                    ctx.expanded = false;
                    ctx.passes += 1;
                    return Ok(());
                }
                Err(err) => {
                    return Err(err
                        .with_context("candidate", index)
                        .with_context("order", next_order))
                }
            };
            let placed = candidate.with_normalized(normalized)?;
            next.classify_and_insert(placed, &self.classifier);
        }

        ctx.passes += 1;
        if next.is_empty() {
            ctx.expanded = false;
            return Ok(());
        }

        if config.filter_scope == FilterScope::Frontier {
            next = config.apply_filter(next);
        }
        info!(
            "order {next_order}: {} isogroups over {} subgraphs",
            next.size(),
            next.total_graphs()
        );
        ctx.global.extend(next.clone());
        ctx.frontier = next;
        ctx.order = next_order;
        ctx.expanded = true;
        if config.filter_scope == FilterScope::Global {
            let global = std::mem::take(&mut ctx.global);
            ctx.global = config.apply_filter(global);
        }
        Ok(())
    }

    fn enumerate_candidates(&self, ctx: &AnalyzerContext<'_>) -> Result<Vec<PlacedGraph>> {
        let mut candidates = Vec::new();
        for member in ctx.frontier.iter().flat_map(Isogroup::members) {
            let anchor = member.anchor_origin();
            for &position in &ctx.incidence[anchor] {
                let [u, v] = ctx.graph.edges()[position];
                let far = if u == anchor { v } else { u };
                if let Some(candidate) = member.extended_with(ctx.graph, far)? {
                    candidates.push(candidate);
                }
            }
        }
        Ok(candidates)
    }

    fn isogroup_selection(&self, ctx: &AnalyzerContext<'_>) {
        debug!(
            "selection: {} groups, sizes {:?}",
            ctx.global.size(),
            ctx.global.group_sizes()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies;
    use geogram_core::GeogramError;
    use geogram_graph::{gen_cycle, gen_matching};

    fn square() -> GeometricGraph {
        GeometricGraph::new(
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]],
            vec![[0, 1], [1, 2], [2, 3], [3, 0]],
            2,
        )
        .unwrap()
    }

    #[test]
    fn square_grows_to_paths_of_two() {
        let report = GraphAnalyzer::new()
            .run(&square(), &AnalyzerConfig::default())
            .unwrap();
        assert_eq!(report.isogroups.group_sizes(), vec![4, 4]);
        assert_eq!(report.order, 2);
        assert_eq!(report.passes, 3);
    }

    #[test]
    fn edgeless_graph_yields_nothing() {
        let graph = GeometricGraph::new(vec![vec![0.0, 0.0]], Vec::new(), 2).unwrap();
        let groups = GraphAnalyzer::new()
            .analyze(&graph, &AnalyzerConfig::default())
            .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn matching_stops_at_order_one() {
        let report = GraphAnalyzer::new()
            .run(&gen_matching(5).unwrap(), &AnalyzerConfig::default())
            .unwrap();
        assert_eq!(report.order, 1);
        assert_eq!(report.isogroups.group_sizes(), vec![5]);
    }

    #[test]
    fn generation_stop_keeps_only_single_edges() {
        let config = AnalyzerConfig::default().with_generation_stop(|_| true);
        let groups = GraphAnalyzer::new().analyze(&square(), &config).unwrap();
        assert_eq!(groups.group_sizes(), vec![4]);
        for (position, member) in groups.groups()[0].members().iter().enumerate() {
            assert_eq!(member.graph().n_edges(), 1);
            assert_eq!(member.origin(), &square().edges()[position]);
        }
    }

    #[test]
    fn detection_cap_limits_order() {
        let config = AnalyzerConfig::default().with_detection_stop(policies::max_order(1));
        let report = GraphAnalyzer::new().run(&gen_cycle(6, 1.0).unwrap(), &config).unwrap();
        assert_eq!(report.order, 1);
        assert_eq!(report.passes, 0);
    }

    #[test]
    fn coincident_vertices_abort_or_skip() {
        let graph = GeometricGraph::new(
            vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]],
            vec![[0, 1], [0, 2]],
            2,
        )
        .unwrap();
        let err = GraphAnalyzer::new()
            .analyze(&graph, &AnalyzerConfig::default())
            .unwrap_err();
        assert!(matches!(&err, GeogramError::Geometry(info) if info.context["order"] == "2"));

        let config = AnalyzerConfig::default().with_degenerate(DegeneratePolicy::SkipPass);
        let report = GraphAnalyzer::new().run(&graph, &config).unwrap();
        assert_eq!(report.order, 1);
        assert_eq!(report.isogroups.group_sizes(), vec![2]);
    }
}
