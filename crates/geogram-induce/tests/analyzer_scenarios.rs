use geogram_core::GeogramError;
use geogram_graph::{gen_cycle, gen_grid, gen_matching, gen_random, GeometricGraph};
use geogram_induce::{
    policies, AnalyzerConfig, DegeneratePolicy, FilterScope, GraphAnalyzer, ANCHOR_INDEX,
};
use geogram_iso::{is_isomorphic, RotationAlignment};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn square() -> GeometricGraph {
    GeometricGraph::new(
        vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]],
        vec![[0, 1], [1, 2], [2, 3], [3, 0]],
        2,
    )
    .unwrap()
}

#[test]
fn square_yields_edges_then_corners() -> Result<(), GeogramError> {
    let report = GraphAnalyzer::new().run(&square(), &AnalyzerConfig::default())?;
    assert_eq!(report.isogroups.size(), 2);
    assert_eq!(report.isogroups.group_sizes(), vec![4, 4]);
    assert_eq!(report.order, 2);

    let corners = &report.isogroups.groups()[1];
    let anchors: Vec<usize> = corners.members().iter().map(|m| m.anchor_origin()).collect();
    assert_eq!(anchors, vec![0, 1, 2, 3]);
    for member in corners.members() {
        assert_eq!(member.graph().n_edges(), 2);
        assert_eq!(member.graph().degree(ANCHOR_INDEX), 2);
    }
    Ok(())
}

#[test]
fn rotation_alignment_leaves_grouping_unchanged() -> Result<(), GeogramError> {
    let graph = gen_grid(3, 3)?;
    let plain = GraphAnalyzer::new().analyze(&graph, &AnalyzerConfig::default())?;
    let config = AnalyzerConfig::default().with_rotation(RotationAlignment::AnchorToAxis);
    let aligned = GraphAnalyzer::new().analyze(&graph, &config)?;
    assert_eq!(plain.group_sizes(), aligned.group_sizes());
    Ok(())
}

#[test]
fn rotation_alignment_needs_planar_input() {
    let graph = GeometricGraph::new(
        vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
        vec![[0, 1], [0, 2]],
        3,
    )
    .unwrap();
    let config = AnalyzerConfig::default().with_rotation(RotationAlignment::AnchorToAxis);
    let err = GraphAnalyzer::new().analyze(&graph, &config).unwrap_err();
    assert_eq!(err.info().code, "rotation-alignment");
}

#[test]
fn perfect_matching_never_grows() -> Result<(), GeogramError> {
    let report = GraphAnalyzer::new().run(&gen_matching(7)?, &AnalyzerConfig::default())?;
    assert_eq!(report.order, 1);
    assert_eq!(report.isogroups.size(), 1);
    assert_eq!(report.isogroups.total_graphs(), 7);
    Ok(())
}

#[test]
fn max_groups_stops_generation() -> Result<(), GeogramError> {
    // A 3x3 grid keeps producing new orders around its centre vertex.
    let graph = gen_grid(3, 3)?;
    let full = GraphAnalyzer::new().run(&graph, &AnalyzerConfig::default())?;
    assert!(full.order > 2);

    let config = AnalyzerConfig::default()
        .with_generation_stop(policies::max_groups(1))
        .with_detection_stop(policies::max_order(2));
    let capped = GraphAnalyzer::new().run(&graph, &config)?;
    assert_eq!(capped.isogroups.size(), 1);
    assert_eq!(capped.order, 1);
    Ok(())
}

#[test]
fn max_passes_bounds_the_inner_loop() -> Result<(), GeogramError> {
    let config = AnalyzerConfig::default().with_detection_stop(policies::max_passes(1));
    let report = GraphAnalyzer::new().run(&gen_grid(3, 3)?, &config)?;
    assert_eq!(report.passes, 1);
    assert_eq!(report.order, 2);
    Ok(())
}

#[test]
fn frontier_filter_prunes_before_merge() -> Result<(), GeogramError> {
    let graph = gen_grid(3, 3)?;
    let config = AnalyzerConfig::default().with_filter(policies::min_support(5));
    let groups = GraphAnalyzer::new().analyze(&graph, &config)?;
    // Order 1 is never filtered; later orders only keep well supported groups.
    assert_eq!(groups.groups()[0].len(), graph.n_edges());
    assert!(groups.groups()[1..].iter().all(|group| group.len() >= 5));
    Ok(())
}

#[test]
fn global_filter_applies_to_everything() -> Result<(), GeogramError> {
    let config = AnalyzerConfig::default()
        .with_filter(policies::keep_largest(1))
        .with_filter_scope(FilterScope::Global);
    let groups = GraphAnalyzer::new().analyze(&square(), &config)?;
    assert_eq!(groups.group_sizes(), vec![4]);
    Ok(())
}

#[test]
fn degenerate_pass_is_atomic() {
    let graph = GeometricGraph::new(
        vec![vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 0.0], vec![2.0, 0.0]],
        vec![[1, 2], [1, 3], [0, 1]],
        2,
    )
    .unwrap();
    let err = GraphAnalyzer::new()
        .analyze(&graph, &AnalyzerConfig::default())
        .unwrap_err();
    assert!(err.is_degenerate_geometry());

    let config = AnalyzerConfig::default().with_degenerate(DegeneratePolicy::SkipPass);
    let report = GraphAnalyzer::new().run(&graph, &config).unwrap();
    assert_eq!(report.order, 1);
    assert_eq!(report.isogroups.group_sizes(), vec![3]);
}

#[test]
fn cycles_keep_every_anchor() -> Result<(), GeogramError> {
    let graph = gen_cycle(8, 2.0)?;
    let groups = GraphAnalyzer::new().analyze(&graph, &AnalyzerConfig::default())?;
    assert_eq!(groups.group_sizes(), vec![8, 8]);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn order_one_is_every_edge(seed in any::<u64>(), n in 2usize..8, m in 0usize..10) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = gen_random(n, m, 2, 100, &mut rng).unwrap();
        let config = AnalyzerConfig::default().with_generation_stop(|_| true);
        let groups = GraphAnalyzer::new().analyze(&graph, &config).unwrap();
        if m == 0 {
            prop_assert!(groups.is_empty());
        } else {
            prop_assert_eq!(groups.size(), 1);
            let members = groups.groups()[0].members();
            prop_assert_eq!(members.len(), m);
            for (member, edge) in members.iter().zip(graph.edges()) {
                prop_assert_eq!(member.origin(), &edge[..]);
                prop_assert_eq!(member.graph().vertex(0), graph.vertex(edge[0]));
            }
        }
    }

    #[test]
    fn groups_are_isomorphism_classes(seed in any::<u64>(), n in 2usize..7, m in 1usize..8) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = gen_random(n, m, 2, 100, &mut rng).unwrap();
        let config = AnalyzerConfig::default().with_degenerate(DegeneratePolicy::SkipPass);
        let groups = GraphAnalyzer::new().analyze(&graph, &config).unwrap();
        for group in groups.groups() {
            let representative = group.representative().unwrap();
            for member in group.members() {
                prop_assert!(is_isomorphic(representative.graph(), member.graph()));
                prop_assert_eq!(member.graph().n_edges(), representative.graph().n_edges());
                let anchor = member.anchor_origin();
                prop_assert!(member.graph().edges().iter().all(|e| e.contains(&ANCHOR_INDEX)));
                prop_assert_eq!(anchor, member.origin()[ANCHOR_INDEX]);
            }
        }
    }
}
