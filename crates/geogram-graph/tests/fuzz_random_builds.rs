use geogram_graph::{gen_random, graph_from_segments, identity_hash, Segment};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn segments_rebuild_the_same_topology(seed in any::<u64>(), n in 2usize..12, m in 1usize..20) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = gen_random(n, m, 2, 4, &mut rng).unwrap();
        let segments: Vec<Segment> = graph
            .edges()
            .iter()
            .map(|&[u, v]| [graph.vertices()[u].clone(), graph.vertices()[v].clone()])
            .collect();
        let rebuilt = graph_from_segments(&segments, 2).unwrap();

        prop_assert_eq!(rebuilt.n_edges(), graph.n_edges());
        prop_assert!(rebuilt.n_vertices() <= graph.n_vertices());
        for (edge, [u, v]) in rebuilt.edges().iter().zip(segments.iter()) {
            prop_assert_eq!(rebuilt.vertex(edge[0]).unwrap(), u.as_slice());
            prop_assert_eq!(rebuilt.vertex(edge[1]).unwrap(), v.as_slice());
        }
        prop_assert_eq!(identity_hash(&rebuilt), identity_hash(&rebuilt.clone()));
    }
}
