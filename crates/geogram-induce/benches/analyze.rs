use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geogram_graph::{gen_cycle, gen_grid};
use geogram_induce::{policies, AnalyzerConfig, GraphAnalyzer, GraphGrammarEncoder};

fn analyze_bench(c: &mut Criterion) {
    let grid = gen_grid(6, 6).unwrap();
    let cycle = gen_cycle(64, 1.0).unwrap();
    let analyzer = GraphAnalyzer::new();
    let mut group = c.benchmark_group("analyze");
    group.bench_function("grid_6x6", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&grid), &AnalyzerConfig::default()).unwrap()))
    });
    group.bench_function("cycle_64_order_2", |b| {
        b.iter(|| {
            let config = AnalyzerConfig::default().with_detection_stop(policies::max_order(2));
            black_box(analyzer.analyze(black_box(&cycle), &config).unwrap())
        })
    });
    group.finish();

    let groups = analyzer.analyze(&grid, &AnalyzerConfig::default()).unwrap();
    c.bench_function("encode_grid_6x6", |b| {
        b.iter(|| black_box(GraphGrammarEncoder::new().encode(black_box(&groups)).unwrap()))
    });
}

criterion_group!(benches, analyze_bench);
criterion_main!(benches);
