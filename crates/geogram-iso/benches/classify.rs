use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geogram_graph::gen_grid;
use geogram_iso::{is_isomorphic, normalize};

fn classify_bench(c: &mut Criterion) {
    let a = gen_grid(3, 4).unwrap();
    let b = gen_grid(4, 3).unwrap();
    c.bench_function("is_isomorphic_grid_3x4", |bench| {
        bench.iter(|| black_box(is_isomorphic(black_box(&a), black_box(&b))));
    });
    let graphs = vec![a.clone(); 256];
    c.bench_function("normalize_256_grids", |bench| {
        bench.iter(|| black_box(normalize(black_box(&graphs)).unwrap()));
    });
}

criterion_group!(benches, classify_bench);
criterion_main!(benches);
