//! Benchmarks for NFP orbiting and strip packing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stripnest_d2::{no_fit_polygon, Config, Polygon, Solver, StripNester};

fn bench_outer_nfp(c: &mut Criterion) {
    let a = Polygon::from_coords(&[
        (0.0, 0.0),
        (30.0, 0.0),
        (30.0, 10.0),
        (10.0, 10.0),
        (10.0, 30.0),
        (0.0, 30.0),
    ]);
    let b = Polygon::rectangle(8.0, 5.0);

    c.bench_function("nfp_outer_l_shape", |bench| {
        bench.iter(|| no_fit_polygon(black_box(&a), black_box(&b), false, false))
    });
}

fn bench_inner_nfp(c: &mut Criterion) {
    let container = Polygon::rectangle(200.0, 100.0);
    let item = Polygon::from_coords(&[(0.0, 0.0), (12.0, 0.0), (6.0, 9.0)]);

    c.bench_function("nfp_inner_container", |bench| {
        bench.iter(|| no_fit_polygon(black_box(&container), black_box(&item), true, false))
    });
}

fn bench_strip_nester(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip_nester");
    group.sample_size(10);

    for &n in &[5, 10, 20] {
        let items: Vec<Polygon> = (0..n)
            .map(|i| {
                let w = 20.0 + (i as f64 * 3.0) % 30.0;
                let h = 15.0 + (i as f64 * 7.0) % 25.0;
                Polygon::rectangle(w, h)
            })
            .collect();
        let nester = StripNester::new(
            Config::new()
                .with_strip(200.0, 100.0)
                .with_rotation(false),
        );

        group.bench_with_input(
            BenchmarkId::new("rectangles", n),
            &(items, nester),
            |bench, (items, nester)| {
                bench.iter(|| {
                    let report = nester.solve(black_box(items));
                    black_box(report)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_outer_nfp, bench_inner_nfp, bench_strip_nester);
criterion_main!(benches);
