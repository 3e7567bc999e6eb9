use chart::{render, IndicatorPoint};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const BENCH_RECORDS: usize = 1_000;

fn synthetic_points(count: usize) -> Vec<IndicatorPoint> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            IndicatorPoint::new(
                (1_700_000_000_000_u64 + i as u64 * 3_600_000).to_string(),
                64_000.0 + (t * 0.1).sin() * 250.0,
                (t * 0.05).cos() * 0.8,
            )
        })
        .collect()
}

fn bench_chart_render(c: &mut Criterion) {
    let points = synthetic_points(BENCH_RECORDS);

    let mut group = c.benchmark_group("chart_render");
    group.throughput(Throughput::Elements(BENCH_RECORDS as u64));

    group.bench_function(BenchmarkId::new("render_svg", BENCH_RECORDS), |b| {
        b.iter(|| black_box(render(black_box(&points))));
    });

    group.finish();
}

criterion_group!(benches, bench_chart_render);
criterion_main!(benches);
