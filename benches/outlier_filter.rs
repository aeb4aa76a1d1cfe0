use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use eis_preprocessor::app::models::{Dataset, EisPoint, MeasurementSeries};
use eis_preprocessor::app::services::spectral_filter::{
    NegativeRealFilter, OutlierFilter, SpectralFilter, outlier_keep_mask,
};
use num_complex::Complex64;

/// Semicircle sweep with a glitch every 17 points
fn make_sweep(count: usize) -> Vec<EisPoint> {
    (0..count)
        .map(|idx| {
            let theta = std::f64::consts::PI * idx as f64 / count as f64;
            let (mut re, mut im) = (1.0 + theta.cos(), -theta.sin());
            if idx % 17 == 8 {
                re += 5.0;
                im -= 5.0;
            }
            EisPoint::new(1.0e4 / (idx as f64 + 1.0), re, im)
        })
        .collect()
}

fn make_dataset(series: usize, points: usize) -> Dataset {
    (0..series)
        .map(|idx| {
            (
                format!("A{:02}_-20 {}", idx % 10 + 1, idx / 10 + 1),
                MeasurementSeries::new(make_sweep(points), Default::default()),
            )
        })
        .collect()
}

fn benchmark_keep_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("outlier_keep_mask");
    for count in [64usize, 1024, 16384] {
        let impedances: Vec<Complex64> = make_sweep(count).iter().map(EisPoint::impedance).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &impedances, |b, z| {
            b.iter(|| outlier_keep_mask(black_box(z), 2.0))
        });
    }
    group.finish();
}

fn benchmark_dataset_filters(c: &mut Criterion) {
    let dataset = make_dataset(40, 120);

    c.bench_function("outlier_filter_dataset", |b| {
        b.iter(|| OutlierFilter::default().apply(black_box(&dataset)))
    });

    c.bench_function("negative_real_then_outlier", |b| {
        b.iter(|| {
            let (cleaned, _) = NegativeRealFilter.apply(black_box(&dataset));
            OutlierFilter::default().apply(&cleaned)
        })
    });
}

criterion_group!(benches, benchmark_keep_mask, benchmark_dataset_filters);
criterion_main!(benches);
