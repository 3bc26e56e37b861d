//! Benchmarks for measurement extraction and aggregation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bodyform_anthro::{aggregate, derive_proportions, AnthropometricAnalyzer, MeasurementExtractor};
use bodyform_core::{ImageId, LandmarkSet, Position3D, SubjectId, LANDMARK_COUNT};

fn create_test_landmarks() -> Vec<Position3D> {
    (0..LANDMARK_COUNT)
        .map(|i| {
            let t = i as f64;
            Position3D::new(0.4 * (t * 0.7).sin(), 1.7 * t / LANDMARK_COUNT as f64, 0.1 * t.cos())
        })
        .collect()
}

fn benchmark_extraction(c: &mut Criterion) {
    let extractor = MeasurementExtractor::default();
    let landmarks = create_test_landmarks();

    c.bench_function("extract_measurements", |b| {
        b.iter(|| extractor.extract(black_box(&landmarks), black_box(175.0)))
    });

    let measurements = extractor.extract(&landmarks, 175.0).unwrap();
    c.bench_function("derive_proportions", |b| {
        b.iter(|| derive_proportions(black_box(&measurements)))
    });
}

fn benchmark_aggregation(c: &mut Criterion) {
    let analyzer = AnthropometricAnalyzer::default();
    let subject = SubjectId::new();
    let analyses: Vec<_> = (0..100)
        .map(|i| {
            analyzer
                .analyze(
                    subject,
                    ImageId::new(format!("img-{i}")),
                    LandmarkSet::new(create_test_landmarks()).unwrap(),
                    None,
                    160.0 + i as f64 * 0.3,
                )
                .unwrap()
        })
        .collect();

    c.bench_function("aggregate_100", |b| b.iter(|| aggregate(black_box(&analyses))));
}

criterion_group!(benches, benchmark_extraction, benchmark_aggregation);
criterion_main!(benches);
