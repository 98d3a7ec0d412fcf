//! Benchmarks for the AgX config generator.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use agx_curve::{linspace, FormationCurve, Sigmoid};
use agx_math::{Point2, Ray2, Triangle};
use agx_ocio::formation::{build_config, FormationSettings};
use agx_primaries::{build_working_space, RgbColourspace, WorkingSpaceParams};

/// Scalar loop against the rayon batch path, around the parallel threshold.
fn bench_sigmoid(c: &mut Criterion) {
    let mut group = c.benchmark_group("sigmoid");
    let sigmoid = Sigmoid::new(FormationCurve::default().sigmoid).unwrap();

    for size in [4096, 16384, 262144].iter() {
        let xs = linspace(0.0, 1.0, *size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &xs, |b, xs| {
            b.iter(|| xs.iter().map(|&x| sigmoid.eval(black_box(x))).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("batch", size), &xs, |b, xs| {
            b.iter(|| sigmoid.eval_batch(black_box(xs)))
        });
    }

    group.finish();
}

fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut");
    let curve = FormationCurve::default();

    group.bench_function("sample_4096", |b| b.iter(|| black_box(&curve).sample().unwrap()));

    let lut = curve.sample().unwrap().to_lut().unwrap();
    let values: Vec<f64> = (0..10000).map(|i| i as f64 / 10000.0).collect();
    group.throughput(Throughput::Elements(10000));
    group.bench_function("apply_10000", |b| {
        b.iter(|| values.iter().map(|&v| lut.apply(black_box(v))).collect::<Vec<_>>())
    });

    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let bt709 = RgbColourspace::bt709();
    let gamut: Triangle = bt709.gamut();
    let white: Point2 = bt709.whitepoint;

    group.bench_function("ray_triangle", |b| {
        let ray = Ray2::through(white, bt709.primaries[0].rotate_about(white, 3.0));
        b.iter(|| gamut.intersect_ray(black_box(&ray)))
    });

    group.bench_function("working_space", |b| {
        let params = WorkingSpaceParams::default();
        b.iter(|| build_working_space(black_box(&bt709), &params, "AgX Working").unwrap())
    });

    group.finish();
}

fn bench_config(c: &mut Criterion) {
    let settings = FormationSettings::default();

    c.bench_function("build_config", |b| b.iter(|| build_config(black_box(&settings)).unwrap()));

    let config = build_config(&settings).unwrap();
    c.bench_function("to_yaml", |b| b.iter(|| black_box(&config).to_yaml().unwrap()));
}

criterion_group!(benches, bench_sigmoid, bench_lut, bench_geometry, bench_config);
criterion_main!(benches);
