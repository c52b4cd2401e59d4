//! Benchmarks for xform-rs kernels on every backend.
//!
//! Run with: `cargo bench -p xform-bench`

use std::hint::black_box;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use xform_core::{Avx, Backend, Radians, Scalar, Sse2, Sse4};
use xform_math::{Mat4, Quat, Vec3, Vec4, batch, mat4, taylor_sine, vec4};

fn sample_vectors(n: usize) -> Vec<Vec4> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.013;
            Vec4::new(t.sin() + 1.5, t.cos(), t * 0.01, 1.0)
        })
        .collect()
}

fn sample_points(n: usize) -> Vec<Vec3> {
    sample_vectors(n).into_iter().map(Vec4::xyz).collect()
}

fn sample_matrix() -> Mat4 {
    Mat4::perspective(Radians::new(1.0), 1.5, 0.1, 100.0)
        * Mat4::look_at(Vec3::new(1.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y)
        * Mat4::rotation(Radians::new(0.3), Vec3::Y)
}

fn vec4_on<B: Backend>(group: &mut BenchmarkGroup<'_, WallTime>, values: &[Vec4]) {
    let name = B::LEVEL.name();

    group.bench_with_input(BenchmarkId::new("dot", name), values, |b, v| {
        b.iter(|| v.iter().map(|x| vec4::dot::<B>(black_box(*x), *x)).sum::<f32>())
    });

    group.bench_with_input(BenchmarkId::new("normalize", name), values, |b, v| {
        b.iter(|| {
            v.iter()
                .map(|x| vec4::normalize::<B>(black_box(*x)))
                .collect::<Vec<_>>()
        })
    });

    group.bench_with_input(BenchmarkId::new("normalize_fast", name), values, |b, v| {
        b.iter(|| {
            v.iter()
                .map(|x| vec4::normalize_fast::<B>(black_box(*x)))
                .collect::<Vec<_>>()
        })
    });
}

/// Benchmark vector kernels.
fn bench_vec4(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec4");
    let values = sample_vectors(10_000);
    group.throughput(Throughput::Elements(values.len() as u64));

    vec4_on::<Scalar>(&mut group, &values);
    vec4_on::<Sse2>(&mut group, &values);
    vec4_on::<Sse4>(&mut group, &values);
    vec4_on::<Avx>(&mut group, &values);

    group.finish();
}

fn mat4_on<B: Backend>(group: &mut BenchmarkGroup<'_, WallTime>, m: &Mat4, values: &[Vec4]) {
    let name = B::LEVEL.name();

    group.bench_function(BenchmarkId::new("multiply", name), |b| {
        b.iter(|| mat4::multiply::<B>(black_box(m), black_box(m)))
    });

    group.bench_function(BenchmarkId::new("compare", name), |b| {
        b.iter(|| mat4::compare::<B>(black_box(m), black_box(m)))
    });

    group.bench_with_input(BenchmarkId::new("transform_vec4", name), values, |b, v| {
        b.iter(|| {
            v.iter()
                .map(|x| mat4::transform_vec4::<B>(m, black_box(*x)))
                .collect::<Vec<_>>()
        })
    });
}

/// Benchmark matrix kernels.
fn bench_mat4(c: &mut Criterion) {
    let mut group = c.benchmark_group("mat4");
    let m = sample_matrix();
    let values = sample_vectors(1_000);

    mat4_on::<Scalar>(&mut group, &m, &values);
    mat4_on::<Sse2>(&mut group, &m, &values);
    mat4_on::<Sse4>(&mut group, &m, &values);
    mat4_on::<Avx>(&mut group, &m, &values);

    group.bench_function("to_quaternion", |b| b.iter(|| black_box(&m).to_quaternion()));
    group.bench_function("from_quaternion", |b| {
        let q = Quat::from_axis(Radians::new(0.7), Vec3::new(0.0, 0.6, 0.8));
        b.iter(|| Mat4::from_quaternion(black_box(q)))
    });

    group.finish();
}

/// Benchmark slice transforms, sequential and parallel sizes.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let m = sample_matrix();

    for size in [1_000, batch::PARALLEL_THRESHOLD, 100_000] {
        let points = sample_points(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("transform_points_scalar", size), &points, |b, p| {
            b.iter(|| {
                let mut p = p.clone();
                batch::transform_points::<Scalar>(&m, &mut p);
                p
            })
        });

        group.bench_with_input(BenchmarkId::new("transform_points_avx", size), &points, |b, p| {
            b.iter(|| {
                let mut p = p.clone();
                batch::transform_points::<Avx>(&m, &mut p);
                p
            })
        });

        let q = Quat::from_axis(Radians::new(1.1), Vec3::Z);
        group.bench_with_input(BenchmarkId::new("rotate_vectors", size), &points, |b, p| {
            b.iter(|| {
                let mut p = p.clone();
                batch::rotate_vectors(&q, &mut p);
                p
            })
        });
    }

    group.finish();
}

/// Benchmark the Taylor sine against libm.
fn bench_trig(c: &mut Criterion) {
    let mut group = c.benchmark_group("trig");
    let angles: Vec<f32> = (0..10_000).map(|i| i as f32 * 0.005 - 25.0).collect();
    group.throughput(Throughput::Elements(angles.len() as u64));

    group.bench_function("taylor_sine", |b| {
        b.iter(|| {
            angles
                .iter()
                .map(|&a| taylor_sine(Radians::new(black_box(a))))
                .sum::<f32>()
        })
    });

    group.bench_function("libm_sin", |b| {
        b.iter(|| angles.iter().map(|&a| black_box(a).sin()).sum::<f32>())
    });

    group.finish();
}

criterion_group!(benches, bench_vec4, bench_mat4, bench_batch, bench_trig);

criterion_main!(benches);
