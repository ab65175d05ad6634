//! Benchmarks for row-major kernels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use simplemat_core::{DenseMatrix, OpsConfigBuilder};
use simplemat_kernels::{elementwise, linalg, structural};

fn random_matrix(rows: usize, cols: usize, rng: &mut SmallRng) -> DenseMatrix<f32> {
    DenseMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

fn benchmark_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    let mut rng = SmallRng::seed_from_u64(7);

    for size in [64, 256, 1024].iter() {
        let a = random_matrix(*size, *size, &mut rng);
        let mut out = DenseMatrix::zeros(*size, *size);
        group.bench_with_input(BenchmarkId::new("blocked", size), size, |bench, _| {
            bench.iter(|| structural::transpose(black_box(&a), &mut out));
        });
    }

    group.finish();
}

fn benchmark_element_mult(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_mult");
    let mut rng = SmallRng::seed_from_u64(11);
    let sequential = OpsConfigBuilder::new().parallel_threshold(usize::MAX).build();
    let parallel = OpsConfigBuilder::new().parallel_threshold(1).build();

    for size in [128, 512, 2048].iter() {
        let a = random_matrix(*size, *size, &mut rng);
        let b = random_matrix(*size, *size, &mut rng);
        let mut out = DenseMatrix::zeros(*size, *size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |bench, _| {
            bench.iter(|| elementwise::element_mult(black_box(&a), black_box(&b), &mut out, &sequential));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |bench, _| {
            bench.iter(|| elementwise::element_mult(black_box(&a), black_box(&b), &mut out, &parallel));
        });
    }

    group.finish();
}

fn benchmark_mult(c: &mut Criterion) {
    let mut group = c.benchmark_group("mult");
    let mut rng = SmallRng::seed_from_u64(13);

    for size in [16, 64, 256].iter() {
        let a = random_matrix(*size, *size, &mut rng);
        let b = random_matrix(*size, *size, &mut rng);
        let mut out = DenseMatrix::zeros(*size, *size);
        group.bench_with_input(BenchmarkId::new("nalgebra", size), size, |bench, _| {
            bench.iter(|| linalg::mult(black_box(&a), black_box(&b), &mut out));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_transpose, benchmark_element_mult, benchmark_mult);
criterion_main!(benches);
