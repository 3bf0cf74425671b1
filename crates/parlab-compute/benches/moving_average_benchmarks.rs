//! Moving Average Benchmarks
//!
//! - Naive vs running-sum kernel on a single row
//! - Row-parallel driver at different chunk sizes

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parlab_compute::{
    moving_average, moving_average_running, parallel_moving_average, random_matrix, Strategy,
};
use parlab_pool::WorkerPool;

fn bench_kernels(c: &mut Criterion) {
    let row = random_matrix(1, 10_000, Some(1)).row(0).to_vec();
    let mut group = c.benchmark_group("moving_average_kernel");
    group.throughput(Throughput::Elements(row.len() as u64));

    for window in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("naive", window), &window, |b, &w| {
            b.iter(|| moving_average(black_box(&row), w));
        });
        group.bench_with_input(BenchmarkId::new("running", window), &window, |b, &w| {
            b.iter(|| moving_average_running(black_box(&row), w));
        });
    }

    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let Ok(pool) = WorkerPool::with_defaults() else {
        return;
    };
    let matrix = Arc::new(random_matrix(64, 10_000, Some(2)));
    let mut group = c.benchmark_group("parallel_moving_average");
    group.sample_size(10);

    for rows_per_task in [1, 8, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(rows_per_task),
            &rows_per_task,
            |b, &k| {
                b.iter(|| {
                    parallel_moving_average(&pool, Arc::clone(&matrix), 100, k, Strategy::Naive)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_kernels, bench_parallel);
criterion_main!(benches);
