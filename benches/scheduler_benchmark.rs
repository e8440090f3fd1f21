//! Benchmarks the right-based greedy under growing contention.
//!
//! Grounded on `benches/mjd_benchmark.rs`'s `criterion_group!`/`BenchmarkId`
//! shape.

use clockwork_rs::domain::{RightBasedMetadata, Skyline, SkylineBlock, UniqueTask};
use clockwork_rs::quantities::Duration;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

fn build_metadata(count: usize) -> HashMap<UniqueTask, RightBasedMetadata> {
    (0..count)
        .map(|i| {
            let task = UniqueTask::new(format!("task{i}"), Duration::ZERO).unwrap();
            let skyline = Skyline::new(vec![SkylineBlock::new(Duration::seconds(60), 1.0).unwrap()]);
            let meta = RightBasedMetadata::new(
                Duration::seconds(0),
                Duration::seconds((i as u64) * 60),
                skyline,
            )
            .unwrap();
            (task, meta)
        })
        .collect()
}

fn schedule_tasks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_tasks");
    for size in [10usize, 100, 1_000] {
        let metadata = build_metadata(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &metadata, |b, metadata| {
            b.iter(|| {
                clockwork_rs::algorithms::schedule_tasks(
                    black_box(metadata),
                    Duration::seconds(60),
                    black_box(size as f64),
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, schedule_tasks_benchmark);
criterion_main!(benches);
