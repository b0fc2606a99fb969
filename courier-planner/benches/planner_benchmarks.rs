//! Criterion benchmarks for the nearest-neighbour planner.
//!
//! Measures planning time across load sizes (16, 40, 100 packages) spread
//! over a seeded random network so runs are comparable.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package courier-planner
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use courier_core::{
    DistanceIndex, Package, PackageId, PackageStore, RoutePlanner, Vehicle, VehicleId,
};
use courier_planner::NearestNeighbourPlanner;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic network generation.
const BENCHMARK_SEED: u64 = 42;

/// Load sizes to benchmark.
const LOAD_SIZES: &[u32] = &[16, 40, 100];

/// Distinct addresses in the generated network, depot excluded.
const ADDRESSES: usize = 27;

fn address(stop: usize) -> String {
    format!("{stop} Benchmark Ave")
}

/// Random symmetric network with a zero diagonal.
#[expect(clippy::expect_used, reason = "generated matrix is valid by construction")]
fn generate_index(rng: &mut ChaCha8Rng) -> DistanceIndex {
    let size = ADDRESSES + 1;
    let raw: Vec<f64> = (0..size * size).map(|_| rng.gen_range(0.5..12.0)).collect();
    let cells = (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    if row == col {
                        return Some(0.0);
                    }
                    raw.get(row.min(col) * size + row.max(col)).copied()
                })
                .collect()
        })
        .collect();
    let mut names = vec!["HUB".to_owned()];
    names.extend((1..size).map(address));
    DistanceIndex::new(names, cells, "HUB").expect("generated index is valid")
}

fn generate_store(count: u32, rng: &mut ChaCha8Rng) -> PackageStore {
    (1..=count)
        .map(|id| Package::new(PackageId::new(id), address(rng.gen_range(1..=ADDRESSES))))
        .collect()
}

fn bench_plan_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_time");
    let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
    let index = generate_index(&mut rng);

    for &size in LOAD_SIZES {
        let store = generate_store(size, &mut rng);
        let vehicle = Vehicle::new(VehicleId::new(1), store.sorted_ids());

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("packages", size), &size, |b, _| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking planning performance, result is intentionally discarded"
                )]
                let _ = NearestNeighbourPlanner.plan_route(&vehicle, &store, &index);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_times);
criterion_main!(benches);
