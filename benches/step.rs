//! Benchmarks for the per-tick cost at the particle-count ceiling.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use driftfield::interactions::pair_scan;
use driftfield::simulation::{FieldSimulation, Viewport};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    // 800x600 derives the maximum 220 particles.
    group.bench_function("step_220", |b| {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut sim = FieldSimulation::new(Viewport::new(800.0, 600.0, 1.0), &mut rng);
        b.iter(|| {
            sim.step(&mut rng);
            black_box(sim.frame());
        })
    });

    group.bench_function("pair_scan_220", |b| {
        let mut rng = SmallRng::seed_from_u64(11);
        let sim = FieldSimulation::new(Viewport::new(800.0, 600.0, 1.0), &mut rng);
        b.iter(|| black_box(pair_scan(sim.particles().as_slice())))
    });

    group.bench_function("step_70", |b| {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut sim = FieldSimulation::new(Viewport::new(320.0, 240.0, 1.0), &mut rng);
        b.iter(|| {
            sim.step(&mut rng);
            black_box(sim.frame());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
