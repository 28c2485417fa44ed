use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use theater_coa::core::config::EngineConfig;
use theater_coa::engine::{run_tick, TickContext};
use theater_coa::explorer::{score_proximity, ProximityWeights};
use theater_coa::policy::{Logistics, Policy};
use theater_coa::steering::Strategy;
use theater_coa::world::{SimMode, WorldState};

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(5));

    let policy = Policy::default();
    let logistics = Logistics::default();

    for (label, theater_count, parallel) in [
        ("theaters4_sequential", 4, false),
        ("theaters32_sequential", 32, false),
        ("theaters32_parallel", 32, true),
    ] {
        let config = EngineConfig {
            theater_count,
            parallel_theaters: parallel,
            ..EngineConfig::default()
        };
        group.bench_function(format!("{}_60ticks", label), |b| {
            b.iter_batched(
                || {
                    let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF);
                    let world = WorldState::generate(SimMode::MultiTheater, &config, &mut rng);
                    (world, rng)
                },
                |(mut world, mut rng)| {
                    for tick in 0..60 {
                        let ctx = TickContext {
                            config: &config,
                            policy: &policy,
                            logistics: &logistics,
                            strategy: Strategy::Pincer,
                            elapsed: tick as f64 / 60.0,
                        };
                        run_tick(&mut world, &ctx, &mut rng);
                    }
                    world
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_proximity_score(c: &mut Criterion) {
    let config = EngineConfig {
        theater_count: 32,
        ..EngineConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let world = WorldState::generate(SimMode::MultiTheater, &config, &mut rng);
    let policy = Policy::default();
    let logistics = Logistics::default();
    let weights = ProximityWeights::default();

    c.bench_function("proximity_score_theaters32", |b| {
        b.iter(|| score_proximity(&world, &policy, &logistics, &weights, &mut rng))
    });
}

criterion_group!(benches, bench_ticks, bench_proximity_score);
criterion_main!(benches);
