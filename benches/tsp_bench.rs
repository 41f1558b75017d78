//! Criterion benchmarks for the u-tsp solvers.
//!
//! Uses seeded random uniform instances so every algorithm sees the same
//! cities.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_tsp::aco::{AcoConfig, AcoRunner, AcoVariant};
use u_tsp::ga::{Crossover, GaConfig, GaRunner};
use u_tsp::ihc::{IhcConfig, IhcRunner};
use u_tsp::neighborhood::Neighborhood;
use u_tsp::nn::nearest_neighbor_best_of;
use u_tsp::problem::Tsp;
use u_tsp::random::{create_rng, random_tour};
use u_tsp::sa::{SaConfig, SaRunner};
use u_tsp::tabu::{TabuConfig, TabuRunner};

// ===========================================================================
// Instances
// ===========================================================================

fn uniform_instance(n: usize, seed: u64) -> Tsp {
    let mut rng = create_rng(seed);
    let coords: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    Tsp::from_coords(&coords).expect("generated coordinates are finite")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_neighborhood_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighborhood_delta");
    let tsp = uniform_instance(200, 1);
    let tour = random_tour(200, &mut create_rng(2));

    for neighborhood in Neighborhood::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(neighborhood),
            &neighborhood,
            |b, &nb| {
                let mut rng = create_rng(3);
                b.iter(|| black_box(nb.apply_delta(black_box(&tsp), black_box(&tour), &mut rng)))
            },
        );
    }
    group.finish();
}

fn bench_nearest_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbor");

    for &n in &[50usize, 200, 500] {
        let tsp = uniform_instance(n, 42);
        let starts: Vec<usize> = (0..10.min(n)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tsp, |b, t| {
            b.iter(|| black_box(nearest_neighbor_best_of(black_box(t), &starts)))
        });
    }
    group.finish();
}

fn bench_trajectory(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory");
    group.sample_size(10);
    let tsp = uniform_instance(100, 42);

    let ihc = IhcConfig::default()
        .with_iterations(2000)
        .with_restarts(5)
        .with_seed(42);
    group.bench_function("ihc_n100", |b| {
        b.iter(|| black_box(IhcRunner::run(black_box(&tsp), &ihc)))
    });

    let sa = SaConfig::default()
        .with_iterations(2000)
        .with_iterations_per_temperature(5)
        .with_seed(42);
    group.bench_function("sa_n100", |b| {
        b.iter(|| black_box(SaRunner::run(black_box(&tsp), &sa)))
    });

    let tabu = TabuConfig::default()
        .with_iterations(300)
        .with_diversification(50, 0.3)
        .with_seed(42);
    group.bench_function("tabu_n100", |b| {
        b.iter(|| black_box(TabuRunner::run(black_box(&tsp), &tabu)))
    });
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga");
    group.sample_size(10);
    let tsp = uniform_instance(60, 42);

    for crossover in [Crossover::Ox, Crossover::Pmx, Crossover::Cx] {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_generations(50)
            .with_crossover(crossover)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(crossover),
            &config,
            |b, c| b.iter(|| black_box(GaRunner::run(black_box(&tsp), black_box(c)))),
        );
    }
    group.finish();
}

fn bench_aco(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco");
    group.sample_size(10);
    let tsp = uniform_instance(50, 42);

    for variant in [AcoVariant::AntSystem, AcoVariant::MaxMin] {
        let config = AcoConfig::default()
            .with_ants(20)
            .with_iterations(20)
            .with_rho(0.2)
            .with_variant(variant)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(variant),
            &config,
            |b, c| b.iter(|| black_box(AcoRunner::run(black_box(&tsp), black_box(c)))),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_neighborhood_delta,
    bench_nearest_neighbor,
    bench_trajectory,
    bench_ga,
    bench_aco
);
criterion_main!(benches);
