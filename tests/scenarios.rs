use u_tsp::aco::{AcoConfig, AcoRunner, AcoVariant};
use u_tsp::ga::{Crossover, GaConfig, GaRunner, Mutation, Selection};
use u_tsp::ihc::{IhcConfig, IhcRunner};
use u_tsp::loader::{parse_coords, parse_matrix};
use u_tsp::neighborhood::Neighborhood;
use u_tsp::nn::{nearest_neighbor, nearest_neighbor_best_of};
use u_tsp::problem::{is_permutation, Tsp};
use u_tsp::sa::{SaConfig, SaRunner};
use u_tsp::solver::{solve, SolverConfig};
use u_tsp::summary::RunSummary;
use u_tsp::tabu::{TabuConfig, TabuRunner};

fn square() -> Tsp {
    Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap()
}

fn all_solvers() -> Vec<SolverConfig> {
    vec![
        SolverConfig::NearestNeighbor { start: 0 },
        SolverConfig::HillClimbing(IhcConfig::default().with_iterations(200).with_restarts(2).with_seed(7)),
        SolverConfig::Annealing(SaConfig::default().with_iterations(300).with_seed(7)),
        SolverConfig::Tabu(TabuConfig::default().with_iterations(40).with_seed(7)),
        SolverConfig::Genetic(GaConfig::default().with_population_size(10).with_generations(10).with_seed(7)),
        SolverConfig::AntColony(AcoConfig::default().with_ants(5).with_iterations(5).with_seed(7)),
        SolverConfig::AntColony(
            AcoConfig::default()
                .with_ants(5)
                .with_iterations(5)
                .with_variant(AcoVariant::MaxMin)
                .with_seed(7),
        ),
    ]
}

#[test]
fn nearest_neighbor_solves_square_from_every_start() {
    let tsp = square();
    for start in 0..4 {
        let solution = nearest_neighbor(&tsp, start).unwrap();
        assert_eq!(solution.tour[0], start);
        assert!((solution.length - 4.0).abs() < 1e-12);
    }
    let best = nearest_neighbor_best_of(&tsp, &[0, 1, 2, 3]).unwrap();
    assert!((best.length - 4.0).abs() < 1e-12);
}

#[test]
fn every_algorithm_finds_square_optimum() {
    let tsp = square();
    for config in all_solvers() {
        let solution = solve(&tsp, &config).unwrap();
        assert!(is_permutation(&solution.tour, 4), "{config}");
        assert!((solution.length - 4.0).abs() < 1e-9, "{config}: {}", solution.length);
    }
}

#[test]
fn single_city_instance() {
    let tsp = Tsp::from_coords(&[(3.0, -2.0)]).unwrap();
    for config in all_solvers() {
        let solution = solve(&tsp, &config).unwrap();
        assert_eq!(solution.tour, vec![0], "{config}");
        assert_eq!(solution.length, 0.0, "{config}");
    }
}

#[test]
fn two_city_instance_doubles_the_edge() {
    let tsp = Tsp::from_matrix(vec![vec![0.0, 2.5], vec![2.5, 0.0]]).unwrap();
    for config in all_solvers() {
        let solution = solve(&tsp, &config).unwrap();
        assert!(is_permutation(&solution.tour, 2), "{config}");
        assert!((solution.length - 2.0 * tsp.dist(0, 1)).abs() < 1e-12, "{config}");
    }
}

#[test]
fn annealing_at_zero_temperature_never_accepts_uphill() {
    let tsp = Tsp::from_coords(
        &(0..12)
            .map(|i| {
                let theta = i as f64 * 0.9;
                (theta.cos() * (5.0 + i as f64), theta.sin() * (5.0 + i as f64))
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();
    for neighborhood in Neighborhood::ALL {
        let config = SaConfig::default()
            .with_initial_temperature(0.0)
            .with_iterations_per_temperature(2000)
            .with_neighborhood(neighborhood)
            .with_seed(11);
        let result = SaRunner::run(&tsp, &config).unwrap();
        assert_eq!(result.accepted_moves, result.improving_moves, "{neighborhood}");
        assert_eq!(result.levels, 1);
        assert!(is_permutation(&result.best, 12));
    }
}

#[test]
fn tabu_without_memory_ignores_aspiration() {
    let tsp = Tsp::from_coords(
        &(0..15)
            .map(|i| ((i * 7 % 15) as f64, (i * 11 % 15) as f64))
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let base = TabuConfig::default().with_tabu_size(0).with_iterations(150).with_seed(21);
    let with = TabuRunner::run(&tsp, &base.clone().with_aspiration(true)).unwrap();
    let without = TabuRunner::run(&tsp, &base.with_aspiration(false)).unwrap();

    assert_eq!(with.best, without.best);
    assert_eq!(with.cost_history, without.cost_history);
    assert_eq!(with.idle_iterations, 0);
    assert_eq!(without.idle_iterations, 0);
}

#[test]
fn loaded_instances_feed_every_solver() {
    let matrix = parse_matrix(
        "  A B C D E\n\
         A 0 3 4 2 7\n\
         B 3 0 4 6 3\n\
         C 4 4 0 5 8\n\
         D 2 6 5 0 6\n\
         E 7 3 8 6 0\n",
    )
    .unwrap();
    let coords = parse_coords("NODE_COORD_SECTION\n1 0 0\n2 0 3\n3 4 3\n4 4 0\nEOF\n").unwrap();

    for config in all_solvers() {
        let m = solve(&matrix, &config).unwrap();
        assert!(is_permutation(&m.tour, 5), "{config}");
        let c = solve(&coords, &config).unwrap();
        assert!((c.length - 14.0).abs() < 1e-9, "{config}: {}", c.length);
    }
}

#[test]
fn genetic_operator_grid_on_small_instance() {
    let tsp = square();
    for selection in [Selection::Tournament(2), Selection::Roulette, Selection::Ranking] {
        for crossover in [Crossover::Ox, Crossover::Pmx, Crossover::Cx] {
            for mutation in [Mutation::Swap, Mutation::Insert, Mutation::Inversion] {
                let config = GaConfig::default()
                    .with_population_size(12)
                    .with_generations(15)
                    .with_selection(selection)
                    .with_crossover(crossover)
                    .with_mutation(mutation)
                    .with_seed(3);
                let result = GaRunner::run(&tsp, &config).unwrap();
                assert!((result.best_length - 4.0).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn repeated_runs_summary() {
    let tsp = Tsp::from_coords(
        &(0..10)
            .map(|i| ((i % 5) as f64 * 2.0, (i / 5) as f64 * 3.0))
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let summary = RunSummary::collect(4, |i| {
        let config = IhcConfig::default()
            .with_iterations(500)
            .with_restarts(3)
            .with_seed(100 + i as u64);
        IhcRunner::run(&tsp, &config).map(Into::into)
    })
    .unwrap();

    assert_eq!(summary.lengths.len(), 4);
    assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    assert!(summary.std_dev >= 0.0);
    assert!((tsp.length(&summary.best.tour) - summary.min).abs() < 1e-9);
    // 5x2 grid spaced 2 by 3: the optimum is the 8x3 perimeter
    assert!(summary.min >= 22.0 - 1e-9);
}

#[test]
fn max_min_and_hybrid_ant_colony() {
    let tsp = Tsp::from_coords(
        &(0..16)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / 16.0;
                (theta.cos(), theta.sin())
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let optimum = 2.0 * 16.0 * (std::f64::consts::PI / 16.0).sin();
    let config = AcoConfig::default()
        .with_ants(10)
        .with_iterations(30)
        .with_rho(0.2)
        .with_variant(AcoVariant::MaxMin)
        .with_local_search(100)
        .with_seed(5);
    let result = AcoRunner::run(&tsp, &config).unwrap();
    assert!(result.pheromone_bounds.is_some());
    assert!(result.best_length < optimum * 1.1, "{}", result.best_length);
}
