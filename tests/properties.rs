use proptest::prelude::*;

use u_tsp::aco::{AcoConfig, AcoVariant};
use u_tsp::ga::operators::{cycle_crossover, order_crossover_at, pmx_crossover_at};
use u_tsp::ga::GaConfig;
use u_tsp::ihc::IhcConfig;
use u_tsp::neighborhood::{insert_delta_at, swap_delta_at, two_opt_delta_at};
use u_tsp::nn::nearest_neighbor;
use u_tsp::problem::{is_permutation, Tsp};
use u_tsp::sa::SaConfig;
use u_tsp::solver::{solve, SolverConfig};
use u_tsp::tabu::TabuConfig;

fn coords(sizes: std::ops::Range<usize>) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), sizes)
}

fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
}

prop_compose! {
    fn instance_with_tour(sizes: std::ops::Range<usize>)
    (points in coords(sizes))
    (tour in permutation(points.len()), points in Just(points)) -> (Tsp, Vec<usize>) {
        (Tsp::from_coords(&points).unwrap(), tour)
    }
}

prop_compose! {
    fn parents(sizes: std::ops::Range<usize>)
    (n in sizes)
    (p1 in permutation(n), p2 in permutation(n)) -> (Vec<usize>, Vec<usize>) {
        (p1, p2)
    }
}

fn assert_delta(tsp: &Tsp, tour: &[usize], new: &[usize], delta: f64) -> Result<(), TestCaseError> {
    let expected = tsp.length(new) - tsp.length(tour);
    let tolerance = 1e-9 * tsp.length(tour).max(1.0);
    prop_assert!(is_permutation(new, tour.len()));
    prop_assert!(
        (expected - delta).abs() <= tolerance,
        "delta {} but lengths differ by {}",
        delta,
        expected
    );
    Ok(())
}

fn quick_solvers(seed: u64) -> Vec<SolverConfig> {
    vec![
        SolverConfig::NearestNeighbor { start: 0 },
        SolverConfig::HillClimbing(
            IhcConfig::default()
                .with_iterations(100)
                .with_restarts(2)
                .with_intensification(0.5)
                .with_seed(seed),
        ),
        SolverConfig::Annealing(
            SaConfig::default()
                .with_iterations(200)
                .with_reheating(20, 0.5)
                .with_seed(seed),
        ),
        SolverConfig::Tabu(
            TabuConfig::default()
                .with_iterations(30)
                .with_diversification(5, 0.3)
                .with_seed(seed),
        ),
        SolverConfig::Genetic(
            GaConfig::default()
                .with_population_size(10)
                .with_generations(5)
                .with_nn_start(true)
                .with_adaptive_mutation(true)
                .with_seed(seed),
        ),
        SolverConfig::AntColony(
            AcoConfig::default()
                .with_ants(4)
                .with_iterations(4)
                .with_local_search(10)
                .with_seed(seed),
        ),
        SolverConfig::AntColony(
            AcoConfig::default()
                .with_ants(4)
                .with_iterations(4)
                .with_variant(AcoVariant::MaxMin)
                .with_seed(seed),
        ),
    ]
}

proptest! {
    #[test]
    fn swap_delta_matches_full_evaluation(
        (tsp, tour) in instance_with_tour(2..12),
        a in 0..12usize,
        b in 0..12usize,
    ) {
        let n = tour.len();
        let (new, delta) = swap_delta_at(&tsp, &tour, a % n, b % n);
        assert_delta(&tsp, &tour, &new, delta)?;
    }

    #[test]
    fn insert_delta_matches_full_evaluation(
        (tsp, tour) in instance_with_tour(2..12),
        from in 0..12usize,
        to in 0..12usize,
    ) {
        let n = tour.len();
        let (new, delta) = insert_delta_at(&tsp, &tour, from % n, to % n);
        assert_delta(&tsp, &tour, &new, delta)?;
    }

    #[test]
    fn two_opt_delta_matches_full_evaluation(
        (tsp, tour) in instance_with_tour(3..12),
        a in 0..13usize,
        b in 0..13usize,
    ) {
        let n = tour.len();
        let (new, delta) = two_opt_delta_at(&tsp, &tour, a % (n + 1), b % (n + 1));
        assert_delta(&tsp, &tour, &new, delta)?;
    }

    #[test]
    fn crossovers_produce_permutations(
        (p1, p2) in parents(2..30),
        a in 0..30usize,
        b in 0..30usize,
    ) {
        let n = p1.len();
        let (a, b) = {
            let (x, y) = (a % n, b % n);
            if x == y { (x, x + 1) } else { (x.min(y), x.max(y)) }
        };
        prop_assert!(is_permutation(&order_crossover_at(&p1, &p2, a, b), n));
        prop_assert!(is_permutation(&pmx_crossover_at(&p1, &p2, a, b), n));
        prop_assert!(is_permutation(&cycle_crossover(&p1, &p2), n));
    }

    #[test]
    fn coordinate_distances_are_symmetric(points in coords(1..15)) {
        let tsp = Tsp::from_coords(&points).unwrap();
        for i in 0..tsp.n() {
            prop_assert_eq!(tsp.dist(i, i), 0.0);
            for j in 0..tsp.n() {
                prop_assert_eq!(tsp.dist(i, j), tsp.dist(j, i));
            }
        }
    }

    #[test]
    fn nearest_neighbor_is_deterministic(points in coords(1..15), start in 0..15usize) {
        let tsp = Tsp::from_coords(&points).unwrap();
        let start = start % tsp.n();
        let first = nearest_neighbor(&tsp, start).unwrap();
        let second = nearest_neighbor(&tsp, start).unwrap();
        prop_assert_eq!(first.tour[0], start);
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn every_solver_returns_a_permutation(points in coords(1..10), seed in any::<u64>()) {
        let tsp = Tsp::from_coords(&points).unwrap();
        for config in quick_solvers(seed) {
            let solution = solve(&tsp, &config).unwrap();
            prop_assert!(is_permutation(&solution.tour, tsp.n()), "{}", config);
            prop_assert!(
                (tsp.length(&solution.tour) - solution.length).abs() <= 1e-9 * solution.length.max(1.0),
                "{} reported {} for a tour of length {}",
                config,
                solution.length,
                tsp.length(&solution.tour)
            );
        }
    }
}
