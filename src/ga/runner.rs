//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → selection → crossover → mutation → repeat.

use std::collections::HashSet;

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GaConfig;
use crate::error::Result;
use crate::nn::nearest_neighbor;
use crate::problem::{Solution, Tsp};
use crate::random::{random_tour, rng_from_option};

/// Number of nearest-neighbour tours seeded into the initial population.
const NN_SEEDS: usize = 5;

const LOW_DIVERSITY: f64 = 0.3;
const HIGH_DIVERSITY: f64 = 0.7;
const MAX_MUTATION_RATE: f64 = 0.5;
const MIN_MUTATION_RATE: f64 = 0.01;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour found during the entire run.
    pub best: Vec<usize>,

    /// Length of the best tour.
    pub best_length: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Mutation rate in effect at the end of the run.
    pub final_mutation_rate: f64,

    /// Best length for the initial population and after each generation.
    pub cost_history: Vec<f64>,

    /// Cheapest tour in the current population, initial population first.
    ///
    /// Unlike `cost_history` this can rise when `elitism` is zero.
    pub population_best_history: Vec<f64>,

    /// Edge diversity of the population at the start of each generation.
    pub diversity_history: Vec<f64>,
}

impl From<GaResult> for Solution {
    fn from(result: GaResult) -> Self {
        Solution {
            tour: result.best,
            length: result.best_length,
        }
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, GaRunner};
/// use u_tsp::problem::Tsp;
///
/// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let config = GaConfig::default().with_population_size(20).with_generations(30).with_seed(42);
/// let result = GaRunner::run(&tsp, &config).unwrap();
/// assert!((result.best_length - 4.0).abs() < 1e-9);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    pub fn run(tsp: &Tsp, config: &GaConfig) -> Result<GaResult> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(tsp, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(tsp: &Tsp, config: &GaConfig, rng: &mut R) -> Result<GaResult> {
        config.validate()?;

        // 1. Initialize population
        let mut population = initial_population(tsp, config, rng)?;

        // 2. Evaluate initial population
        let mut costs = evaluate_population(tsp, &population);

        // 3. Track best
        let (mut best, mut best_length) = (Vec::new(), f64::INFINITY);
        update_best(&population, &costs, &mut best, &mut best_length);

        let mut cost_history = Vec::with_capacity(config.generations + 1);
        cost_history.push(best_length);
        let mut population_best_history = Vec::with_capacity(config.generations + 1);
        population_best_history.push(population_best(&costs));
        let mut diversity_history = Vec::with_capacity(config.generations);
        let mut mutation_rate = config.mutation_rate;

        // 4. Evolutionary loop
        for generation in 0..config.generations {
            let diversity = population_diversity(&population);
            diversity_history.push(diversity);
            if config.adaptive_mutation {
                mutation_rate = adapt_mutation_rate(mutation_rate, diversity);
            }

            population = next_generation(&population, &costs, config, mutation_rate, rng);
            costs = evaluate_population(tsp, &population);
            update_best(&population, &costs, &mut best, &mut best_length);
            cost_history.push(best_length);
            population_best_history.push(population_best(&costs));

            log::debug!(
                "ga generation {}: best {best_length:.4}, diversity {diversity:.3}, p_mut {mutation_rate:.3}",
                generation + 1
            );
        }

        log::info!(
            "ga finished: best {best_length:.4} after {} generations",
            config.generations
        );

        Ok(GaResult {
            best,
            best_length,
            generations: config.generations,
            final_mutation_rate: mutation_rate,
            cost_history,
            population_best_history,
            diversity_history,
        })
    }
}

/// Nearest-neighbour seeds (when enabled) followed by random permutations.
fn initial_population<R: Rng>(
    tsp: &Tsp,
    config: &GaConfig,
    rng: &mut R,
) -> Result<Vec<Vec<usize>>> {
    let n = tsp.n();
    let mut population = Vec::with_capacity(config.population_size);

    if config.use_nn_start {
        let seeds = NN_SEEDS.min(n).min(config.population_size);
        for start in 0..seeds {
            population.push(nearest_neighbor(tsp, start)?.tour);
        }
    }
    while population.len() < config.population_size {
        population.push(random_tour(n, rng));
    }
    Ok(population)
}

/// Builds the next population: the `elitism` cheapest tours unchanged, in
/// cost order, then offspring bred by selection, crossover and mutation.
fn next_generation<R: Rng>(
    population: &[Vec<usize>],
    costs: &[f64],
    config: &GaConfig,
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
    let mut next_gen: Vec<Vec<usize>> = ranked
        .iter()
        .take(config.elitism)
        .map(|&i| population[i].clone())
        .collect();

    while next_gen.len() < config.population_size {
        let p1 = config.selection.select(costs, rng);
        let p2 = config.selection.select(costs, rng);

        let mut child = if rng.random::<f64>() < config.crossover_rate {
            config.crossover.apply(&population[p1], &population[p2], rng)
        } else {
            population[p1].clone()
        };

        if rng.random::<f64>() < mutation_rate {
            child = config.mutation.apply(&child, rng);
        }

        next_gen.push(child);
    }
    next_gen
}

fn population_best(costs: &[f64]) -> f64 {
    costs.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Evaluate all individuals in the population.
#[cfg(feature = "parallel")]
fn evaluate_population(tsp: &Tsp, population: &[Vec<usize>]) -> Vec<f64> {
    population.par_iter().map(|tour| tsp.length(tour)).collect()
}

/// Evaluate all individuals in the population.
#[cfg(not(feature = "parallel"))]
fn evaluate_population(tsp: &Tsp, population: &[Vec<usize>]) -> Vec<f64> {
    population.iter().map(|tour| tsp.length(tour)).collect()
}

/// Folds the population into the running best; earlier tours win ties.
fn update_best(
    population: &[Vec<usize>],
    costs: &[f64],
    best: &mut Vec<usize>,
    best_length: &mut f64,
) {
    for (tour, &cost) in population.iter().zip(costs) {
        if cost < *best_length {
            best.clone_from(tour);
            *best_length = cost;
        }
    }
}

/// Fraction of all `n(n−1)/2` undirected edges used by at least one tour.
///
/// Returns 0 for an empty population or fewer than two cities.
pub fn population_diversity(population: &[Vec<usize>]) -> f64 {
    let Some(n) = population.first().map(Vec::len) else {
        return 0.0;
    };
    let max_edges = n * n.saturating_sub(1) / 2;
    if max_edges == 0 {
        return 0.0;
    }

    let mut edges = HashSet::new();
    for tour in population {
        for i in 0..tour.len() {
            let (a, b) = (tour[i], tour[(i + 1) % tour.len()]);
            if a != b {
                edges.insert((a.min(b), a.max(b)));
            }
        }
    }
    edges.len() as f64 / max_edges as f64
}

/// Raises the rate when diversity is low, lowers it when diversity is high.
pub(crate) fn adapt_mutation_rate(rate: f64, diversity: f64) -> f64 {
    if diversity < LOW_DIVERSITY {
        (rate * 1.2).min(MAX_MUTATION_RATE)
    } else if diversity > HIGH_DIVERSITY {
        (rate * 0.8).max(MIN_MUTATION_RATE)
    } else {
        rate
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Crossover, Mutation, Selection};
    use crate::problem::is_permutation;
    use crate::problem::tests::{circle, circle_optimum, square};
    use crate::random::create_rng;

    #[test]
    fn test_ga_square_optimal() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(30)
            .with_seed(42);
        let result = GaRunner::run(&square(), &config).unwrap();
        assert!(is_permutation(&result.best, 4));
        assert!((result.best_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_ga_circle_converges() {
        let tsp = circle(12);
        let config = GaConfig::default()
            .with_population_size(60)
            .with_generations(300)
            .with_mutation(Mutation::Inversion)
            .with_mutation_rate(0.3)
            .with_seed(42);
        let result = GaRunner::run(&tsp, &config).unwrap();
        assert!(is_permutation(&result.best, 12));
        assert!(
            result.best_length < circle_optimum(12) * 1.3,
            "expected a good tour, got {}",
            result.best_length
        );
        assert!((tsp.length(&result.best) - result.best_length).abs() < 1e-9);
    }

    #[test]
    fn test_ga_elitism_history_non_increasing() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(50)
            .with_seed(42);
        let result = GaRunner::run(&circle(15), &config).unwrap();
        assert_eq!(result.cost_history.len(), 51);
        assert_eq!(result.diversity_history.len(), 50);
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_ga_population_best_non_increasing_with_elitism() {
        let tsp = circle(15);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(60)
            .with_elitism(1)
            .with_crossover_rate(1.0)
            .with_mutation_rate(1.0)
            .with_seed(42);
        let result = GaRunner::run(&tsp, &config).unwrap();
        assert_eq!(result.population_best_history.len(), 61);
        for window in result.population_best_history.windows(2) {
            assert!(window[1] <= window[0], "{} -> {}", window[0], window[1]);
        }
        assert_eq!(result.population_best_history.last(), Some(&result.best_length));
        assert_eq!(result.population_best_history[0], result.cost_history[0]);
    }

    #[test]
    fn test_next_generation_keeps_elites_unchanged() {
        let mut rng = create_rng(42);
        let population: Vec<Vec<usize>> = (0..6).map(|_| random_tour(8, &mut rng)).collect();
        let costs = [5.0, 1.0, 4.0, 2.0, 6.0, 3.0];
        let config = GaConfig::default()
            .with_population_size(6)
            .with_elitism(3)
            .with_crossover_rate(1.0)
            .with_mutation_rate(1.0);

        let next = next_generation(&population, &costs, &config, 1.0, &mut rng);
        assert_eq!(next.len(), 6);
        assert_eq!(next[0], population[1]);
        assert_eq!(next[1], population[3]);
        assert_eq!(next[2], population[5]);
        assert!(next.iter().all(|tour| is_permutation(tour, 8)));
    }

    #[test]
    fn test_next_generation_without_elitism_breeds_everyone() {
        let mut rng = create_rng(3);
        let population: Vec<Vec<usize>> = (0..4).map(|_| random_tour(5, &mut rng)).collect();
        let config = GaConfig::default().with_population_size(4).with_elitism(0);
        let next = next_generation(&population, &[1.0, 2.0, 3.0, 4.0], &config, 0.1, &mut rng);
        assert_eq!(next.len(), 4);
        assert!(next.iter().all(|tour| is_permutation(tour, 5)));
    }

    #[test]
    fn test_ga_all_operator_combinations() {
        let tsp = circle(10);
        for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Ranking] {
            for crossover in [Crossover::Ox, Crossover::Pmx, Crossover::Cx] {
                for mutation in [Mutation::Swap, Mutation::Insert, Mutation::Inversion] {
                    let config = GaConfig::default()
                        .with_population_size(20)
                        .with_generations(15)
                        .with_selection(selection)
                        .with_crossover(crossover)
                        .with_mutation(mutation)
                        .with_seed(7);
                    let result = GaRunner::run(&tsp, &config).unwrap();
                    assert!(
                        is_permutation(&result.best, 10),
                        "{selection}/{crossover}/{mutation}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_ga_nn_seed_starts_at_nn_quality() {
        let tsp = circle(20);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(0)
            .with_nn_start(true)
            .with_seed(42);
        let result = GaRunner::run(&tsp, &config).unwrap();
        // a nearest-neighbour tour on a circle is optimal
        assert!((result.best_length - circle_optimum(20)).abs() < 1e-9);
        assert_eq!(result.generations, 0);
        assert_eq!(result.cost_history.len(), 1);
    }

    #[test]
    fn test_ga_adaptive_mutation_moves_rate() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(100)
            .with_adaptive_mutation(true)
            .with_seed(42);
        let result = GaRunner::run(&circle(10), &config).unwrap();
        assert!((result.final_mutation_rate - 0.1).abs() > 1e-12);
        assert!(result.final_mutation_rate >= MIN_MUTATION_RATE);
        assert!(result.final_mutation_rate <= MAX_MUTATION_RATE);
    }

    #[test]
    fn test_ga_fixed_rate_without_adaptation() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(5)
            .with_seed(1);
        let result = GaRunner::run(&circle(8), &config).unwrap();
        assert_eq!(result.final_mutation_rate, 0.1);
    }

    #[test]
    fn test_ga_seed_reproducible() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(20)
            .with_seed(11);
        let a = GaRunner::run(&circle(12), &config).unwrap();
        let b = GaRunner::run(&circle(12), &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_ga_degenerate_instances() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_generations(3)
            .with_nn_start(true)
            .with_seed(1);
        let one = Tsp::from_coords(&[(0.0, 0.0)]).unwrap();
        let result = GaRunner::run(&one, &config).unwrap();
        assert_eq!(result.best, vec![0]);

        let two = Tsp::from_coords(&[(0.0, 0.0), (1.0, 0.0)]).unwrap();
        let result = GaRunner::run(&two, &config).unwrap();
        assert!((result.best_length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_population_diversity() {
        assert_eq!(population_diversity(&[]), 0.0);
        assert_eq!(population_diversity(&[vec![0]]), 0.0);
        // one 4-city tour uses 4 of 6 edges
        let one = vec![vec![0, 1, 2, 3]];
        assert!((population_diversity(&one) - 4.0 / 6.0).abs() < 1e-12);
        // the reversed tour has the same undirected edges
        let same = vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]];
        assert!((population_diversity(&same) - 4.0 / 6.0).abs() < 1e-12);
        let all = vec![vec![0, 1, 2, 3], vec![0, 2, 1, 3]];
        assert!((population_diversity(&all) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_adapt_mutation_rate() {
        assert!((adapt_mutation_rate(0.1, 0.1) - 0.12).abs() < 1e-12);
        assert!((adapt_mutation_rate(0.1, 0.9) - 0.08).abs() < 1e-12);
        assert_eq!(adapt_mutation_rate(0.1, 0.5), 0.1);
        assert_eq!(adapt_mutation_rate(0.45, 0.0), 0.5);
        assert_eq!(adapt_mutation_rate(0.011, 1.0), 0.01);
    }
}
