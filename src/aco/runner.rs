//! ACO execution loop.

use rand::Rng;

use super::colony::{
    choice_weights, construct_tour, heuristic_matrix, update_trails, PheromoneMatrix,
};
use super::config::{AcoConfig, AcoVariant};
use crate::error::Result;
use crate::ihc::hill_climb;
use crate::neighborhood::Neighborhood;
use crate::nn::nearest_neighbor;
use crate::problem::{Solution, Tsp};
use crate::random::rng_from_option;

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Best tour found by any ant.
    pub best: Vec<usize>,

    /// Length of the best tour.
    pub best_length: f64,

    /// Iterations executed.
    pub iterations: usize,

    /// Tours constructed over the whole run.
    pub tours_constructed: usize,

    /// Trail bounds `(τ_min, τ_max)` for the MAX-MIN variant.
    pub pheromone_bounds: Option<(f64, f64)>,

    /// Best length after each iteration.
    pub cost_history: Vec<f64>,
}

impl From<AcoResult> for Solution {
    fn from(result: AcoResult) -> Self {
        Solution {
            tour: result.best,
            length: result.best_length,
        }
    }
}

/// Executes Ant Colony Optimization.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs ACO with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::aco::{AcoConfig, AcoRunner};
    /// use u_tsp::problem::Tsp;
    ///
    /// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
    /// let result = AcoRunner::run(&tsp, &AcoConfig::default().with_iterations(10).with_seed(3)).unwrap();
    /// assert!((result.best_length - 4.0).abs() < 1e-9);
    /// ```
    pub fn run(tsp: &Tsp, config: &AcoConfig) -> Result<AcoResult> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(tsp, config, &mut rng)
    }

    /// Runs ACO drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(tsp: &Tsp, config: &AcoConfig, rng: &mut R) -> Result<AcoResult> {
        config.validate()?;
        let n = tsp.n();
        let heuristic = heuristic_matrix(tsp);

        let bounds = match config.variant {
            AcoVariant::AntSystem => None,
            AcoVariant::MaxMin => {
                let nn_length = nearest_neighbor(tsp, 0)?.length;
                let tau_max = if nn_length > 0.0 {
                    1.0 / (config.rho * nn_length)
                } else {
                    1.0
                };
                let tau_min = tau_max / (2 * n) as f64;
                log::debug!("mmas trail bounds [{tau_min:.3e}, {tau_max:.3e}] from nn {nn_length:.4}");
                Some((tau_min, tau_max))
            }
        };
        let mut pheromone = PheromoneMatrix::new(
            n,
            bounds.map_or(config.initial_pheromone, |(_, max)| max),
        );

        let mut best = Solution {
            tour: Vec::new(),
            length: f64::INFINITY,
        };
        let mut cost_history = Vec::with_capacity(config.iterations);
        let mut tours_constructed = 0usize;

        for iteration in 0..config.iterations {
            let weights = choice_weights(&pheromone, &heuristic, config.alpha, config.beta);

            // 1. Every ant builds (and optionally polishes) a tour
            let mut ants: Vec<Solution> = Vec::with_capacity(config.ants);
            for _ in 0..config.ants {
                let tour = construct_tour(n, &weights, rng);
                let mut solution = Solution::evaluate(tsp, tour);
                if config.local_search_iters > 0 {
                    solution = hill_climb(
                        tsp,
                        solution,
                        Neighborhood::TwoOpt,
                        config.local_search_iters,
                        None,
                        rng,
                    )
                    .solution;
                }
                if solution.length < best.length {
                    best = solution.clone();
                }
                ants.push(solution);
            }
            tours_constructed += ants.len();

            // 2. Evaporate and reinforce
            let global_probability = iteration as f64 / config.iterations as f64;
            update_trails(&mut pheromone, &ants, &best, config, bounds, global_probability, rng);

            cost_history.push(best.length);
            log::debug!("aco iteration {}: best {:.4}", iteration + 1, best.length);
        }

        // zero iterations: fall back to the identity tour
        if best.tour.is_empty() {
            best = Solution::evaluate(tsp, (0..n).collect());
        }

        let (trail_min, trail_max) = pheromone.bounds();
        log::debug!("aco final trail range [{trail_min:.3e}, {trail_max:.3e}]");
        log::info!(
            "aco ({}) finished: best {:.4} after {} iterations, {} tours",
            config.variant,
            best.length,
            config.iterations,
            tours_constructed
        );

        Ok(AcoResult {
            best: best.tour,
            best_length: best.length,
            iterations: config.iterations,
            tours_constructed,
            pheromone_bounds: bounds,
            cost_history,
        })
    }
}
