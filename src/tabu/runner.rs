//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Generate the initial tour (random, or nearest-neighbour)
//! 2. At each iteration:
//!    a. Sample `candidates_per_iter` random neighbours and evaluate them
//!    b. Keep the cheapest one that is not tabu (or is tabu but beats the
//!       global best, when aspiration is on)
//!    c. Move to it and push it onto the tabu list
//!    d. Update the global best
//! 3. On stagnation, optionally kick the current tour and clear the memory
//! 4. Terminate after the iteration cap or the no-improvement cutoff

use rand::Rng;

use super::config::{Diversification, TabuConfig};
use super::list::TabuList;
use crate::error::Result;
use crate::nn::initial_solution;
use crate::problem::{Solution, Tsp};
use crate::random::{distinct_pair, rng_from_option};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best tour found.
    pub best: Vec<usize>,

    /// Length of the best tour.
    pub best_length: f64,

    /// Total iterations executed.
    pub iterations: usize,

    /// Iteration at which the best tour was found.
    pub best_iteration: usize,

    /// Iterations in which every candidate was inadmissible.
    pub idle_iterations: usize,

    /// Number of diversification kicks performed.
    pub diversifications: usize,

    /// Best length at the end of each iteration.
    pub cost_history: Vec<f64>,
}

impl From<TabuResult> for Solution {
    fn from(result: TabuResult) -> Self {
        Solution {
            tour: result.best,
            length: result.best_length,
        }
    }
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs Tabu Search with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::problem::Tsp;
    /// use u_tsp::tabu::{TabuConfig, TabuRunner};
    ///
    /// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
    /// let config = TabuConfig::default().with_iterations(50).with_seed(1);
    /// let result = TabuRunner::run(&tsp, &config).unwrap();
    /// assert!((result.best_length - 4.0).abs() < 1e-9);
    /// ```
    pub fn run(tsp: &Tsp, config: &TabuConfig) -> Result<TabuResult> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(tsp, config, &mut rng)
    }

    /// Runs Tabu Search drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(
        tsp: &Tsp,
        config: &TabuConfig,
        rng: &mut R,
    ) -> Result<TabuResult> {
        config.validate()?;

        let Solution {
            tour: mut current,
            length: mut current_length,
        } = initial_solution(tsp, config.use_nn_start, rng)?;
        let mut best = current.clone();
        let mut best_length = current_length;
        let mut best_iteration = 0usize;

        let mut tabu = TabuList::new(config.tabu_size);
        let mut cost_history = Vec::with_capacity(config.iterations);
        let mut no_improve = 0usize;
        let mut idle_iterations = 0usize;
        let mut diversifications = 0usize;

        for iteration in 0..config.iterations {
            // Find best admissible candidate
            let mut chosen: Option<(Vec<usize>, f64)> = None;
            for _ in 0..config.candidates_per_iter {
                let candidate = config.neighborhood.apply(&current, rng);
                let candidate_length = tsp.length(&candidate);

                let best_so_far = chosen.as_ref().map_or(f64::INFINITY, |c| c.1);
                if candidate_length >= best_so_far {
                    continue;
                }
                let admissible = !tabu.contains(&candidate)
                    || (config.aspiration && candidate_length < best_length);
                if admissible {
                    chosen = Some((candidate, candidate_length));
                }
            }

            match chosen {
                Some((tour, length)) => {
                    current = tour;
                    current_length = length;
                    tabu.push(current.clone());

                    if current_length < best_length {
                        best.clone_from(&current);
                        best_length = current_length;
                        best_iteration = iteration;
                        no_improve = 0;
                    } else {
                        no_improve += 1;
                    }
                }
                None => {
                    idle_iterations += 1;
                    no_improve += 1;
                }
            }

            cost_history.push(best_length);

            if let Some(div) = config.diversification {
                if no_improve >= div.threshold {
                    kick(&mut current, div, rng);
                    current_length = tsp.length(&current);
                    tabu.clear();
                    no_improve = 0;
                    diversifications += 1;
                    log::debug!(
                        "tabu diversification #{diversifications} at iteration {iteration}: current {current_length:.4}, best {best_length:.4}"
                    );
                }
            }

            // Stagnation check
            if config
                .no_improve_limit
                .is_some_and(|limit| no_improve >= limit)
            {
                log::debug!("tabu stopped after {} stagnant iterations", no_improve);
                break;
            }
        }

        log::info!(
            "tabu finished: best {best_length:.4} at iteration {best_iteration} of {}, {}/{} tabu entries",
            cost_history.len(),
            tabu.len(),
            tabu.capacity()
        );

        Ok(TabuResult {
            best,
            best_length,
            iterations: cost_history.len(),
            best_iteration,
            idle_iterations,
            diversifications,
            cost_history,
        })
    }
}

/// Applies `max(1, floor(n * strength))` random pairwise swaps in place.
fn kick<R: Rng>(tour: &mut [usize], div: Diversification, rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let swaps = ((n as f64 * div.strength) as usize).max(1);
    for _ in 0..swaps {
        let (a, b) = distinct_pair(n, rng);
        tour.swap(a, b);
    }
}
