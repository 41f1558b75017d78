//! SA execution loop.

use rand::Rng;

use super::config::SaConfig;
use crate::error::Result;
use crate::nn::initial_solution;
use crate::problem::{Solution, Tsp};
use crate::random::rng_from_option;

/// Temperatures below this count as frozen and end the run.
const FROZEN_TEMPERATURE: f64 = 1e-10;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best tour found.
    pub best: Vec<usize>,

    /// Length of the best tour.
    pub best_length: f64,

    /// Total number of moves evaluated.
    pub iterations: usize,

    /// Number of temperature levels completed.
    pub levels: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of reheats performed.
    pub reheats: usize,

    /// Best length before the first level and after every level.
    pub cost_history: Vec<f64>,
}

impl From<SaResult> for Solution {
    fn from(result: SaResult) -> Self {
        Solution {
            tour: result.best,
            length: result.best_length,
        }
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    pub fn run(tsp: &Tsp, config: &SaConfig) -> Result<SaResult> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(tsp, config, &mut rng)
    }

    /// Runs SA drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(tsp: &Tsp, config: &SaConfig, rng: &mut R) -> Result<SaResult> {
        config.validate()?;

        let Solution {
            tour: mut current,
            length: mut current_length,
        } = initial_solution(tsp, config.use_nn_start, rng)?;
        let mut best = current.clone();
        let mut best_length = current_length;

        let initial_temperature = config.initial_temperature;
        let mut temperature = initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut reheats = 0usize;
        let mut no_improve = 0usize;
        let mut levels = 0usize;

        let mut cost_history = Vec::with_capacity(config.iterations + 1);
        cost_history.push(best_length);

        for level in 0..config.iterations {
            let mut reheated = false;

            for _ in 0..config.iterations_per_temperature {
                let neighbor = config.neighborhood.apply(&current, rng);
                let neighbor_length = tsp.length(&neighbor);
                let diff = neighbor_length - current_length;

                // Metropolis acceptance criterion
                let accept = if diff < 0.0 {
                    improving_moves += 1;
                    true
                } else if temperature > 0.0 {
                    rng.random::<f64>() < (-diff / temperature).exp()
                } else {
                    false
                };

                let mut new_best = false;
                if accept {
                    current = neighbor;
                    current_length = neighbor_length;
                    accepted_moves += 1;

                    if current_length < best_length {
                        best = current.clone();
                        best_length = current_length;
                        new_best = true;
                    }
                }
                total_iterations += 1;

                if let Some(reheat) = config.reheating {
                    if new_best {
                        no_improve = 0;
                    } else {
                        no_improve += 1;
                    }
                    if no_improve >= reheat.threshold {
                        temperature = initial_temperature * reheat.factor;
                        no_improve = 0;
                        current.clone_from(&best);
                        current_length = best_length;
                        reheats += 1;
                        reheated = true;
                        log::debug!(
                            "sa reheat #{reheats} at level {level}: T = {temperature:.4}, best {best_length:.4}"
                        );
                    }
                }
            }

            levels += 1;
            cost_history.push(best_length);

            // a reheat replaces this level's cooling step
            if !reheated {
                temperature = config.cooling.next_temperature(
                    temperature,
                    initial_temperature,
                    level,
                    config.iterations,
                );
            }

            if temperature < FROZEN_TEMPERATURE {
                break;
            }
        }

        log::info!(
            "sa finished: best {best_length:.4} after {total_iterations} moves, {levels} levels, T = {temperature:.3e}"
        );

        Ok(SaResult {
            best,
            best_length,
            iterations: total_iterations,
            levels,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            reheats,
            cost_history,
        })
    }
}
