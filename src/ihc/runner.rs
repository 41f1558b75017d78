//! IHC execution loop.

use rand::Rng;

use super::config::IhcConfig;
use crate::error::Result;
use crate::neighborhood::Neighborhood;
use crate::nn::initial_solution;
use crate::problem::{Solution, Tsp};
use crate::random::rng_from_option;

/// Result of an Iterated Hill Climbing run.
#[derive(Debug, Clone)]
pub struct IhcResult {
    /// Best tour across all restarts.
    pub best: Vec<usize>,

    /// Length of the best tour.
    pub best_length: f64,

    /// Total move attempts across all restarts.
    pub iterations: usize,

    /// Number of accepted (strictly improving) moves.
    pub improving_moves: usize,

    /// Number of intensification sweeps performed.
    pub intensifications: usize,

    /// Global best length after each restart.
    pub cost_history: Vec<f64>,
}

impl From<IhcResult> for Solution {
    fn from(result: IhcResult) -> Self {
        Solution {
            tour: result.best,
            length: result.best_length,
        }
    }
}

/// Executes Iterated Hill Climbing.
pub struct IhcRunner;

impl IhcRunner {
    /// Runs IHC with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    pub fn run(tsp: &Tsp, config: &IhcConfig) -> Result<IhcResult> {
        let mut rng = rng_from_option(config.seed);
        Self::run_with_rng(tsp, config, &mut rng)
    }

    /// Runs IHC drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(tsp: &Tsp, config: &IhcConfig, rng: &mut R) -> Result<IhcResult> {
        config.validate()?;

        let mut best: Option<Solution> = None;
        let mut iterations = 0usize;
        let mut improving_moves = 0usize;
        let mut intensifications = 0usize;
        let mut cost_history = Vec::with_capacity(config.restarts);

        for restart in 0..config.restarts {
            let start = initial_solution(tsp, config.use_nn_start && restart == 0, rng)?;

            let climb = hill_climb(
                tsp,
                start,
                config.neighborhood,
                config.iterations,
                config.no_improve_limit,
                rng,
            );
            iterations += climb.iterations;
            improving_moves += climb.improvements;
            let mut current = climb.solution;

            log::debug!(
                "ihc restart {restart}: {:.4} after {} attempts",
                current.length,
                climb.iterations
            );

            let previous = best.as_ref().map_or(f64::INFINITY, |b| b.length);
            if current.length < previous {
                let improvement = if previous.is_finite() && previous > 0.0 {
                    (previous - current.length) / previous
                } else {
                    1.0
                };

                if config
                    .intensification
                    .is_some_and(|threshold| improvement > threshold)
                {
                    current = intensify(tsp, current, config.iterations / 3, rng);
                    intensifications += 1;
                    log::debug!("ihc restart {restart}: intensified to {:.4}", current.length);
                }

                best = Some(current);
            }

            cost_history.push(best.as_ref().map_or(f64::INFINITY, |b| b.length));
        }

        // restarts >= 1 is validated, so at least one restart stored a best
        let best = best.unwrap_or_else(|| Solution::evaluate(tsp, (0..tsp.n()).collect()));

        log::info!(
            "ihc finished: best {:.4} over {} restarts, {} attempts",
            best.length,
            config.restarts,
            iterations
        );

        Ok(IhcResult {
            best: best.tour,
            best_length: best.length,
            iterations,
            improving_moves,
            intensifications,
            cost_history,
        })
    }
}

/// Outcome of one strict-improvement descent.
pub(crate) struct Climb {
    pub solution: Solution,
    pub iterations: usize,
    pub improvements: usize,
}

/// Draws up to `iterations` random delta-evaluated moves from `neighborhood`
/// and accepts only those with negative delta.
///
/// Stops early after `no_improve_limit` consecutive rejections. The
/// returned length is recomputed from the tour so that accumulated
/// rounding from the deltas never leaks out.
pub(crate) fn hill_climb<R: Rng>(
    tsp: &Tsp,
    start: Solution,
    neighborhood: Neighborhood,
    iterations: usize,
    no_improve_limit: Option<usize>,
    rng: &mut R,
) -> Climb {
    let Solution {
        mut tour,
        mut length,
    } = start;
    let mut no_improve = 0usize;
    let mut attempts = 0usize;
    let mut improvements = 0usize;

    for _ in 0..iterations {
        attempts += 1;
        let (candidate, delta) = neighborhood.apply_delta(tsp, &tour, rng);
        if delta < 0.0 {
            tour = candidate;
            length += delta;
            improvements += 1;
            no_improve = 0;
        } else {
            no_improve += 1;
        }

        if no_improve_limit.is_some_and(|limit| no_improve >= limit) {
            break;
        }
    }

    if improvements > 0 {
        length = tsp.length(&tour);
    }

    Climb {
        solution: Solution { tour, length },
        iterations: attempts,
        improvements,
    }
}

/// Polishes a solution with short descents in every neighborhood in turn.
fn intensify<R: Rng>(tsp: &Tsp, solution: Solution, burst: usize, rng: &mut R) -> Solution {
    let mut current = solution;
    for neighborhood in Neighborhood::ALL {
        current = hill_climb(tsp, current, neighborhood, burst, None, rng).solution;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::is_permutation;
    use crate::problem::tests::{circle, circle_optimum, square};
    use crate::random::{create_rng, random_tour};

    #[test]
    fn test_ihc_square_optimal() {
        let config = IhcConfig::default()
            .with_iterations(200)
            .with_restarts(3)
            .with_seed(42);
        let result = IhcRunner::run(&square(), &config).unwrap();
        assert!(is_permutation(&result.best, 4));
        assert!((result.best_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_ihc_circle_two_opt_near_optimal() {
        let tsp = circle(15);
        let config = IhcConfig::default()
            .with_iterations(3000)
            .with_restarts(5)
            .with_seed(42);
        let result = IhcRunner::run(&tsp, &config).unwrap();
        assert!(is_permutation(&result.best, 15));
        assert!(
            result.best_length < circle_optimum(15) * 1.1,
            "expected near-optimal tour, got {}",
            result.best_length
        );
    }

    #[test]
    fn test_ihc_reported_length_matches_tour() {
        let tsp = circle(20);
        for nb in Neighborhood::ALL {
            let config = IhcConfig::default()
                .with_iterations(500)
                .with_restarts(2)
                .with_neighborhood(nb)
                .with_seed(7);
            let result = IhcRunner::run(&tsp, &config).unwrap();
            assert!((tsp.length(&result.best) - result.best_length).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ihc_history_non_increasing() {
        let config = IhcConfig::default()
            .with_iterations(300)
            .with_restarts(10)
            .with_neighborhood(Neighborhood::Swap)
            .with_seed(42);
        let result = IhcRunner::run(&circle(18), &config).unwrap();
        assert_eq!(result.cost_history.len(), 10);
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0] + 1e-12);
        }
    }

    #[test]
    fn test_ihc_no_improve_limit_stops_restarts_early() {
        let config = IhcConfig::default()
            .with_iterations(10_000)
            .with_restarts(3)
            .with_no_improve_limit(50)
            .with_seed(42);
        let result = IhcRunner::run(&circle(10), &config).unwrap();
        assert!(result.iterations < 30_000);
    }

    #[test]
    fn test_ihc_nn_start_never_worse_than_nn() {
        let tsp = circle(30);
        let config = IhcConfig::default()
            .with_iterations(100)
            .with_restarts(1)
            .with_nn_start(true)
            .with_seed(42);
        let result = IhcRunner::run(&tsp, &config).unwrap();
        // every NN tour on a circle is optimal, and descent never worsens
        assert!((result.best_length - circle_optimum(30)).abs() < 1e-9);
    }

    #[test]
    fn test_ihc_intensification_runs_on_first_restart() {
        let config = IhcConfig::default()
            .with_iterations(300)
            .with_restarts(4)
            .with_intensification(0.01)
            .with_seed(42);
        let result = IhcRunner::run(&circle(16), &config).unwrap();
        assert!(result.intensifications >= 1);
        assert!(is_permutation(&result.best, 16));
    }

    #[test]
    fn test_ihc_seed_reproducible() {
        let config = IhcConfig::default()
            .with_iterations(400)
            .with_restarts(3)
            .with_seed(99);
        let a = IhcRunner::run(&circle(14), &config).unwrap();
        let b = IhcRunner::run(&circle(14), &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_length, b.best_length);
    }

    #[test]
    fn test_ihc_degenerate_instances() {
        let one = Tsp::from_coords(&[(0.0, 0.0)]).unwrap();
        let two = Tsp::from_coords(&[(0.0, 0.0), (2.0, 0.0)]).unwrap();
        let config = IhcConfig::default()
            .with_iterations(10)
            .with_restarts(2)
            .with_seed(1);

        let result = IhcRunner::run(&one, &config).unwrap();
        assert_eq!(result.best, vec![0]);
        assert_eq!(result.best_length, 0.0);

        let result = IhcRunner::run(&two, &config).unwrap();
        assert!(is_permutation(&result.best, 2));
        assert!((result.best_length - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_hill_climb_never_worsens() {
        let tsp = circle(12);
        let mut rng = create_rng(5);
        let tour = random_tour(12, &mut rng);
        let start = Solution::evaluate(&tsp, tour);
        let initial = start.length;
        let climb = hill_climb(&tsp, start, Neighborhood::Insert, 500, None, &mut rng);
        assert!(climb.solution.length <= initial + 1e-12);
        assert_eq!(climb.iterations, 500);
    }
}
