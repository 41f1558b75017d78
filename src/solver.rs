//! Uniform entry point over every algorithm.
//!
//! [`SolverConfig`] names one algorithm together with its configuration;
//! [`solve`] runs it and reduces the algorithm-specific result to a
//! [`Solution`]. Callers that compare algorithms (benchmarks, experiment
//! drivers) can hold a list of `SolverConfig` values instead of matching on
//! runner types themselves.

use std::fmt;

use rand::Rng;

use crate::aco::{AcoConfig, AcoRunner};
use crate::error::Result;
use crate::ga::{GaConfig, GaRunner};
use crate::ihc::{IhcConfig, IhcRunner};
use crate::nn::nearest_neighbor;
use crate::problem::{Solution, Tsp};
use crate::sa::{SaConfig, SaRunner};
use crate::tabu::{TabuConfig, TabuRunner};

/// An algorithm and its configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "algorithm"))]
pub enum SolverConfig {
    /// Deterministic nearest-neighbour construction from `start`.
    NearestNeighbor { start: usize },
    /// Iterative hill climbing with random restarts.
    HillClimbing(IhcConfig),
    /// Simulated annealing.
    Annealing(SaConfig),
    /// Tabu search.
    Tabu(TabuConfig),
    /// Genetic algorithm.
    Genetic(GaConfig),
    /// Ant colony optimization, Ant System or MAX-MIN.
    AntColony(AcoConfig),
}

impl SolverConfig {
    /// Short algorithm label, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SolverConfig::NearestNeighbor { .. } => "nn",
            SolverConfig::HillClimbing(_) => "ihc",
            SolverConfig::Annealing(_) => "sa",
            SolverConfig::Tabu(_) => "tabu",
            SolverConfig::Genetic(_) => "ga",
            SolverConfig::AntColony(_) => "aco",
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::NearestNeighbor { start: 0 }
    }
}

impl fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the configured algorithm, seeding from the config's own `seed`.
///
/// # Errors
///
/// Whatever the selected runner returns: configuration validation errors,
/// or an out-of-range start city for nearest neighbour.
///
/// # Examples
///
/// ```
/// use u_tsp::problem::Tsp;
/// use u_tsp::solver::{solve, SolverConfig};
/// use u_tsp::tabu::TabuConfig;
///
/// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let config = SolverConfig::Tabu(TabuConfig::default().with_iterations(50).with_seed(1));
/// let solution = solve(&tsp, &config).unwrap();
/// assert!((solution.length - 4.0).abs() < 1e-9);
/// ```
pub fn solve(tsp: &Tsp, config: &SolverConfig) -> Result<Solution> {
    let solution = match config {
        SolverConfig::NearestNeighbor { start } => nearest_neighbor(tsp, *start)?,
        SolverConfig::HillClimbing(c) => IhcRunner::run(tsp, c)?.into(),
        SolverConfig::Annealing(c) => SaRunner::run(tsp, c)?.into(),
        SolverConfig::Tabu(c) => TabuRunner::run(tsp, c)?.into(),
        SolverConfig::Genetic(c) => GaRunner::run(tsp, c)?.into(),
        SolverConfig::AntColony(c) => AcoRunner::run(tsp, c)?.into(),
    };
    debug_assert!(tsp.check_tour(&solution.tour).is_ok());
    Ok(solution)
}

/// Runs the configured algorithm drawing all randomness from `rng`.
///
/// The config's `seed` field is ignored.
pub fn solve_with_rng<R: Rng>(tsp: &Tsp, config: &SolverConfig, rng: &mut R) -> Result<Solution> {
    Ok(match config {
        SolverConfig::NearestNeighbor { start } => nearest_neighbor(tsp, *start)?,
        SolverConfig::HillClimbing(c) => IhcRunner::run_with_rng(tsp, c, rng)?.into(),
        SolverConfig::Annealing(c) => SaRunner::run_with_rng(tsp, c, rng)?.into(),
        SolverConfig::Tabu(c) => TabuRunner::run_with_rng(tsp, c, rng)?.into(),
        SolverConfig::Genetic(c) => GaRunner::run_with_rng(tsp, c, rng)?.into(),
        SolverConfig::AntColony(c) => AcoRunner::run_with_rng(tsp, c, rng)?.into(),
    })
}
