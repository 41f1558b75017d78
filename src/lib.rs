//! Heuristic solvers for the symmetric Travelling Salesman Problem.
//!
//! Every algorithm consumes a read-only [`Tsp`] distance model and returns a
//! closed tour (a permutation of `0..n`) together with its length:
//!
//! - **Nearest Neighbour (NN)**: deterministic greedy construction, also
//!   used to seed the other algorithms.
//! - **Iterated Hill Climbing (IHC)**: restarted first-improvement descent
//!   with optional exhaustive intensification sweeps.
//! - **Simulated Annealing (SA)**: Metropolis acceptance under geometric,
//!   linear, or logarithmic cooling, with optional reheating.
//! - **Tabu Search (TS)**: sampled best-admissible moves with a FIFO tabu
//!   list, aspiration, and optional diversification kicks.
//! - **Genetic Algorithm (GA)**: tournament/roulette/ranking selection,
//!   OX/PMX/CX crossover, swap/insert/inversion mutation, elitism, and
//!   diversity-driven adaptive mutation.
//! - **Ant Colony Optimization (ACO)**: Ant System with an elitist bonus,
//!   MAX-MIN Ant System, and a 2-opt local-search hybrid.
//!
//! All randomness flows through an explicit, seedable [`rand::Rng`], so
//! runs are reproducible. [`solver::solve`] dispatches over all algorithms,
//! [`loader`] reads instance files, and [`summary`] aggregates repeated
//! runs.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configurations and solutions.
//! - `parallel`: evaluates GA populations with rayon.

pub mod aco;
pub mod error;
pub mod ga;
pub mod ihc;
pub mod loader;
pub mod neighborhood;
pub mod nn;
pub mod problem;
pub mod random;
pub mod sa;
pub mod solver;
pub mod summary;
pub mod tabu;

pub use error::{Result, TspError};
pub use problem::{Solution, Tsp};
