//! Genetic Algorithm (GA) over permutation-encoded tours.
//!
//! Each generation evaluates every tour, carries the `elitism` shortest
//! tours over unchanged, and fills the rest of the next population with
//! offspring: two parents are chosen by a [`Selection`] strategy, combined
//! by a [`Crossover`] operator with probability `crossover_rate` (otherwise
//! the first parent is cloned) and mutated by a [`Mutation`] operator with
//! probability `mutation_rate`.
//!
//! With adaptive mutation enabled, the mutation rate is raised when the
//! population's edge diversity drops below 0.3 and lowered when it exceeds
//! 0.7 (see [`population_diversity`]).
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, operators, rates)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour plus per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: OX, PMX and CX crossover; swap, insert and inversion mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use operators::{Crossover, Mutation};
pub use runner::{population_diversity, GaResult, GaRunner};
pub use selection::{Selection, DEFAULT_TOURNAMENT_SIZE};
