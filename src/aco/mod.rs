//! Ant Colony Optimization (ACO).
//!
//! A colony of artificial ants builds tours city by city, choosing the next
//! city with probability proportional to `τ(i,j)^α · η(i,j)^β`, where `τ`
//! is the learned pheromone trail and `η = 1/d` the greedy heuristic.
//! After every iteration the trails evaporate and good tours reinforce
//! their edges.
//!
//! # Variants
//!
//! - [`AcoVariant::AntSystem`]: every ant deposits `Q/L`; evaporation is
//!   floored at `1e-4`; an optional elitist bonus reinforces the global best.
//! - [`AcoVariant::MaxMin`]: only one ant deposits per iteration (the global
//!   best with probability growing over the run, otherwise the iteration
//!   best) and trails are clamped to `[τ_min, τ_max]` derived from a
//!   nearest-neighbour tour.
//!
//! Either variant can run a bounded 2-opt descent on every constructed tour
//! before the pheromone update (`local_search_iters`).
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41
//! - Stützle & Hoos (2000), "MAX-MIN Ant System", *Future Generation
//!   Computer Systems* 16(8), 889-914

mod colony;
mod config;
mod runner;

pub use colony::PheromoneMatrix;
pub use config::{AcoConfig, AcoVariant};
pub use runner::{AcoResult, AcoRunner};
