//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that keeps a bounded memory
//! of recently visited tours (the tabu list) and refuses to return to them,
//! preventing cycling. Each iteration samples a candidate set of random
//! moves and takes the best admissible one, even if it is worse than the
//! current tour. The aspiration criterion lets a tabu tour through when it
//! would be a new global best; the diversification variant kicks a stalled
//! search with a strong random perturbation.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod list;
mod runner;

pub use config::{Diversification, TabuConfig};
pub use list::TabuList;
pub use runner::{TabuResult, TabuRunner};
