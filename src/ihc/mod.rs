//! Iterated Hill Climbing (IHC).
//!
//! Multistart strict-improvement local search: each restart descends from
//! a fresh tour by accepting only random moves with negative delta, and
//! the best restart wins. The optional intensification pass re-polishes a
//! markedly better incumbent with all three neighborhoods in turn.
//!
//! # References
//!
//! - Lourenço, Martin & Stützle (2003), "Iterated Local Search"

mod config;
mod runner;

pub use config::IhcConfig;
pub(crate) use runner::hill_climb;
pub use runner::{IhcResult, IhcRunner};
