//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening tours are accepted with probability
//! `exp(-Δ/T)`, which shrinks as the temperature cools, so the search can
//! climb out of local minima early and settles down late. The optional
//! reheating variant restores heat and returns to the incumbent when the
//! search stalls.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Hajek (1988), "Cooling Schedules for Optimal Annealing"

mod config;
mod runner;

pub use config::{CoolingSchedule, Reheating, SaConfig};
pub use runner::{SaResult, SaRunner};
