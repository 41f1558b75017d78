//! Parent selection strategies.
//!
//! All strategies work on the population's tour lengths and assume
//! **minimization** (shorter = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::seq::index::sample;
use rand::Rng;

use crate::error::TspError;

/// Tournament size used when a name is parsed without one.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Selection;
///
/// let sel: Selection = "ranking".parse().unwrap();
/// assert_eq!(sel, Selection::Ranking);
/// assert_eq!(Selection::from_name_or_default("tournament", 5), Selection::Tournament(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Sample `k` distinct individuals uniformly and keep the shortest.
    ///
    /// Higher `k` = stronger selection pressure. A `k` larger than the
    /// population is clamped to the population size.
    Tournament(usize),

    /// Fitness-proportionate selection with weight `max_cost − cost + 1`.
    ///
    /// The `+1` keeps the worst individual selectable.
    Roulette,

    /// Linear ranking: sorted worst to best, the individual at rank `r`
    /// (1-based) has weight `r`.
    Ranking,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(DEFAULT_TOURNAMENT_SIZE)
    }
}

impl Selection {
    /// Parses a strategy name, using `tournament_size` for tournaments and
    /// falling back to tournament selection on an unknown name.
    pub fn from_name_or_default(name: &str, tournament_size: usize) -> Self {
        match name.parse::<Selection>() {
            Ok(Selection::Tournament(_)) => Selection::Tournament(tournament_size),
            Ok(selection) => selection,
            Err(err) => {
                log::warn!("{err}; falling back to tournament selection");
                Selection::Tournament(tournament_size)
            }
        }
    }

    /// Selects a parent index given the population's costs.
    ///
    /// `costs` must not be empty.
    pub fn select<R: Rng>(&self, costs: &[f64], rng: &mut R) -> usize {
        debug_assert!(!costs.is_empty(), "cannot select from empty population");
        if costs.len() <= 1 {
            return 0;
        }
        match *self {
            Selection::Tournament(k) => tournament(costs, k, rng),
            Selection::Roulette => roulette(costs, rng),
            Selection::Ranking => ranking(costs, rng),
        }
    }

    /// Lowercase label without the tournament size.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Tournament(_) => "tournament",
            Selection::Roulette => "roulette",
            Selection::Ranking => "ranking",
        }
    }
}

impl FromStr for Selection {
    type Err = TspError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tournament" => Ok(Selection::default()),
            "roulette" => Ok(Selection::Roulette),
            "ranking" | "rank" => Ok(Selection::Ranking),
            _ => Err(TspError::UnknownOption {
                kind: "selection",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Tournament(k) => write!(f, "tournament({k})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Tournament without replacement; the first sampled index wins ties.
fn tournament<R: Rng>(costs: &[f64], k: usize, rng: &mut R) -> usize {
    let n = costs.len();
    let k = k.clamp(1, n);

    let mut best = usize::MAX;
    for idx in sample(rng, n, k).iter() {
        if best == usize::MAX || costs[idx] < costs[best] {
            best = idx;
        }
    }
    best
}

fn roulette<R: Rng>(costs: &[f64], rng: &mut R) -> usize {
    let max_cost = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = costs.iter().map(|&c| max_cost - c + 1.0).collect();
    spin(&weights, rng)
}

fn ranking<R: Rng>(costs: &[f64], rng: &mut R) -> usize {
    let n = costs.len();

    // worst first, so position p has rank p + 1
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| costs[b].total_cmp(&costs[a]));

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (pos, &idx) in order.iter().enumerate() {
        cumulative += (pos + 1) as f64;
        if cumulative > threshold {
            return idx;
        }
    }
    order[n - 1] // floating-point fallback
}

/// Roulette-wheel draw over non-negative weights.
fn spin<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..weights.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    weights.len() - 1 // floating-point fallback
}
