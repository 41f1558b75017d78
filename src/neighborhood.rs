//! Tour neighborhoods: swap, insert, and 2-opt moves.
//!
//! Every move produces a new tour and leaves its input untouched. Each
//! family comes in two evaluation forms:
//!
//! - **full**: return only the new tour; the caller re-evaluates it.
//! - **delta**: return the new tour plus the exact signed cost change,
//!   computed from the handful of edges the move alters.
//!
//! The random forms ([`swap`], [`swap_delta`], ...) draw positions and
//! delegate to the positional forms ([`swap_at`], [`swap_delta_at`], ...).
//!
//! # Delta invariant
//!
//! `tsp.length(&new) - tsp.length(tour) == delta` up to rounding. Swap and
//! insert deltas are exact for any matrix; the 2-opt delta assumes a
//! symmetric matrix because reversal flips the interior edges.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::TspError;
use crate::problem::Tsp;
use crate::random::distinct_pair;

/// Move family used by the trajectory searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Neighborhood {
    /// Exchange the cities at two positions.
    Swap,
    /// Remove a city and reinsert it elsewhere.
    Insert,
    /// Reverse a contiguous segment.
    #[default]
    TwoOpt,
}

impl Neighborhood {
    /// All move families, in the order intensification sweeps them.
    pub const ALL: [Neighborhood; 3] = [
        Neighborhood::Swap,
        Neighborhood::Insert,
        Neighborhood::TwoOpt,
    ];

    /// Parses a name, falling back to [`Neighborhood::TwoOpt`] on an
    /// unknown one.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to two_opt");
            Self::default()
        })
    }

    /// Applies one random move (full evaluation).
    pub fn apply<R: Rng>(self, tour: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Neighborhood::Swap => swap(tour, rng),
            Neighborhood::Insert => insert(tour, rng),
            Neighborhood::TwoOpt => two_opt(tour, rng),
        }
    }

    /// Applies one random move and returns the cost change with it.
    pub fn apply_delta<R: Rng>(self, tsp: &Tsp, tour: &[usize], rng: &mut R) -> (Vec<usize>, f64) {
        match self {
            Neighborhood::Swap => swap_delta(tsp, tour, rng),
            Neighborhood::Insert => insert_delta(tsp, tour, rng),
            Neighborhood::TwoOpt => two_opt_delta(tsp, tour, rng),
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::Swap => "swap",
            Neighborhood::Insert => "insert",
            Neighborhood::TwoOpt => "two_opt",
        }
    }
}

impl FromStr for Neighborhood {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swap" => Ok(Neighborhood::Swap),
            "insert" => Ok(Neighborhood::Insert),
            "two_opt" | "two-opt" | "2opt" | "2-opt" => Ok(Neighborhood::TwoOpt),
            _ => Err(TspError::UnknownOption {
                kind: "neighborhood",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Positional moves
// ============================================================================

/// Exchanges the cities at positions `a` and `b`.
pub fn swap_at(tour: &[usize], a: usize, b: usize) -> Vec<usize> {
    let mut new = tour.to_vec();
    new.swap(a, b);
    new
}

/// Removes the city at `from` and reinserts it so it ends up at `to`.
///
/// Both indices must be `< n`.
pub fn insert_at(tour: &[usize], from: usize, to: usize) -> Vec<usize> {
    let mut new = tour.to_vec();
    let city = new.remove(from);
    new.insert(to, city);
    new
}

/// Reverses the half-open segment `[a, b)`; argument order is irrelevant.
///
/// Positions must satisfy `max(a, b) <= n`.
pub fn two_opt_at(tour: &[usize], a: usize, b: usize) -> Vec<usize> {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let mut new = tour.to_vec();
    new[a..b].reverse();
    new
}

/// [`swap_at`] with delta evaluation.
///
/// Sums the (deduplicated) edges leaving positions `a-1, a, b-1, b`
/// before and after the exchange, which covers adjacent positions and the
/// wrap-around pair `(0, n-1)` without special cases.
pub fn swap_delta_at(tsp: &Tsp, tour: &[usize], a: usize, b: usize) -> (Vec<usize>, f64) {
    let n = tour.len();
    if a == b || n < 2 {
        return (tour.to_vec(), 0.0);
    }

    let mut edges = [(a + n - 1) % n, a, (b + n - 1) % n, b];
    edges.sort_unstable();

    let new = swap_at(tour, a, b);
    let mut delta = 0.0;
    for (k, &e) in edges.iter().enumerate() {
        if k > 0 && edges[k - 1] == e {
            continue;
        }
        delta += tsp.edge(&new, e) - tsp.edge(tour, e);
    }
    (new, delta)
}

/// [`insert_at`] with delta evaluation in O(1) distance lookups.
///
/// Removing city `c` from between `p` and `q` saves `d(p,c) + d(c,q) - d(p,q)`;
/// placing it between its new neighbours `u` and `v` costs
/// `d(u,c) + d(c,v) - d(u,v)`. The O(n) part is only the copy.
pub fn insert_delta_at(tsp: &Tsp, tour: &[usize], from: usize, to: usize) -> (Vec<usize>, f64) {
    let n = tour.len();
    if from == to || n < 2 {
        return (tour.to_vec(), 0.0);
    }

    let c = tour[from];
    let p = tour[(from + n - 1) % n];
    let q = tour[(from + 1) % n];
    let removed = tsp.dist(p, c) + tsp.dist(c, q) - tsp.dist(p, q);

    let new = insert_at(tour, from, to);
    let u = new[(to + n - 1) % n];
    let v = new[(to + 1) % n];
    let added = tsp.dist(u, c) + tsp.dist(c, v) - tsp.dist(u, v);

    (new, added - removed)
}

/// [`two_opt_at`] with delta evaluation.
///
/// Segments shorter than two cities are a no-op with zero delta; so is
/// reversing the whole tour. Otherwise edges `(A,B)` and `(C,D)` around
/// the segment are replaced by `(A,C)` and `(B,D)`.
pub fn two_opt_delta_at(tsp: &Tsp, tour: &[usize], a: usize, b: usize) -> (Vec<usize>, f64) {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let n = tour.len();
    if b - a < 2 {
        return (tour.to_vec(), 0.0);
    }
    if b - a >= n {
        return (two_opt_at(tour, a, b), 0.0);
    }

    let city_a = tour[(a + n - 1) % n];
    let city_b = tour[a];
    let city_c = tour[b - 1];
    let city_d = tour[b % n];

    let before = tsp.dist(city_a, city_b) + tsp.dist(city_c, city_d);
    let after = tsp.dist(city_a, city_c) + tsp.dist(city_b, city_d);

    (two_opt_at(tour, a, b), after - before)
}

// ============================================================================
// Random moves
// ============================================================================

/// Random swap of two distinct positions.
pub fn swap<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    if tour.len() < 2 {
        return tour.to_vec();
    }
    let (a, b) = distinct_pair(tour.len(), rng);
    swap_at(tour, a, b)
}

/// Random insert: take the city at one position, reinsert at another.
pub fn insert<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    if tour.len() < 2 {
        return tour.to_vec();
    }
    let (from, to) = distinct_pair(tour.len(), rng);
    insert_at(tour, from, to)
}

/// Random 2-opt reversal.
///
/// A segment shorter than two cities is widened to `[a, min(a+2, n))`, so
/// the full form always reverses at least two cities when `n >= 3`.
pub fn two_opt<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let n = tour.len();
    if n < 3 {
        return tour.to_vec();
    }
    let (a, b) = sorted_pair(n, rng);
    let b = if b - a < 2 { (a + 2).min(n) } else { b };
    two_opt_at(tour, a, b)
}

/// Random swap with delta evaluation.
pub fn swap_delta<R: Rng>(tsp: &Tsp, tour: &[usize], rng: &mut R) -> (Vec<usize>, f64) {
    if tour.len() < 2 {
        return (tour.to_vec(), 0.0);
    }
    let (a, b) = distinct_pair(tour.len(), rng);
    swap_delta_at(tsp, tour, a, b)
}

/// Random insert with delta evaluation.
pub fn insert_delta<R: Rng>(tsp: &Tsp, tour: &[usize], rng: &mut R) -> (Vec<usize>, f64) {
    if tour.len() < 2 {
        return (tour.to_vec(), 0.0);
    }
    let (from, to) = distinct_pair(tour.len(), rng);
    insert_delta_at(tsp, tour, from, to)
}

/// Random 2-opt with delta evaluation.
///
/// Unlike [`two_opt`], a too-short segment is returned unchanged with a
/// zero delta; callers treat that as a valid non-improving move.
pub fn two_opt_delta<R: Rng>(tsp: &Tsp, tour: &[usize], rng: &mut R) -> (Vec<usize>, f64) {
    let n = tour.len();
    if n < 3 {
        return (tour.to_vec(), 0.0);
    }
    let (a, b) = sorted_pair(n, rng);
    two_opt_delta_at(tsp, tour, a, b)
}

fn sorted_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair(n, rng);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
