//! Permutation crossover and mutation operators.
//!
//! Every operator takes parent tours by reference and returns a fresh child
//! tour, so parents in the current population are never disturbed.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//! - [`cycle_crossover`] (CX): Oliver et al. (1987), every city keeps a parent's position
//!
//! # Mutation Operators
//!
//! [`Mutation`] reuses the random full-form moves of
//! [`crate::neighborhood`]: swap, insert and inversion (2-opt).
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::TspError;
use crate::neighborhood;
use crate::random::distinct_pair;

const UNSET: usize = usize::MAX;

// ============================================================================
// Operator selection
// ============================================================================

/// Crossover operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Crossover {
    /// Order crossover.
    #[default]
    Ox,
    /// Partially mapped crossover.
    Pmx,
    /// Cycle crossover.
    Cx,
}

impl Crossover {
    /// Parses an operator name, falling back to [`Crossover::Ox`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to ox");
            Crossover::default()
        })
    }

    /// Produces one child from two parents.
    pub fn apply<R: Rng>(self, p1: &[usize], p2: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Crossover::Ox => order_crossover(p1, p2, rng),
            Crossover::Pmx => pmx_crossover(p1, p2, rng),
            Crossover::Cx => cycle_crossover(p1, p2),
        }
    }

    /// Lowercase label used by `Display` and `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Crossover::Ox => "ox",
            Crossover::Pmx => "pmx",
            Crossover::Cx => "cx",
        }
    }
}

impl FromStr for Crossover {
    type Err = TspError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ox" | "order" => Ok(Crossover::Ox),
            "pmx" => Ok(Crossover::Pmx),
            "cx" | "cycle" => Ok(Crossover::Cx),
            _ => Err(TspError::UnknownOption {
                kind: "crossover",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mutation {
    /// Exchange two random positions.
    #[default]
    Swap,
    /// Move one city to another position.
    Insert,
    /// Reverse a random segment (2-opt).
    Inversion,
}

impl Mutation {
    /// Parses an operator name, falling back to [`Mutation::Swap`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to swap");
            Mutation::default()
        })
    }

    /// Returns a mutated copy of `tour`.
    pub fn apply<R: Rng>(self, tour: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Mutation::Swap => neighborhood::swap(tour, rng),
            Mutation::Insert => neighborhood::insert(tour, rng),
            Mutation::Inversion => neighborhood::two_opt(tour, rng),
        }
    }

    /// Lowercase label used by `Display` and `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Mutation::Swap => "swap",
            Mutation::Insert => "insert",
            Mutation::Inversion => "inversion",
        }
    }
}

impl FromStr for Mutation {
    type Err = TspError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swap" => Ok(Mutation::Swap),
            "insert" => Ok(Mutation::Insert),
            "inversion" | "invert" | "two_opt" | "2opt" => Ok(Mutation::Inversion),
            _ => Err(TspError::UnknownOption {
                kind: "mutation",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX).
///
/// 1. Pick a random half-open segment `[a, b)` with `a < b`
/// 2. Copy `p1[a..b]` into the child at the same positions
/// 3. Fill the remaining positions left to right with the cities of `p2`
///    that are not in the segment, in `p2` order
///
/// O(n). Parents shorter than two cities yield a copy of `p1`.
pub fn order_crossover<R: Rng>(p1: &[usize], p2: &[usize], rng: &mut R) -> Vec<usize> {
    debug_assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let n = p1.len();
    if n < 2 {
        return p1.to_vec();
    }
    let (a, b) = segment(n, rng);
    order_crossover_at(p1, p2, a, b)
}

/// [`order_crossover`] with a fixed segment `[a, b)`.
pub fn order_crossover_at(p1: &[usize], p2: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = p1.len();
    let mut child = vec![UNSET; n];
    let mut in_segment = vec![false; n];
    for i in a..b {
        child[i] = p1[i];
        in_segment[p1[i]] = true;
    }

    let mut donors = p2.iter().copied().filter(|&c| !in_segment[c]);
    for slot in child.iter_mut().filter(|c| **c == UNSET) {
        if let Some(city) = donors.next() {
            *slot = city;
        }
    }
    child
}

/// Partially Mapped Crossover (PMX).
///
/// 1. Pick a random half-open segment `[a, b)` with `a < b`
/// 2. Copy `p1[a..b]` into the child
/// 3. For each `i` in the segment whose `p2[i]` is not yet placed, follow
///    the chain `p1[i] -> position in p2 -> p1[that position] -> ...` until
///    it leaves the segment, and place `p2[i]` there
/// 4. Fill every position still unset from `p2` directly
///
/// O(n) with a position index. Parents shorter than two cities yield a
/// copy of `p1`.
pub fn pmx_crossover<R: Rng>(p1: &[usize], p2: &[usize], rng: &mut R) -> Vec<usize> {
    debug_assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let n = p1.len();
    if n < 2 {
        return p1.to_vec();
    }
    let (a, b) = segment(n, rng);
    pmx_crossover_at(p1, p2, a, b)
}

/// [`pmx_crossover`] with a fixed segment `[a, b)`.
pub fn pmx_crossover_at(p1: &[usize], p2: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = p1.len();
    let pos_in_p2 = positions(p2);
    let mut child = vec![UNSET; n];
    let mut in_segment = vec![false; n];
    for i in a..b {
        child[i] = p1[i];
        in_segment[p1[i]] = true;
    }

    for i in a..b {
        if in_segment[p2[i]] {
            continue;
        }
        let mut idx = pos_in_p2[p1[i]];
        // the chain visits each segment position at most once
        let mut steps = 0;
        while (a..b).contains(&idx) && steps <= n {
            idx = pos_in_p2[p1[idx]];
            steps += 1;
        }
        if !(a..b).contains(&idx) {
            child[idx] = p2[i];
        }
    }

    for (slot, &city) in child.iter_mut().zip(p2) {
        if *slot == UNSET {
            *slot = city;
        }
    }
    child
}

/// Cycle Crossover (CX).
///
/// Decomposes the parents into position cycles and copies them into the
/// child alternately from `p1` (even cycles) and `p2` (odd cycles). Every
/// city ends up at a position it holds in one of the parents.
///
/// Deterministic, O(n).
pub fn cycle_crossover(p1: &[usize], p2: &[usize]) -> Vec<usize> {
    debug_assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let n = p1.len();
    let pos_in_p1 = positions(p1);
    let mut child = vec![UNSET; n];
    let mut cycle = 0usize;

    for start in 0..n {
        if child[start] != UNSET {
            continue;
        }
        let donor = if cycle % 2 == 0 { p1 } else { p2 };
        let mut idx = start;
        while child[idx] == UNSET {
            child[idx] = donor[idx];
            idx = pos_in_p1[p2[idx]];
        }
        cycle += 1;
    }
    child
}

// ============================================================================
// Helpers
// ============================================================================

/// Random half-open segment `[a, b)` with `a < b`.
fn segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair(n, rng);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Inverse permutation: `positions(t)[city]` is the index of `city` in `t`.
fn positions(tour: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; tour.len()];
    for (i, &city) in tour.iter().enumerate() {
        pos[city] = i;
    }
    pos
}
