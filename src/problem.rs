//! The distance model and tour primitives.
//!
//! A [`Tsp`] owns an immutable `n × n` distance matrix, either supplied
//! directly or derived from city coordinates. Every algorithm reads it
//! through [`Tsp::dist`] and [`Tsp::length`] and never mutates it.

use crate::error::{Result, TspError};

/// A symmetric TSP instance.
///
/// # Examples
///
/// ```
/// use u_tsp::problem::Tsp;
///
/// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// assert_eq!(tsp.n(), 4);
/// assert!((tsp.length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Tsp {
    n: usize,
    /// Row-major `n * n` matrix.
    dist: Vec<f64>,
    coords: Option<Vec<(f64, f64)>>,
}

impl Tsp {
    /// Builds an instance from a square distance matrix, stored as-is.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidInput`] if the matrix is empty, not square, or
    /// holds a negative or non-finite entry.
    pub fn from_matrix(matrix: Vec<Vec<f64>>) -> Result<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(TspError::InvalidInput("distance matrix is empty".into()));
        }

        let mut dist = Vec::with_capacity(n * n);
        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::InvalidInput(format!(
                    "matrix row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            if let Some((j, &d)) = row
                .iter()
                .enumerate()
                .find(|&(_, &d)| !d.is_finite() || d < 0.0)
            {
                return Err(TspError::InvalidInput(format!(
                    "distance [{i}][{j}] = {d} is not a non-negative number"
                )));
            }
            dist.extend(row);
        }

        Ok(Self {
            n,
            dist,
            coords: None,
        })
    }

    /// Builds an instance from city coordinates using Euclidean distance.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidInput`] if the list is empty or a coordinate is
    /// not finite.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        let n = coords.len();
        if n == 0 {
            return Err(TspError::InvalidInput("coordinate list is empty".into()));
        }
        if let Some(i) = coords
            .iter()
            .position(|&(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(TspError::InvalidInput(format!(
                "coordinate {i} is not finite"
            )));
        }

        let mut dist = vec![0.0; n * n];
        for i in 0..n {
            let (x1, y1) = coords[i];
            for j in (i + 1)..n {
                let (x2, y2) = coords[j];
                let d = (x1 - x2).hypot(y1 - y2);
                dist[i * n + j] = d;
                dist[j * n + i] = d;
            }
        }

        Ok(Self {
            n,
            dist,
            coords: Some(coords.to_vec()),
        })
    }

    /// Number of cities.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Distance from city `i` to city `j`.
    #[inline]
    pub fn dist(&self, i: usize, j: usize) -> f64 {
        self.dist[i * self.n + j]
    }

    /// Row `i` of the distance matrix.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.dist[i * self.n..(i + 1) * self.n]
    }

    /// City coordinates, if the instance was built from them.
    pub fn coords(&self) -> Option<&[(f64, f64)]> {
        self.coords.as_deref()
    }

    /// Length of the closed tour, including the edge back to the start.
    pub fn length(&self, tour: &[usize]) -> f64 {
        let m = tour.len();
        (0..m)
            .map(|i| self.dist(tour[i], tour[(i + 1) % m]))
            .sum()
    }

    /// Length of the `i`-th edge of a tour: `tour[i] -> tour[i + 1 mod n]`.
    #[inline]
    pub(crate) fn edge(&self, tour: &[usize], i: usize) -> f64 {
        let m = tour.len();
        self.dist(tour[i % m], tour[(i + 1) % m])
    }

    /// Validates that `tour` is a permutation of this instance's cities.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidInput`] describing the first violation.
    pub fn check_tour(&self, tour: &[usize]) -> Result<()> {
        if tour.len() != self.n {
            return Err(TspError::InvalidInput(format!(
                "tour visits {} cities, instance has {}",
                tour.len(),
                self.n
            )));
        }
        if !is_permutation(tour, self.n) {
            return Err(TspError::InvalidInput(
                "tour is not a permutation of the cities".into(),
            ));
        }
        Ok(())
    }
}

/// Returns `true` if `tour` contains every index of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// A tour together with its length: the uniform output of every solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// City visiting order.
    pub tour: Vec<usize>,
    /// Closed-tour length.
    pub length: f64,
}

impl Solution {
    /// Wraps a tour, computing its length.
    pub fn evaluate(tsp: &Tsp, tour: Vec<usize>) -> Self {
        let length = tsp.length(&tour);
        Self { tour, length }
    }
}
