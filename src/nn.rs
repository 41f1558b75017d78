//! Nearest-neighbour tour construction.
//!
//! Greedy and deterministic: from the start city, repeatedly walk to the
//! closest unvisited city, then close the cycle. O(n²). Also used to seed
//! the other algorithms and to estimate MAX-MIN pheromone bounds.

use rand::Rng;

use crate::error::{Result, TspError};
use crate::problem::{Solution, Tsp};
use crate::random::random_tour;

/// Builds the nearest-neighbour tour from `start`.
///
/// Ties go to the lowest city index. The returned length includes the
/// closing edge back to `start`.
///
/// # Errors
///
/// [`TspError::InvalidInput`] if `start >= n`.
///
/// # Examples
///
/// ```
/// use u_tsp::nn::nearest_neighbor;
/// use u_tsp::problem::Tsp;
///
/// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let sol = nearest_neighbor(&tsp, 2).unwrap();
/// assert_eq!(sol.tour[0], 2);
/// assert!((sol.length - 4.0).abs() < 1e-12);
/// ```
pub fn nearest_neighbor(tsp: &Tsp, start: usize) -> Result<Solution> {
    let n = tsp.n();
    if start >= n {
        return Err(TspError::InvalidInput(format!(
            "start city {start} out of range for {n} cities"
        )));
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    visited[start] = true;

    let mut length = 0.0;
    let mut current = start;

    for _ in 1..n {
        let row = tsp.row(current);
        let mut best_city = usize::MAX;
        let mut best_dist = f64::INFINITY;
        for (city, &d) in row.iter().enumerate() {
            if !visited[city] && (best_city == usize::MAX || d < best_dist) {
                best_city = city;
                best_dist = d;
            }
        }

        visited[best_city] = true;
        tour.push(best_city);
        length += best_dist;
        current = best_city;
    }

    length += tsp.dist(current, start);
    Ok(Solution { tour, length })
}

/// Runs [`nearest_neighbor`] from each start and keeps the shortest tour.
///
/// Earlier starts win ties. An empty `starts` list means "every city".
///
/// # Errors
///
/// [`TspError::InvalidInput`] if any start is out of range.
pub fn nearest_neighbor_best_of(tsp: &Tsp, starts: &[usize]) -> Result<Solution> {
    let all: Vec<usize>;
    let starts = if starts.is_empty() {
        all = (0..tsp.n()).collect();
        &all[..]
    } else {
        starts
    };

    let mut best: Option<Solution> = None;
    for &start in starts {
        let sol = nearest_neighbor(tsp, start)?;
        if best.as_ref().map_or(true, |b| sol.length < b.length) {
            best = Some(sol);
        }
    }

    let best = best.ok_or_else(|| TspError::InvalidInput("no start city".into()))?;
    log::debug!(
        "nearest neighbour best of {} starts: {:.4} from city {}",
        starts.len(),
        best.length,
        best.tour[0]
    );
    Ok(best)
}

/// Starting tour for a trajectory search: a nearest-neighbour tour from a
/// random city when `use_nn` is set, otherwise a random permutation.
pub(crate) fn initial_solution<R: Rng>(tsp: &Tsp, use_nn: bool, rng: &mut R) -> Result<Solution> {
    if use_nn {
        let start = rng.random_range(0..tsp.n());
        nearest_neighbor(tsp, start)
    } else {
        Ok(Solution::evaluate(tsp, random_tour(tsp.n(), rng)))
    }
}
