//! Pheromone state and probabilistic tour construction.

use rand::Rng;

use super::config::AcoConfig;
use crate::problem::{Solution, Tsp};

/// Ant System trails never evaporate below this level.
pub(crate) const PHEROMONE_FLOOR: f64 = 1e-4;

/// Dense `n × n` pheromone trail matrix, row-major.
///
/// Owned by a single run and mutated only between construction phases.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    tau: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates a matrix with every trail set to `value`.
    pub fn new(n: usize, value: f64) -> Self {
        Self {
            n,
            tau: vec![value; n * n],
        }
    }

    /// Number of cities.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Trail level on edge `i → j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.tau[i * self.n + j]
    }

    /// Multiplies every trail by `1 − rho`, optionally flooring at `floor`.
    pub fn evaporate(&mut self, rho: f64, floor: Option<f64>) {
        let keep = 1.0 - rho;
        for t in &mut self.tau {
            *t *= keep;
            if let Some(min) = floor {
                *t = t.max(min);
            }
        }
    }

    /// Adds `amount` to both directions of every edge of the closed `tour`.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        let len = tour.len();
        for i in 0..len {
            let (a, b) = (tour[i], tour[(i + 1) % len]);
            self.tau[a * self.n + b] += amount;
            self.tau[b * self.n + a] += amount;
        }
    }

    /// Clamps every trail into `[min, max]`.
    pub fn clamp(&mut self, min: f64, max: f64) {
        for t in &mut self.tau {
            *t = t.clamp(min, max);
        }
    }

    /// Smallest and largest trail levels.
    pub fn bounds(&self) -> (f64, f64) {
        self.tau
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
                (lo.min(t), hi.max(t))
            })
    }
}

/// Evaporates and reinforces trails after one construction phase.
///
/// - `bounds == None` (Ant System): evaporate down to [`PHEROMONE_FLOOR`],
///   every ant deposits `Q/L`, and the global best gets an extra
///   `elitist_weight · Q/L_best`.
/// - `bounds == Some((τ_min, τ_max))` (MAX-MIN): evaporate, then a single
///   tour deposits `Q/L`: the global best with probability
///   `global_probability`, the iteration best otherwise. Trails are then
///   clamped into the bounds.
///
/// Zero-length tours deposit nothing.
pub(crate) fn update_trails<R: Rng>(
    pheromone: &mut PheromoneMatrix,
    ants: &[Solution],
    best: &Solution,
    config: &AcoConfig,
    bounds: Option<(f64, f64)>,
    global_probability: f64,
    rng: &mut R,
) {
    match bounds {
        None => {
            pheromone.evaporate(config.rho, Some(PHEROMONE_FLOOR));
            for ant in ants.iter().filter(|a| a.length > 0.0) {
                pheromone.deposit(&ant.tour, config.q / ant.length);
            }
            if config.elitist_weight > 0.0 && best.length > 0.0 {
                pheromone.deposit(&best.tour, config.elitist_weight * config.q / best.length);
            }
        }
        Some((tau_min, tau_max)) => {
            pheromone.evaporate(config.rho, None);
            let depositor = if rng.random::<f64>() < global_probability {
                Some(best)
            } else {
                ants.iter().min_by(|a, b| a.length.total_cmp(&b.length))
            };
            if let Some(ant) = depositor.filter(|a| a.length > 0.0) {
                pheromone.deposit(&ant.tour, config.q / ant.length);
            }
            pheromone.clamp(tau_min, tau_max);
        }
    }
}

/// Greedy desirability `η(i,j) = 1/d(i,j)`; zero on the diagonal and on
/// zero-length edges.
pub(crate) fn heuristic_matrix(tsp: &Tsp) -> Vec<f64> {
    let n = tsp.n();
    let mut eta = vec![0.0; n * n];
    for i in 0..n {
        for (j, &d) in tsp.row(i).iter().enumerate() {
            if i != j && d > 0.0 {
                eta[i * n + j] = 1.0 / d;
            }
        }
    }
    eta
}

/// Precomputes `τ^α · η^β` for every edge.
///
/// Trails are fixed while ants construct, so this is done once per
/// iteration instead of once per step.
pub(crate) fn choice_weights(
    pheromone: &PheromoneMatrix,
    heuristic: &[f64],
    alpha: f64,
    beta: f64,
) -> Vec<f64> {
    pheromone
        .tau
        .iter()
        .zip(heuristic)
        .map(|(&tau, &eta)| tau.powf(alpha) * eta.powf(beta))
        .collect()
}

/// Builds one ant's tour from a uniformly random start city.
///
/// Each step draws the next unvisited city with probability proportional to
/// its weight; when all remaining weights are zero the draw is uniform.
pub(crate) fn construct_tour<R: Rng>(n: usize, weights: &[f64], rng: &mut R) -> Vec<usize> {
    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut unvisited: Vec<usize> = Vec::with_capacity(n);

    let start = rng.random_range(0..n);
    tour.push(start);
    visited[start] = true;

    while tour.len() < n {
        let current = tour[tour.len() - 1];
        let row = &weights[current * n..(current + 1) * n];

        unvisited.clear();
        unvisited.extend((0..n).filter(|&j| !visited[j]));
        let total: f64 = unvisited.iter().map(|&j| row[j]).sum();

        let next = if total > 0.0 && total.is_finite() {
            let threshold = rng.random_range(0.0..total);
            let mut cumulative = 0.0;
            let mut chosen = unvisited[unvisited.len() - 1];
            for &j in &unvisited {
                cumulative += row[j];
                if cumulative > threshold {
                    chosen = j;
                    break;
                }
            }
            chosen
        } else {
            unvisited[rng.random_range(0..unvisited.len())]
        };

        tour.push(next);
        visited[next] = true;
    }

    tour
}
