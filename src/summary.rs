//! Repeated-run statistics.
//!
//! Stochastic solvers are compared over several independent runs.
//! [`RunSummary::collect`] executes a run closure, times every call, and
//! aggregates the tour lengths.

use std::time::{Duration, Instant};

use crate::error::{Result, TspError};
use crate::problem::Solution;

/// Aggregated lengths and timings of repeated runs.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Shortest length observed.
    pub min: f64,
    /// Longest length observed.
    pub max: f64,
    /// Mean length.
    pub mean: f64,
    /// Sample standard deviation of the lengths; zero for a single run.
    pub std_dev: f64,
    /// Mean wall-clock time per run.
    pub mean_time: Duration,
    /// Length of every run, in execution order.
    pub lengths: Vec<f64>,
    /// Wall-clock time of every run, in execution order.
    pub times: Vec<Duration>,
    /// The shortest tour; the earliest run wins ties.
    pub best: Solution,
}

impl RunSummary {
    /// Calls `run(i)` for `i` in `0..runs` and aggregates the results.
    ///
    /// The run index is handed to the closure so callers can derive a
    /// distinct seed per run.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`] if `runs` is zero; otherwise the first
    /// error returned by `run`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::problem::Tsp;
    /// use u_tsp::sa::{SaConfig, SaRunner};
    /// use u_tsp::summary::RunSummary;
    ///
    /// let tsp = Tsp::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
    /// let summary = RunSummary::collect(3, |i| {
    ///     let config = SaConfig::default().with_iterations(500).with_seed(i as u64);
    ///     SaRunner::run(&tsp, &config).map(Into::into)
    /// })
    /// .unwrap();
    /// assert_eq!(summary.lengths.len(), 3);
    /// assert!(summary.min <= summary.mean);
    /// ```
    pub fn collect<F>(runs: usize, mut run: F) -> Result<Self>
    where
        F: FnMut(usize) -> Result<Solution>,
    {
        if runs == 0 {
            return Err(TspError::InvalidConfig("runs must be at least 1".into()));
        }

        let mut lengths = Vec::with_capacity(runs);
        let mut times = Vec::with_capacity(runs);
        let mut best: Option<Solution> = None;

        for i in 0..runs {
            let start = Instant::now();
            let solution = run(i)?;
            times.push(start.elapsed());
            lengths.push(solution.length);
            if best.as_ref().map_or(true, |b| solution.length < b.length) {
                best = Some(solution);
            }
        }

        let count = runs as f64;
        let mean = lengths.iter().sum::<f64>() / count;
        let std_dev = if runs > 1 {
            let ss: f64 = lengths.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (count - 1.0)).sqrt()
        } else {
            0.0
        };
        let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
        let max = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_time = times.iter().sum::<Duration>().div_f64(count);

        log::info!(
            "{runs} runs: min {min:.4}, mean {mean:.4} ± {std_dev:.4}, max {max:.4}, {:.3?} per run",
            mean_time
        );

        Ok(Self {
            min,
            max,
            mean,
            std_dev,
            mean_time,
            lengths,
            times,
            best: best.ok_or_else(|| TspError::InvalidConfig("no runs executed".into()))?,
        })
    }
}
