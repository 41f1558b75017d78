//! Tabu Search configuration.

use crate::error::{Result, TspError};
use crate::neighborhood::Neighborhood;

/// Diversification policy: perturb the current tour after prolonged
/// stagnation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diversification {
    /// Consecutive non-improving iterations that trigger a kick.
    pub threshold: usize,

    /// Fraction of `n` used as the number of random pairwise swaps
    /// (at least one swap is always made).
    pub strength: f64,
}

impl Default for Diversification {
    fn default() -> Self {
        Self {
            threshold: 50,
            strength: 0.3,
        }
    }
}

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_iterations(1000)
///     .with_tabu_size(7)
///     .with_aspiration(true);
/// assert_eq!(config.iterations, 1000);
/// assert_eq!(config.tabu_size, 7);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub iterations: usize,

    /// Capacity of the tabu list. Zero disables the memory entirely.
    pub tabu_size: usize,

    /// Move family used to generate candidates.
    pub neighborhood: Neighborhood,

    /// Allow a tabu candidate through if it beats the global best.
    pub aspiration: bool,

    /// Random candidates evaluated per iteration.
    pub candidates_per_iter: usize,

    /// Stop after this many consecutive iterations without a new best.
    pub no_improve_limit: Option<usize>,

    /// Start from a nearest-neighbour tour (random start city).
    pub use_nn_start: bool,

    /// Optional stagnation kick.
    pub diversification: Option<Diversification>,

    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            tabu_size: 20,
            neighborhood: Neighborhood::TwoOpt,
            aspiration: true,
            candidates_per_iter: 20,
            no_improve_limit: None,
            use_nn_start: false,
            diversification: None,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_size(mut self, size: usize) -> Self {
        self.tabu_size = size;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_candidates_per_iter(mut self, n: usize) -> Self {
        self.candidates_per_iter = n;
        self
    }

    /// Sets the no-improvement cutoff.
    pub fn with_no_improve_limit(mut self, n: usize) -> Self {
        self.no_improve_limit = Some(n);
        self
    }

    pub fn with_nn_start(mut self, enabled: bool) -> Self {
        self.use_nn_start = enabled;
        self
    }

    /// Enables diversification with the given threshold and strength.
    pub fn with_diversification(mut self, threshold: usize, strength: f64) -> Self {
        self.diversification = Some(Diversification {
            threshold,
            strength,
        });
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.candidates_per_iter == 0 {
            return Err(TspError::InvalidConfig(
                "candidates_per_iter must be at least 1".into(),
            ));
        }
        if self.no_improve_limit == Some(0) {
            return Err(TspError::InvalidConfig(
                "no_improve_limit must be at least 1".into(),
            ));
        }
        if let Some(div) = self.diversification {
            if div.threshold == 0 {
                return Err(TspError::InvalidConfig(
                    "diversification threshold must be at least 1".into(),
                ));
            }
            if !div.strength.is_finite() || div.strength < 0.0 {
                return Err(TspError::InvalidConfig(format!(
                    "diversification strength must be non-negative, got {}",
                    div.strength
                )));
            }
        }
        Ok(())
    }
}
