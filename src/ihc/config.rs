//! IHC configuration.

use crate::error::{Result, TspError};
use crate::neighborhood::Neighborhood;

/// Configuration for Iterated Hill Climbing.
///
/// # Examples
///
/// ```
/// use u_tsp::ihc::IhcConfig;
/// use u_tsp::neighborhood::Neighborhood;
///
/// let config = IhcConfig::default()
///     .with_iterations(2000)
///     .with_restarts(5)
///     .with_neighborhood(Neighborhood::Swap)
///     .with_no_improve_limit(300);
/// assert_eq!(config.restarts, 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IhcConfig {
    /// Move attempts per restart.
    pub iterations: usize,

    /// Number of independent restarts.
    pub restarts: usize,

    /// Move family used for the descent.
    pub neighborhood: Neighborhood,

    /// End a restart after this many consecutive non-improving attempts.
    pub no_improve_limit: Option<usize>,

    /// Start restart 0 from a nearest-neighbour tour (random start city).
    pub use_nn_start: bool,

    /// Relative improvement over the previous global best that triggers an
    /// intensification sweep. `None` disables intensification.
    pub intensification: Option<f64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for IhcConfig {
    fn default() -> Self {
        Self {
            iterations: 5000,
            restarts: 20,
            neighborhood: Neighborhood::TwoOpt,
            no_improve_limit: None,
            use_nn_start: false,
            intensification: None,
            seed: None,
        }
    }
}

impl IhcConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_no_improve_limit(mut self, n: usize) -> Self {
        self.no_improve_limit = Some(n);
        self
    }

    pub fn with_nn_start(mut self, enabled: bool) -> Self {
        self.use_nn_start = enabled;
        self
    }

    /// Enables intensification with the given relative-improvement threshold
    /// (e.g. `0.01` for 1%).
    pub fn with_intensification(mut self, threshold: f64) -> Self {
        self.intensification = Some(threshold);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.restarts == 0 {
            return Err(TspError::InvalidConfig("restarts must be at least 1".into()));
        }
        if self.no_improve_limit == Some(0) {
            return Err(TspError::InvalidConfig(
                "no_improve_limit must be positive when set".into(),
            ));
        }
        if let Some(threshold) = self.intensification {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(TspError::InvalidConfig(format!(
                    "intensification threshold must be non-negative, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IhcConfig::default();
        assert_eq!(config.iterations, 5000);
        assert_eq!(config.restarts, 20);
        assert_eq!(config.neighborhood, Neighborhood::TwoOpt);
        assert!(config.no_improve_limit.is_none());
        assert!(config.intensification.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_restarts() {
        assert!(IhcConfig::default().with_restarts(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_no_improve_limit() {
        assert!(IhcConfig::default()
            .with_no_improve_limit(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_negative_threshold() {
        assert!(IhcConfig::default()
            .with_intensification(-0.5)
            .validate()
            .is_err());
    }
}
