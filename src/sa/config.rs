//! SA configuration and cooling schedules.

use std::str::FromStr;

use crate::error::{Result, TspError};
use crate::neighborhood::Neighborhood;

/// Cooling schedule for temperature reduction.
///
/// `k` is the index of the temperature level just completed and `K` the
/// configured number of levels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T ← α·T`.
    ///
    /// Most widely used. Typical `alpha`: 0.95–0.999.
    Geometric {
        /// Cooling factor in (0, 1]. Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T = T₀·(1 − k/K)`.
    ///
    /// Fixed total duration; reaches `T₀/K` on the last level.
    Linear,

    /// Logarithmic cooling: `T = T₀ / ln(k + 2)`.
    ///
    /// Very slow; the classical schedule with an asymptotic convergence
    /// guarantee.
    Logarithmic,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.99 }
    }
}

impl CoolingSchedule {
    /// Parses a schedule name, using `alpha` for the geometric schedule and
    /// falling back to geometric on an unknown name.
    pub fn from_name_or_default(name: &str, alpha: f64) -> Self {
        match name.parse::<CoolingSchedule>() {
            Ok(CoolingSchedule::Geometric { .. }) => CoolingSchedule::Geometric { alpha },
            Ok(schedule) => schedule,
            Err(err) => {
                log::warn!("{err}; falling back to geometric cooling");
                CoolingSchedule::Geometric { alpha }
            }
        }
    }

    /// Temperature after completing level `level` of `levels`.
    pub fn next_temperature(self, current: f64, initial: f64, level: usize, levels: usize) -> f64 {
        match self {
            CoolingSchedule::Geometric { alpha } => current * alpha,
            CoolingSchedule::Linear => {
                if levels == 0 {
                    0.0
                } else {
                    initial * (1.0 - level as f64 / levels as f64)
                }
            }
            CoolingSchedule::Logarithmic => initial / ((level + 2) as f64).ln(),
        }
    }
}

impl FromStr for CoolingSchedule {
    type Err = TspError;

    /// Parses `geometric` (with the default α), `linear` or `logarithmic`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geometric" => Ok(CoolingSchedule::default()),
            "linear" => Ok(CoolingSchedule::Linear),
            "logarithmic" | "log" => Ok(CoolingSchedule::Logarithmic),
            _ => Err(TspError::UnknownOption {
                kind: "cooling schedule",
                name: s.to_string(),
            }),
        }
    }
}

/// Reheating policy: restore heat after a run of non-improving steps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reheating {
    /// Consecutive steps without a new best before reheating.
    pub threshold: usize,

    /// Fraction of the initial temperature restored on reheat.
    pub factor: f64,
}

impl Default for Reheating {
    fn default() -> Self {
        Self {
            threshold: 100,
            factor: 0.5,
        }
    }
}

/// Configuration for the Simulated Annealing algorithm.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.995 })
///     .with_iterations(2000)
///     .with_iterations_per_temperature(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Zero turns SA into strict descent.
    pub initial_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of temperature levels.
    pub iterations: usize,

    /// Moves tried at each temperature level.
    pub iterations_per_temperature: usize,

    /// Move family.
    pub neighborhood: Neighborhood,

    /// Start from a nearest-neighbour tour (random start city).
    pub use_nn_start: bool,

    /// Optional reheating policy.
    pub reheating: Option<Reheating>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling: CoolingSchedule::default(),
            iterations: 5000,
            iterations_per_temperature: 1,
            neighborhood: Neighborhood::TwoOpt,
            use_nn_start: false,
            reheating: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_nn_start(mut self, enabled: bool) -> Self {
        self.use_nn_start = enabled;
        self
    }

    pub fn with_reheating(mut self, threshold: usize, factor: f64) -> Self {
        self.reheating = Some(Reheating { threshold, factor });
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "initial_temperature must be non-negative, got {}",
                self.initial_temperature
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(TspError::InvalidConfig(
                "iterations_per_temperature must be at least 1".into(),
            ));
        }
        if let CoolingSchedule::Geometric { alpha } = self.cooling {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(TspError::InvalidConfig(format!(
                    "geometric alpha must be in (0, 1], got {alpha}"
                )));
            }
        }
        if let Some(reheat) = self.reheating {
            if reheat.threshold == 0 {
                return Err(TspError::InvalidConfig(
                    "reheat threshold must be at least 1".into(),
                ));
            }
            if !(reheat.factor > 0.0 && reheat.factor.is_finite()) {
                return Err(TspError::InvalidConfig(format!(
                    "reheat factor must be positive, got {}",
                    reheat.factor
                )));
            }
        }
        Ok(())
    }
}
