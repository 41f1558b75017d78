//! ACO configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TspError};

/// Pheromone update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AcoVariant {
    /// Classic Ant System: all ants deposit.
    #[default]
    AntSystem,
    /// MAX-MIN Ant System: one ant deposits, trails are bounded.
    MaxMin,
}

impl AcoVariant {
    /// Parses a variant name, falling back to [`AcoVariant::AntSystem`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to ant system");
            AcoVariant::default()
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            AcoVariant::AntSystem => "ant_system",
            AcoVariant::MaxMin => "max_min",
        }
    }
}

impl FromStr for AcoVariant {
    type Err = TspError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ant_system" | "as" | "aco" => Ok(AcoVariant::AntSystem),
            "max_min" | "mmas" | "max-min" => Ok(AcoVariant::MaxMin),
            _ => Err(TspError::UnknownOption {
                kind: "aco variant",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AcoVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for Ant Colony Optimization.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::{AcoConfig, AcoVariant};
///
/// let config = AcoConfig::default()
///     .with_ants(30)
///     .with_rho(0.1)
///     .with_variant(AcoVariant::MaxMin)
///     .with_local_search(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants per iteration.
    pub ants: usize,

    /// Number of iterations.
    pub iterations: usize,

    /// Pheromone exponent α.
    pub alpha: f64,

    /// Heuristic exponent β.
    pub beta: f64,

    /// Evaporation rate ρ in (0, 1].
    pub rho: f64,

    /// Deposit constant Q.
    pub q: f64,

    /// Starting trail level (Ant System only; MAX-MIN starts at `τ_max`).
    pub initial_pheromone: f64,

    /// Extra deposit on the global best as a multiple of `Q/L_best`
    /// (Ant System only). Zero disables it.
    pub elitist_weight: f64,

    /// 2-opt descent steps applied to every constructed tour. Zero disables
    /// the local search.
    pub local_search_iters: usize,

    /// Pheromone update rule.
    pub variant: AcoVariant,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ants: 20,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            q: 100.0,
            initial_pheromone: 1.0,
            elitist_weight: 0.0,
            local_search_iters: 0,
            variant: AcoVariant::AntSystem,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_ants(mut self, n: usize) -> Self {
        self.ants = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the pheromone exponent α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent β.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate ρ.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    /// Sets the elitist bonus weight.
    pub fn with_elitist_weight(mut self, weight: f64) -> Self {
        self.elitist_weight = weight;
        self
    }

    /// Enables the 2-opt hybrid with `steps` descent steps per ant.
    pub fn with_local_search(mut self, steps: usize) -> Self {
        self.local_search_iters = steps;
        self
    }

    pub fn with_variant(mut self, variant: AcoVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ants == 0 {
            return Err(TspError::InvalidConfig("ants must be at least 1".into()));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TspError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if !(self.rho > 0.0 && self.rho <= 1.0) {
            return Err(TspError::InvalidConfig(format!(
                "rho must be in (0, 1], got {}",
                self.rho
            )));
        }
        for (name, value) in [("q", self.q), ("initial_pheromone", self.initial_pheromone)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TspError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.elitist_weight.is_finite() || self.elitist_weight < 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "elitist_weight must be non-negative, got {}",
                self.elitist_weight
            )));
        }
        Ok(())
    }
}
