//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::{Crossover, Mutation};
use super::selection::Selection;
use crate::error::{Result, TspError};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{Crossover, GaConfig, Mutation, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::Pmx)
///     .with_mutation(Mutation::Inversion)
///     .with_mutation_rate(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations to evolve.
    pub generations: usize,

    /// Probability of mutating an offspring (0.0–1.0). With adaptive
    /// mutation this is the starting rate.
    pub mutation_rate: f64,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Number of best individuals copied unchanged into the next generation.
    pub elitism: usize,

    /// Seed the initial population with nearest-neighbour tours from the
    /// first `min(5, n)` cities.
    pub use_nn_start: bool,

    /// Adjust the mutation rate every generation from the population's
    /// edge diversity.
    pub adaptive_mutation: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            mutation_rate: 0.1,
            crossover_rate: 0.9,
            selection: Selection::default(),
            crossover: Crossover::Ox,
            mutation: Mutation::Swap,
            elitism: 2,
            use_nn_start: false,
            adaptive_mutation: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the elite count.
    pub fn with_elitism(mut self, n: usize) -> Self {
        self.elitism = n;
        self
    }

    pub fn with_nn_start(mut self, enabled: bool) -> Self {
        self.use_nn_start = enabled;
        self
    }

    /// Enables or disables diversity-driven mutation rate adaptation.
    pub fn with_adaptive_mutation(mut self, enabled: bool) -> Self {
        self.adaptive_mutation = enabled;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.elitism > self.population_size {
            return Err(TspError::InvalidConfig(format!(
                "elitism ({}) exceeds population_size ({})",
                self.elitism, self.population_size
            )));
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(TspError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        if self.selection == Selection::Tournament(0) {
            return Err(TspError::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
