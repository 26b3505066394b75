//! Run configuration.
//!
//! [`Options`] holds the parameters fixed for the lifetime of one run.

use crate::error::{GaError, GaResult};
use crate::random::random_seed;

/// Configuration for a [`GeneticAlgorithm`](crate::GeneticAlgorithm) run.
///
/// The seed is resolved once, at construction, so a run configured with a
/// given `Options` value is always reproducible.
///
/// # Builder Pattern
///
/// ```
/// use genalg::Options;
///
/// let options = Options::default()
///     .with_population_capacity(50)
///     .with_mutation_probability(0.1)
///     .with_seed(42);
///
/// assert_eq!(options.population_capacity, 50);
/// assert_eq!(options.seed, 42);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Number of individuals in every generation.
    pub population_capacity: usize,

    /// Probability that an offspring is mutated (0.0–1.0).
    pub mutation_probability: f64,

    /// Seed of the run's random number generator.
    pub seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self::new(100, 0.01)
    }
}

impl Options {
    /// Creates options with a randomly generated seed.
    pub fn new(population_capacity: usize, mutation_probability: f64) -> Self {
        Self::seeded(population_capacity, mutation_probability, random_seed())
    }

    /// Creates options with an explicit seed.
    pub fn seeded(population_capacity: usize, mutation_probability: f64, seed: u64) -> Self {
        Self {
            population_capacity,
            mutation_probability,
            seed,
        }
    }

    /// Sets the population capacity.
    pub fn with_population_capacity(mut self, capacity: usize) -> Self {
        self.population_capacity = capacity;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GaResult<()> {
        if self.population_capacity == 0 {
            return Err(GaError::InvalidCapacity(self.population_capacity));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(GaError::InvalidProbability {
                name: "mutation_probability",
                value: self.mutation_probability,
            });
        }
        Ok(())
    }
}
