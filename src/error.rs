//! Error types for the GA engine.
//!
//! Every variant is a caller or programming contract violation. The engine
//! performs no I/O, so nothing here is transient and nothing is retried.

use thiserror::Error;

/// Errors raised by populations, operators and the orchestrator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// Population capacity must be at least 1.
    #[error("Invalid population capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// A probability parameter fell outside `[0, 1]`.
    #[error("Invalid probability for {name}: {value} (must be within [0, 1])")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Tournament pool size is zero or larger than the population.
    #[error("Invalid tournament size {size} for a population of {population}")]
    InvalidTournamentSize { size: usize, population: usize },

    /// Too many crossover points for the genome length.
    #[error("Invalid crossover point count {points} for genome length {length}")]
    InvalidCrossoverPoints { points: usize, length: usize },

    /// Any other invalid operator configuration.
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),

    /// Tried to add an individual to a full population.
    #[error("Population capacity exceeded (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// Statistics requested on a population with no individuals.
    #[error("Population is empty")]
    EmptyPopulation,

    /// Advanced the algorithm before `initialize`.
    #[error("Genetic algorithm has not been initialized")]
    UninitializedRun,

    /// A population handed to the orchestrator is not exactly at capacity.
    #[error("Population size mismatch: expected {expected}, got {actual}")]
    PopulationSizeMismatch { expected: usize, actual: usize },

    /// Two genomes that must be recombined have different lengths.
    #[error("Genome length mismatch: {left} vs {right}")]
    GenomeLengthMismatch { left: usize, right: usize },
}

/// Result alias used throughout the crate.
pub type GaResult<T> = Result<T, GaError>;
