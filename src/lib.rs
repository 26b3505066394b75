//! Deterministic genetic-algorithm engine.
//!
//! A generic GA built on trait-based abstractions. The caller supplies a
//! genome representation and a fitness function; the engine evolves one
//! population at a time through pluggable operators:
//!
//! - **Selection**: [`TournamentSelection`] with a probabilistic winner
//! - **Crossover**: [`MultiPointCrossover`] and [`SinglePointCrossover`]
//! - **Mutation**: [`InversionMutation`] (bit-flip) and [`GeneReplacement`]
//! - **Termination**: [`GenerationLimit`], [`BestLimit`] and [`AnyOf`]
//!
//! [`GeneticAlgorithm`] ties them together with a single seeded random
//! number generator, so runs are reproducible from [`Options`].
//!
//! # Core Traits
//!
//! - [`Genome`]: A fixed-length, indexable gene sequence
//! - [`Fitness`]: A comparable score, higher is better
//! - [`FitnessFunction`]: The objective, `G -> F`
//! - [`IndividualFactory`]: Random genomes for the initial population
//!
//! # Workflow
//!
//! Construct [`Options`] → construct operators → construct
//! [`GeneticAlgorithm`] → [`initialize`](GeneticAlgorithm::initialize) →
//! [`run`](GeneticAlgorithm::run) or loop [`next`](GeneticAlgorithm::next),
//! then read [`generations`](GeneticAlgorithm::generations) or
//! [`statistics`](GeneticAlgorithm::statistics).
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

pub mod config;
pub mod crossover;
pub mod error;
pub mod mutation;
pub mod population;
pub mod random;
pub mod runner;
pub mod selection;
pub mod termination;
pub mod types;

pub use config::Options;
pub use crossover::{CrossoverOperator, MultiPointCrossover, SinglePointCrossover};
pub use error::{GaError, GaResult};
pub use mutation::{GeneReplacement, InversionMutation, Invertible, MutationOperator};
pub use population::Population;
pub use runner::{GenerationStats, GeneticAlgorithm, RunSummary};
pub use selection::{SelectionOperator, TournamentSelection};
pub use termination::{AnyOf, BestLimit, GenerationLimit, TerminationCondition};
pub use types::{Fitness, FitnessFunction, Genome, Individual, IndividualFactory, ZeroFitness};
