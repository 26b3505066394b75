//! Core trait definitions for the GA engine.
//!
//! [`Genome`], [`Fitness`] and [`Individual`] form the data model. The
//! [`FitnessFunction`] and [`IndividualFactory`] traits are the contract
//! between the generic engine and the caller's problem.

use rand::RngCore;
use std::fmt::Debug;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// **Higher fitness is considered better** (maximization). For minimization
/// problems, negate the objective.
///
/// Built-in implementations exist for the primitive float and integer types.
pub trait Fitness: PartialOrd + Copy + Debug + 'static {
    /// The neutral fitness value, used by [`ZeroFitness`].
    fn zero() -> Self;

    /// Converts the fitness to `f64` for averages and logging.
    fn to_f64(self) -> f64;
}

macro_rules! impl_fitness {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(
            impl Fitness for $t {
                fn zero() -> Self {
                    $zero
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_fitness!(
    f64 => 0.0,
    f32 => 0.0,
    i32 => 0,
    i64 => 0,
    u32 => 0,
    u64 => 0,
    usize => 0,
);

/// A fixed-length, indexable sequence of discrete genes.
///
/// Operators only rely on ordered access to the genes and on building a new
/// genome from a gene vector, so any sequence-like representation fits. The
/// length is a property of the run, not of the type: callers keep every
/// genome of a run at the same length.
pub trait Genome: Clone + PartialEq + Debug {
    /// A single gene value.
    type Gene: Clone + PartialEq + Debug;

    /// Ordered view of the genes.
    fn genes(&self) -> &[Self::Gene];

    /// Builds a genome from owned genes.
    fn from_genes(genes: Vec<Self::Gene>) -> Self;

    /// Number of genes.
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Returns `true` if the genome has no genes.
    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }
}

impl<T: Clone + PartialEq + Debug> Genome for Vec<T> {
    type Gene = T;

    fn genes(&self) -> &[T] {
        self
    }

    fn from_genes(genes: Vec<T>) -> Self {
        genes
    }
}

/// A candidate solution: a genome paired with its fitness.
///
/// The fitness is fixed when the individual is built. Changing the genome
/// means building a new `Individual`.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G, F> {
    genome: G,
    fitness: F,
}

impl<G, F: Fitness> Individual<G, F> {
    /// Pairs a genome with an already known fitness.
    pub fn new(genome: G, fitness: F) -> Self {
        Self { genome, fitness }
    }

    /// Builds an individual by evaluating `genome` once.
    pub fn evaluate(genome: G, fitness: &dyn FitnessFunction<G, F>) -> Self {
        let value = fitness.evaluate(&genome);
        Self {
            genome,
            fitness: value,
        }
    }

    /// The genome.
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// The fitness value.
    pub fn fitness(&self) -> F {
        self.fitness
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genome(self) -> G {
        self.genome
    }
}

/// Objective function mapping a genome to its fitness.
///
/// Must be deterministic and side-effect free; the engine calls it exactly
/// once per newly created or mutated genome.
///
/// Any `Fn(&G) -> F` closure implements this trait:
///
/// ```
/// use genalg::Individual;
///
/// let onemax = |genome: &Vec<bool>| genome.iter().filter(|&&b| b).count() as f64;
/// let ind: Individual<Vec<bool>, f64> = Individual::evaluate(vec![true, false, true], &onemax);
/// assert_eq!(ind.fitness(), 2.0);
/// ```
pub trait FitnessFunction<G, F> {
    /// Computes the fitness of `genome`.
    fn evaluate(&self, genome: &G) -> F;
}

impl<G, F, T> FitnessFunction<G, F> for T
where
    T: Fn(&G) -> F,
{
    fn evaluate(&self, genome: &G) -> F {
        self(genome)
    }
}

/// A fitness function that rates every genome as zero.
///
/// Useful when fitness is driven externally and populations are fed to
/// [`GeneticAlgorithm::update`](crate::GeneticAlgorithm::update).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFitness;

impl<G, F: Fitness> FitnessFunction<G, F> for ZeroFitness {
    fn evaluate(&self, _genome: &G) -> F {
        F::zero()
    }
}

/// Produces fresh random genomes for the initial population.
///
/// The factory draws from the generator it is handed, so seeding the run
/// also fixes the initial population. Closures of the form
/// `|rng: &mut dyn RngCore| -> G` implement this trait.
pub trait IndividualFactory<G> {
    /// Creates one random genome.
    fn make_genome(&self, rng: &mut dyn RngCore) -> G;
}

impl<G, T> IndividualFactory<G> for T
where
    T: Fn(&mut dyn RngCore) -> G,
{
    fn make_genome(&self, rng: &mut dyn RngCore) -> G {
        self(rng)
    }
}
