//! Mutation operators.
//!
//! - [`InversionMutation`]: flip each gene independently (bit-flip)
//! - [`GeneReplacement`]: overwrite `n` random positions with different
//!   values from a gene pool
//!
//! Both return a new genome and leave fitness to the orchestrator.

use crate::error::{GaError, GaResult};
use crate::types::Genome;
use rand::seq::index;
use rand::{Rng, RngCore};

/// Perturbs a genome.
pub trait MutationOperator<G: Genome> {
    /// Returns a mutated copy of `genome`.
    fn mutate(&self, genome: &G, rng: &mut dyn RngCore) -> G;
}

/// A gene over a two-valued alphabet.
pub trait Invertible {
    /// The other value of the alphabet.
    fn invert(&self) -> Self;
}

impl Invertible for bool {
    fn invert(&self) -> Self {
        !*self
    }
}

macro_rules! impl_invertible {
    ($($t:ty),*) => {
        $(
            /// `1` becomes `0`; anything else becomes `1`.
            impl Invertible for $t {
                fn invert(&self) -> Self {
                    if *self == 1 {
                        0
                    } else {
                        1
                    }
                }
            }
        )*
    };
}

impl_invertible!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

/// Bit-flip mutation.
///
/// Every gene flips independently with probability `p_inversion`. By default
/// `p_inversion = 1 / len`, so one gene flips per call in expectation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InversionMutation {
    probability: Option<f64>,
}

impl InversionMutation {
    /// Creates a bit-flip mutation with the `1 / len` default rate.
    pub fn new() -> Self {
        Self { probability: None }
    }

    /// Creates a bit-flip mutation with a fixed per-gene rate.
    pub fn with_probability(probability: f64) -> GaResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GaError::InvalidProbability {
                name: "inversion probability",
                value: probability,
            });
        }
        Ok(Self {
            probability: Some(probability),
        })
    }

    /// Per-gene flip rate for a genome of `len` genes.
    pub fn probability_for(&self, len: usize) -> f64 {
        match self.probability {
            Some(p) => p,
            None if len == 0 => 0.0,
            None => 1.0 / len as f64,
        }
    }
}

impl<G> MutationOperator<G> for InversionMutation
where
    G: Genome,
    G::Gene: Invertible,
{
    fn mutate(&self, genome: &G, rng: &mut dyn RngCore) -> G {
        let p = self.probability_for(genome.len());
        let genes = genome
            .genes()
            .iter()
            .map(|gene| {
                if rng.random::<f64>() < p {
                    gene.invert()
                } else {
                    gene.clone()
                }
            })
            .collect();
        G::from_genes(genes)
    }
}

/// Gene-replacement mutation.
///
/// Picks `n` distinct positions and replaces each gene with a value drawn
/// uniformly from the gene pool, redrawing until it differs from the current
/// value. Every selected position is guaranteed to change.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneReplacement<T> {
    pool: Vec<T>,
    mutations: usize,
}

impl<T: Clone + PartialEq> GeneReplacement<T> {
    /// Creates a gene-replacement mutation.
    ///
    /// # Errors
    /// Fails if `mutations` is zero or the pool offers fewer than two
    /// distinct values, since the redraw loop could then never finish.
    pub fn new(pool: Vec<T>, mutations: usize) -> GaResult<Self> {
        if mutations == 0 {
            return Err(GaError::InvalidConfiguration(
                "gene replacement needs at least one mutation".into(),
            ));
        }
        let distinct = pool.iter().skip(1).any(|v| *v != pool[0]);
        if !distinct {
            return Err(GaError::InvalidConfiguration(
                "gene pool must contain at least two distinct values".into(),
            ));
        }
        Ok(Self { pool, mutations })
    }

    /// The candidate gene values.
    pub fn pool(&self) -> &[T] {
        &self.pool
    }

    /// Number of positions replaced per call.
    pub fn mutations(&self) -> usize {
        self.mutations
    }
}

impl<G: Genome> MutationOperator<G> for GeneReplacement<G::Gene> {
    fn mutate(&self, genome: &G, rng: &mut dyn RngCore) -> G {
        let mut genes = genome.genes().to_vec();
        let count = self.mutations.min(genes.len());

        for pos in index::sample(rng, genes.len(), count) {
            let replacement = loop {
                let candidate = &self.pool[rng.random_range(0..self.pool.len())];
                if *candidate != genes[pos] {
                    break candidate.clone();
                }
            };
            log::trace!("replacing gene {pos}: {:?} -> {:?}", genes[pos], replacement);
            genes[pos] = replacement;
        }

        G::from_genes(genes)
    }
}
