//! Recombination operators.
//!
//! Crossover works on any [`Genome`]: it reads the parents' genes as ordered
//! slices and builds two fresh children. Fitness of the children is left to
//! the orchestrator.
//!
//! # Operators
//!
//! - [`MultiPointCrossover`]: exchange alternating blocks between `n` cut points
//! - [`SinglePointCrossover`]: the `n = 1` case

use crate::error::{GaError, GaResult};
use crate::types::Genome;
use rand::seq::index;
use rand::RngCore;

/// Combines two parent genomes into two offspring.
pub trait CrossoverOperator<G: Genome> {
    /// Crosses `parent1` with `parent2`.
    fn cross(&self, parent1: &G, parent2: &G, rng: &mut dyn RngCore) -> GaResult<(G, G)>;
}

/// Crossover at `n` distinct random points.
///
/// # Algorithm
///
/// 1. Sample `n` distinct cut points from `1..len` (never position 0)
/// 2. Sort them ascending
/// 3. At every cut point, swap the tails of both working genomes
///
/// Successive tail swaps leave the genes exchanged in contiguous alternating
/// blocks. Every gene of both parents ends up in exactly one child at its
/// original position.
///
/// # Complexity
/// O(n · len) time, O(len) space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiPointCrossover {
    points: usize,
}

impl MultiPointCrossover {
    /// Creates a crossover with `points` cut points.
    ///
    /// # Errors
    /// Fails if `points` is zero. The upper bound (`len - 1`) is checked
    /// against the genomes on every [`cross`](CrossoverOperator::cross).
    pub fn new(points: usize) -> GaResult<Self> {
        if points == 0 {
            return Err(GaError::InvalidCrossoverPoints { points, length: 0 });
        }
        Ok(Self { points })
    }

    /// Number of cut points.
    pub fn points(&self) -> usize {
        self.points
    }
}

impl<G: Genome> CrossoverOperator<G> for MultiPointCrossover {
    fn cross(&self, parent1: &G, parent2: &G, rng: &mut dyn RngCore) -> GaResult<(G, G)> {
        let (left, right) = (parent1.genes(), parent2.genes());
        if left.len() != right.len() {
            return Err(GaError::GenomeLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let len = left.len();
        if self.points > len.saturating_sub(1) {
            return Err(GaError::InvalidCrossoverPoints {
                points: self.points,
                length: len,
            });
        }

        let mut cuts: Vec<usize> = index::sample(rng, len - 1, self.points)
            .into_iter()
            .map(|i| i + 1)
            .collect();
        cuts.sort_unstable();

        let mut child1 = left.to_vec();
        let mut child2 = right.to_vec();
        for &cut in &cuts {
            child1[cut..].swap_with_slice(&mut child2[cut..]);
        }

        Ok((G::from_genes(child1), G::from_genes(child2)))
    }
}

/// Crossover at a single random point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinglePointCrossover {
    inner: MultiPointCrossover,
}

impl SinglePointCrossover {
    /// Creates a single-point crossover.
    pub fn new() -> Self {
        Self {
            inner: MultiPointCrossover { points: 1 },
        }
    }
}

impl Default for SinglePointCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genome> CrossoverOperator<G> for SinglePointCrossover {
    fn cross(&self, parent1: &G, parent2: &G, rng: &mut dyn RngCore) -> GaResult<(G, G)> {
        self.inner.cross(parent1, parent2, rng)
    }
}
