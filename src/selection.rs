//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::{GaError, GaResult};
use crate::population::Population;
use crate::types::{Fitness, Individual};
use rand::seq::index;
use rand::{Rng, RngCore};

/// Chooses one parent from a population.
pub trait SelectionOperator<G, F: Fitness> {
    /// Selects a single individual from `population`.
    fn select<'a>(
        &self,
        population: &'a Population<G, F>,
        rng: &mut dyn RngCore,
    ) -> GaResult<&'a Individual<G, F>>;
}

/// Tournament selection with a probabilistic winner.
///
/// A pool of `tournament_size` individuals is drawn. With probability
/// `probability` the fittest pool member wins. Otherwise the fittest member
/// is removed from the pool and a uniform pick among the rest wins, which
/// keeps the fallback leaning toward strong candidates instead of the whole
/// population.
///
/// Higher `tournament_size` and `probability` give stronger selection
/// pressure.
///
/// # Examples
///
/// ```
/// use genalg::TournamentSelection;
///
/// // Pool of 3, fittest wins 85% of the time, sampled without replacement.
/// let sel = TournamentSelection::new(3, 0.85, false).unwrap();
/// assert_eq!(sel.tournament_size(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TournamentSelection {
    tournament_size: usize,
    probability: f64,
    with_replacement: bool,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: 2,
            probability: 0.5,
            with_replacement: true,
        }
    }
}

impl TournamentSelection {
    /// Creates a tournament selector.
    ///
    /// # Errors
    /// Fails if `tournament_size` is zero or `probability` is outside
    /// `[0, 1]`. Whether the size fits the population is checked on every
    /// [`select`](SelectionOperator::select).
    pub fn new(tournament_size: usize, probability: f64, with_replacement: bool) -> GaResult<Self> {
        if tournament_size == 0 {
            return Err(GaError::InvalidTournamentSize {
                size: 0,
                population: 0,
            });
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(GaError::InvalidProbability {
                name: "tournament probability",
                value: probability,
            });
        }
        Ok(Self {
            tournament_size,
            probability,
            with_replacement,
        })
    }

    /// Number of individuals competing in each tournament.
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Probability that the fittest pool member wins.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Whether pool members are drawn independently (and may repeat).
    pub fn with_replacement(&self) -> bool {
        self.with_replacement
    }

    /// Draws the tournament pool as population indices.
    ///
    /// Without replacement the pool keeps population order.
    fn draw_pool(&self, n: usize, rng: &mut dyn RngCore) -> Vec<usize> {
        if self.with_replacement {
            (0..self.tournament_size)
                .map(|_| rng.random_range(0..n))
                .collect()
        } else {
            let mut pool = index::sample(rng, n, self.tournament_size).into_vec();
            pool.sort_unstable();
            pool
        }
    }
}

impl<G, F: Fitness> SelectionOperator<G, F> for TournamentSelection {
    fn select<'a>(
        &self,
        population: &'a Population<G, F>,
        rng: &mut dyn RngCore,
    ) -> GaResult<&'a Individual<G, F>> {
        let members = population.individuals();
        let n = members.len();
        if n == 0 {
            return Err(GaError::EmptyPopulation);
        }
        if self.tournament_size > n {
            return Err(GaError::InvalidTournamentSize {
                size: self.tournament_size,
                population: n,
            });
        }

        let mut pool = self.draw_pool(n, rng);

        // first-encountered wins ties
        let mut winner = 0;
        for (slot, &idx) in pool.iter().enumerate().skip(1) {
            if members[idx].fitness() > members[pool[winner]].fitness() {
                winner = slot;
            }
        }

        if pool.len() == 1 || rng.random::<f64>() < self.probability {
            return Ok(&members[pool[winner]]);
        }

        pool.remove(winner);
        let fallback = pool[rng.random_range(0..pool.len())];
        Ok(&members[fallback])
    }
}
