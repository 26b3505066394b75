//! Bounded population container and per-generation statistics.

use crate::error::{GaError, GaResult};
use crate::types::{Fitness, FitnessFunction, Individual, IndividualFactory};
use rand::RngCore;

/// An ordered collection of individuals with a fixed capacity.
///
/// A population only grows, one [`add`](Population::add) at a time, until it
/// is full. The orchestrator never edits a population after it has been
/// recorded in the generation history.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G, F> {
    capacity: usize,
    individuals: Vec<Individual<G, F>>,
}

impl<G, F: Fitness> Population<G, F> {
    /// Creates an empty population.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Fills a population by calling `factory` `capacity` times and
    /// evaluating each genome.
    pub fn with_factory(
        capacity: usize,
        factory: &dyn IndividualFactory<G>,
        fitness: &dyn FitnessFunction<G, F>,
        rng: &mut dyn RngCore,
    ) -> Self {
        let individuals = (0..capacity)
            .map(|_| Individual::evaluate(factory.make_genome(rng), fitness))
            .collect();
        Self {
            capacity,
            individuals,
        }
    }

    /// Builds a population from already evaluated individuals.
    ///
    /// # Errors
    /// Returns [`GaError::CapacityExceeded`] if there are more individuals
    /// than `capacity`.
    pub fn from_individuals(
        capacity: usize,
        individuals: Vec<Individual<G, F>>,
    ) -> GaResult<Self> {
        if individuals.len() > capacity {
            return Err(GaError::CapacityExceeded { capacity });
        }
        Ok(Self {
            capacity,
            individuals,
        })
    }

    /// Appends an individual.
    ///
    /// # Errors
    /// Returns [`GaError::CapacityExceeded`] if the population is full.
    pub fn add(&mut self, individual: Individual<G, F>) -> GaResult<()> {
        if self.is_full() {
            return Err(GaError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.individuals.push(individual);
        Ok(())
    }

    /// The maximum number of individuals.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The current number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns `true` once the population has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.individuals.len() >= self.capacity
    }

    /// The individuals in insertion order.
    pub fn individuals(&self) -> &[Individual<G, F>] {
        &self.individuals
    }

    /// Iterates over the individuals in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G, F>> {
        self.individuals.iter()
    }

    /// The individual with the highest fitness.
    ///
    /// Ties go to the individual inserted first.
    pub fn best(&self) -> GaResult<&Individual<G, F>> {
        self.extreme(|candidate, current| candidate > current)
    }

    /// The individual with the lowest fitness.
    ///
    /// Ties go to the individual inserted first.
    pub fn worst(&self) -> GaResult<&Individual<G, F>> {
        self.extreme(|candidate, current| candidate < current)
    }

    /// Arithmetic mean of the fitness values.
    pub fn average(&self) -> GaResult<f64> {
        if self.individuals.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        let total: f64 = self.individuals.iter().map(|i| i.fitness().to_f64()).sum();
        Ok(total / self.individuals.len() as f64)
    }

    /// Linear scan keeping the first individual that no later one beats.
    fn extreme(&self, beats: impl Fn(F, F) -> bool) -> GaResult<&Individual<G, F>> {
        let mut iter = self.individuals.iter();
        let mut chosen = iter.next().ok_or(GaError::EmptyPopulation)?;
        for candidate in iter {
            if beats(candidate.fitness(), chosen.fitness()) {
                chosen = candidate;
            }
        }
        Ok(chosen)
    }
}

impl<'a, G, F> IntoIterator for &'a Population<G, F> {
    type Item = &'a Individual<G, F>;
    type IntoIter = std::slice::Iter<'a, Individual<G, F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use rand::Rng;

    fn make_population(fitnesses: &[f64]) -> Population<Vec<usize>, f64> {
        let mut pop = Population::new(fitnesses.len());
        for (i, &f) in fitnesses.iter().enumerate() {
            pop.add(Individual::new(vec![i], f)).unwrap();
        }
        pop
    }

    #[test]
    fn test_new_is_empty() {
        let pop: Population<Vec<bool>, f64> = Population::new(5);
        assert_eq!(pop.capacity(), 5);
        assert_eq!(pop.len(), 0);
        assert!(pop.is_empty());
        assert!(!pop.is_full());
    }

    #[test]
    fn test_add_until_full() {
        let mut pop = Population::new(2);
        pop.add(Individual::new(vec![0u8], 1.0)).unwrap();
        pop.add(Individual::new(vec![1u8], 2.0)).unwrap();
        assert!(pop.is_full());
        assert_eq!(
            pop.add(Individual::new(vec![2u8], 3.0)),
            Err(GaError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_best_and_worst() {
        let pop = make_population(&[3.0, 9.0, -1.0, 4.0]);
        assert_eq!(pop.best().unwrap().genome(), &vec![1]);
        assert_eq!(pop.worst().unwrap().genome(), &vec![2]);
    }

    #[test]
    fn test_ties_go_to_first() {
        let pop = make_population(&[1.0, 5.0, 5.0, 0.0, 0.0]);
        assert_eq!(pop.best().unwrap().genome(), &vec![1]);
        assert_eq!(pop.worst().unwrap().genome(), &vec![3]);
    }

    #[test]
    fn test_average() {
        let pop = make_population(&[1.0, 2.0, 3.0, 6.0]);
        assert!((pop.average().unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_statistics_fail() {
        let pop: Population<Vec<bool>, f64> = Population::new(3);
        assert_eq!(pop.best(), Err(GaError::EmptyPopulation));
        assert_eq!(pop.worst(), Err(GaError::EmptyPopulation));
        assert_eq!(pop.average(), Err(GaError::EmptyPopulation));
    }

    #[test]
    fn test_nan_never_wins() {
        let pop = make_population(&[1.0, f64::NAN, 2.0]);
        assert_eq!(pop.best().unwrap().genome(), &vec![2]);
        assert_eq!(pop.worst().unwrap().genome(), &vec![0]);
    }

    #[test]
    fn test_with_factory_fills_to_capacity() {
        let factory = |rng: &mut dyn RngCore| -> Vec<bool> {
            (0..6).map(|_| rng.random_bool(0.5)).collect()
        };
        let fitness = |g: &Vec<bool>| g.iter().filter(|&&b| b).count() as f64;
        let mut rng = create_rng(42);

        let pop: Population<Vec<bool>, f64> =
            Population::with_factory(10, &factory, &fitness, &mut rng);

        assert!(pop.is_full());
        for ind in &pop {
            assert_eq!(ind.genome().len(), 6);
            assert!((ind.fitness() - fitness(ind.genome())).abs() < 1e-12);
        }
    }

    #[test]
    fn test_from_individuals() {
        let inds = vec![Individual::new(vec![true], 1.0f64)];
        let pop = Population::from_individuals(3, inds.clone()).unwrap();
        assert_eq!(pop.len(), 1);
        assert!(Population::from_individuals(0, inds).is_err());
    }
}
