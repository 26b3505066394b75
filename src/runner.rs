//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates the generational process:
//! initialization → selection → crossover → mutation → evaluation → repeat.

use crate::config::Options;
use crate::crossover::CrossoverOperator;
use crate::error::{GaError, GaResult};
use crate::mutation::MutationOperator;
use crate::population::Population;
use crate::random::{create_rng, GaRng};
use crate::selection::SelectionOperator;
use crate::termination::TerminationCondition;
use crate::types::{Fitness, FitnessFunction, Genome, Individual, IndividualFactory};
use rand::Rng;

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Index in the generation history (0 is the initial population).
    pub generation: usize,

    /// Highest fitness in the generation.
    pub best: f64,

    /// Lowest fitness in the generation.
    pub worst: f64,

    /// Mean fitness of the generation.
    pub average: f64,
}

/// Outcome of [`GeneticAlgorithm::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary<G, F> {
    /// Number of generations produced by this call.
    pub generations: usize,

    /// The fittest individual across the whole history.
    pub best: Individual<G, F>,

    /// Generation index in which `best` first appeared.
    pub best_generation: usize,

    /// Why the run stopped.
    pub reason: &'static str,
}

/// The entry point to run a genetic algorithm.
///
/// The algorithm owns one selection, one crossover and one mutation
/// strategy, the fitness function, and a single random number generator
/// seeded from [`Options::seed`]. Every stochastic decision draws from that
/// generator in a fixed order, so equal options, operators and initial
/// population reproduce the exact same history.
///
/// # Usage
///
/// ```
/// use genalg::{
///     GenerationLimit, GeneticAlgorithm, InversionMutation, MultiPointCrossover, Options,
///     TournamentSelection,
/// };
/// use rand::{Rng, RngCore};
///
/// let onemax = |genome: &Vec<bool>| genome.iter().filter(|&&b| b).count() as f64;
/// let factory = |rng: &mut dyn RngCore| -> Vec<bool> {
///     (0..16).map(|_| rng.random_bool(0.5)).collect()
/// };
///
/// let mut ga: GeneticAlgorithm<Vec<bool>, f64> = GeneticAlgorithm::new(
///     Options::seeded(20, 0.1, 42),
///     TournamentSelection::new(2, 0.85, true).unwrap(),
///     MultiPointCrossover::new(2).unwrap(),
///     InversionMutation::new(),
///     onemax,
/// )
/// .unwrap();
///
/// ga.initialize_with(&factory).unwrap();
/// let summary = ga.run(&mut GenerationLimit::new(10)).unwrap();
///
/// assert_eq!(summary.generations, 9);
/// assert_eq!(ga.generations().len(), 10);
/// ```
pub struct GeneticAlgorithm<G: Genome, F: Fitness> {
    options: Options,
    selection: Box<dyn SelectionOperator<G, F>>,
    crossover: Box<dyn CrossoverOperator<G>>,
    mutation: Box<dyn MutationOperator<G>>,
    fitness: Box<dyn FitnessFunction<G, F>>,
    rng: GaRng,
    generations: Vec<Population<G, F>>,
}

impl<G: Genome, F: Fitness> std::fmt::Debug for GeneticAlgorithm<G, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("options", &self.options)
            .field("generations", &self.generations.len())
            .finish_non_exhaustive()
    }
}

impl<G: Genome + 'static, F: Fitness> GeneticAlgorithm<G, F> {
    /// Builds an uninitialized algorithm.
    ///
    /// # Errors
    /// Returns the [`Options::validate`] error for an invalid configuration.
    pub fn new<S, C, M, E>(
        options: Options,
        selection: S,
        crossover: C,
        mutation: M,
        fitness: E,
    ) -> GaResult<Self>
    where
        S: SelectionOperator<G, F> + 'static,
        C: CrossoverOperator<G> + 'static,
        M: MutationOperator<G> + 'static,
        E: FitnessFunction<G, F> + 'static,
    {
        options.validate()?;
        log::debug!(
            "creating GA: capacity={}, p_mutation={}, seed={}",
            options.population_capacity,
            options.mutation_probability,
            options.seed
        );
        Ok(Self {
            options,
            selection: Box::new(selection),
            crossover: Box::new(crossover),
            mutation: Box::new(mutation),
            fitness: Box::new(fitness),
            rng: create_rng(options.seed),
            generations: Vec::new(),
        })
    }
}

impl<G: Genome, F: Fitness> GeneticAlgorithm<G, F> {
    /// The run seed.
    pub fn seed(&self) -> u64 {
        self.options.seed
    }

    /// The run configuration.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Every generation so far; index 0 is the initial population.
    pub fn generations(&self) -> &[Population<G, F>] {
        &self.generations
    }

    /// The latest generation, if initialized.
    pub fn current(&self) -> Option<&Population<G, F>> {
        self.generations.last()
    }

    /// Returns `true` once an initial population has been recorded.
    pub fn is_initialized(&self) -> bool {
        !self.generations.is_empty()
    }

    /// Evaluates a genome with the run's fitness function.
    pub fn evaluate(&self, genome: G) -> Individual<G, F> {
        Individual::evaluate(genome, self.fitness.as_ref())
    }

    /// Records `population` as generation 0.
    ///
    /// Calling this again discards the previous history.
    ///
    /// # Errors
    /// Returns [`GaError::PopulationSizeMismatch`] unless the population is
    /// exactly at the configured capacity.
    pub fn initialize(&mut self, population: Population<G, F>) -> GaResult<()> {
        self.check_size(&population)?;
        if !self.generations.is_empty() {
            log::debug!("re-initializing, dropping {} generations", self.generations.len());
        }
        self.generations.clear();
        self.generations.push(population);
        Ok(())
    }

    /// Builds generation 0 from `factory`, drawing from the run generator.
    pub fn initialize_with(
        &mut self,
        factory: &dyn IndividualFactory<G>,
    ) -> GaResult<&Population<G, F>> {
        let population = Population::with_factory(
            self.options.population_capacity,
            factory,
            self.fitness.as_ref(),
            &mut self.rng,
        );
        self.initialize(population)?;
        Ok(&self.generations[0])
    }

    /// Evolves one generation from the latest one and records it.
    ///
    /// # Errors
    /// Returns [`GaError::UninitializedRun`] before [`initialize`](Self::initialize).
    pub fn next(&mut self) -> GaResult<&Population<G, F>> {
        let base = self.generations.last().ok_or(GaError::UninitializedRun)?;
        let population = Breeder::from_parts(
            &self.options,
            self.selection.as_ref(),
            self.crossover.as_ref(),
            self.mutation.as_ref(),
            self.fitness.as_ref(),
        )
        .breed(base, &mut self.rng)?;
        Ok(self.record(population))
    }

    /// Evolves one generation from a caller-supplied population and records it.
    ///
    /// Use this when fitness depends on external factors and the caller
    /// re-rates the latest generation before evolving it.
    ///
    /// # Errors
    /// Returns [`GaError::UninitializedRun`] before [`initialize`](Self::initialize),
    /// and [`GaError::PopulationSizeMismatch`] unless `population` is at
    /// capacity.
    pub fn update(&mut self, population: &Population<G, F>) -> GaResult<&Population<G, F>> {
        if self.generations.is_empty() {
            return Err(GaError::UninitializedRun);
        }
        self.check_size(population)?;
        let next = Breeder::from_parts(
            &self.options,
            self.selection.as_ref(),
            self.crossover.as_ref(),
            self.mutation.as_ref(),
            self.fitness.as_ref(),
        )
        .breed(population, &mut self.rng)?;
        Ok(self.record(next))
    }

    /// Runs [`next`](Self::next) until `termination` signals stop.
    ///
    /// This is the only path that stops on its own. A condition that never
    /// triggers loops forever.
    pub fn run(
        &mut self,
        termination: &mut dyn TerminationCondition<G, F>,
    ) -> GaResult<RunSummary<G, F>> {
        if self.generations.is_empty() {
            return Err(GaError::UninitializedRun);
        }

        let start = self.generations.len();
        loop {
            let population = self.next()?;
            if termination.terminate(population) {
                break;
            }
        }

        let generations = self.generations.len() - start;
        let (best_generation, best) = self.best_overall()?;
        log::info!(
            "GA terminated after {} generations: {} (best fitness {:?} in generation {})",
            generations,
            termination.reason(),
            best.fitness(),
            best_generation
        );

        Ok(RunSummary {
            generations,
            best: best.clone(),
            best_generation,
            reason: termination.reason(),
        })
    }

    /// Fitness statistics for every generation.
    pub fn statistics(&self) -> GaResult<Vec<GenerationStats>> {
        self.generations
            .iter()
            .enumerate()
            .map(|(generation, pop)| {
                Ok(GenerationStats {
                    generation,
                    best: pop.best()?.fitness().to_f64(),
                    worst: pop.worst()?.fitness().to_f64(),
                    average: pop.average()?,
                })
            })
            .collect()
    }

    /// The best individual of each generation.
    pub fn best_per_generation(&self) -> GaResult<Vec<&Individual<G, F>>> {
        self.generations.iter().map(|pop| pop.best()).collect()
    }

    /// The worst individual of each generation.
    pub fn worst_per_generation(&self) -> GaResult<Vec<&Individual<G, F>>> {
        self.generations.iter().map(|pop| pop.worst()).collect()
    }

    /// The fittest individual across the history, with its generation index.
    ///
    /// Ties go to the earliest generation.
    pub fn best_overall(&self) -> GaResult<(usize, &Individual<G, F>)> {
        let mut best: Option<(usize, &Individual<G, F>)> = None;
        for (generation, pop) in self.generations.iter().enumerate() {
            let candidate = pop.best()?;
            let replace = match best {
                None => true,
                Some((_, current)) => candidate.fitness() > current.fitness(),
            };
            if replace {
                best = Some((generation, candidate));
            }
        }
        best.ok_or(GaError::UninitializedRun)
    }

    fn check_size(&self, population: &Population<G, F>) -> GaResult<()> {
        let expected = self.options.population_capacity;
        if population.len() != expected {
            return Err(GaError::PopulationSizeMismatch {
                expected,
                actual: population.len(),
            });
        }
        Ok(())
    }

    fn record(&mut self, population: Population<G, F>) -> &Population<G, F> {
        if log::log_enabled!(log::Level::Debug) {
            if let (Ok(best), Ok(average)) = (population.best(), population.average()) {
                log::debug!(
                    "generation {}: best={:?} average={:.6}",
                    self.generations.len(),
                    best.fitness(),
                    average
                );
            }
        }
        self.generations.push(population);
        &self.generations[self.generations.len() - 1]
    }
}

/// Borrowed view of the operators used to produce one generation.
struct Breeder<'a, G: Genome, F: Fitness> {
    capacity: usize,
    mutation_probability: f64,
    selection: &'a dyn SelectionOperator<G, F>,
    crossover: &'a dyn CrossoverOperator<G>,
    mutation: &'a dyn MutationOperator<G>,
    fitness: &'a dyn FitnessFunction<G, F>,
}

impl<'a, G: Genome, F: Fitness> Breeder<'a, G, F> {
    fn from_parts(
        options: &Options,
        selection: &'a dyn SelectionOperator<G, F>,
        crossover: &'a dyn CrossoverOperator<G>,
        mutation: &'a dyn MutationOperator<G>,
        fitness: &'a dyn FitnessFunction<G, F>,
    ) -> Self {
        Self {
            capacity: options.population_capacity,
            mutation_probability: options.mutation_probability,
            selection,
            crossover,
            mutation,
            fitness,
        }
    }

    /// Select → cross → mutate → evaluate, pair by pair, until full.
    fn breed(&self, base: &Population<G, F>, rng: &mut GaRng) -> GaResult<Population<G, F>> {
        let mut next = Population::new(self.capacity);

        while !next.is_full() {
            let parent1 = self.selection.select(base, rng)?;
            let parent2 = self.selection.select(base, rng)?;

            let (child1, child2) = self
                .crossover
                .cross(parent1.genome(), parent2.genome(), rng)?;

            let mut offspring = [child1, child2];
            for child in offspring.iter_mut() {
                if rng.random::<f64>() < self.mutation_probability {
                    *child = self.mutation.mutate(child, rng);
                }
            }

            // the second child is dropped when only one slot is left
            for child in offspring {
                if next.is_full() {
                    break;
                }
                next.add(Individual::evaluate(child, self.fitness))?;
            }
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossover::{MultiPointCrossover, SinglePointCrossover};
    use crate::mutation::{GeneReplacement, InversionMutation};
    use crate::selection::TournamentSelection;
    use crate::termination::{BestLimit, GenerationLimit};
    use crate::types::ZeroFitness;
    use rand::RngCore;

    // ---- OneMax problem: maximize the number of true bits ----

    fn onemax(genome: &Vec<bool>) -> f64 {
        genome.iter().filter(|&&b| b).count() as f64
    }

    fn bit_factory(len: usize) -> impl Fn(&mut dyn RngCore) -> Vec<bool> {
        move |rng: &mut dyn RngCore| (0..len).map(|_| rng.random_bool(0.5)).collect()
    }

    fn onemax_ga(capacity: usize, p_mutation: f64, seed: u64) -> GeneticAlgorithm<Vec<bool>, f64> {
        GeneticAlgorithm::new(
            Options::seeded(capacity, p_mutation, seed),
            TournamentSelection::new(2, 0.85, true).unwrap(),
            MultiPointCrossover::new(2).unwrap(),
            InversionMutation::new(),
            onemax,
        )
        .unwrap()
    }

    fn fixed_population(capacity: usize, len: usize) -> Population<Vec<bool>, f64> {
        let mut pop = Population::new(capacity);
        for i in 0..capacity {
            let genome: Vec<bool> = (0..len).map(|j| (i * 7 + j * 3) % 5 == 0).collect();
            let fitness = onemax(&genome);
            pop.add(Individual::new(genome, fitness)).unwrap();
        }
        pop
    }

    #[test]
    fn test_next_before_initialize() {
        let mut ga = onemax_ga(10, 0.1, 42);
        assert_eq!(ga.next().unwrap_err(), GaError::UninitializedRun);
        assert_eq!(
            ga.run(&mut GenerationLimit::new(5)).unwrap_err(),
            GaError::UninitializedRun
        );
        let pop = fixed_population(10, 8);
        assert_eq!(ga.update(&pop).unwrap_err(), GaError::UninitializedRun);
        assert!(!ga.is_initialized());
    }

    #[test]
    fn test_initialize_requires_full_population() {
        let mut ga = onemax_ga(10, 0.1, 42);
        assert_eq!(
            ga.initialize(fixed_population(9, 8)),
            Err(GaError::PopulationSizeMismatch {
                expected: 10,
                actual: 9
            })
        );
        assert!(ga.initialize(fixed_population(10, 8)).is_ok());
        assert_eq!(ga.generations().len(), 1);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result: GaResult<GeneticAlgorithm<Vec<bool>, f64>> = GeneticAlgorithm::new(
            Options::seeded(0, 0.1, 1),
            TournamentSelection::default(),
            SinglePointCrossover::new(),
            InversionMutation::new(),
            onemax,
        );
        assert_eq!(result.unwrap_err(), GaError::InvalidCapacity(0));
    }

    #[test]
    fn test_next_produces_full_evaluated_generation() {
        let mut ga = onemax_ga(11, 0.5, 42);
        ga.initialize(fixed_population(11, 12)).unwrap();

        let pop = ga.next().unwrap();
        assert_eq!(pop.len(), 11);
        for ind in pop {
            assert_eq!(ind.genome().len(), 12);
            assert!((ind.fitness() - onemax(ind.genome())).abs() < 1e-12);
        }
        assert_eq!(ga.generations().len(), 2);
    }

    #[test]
    fn test_determinism() {
        let best_sequence = |seed: u64| -> Vec<f64> {
            let mut ga = onemax_ga(10, 0.1, seed);
            ga.initialize(fixed_population(10, 16)).unwrap();
            (0..5)
                .map(|_| ga.next().unwrap().best().unwrap().fitness())
                .collect()
        };

        let first = best_sequence(42);
        let second = best_sequence(42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_identical_histories() {
        let history = || {
            let mut ga = onemax_ga(10, 0.3, 7);
            ga.initialize_with(&bit_factory(20)).unwrap();
            for _ in 0..4 {
                ga.next().unwrap();
            }
            ga.generations().to_vec()
        };
        assert_eq!(history(), history());
    }

    #[test]
    fn test_run_with_generation_limit() {
        let mut ga = onemax_ga(10, 0.1, 42);
        ga.initialize_with(&bit_factory(10)).unwrap();

        let summary = ga.run(&mut GenerationLimit::new(6)).unwrap();

        assert_eq!(summary.generations, 5);
        assert_eq!(ga.generations().len(), 6);
        assert_eq!(summary.reason, "Generation limit reached");
        let (generation, best) = ga.best_overall().unwrap();
        assert_eq!(summary.best_generation, generation);
        assert_eq!(&summary.best, best);
    }

    #[test]
    fn test_run_with_best_limit_stops() {
        // No mutation and a fully-converged population: best never changes.
        let mut ga = GeneticAlgorithm::new(
            Options::seeded(6, 0.0, 3),
            TournamentSelection::default(),
            SinglePointCrossover::new(),
            InversionMutation::new(),
            onemax,
        )
        .unwrap();
        let mut pop = Population::new(6);
        for _ in 0..6 {
            pop.add(Individual::new(vec![true, false, true], 2.0)).unwrap();
        }
        ga.initialize(pop).unwrap();

        let summary = ga.run(&mut BestLimit::<f64>::new(4)).unwrap();
        assert_eq!(summary.generations, 3);
        assert!((summary.best.fitness() - 2.0).abs() < 1e-12);
        assert_eq!(summary.best_generation, 0);
    }

    #[test]
    fn test_onemax_improves() {
        let mut ga = onemax_ga(40, 0.2, 42);
        ga.initialize_with(&bit_factory(20)).unwrap();
        let initial_average = ga.current().unwrap().average().unwrap();

        let summary = ga.run(&mut GenerationLimit::new(60)).unwrap();
        let final_average = ga.current().unwrap().average().unwrap();

        assert!(
            final_average > initial_average,
            "average fitness should rise: {initial_average} -> {final_average}"
        );
        assert!(
            summary.best.fitness() >= 15.0,
            "expected near-optimal 20-bit OneMax, got {}",
            summary.best.fitness()
        );
    }

    #[test]
    fn test_update_from_external_population() {
        let mut ga: GeneticAlgorithm<Vec<u8>, f64> = GeneticAlgorithm::new(
            Options::seeded(8, 0.2, 11),
            TournamentSelection::new(2, 0.7, false).unwrap(),
            MultiPointCrossover::new(1).unwrap(),
            GeneReplacement::new(vec![0u8, 1, 2], 1).unwrap(),
            ZeroFitness,
        )
        .unwrap();
        let factory = |rng: &mut dyn RngCore| -> Vec<u8> {
            (0..5).map(|_| rng.random_range(0..3u8)).collect()
        };
        ga.initialize_with(&factory).unwrap();

        // The caller re-rates the latest generation externally.
        let rated: Vec<Individual<Vec<u8>, f64>> = ga
            .current()
            .unwrap()
            .iter()
            .map(|ind| {
                let score: f64 = ind.genome().iter().map(|&g| f64::from(g)).sum();
                Individual::new(ind.genome().clone(), score)
            })
            .collect();
        let rated = Population::from_individuals(8, rated).unwrap();

        let next = ga.update(&rated).unwrap();
        assert_eq!(next.len(), 8);
        assert!(next.iter().all(|ind| ind.fitness() == 0.0));
        assert_eq!(ga.generations().len(), 2);

        let short = Population::from_individuals(8, rated.individuals()[..4].to_vec()).unwrap();
        assert_eq!(
            ga.update(&short).unwrap_err(),
            GaError::PopulationSizeMismatch {
                expected: 8,
                actual: 4
            }
        );
    }

    #[test]
    fn test_odd_capacity_drops_second_child() {
        let mut ga = onemax_ga(3, 0.0, 5);
        ga.initialize(fixed_population(3, 6)).unwrap();
        for _ in 0..3 {
            let pop = ga.next().unwrap();
            assert_eq!(pop.len(), 3);
            assert!(pop.is_full());
        }
    }

    #[test]
    fn test_statistics() {
        let mut ga = onemax_ga(10, 0.1, 42);
        ga.initialize_with(&bit_factory(12)).unwrap();
        ga.run(&mut GenerationLimit::new(4)).unwrap();

        let stats = ga.statistics().unwrap();
        assert_eq!(stats.len(), ga.generations().len());
        for (i, s) in stats.iter().enumerate() {
            assert_eq!(s.generation, i);
            assert!(s.best >= s.average && s.average >= s.worst);
        }

        let bests = ga.best_per_generation().unwrap();
        let worsts = ga.worst_per_generation().unwrap();
        assert_eq!(bests.len(), stats.len());
        assert_eq!(worsts.len(), stats.len());
        assert!((bests[0].fitness() - stats[0].best).abs() < 1e-12);
    }

    #[test]
    fn test_reinitialize_clears_history() {
        let mut ga = onemax_ga(10, 0.1, 42);
        ga.initialize(fixed_population(10, 8)).unwrap();
        ga.next().unwrap();
        ga.next().unwrap();
        ga.initialize(fixed_population(10, 8)).unwrap();
        assert_eq!(ga.generations().len(), 1);
    }

    #[test]
    fn test_seed_accessor() {
        let ga = onemax_ga(10, 0.1, 1234);
        assert_eq!(ga.seed(), 1234);
        assert_eq!(ga.options().population_capacity, 10);
    }
}
