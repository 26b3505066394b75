//! Termination conditions
//!
//! A termination condition observes every newly produced population and
//! decides when [`GeneticAlgorithm::run`](crate::GeneticAlgorithm::run)
//! stops. Conditions are stateful: use one instance per run, or call
//! [`reset`](TerminationCondition::reset) before reusing it.
//!
//! # Off-by-one
//!
//! Both [`GenerationLimit`] and [`BestLimit`] report `true` once their
//! counter reaches `limit - 1`, one generation before the nominal limit.
//! Pick `limit` with that in mind.

use crate::population::Population;
use crate::types::Fitness;

/// Decides whether the evolutionary loop should stop.
pub trait TerminationCondition<G, F: Fitness> {
    /// Observes the latest population and returns `true` to stop.
    fn terminate(&mut self, population: &Population<G, F>) -> bool;

    /// Human-readable reason, used when logging the end of a run.
    fn reason(&self) -> &'static str;

    /// Returns the condition to its initial state.
    fn reset(&mut self);
}

/// Stop after a fixed number of generations.
///
/// Counts calls to `terminate` and stops once the count reaches
/// `limit - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationLimit {
    limit: usize,
    current: usize,
}

impl GenerationLimit {
    /// Create a new generation limit
    pub fn new(limit: usize) -> Self {
        Self { limit, current: 0 }
    }

    /// Number of populations observed so far.
    pub fn current(&self) -> usize {
        self.current
    }
}

impl<G, F: Fitness> TerminationCondition<G, F> for GenerationLimit {
    fn terminate(&mut self, _population: &Population<G, F>) -> bool {
        self.current += 1;
        self.current >= self.limit.saturating_sub(1)
    }

    fn reason(&self) -> &'static str {
        "Generation limit reached"
    }

    fn reset(&mut self) {
        self.current = 0;
    }
}

/// Stop once the best fitness has plateaued.
///
/// The first observed population records its best fitness and counts 1.
/// Every later population whose best fitness equals the recorded value
/// increments the count; any other value becomes the new record and resets
/// the count to 0. Stops once the count reaches `limit - 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct BestLimit<F> {
    limit: usize,
    current: usize,
    fittest: Option<F>,
}

impl<F: Fitness> BestLimit<F> {
    /// Create a new plateau limit
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            current: 0,
            fittest: None,
        }
    }

    /// Length of the current plateau.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The best fitness being tracked, if any population was observed.
    pub fn fittest(&self) -> Option<F> {
        self.fittest
    }
}

impl<G, F: Fitness> TerminationCondition<G, F> for BestLimit<F> {
    fn terminate(&mut self, population: &Population<G, F>) -> bool {
        let Ok(best) = population.best() else {
            log::warn!("BestLimit observed an empty population");
            return false;
        };
        let best = best.fitness();

        match self.fittest {
            Some(recorded) if recorded == best => self.current += 1,
            Some(_) => {
                self.fittest = Some(best);
                self.current = 0;
            }
            None => {
                self.fittest = Some(best);
                self.current = 1;
            }
        }

        self.current >= self.limit.saturating_sub(1)
    }

    fn reason(&self) -> &'static str {
        "Best fitness plateaued"
    }

    fn reset(&mut self) {
        self.current = 0;
        self.fittest = None;
    }
}

/// Stop as soon as any inner condition stops.
///
/// Every inner condition observes every population, so their internal state
/// stays in step with the run.
pub struct AnyOf<G, F: Fitness> {
    conditions: Vec<Box<dyn TerminationCondition<G, F>>>,
    triggered: Option<&'static str>,
}

impl<G, F: Fitness> AnyOf<G, F> {
    /// Create an empty combinator
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            triggered: None,
        }
    }

    /// Adds a condition.
    pub fn with(mut self, condition: impl TerminationCondition<G, F> + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }
}

impl<G, F: Fitness> Default for AnyOf<G, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, F: Fitness> std::fmt::Debug for AnyOf<G, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyOf")
            .field("conditions", &self.conditions.len())
            .field("triggered", &self.triggered)
            .finish()
    }
}

impl<G, F: Fitness> TerminationCondition<G, F> for AnyOf<G, F> {
    fn terminate(&mut self, population: &Population<G, F>) -> bool {
        let mut stop = false;
        for condition in &mut self.conditions {
            if condition.terminate(population) && !stop {
                stop = true;
                self.triggered = Some(condition.reason());
            }
        }
        stop
    }

    fn reason(&self) -> &'static str {
        self.triggered.unwrap_or("No condition triggered")
    }

    fn reset(&mut self) {
        self.triggered = None;
        for condition in &mut self.conditions {
            condition.reset();
        }
    }
}
