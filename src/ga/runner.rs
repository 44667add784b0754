//! Evolution loop execution.
//!
//! [`Evolution`] orchestrates the complete evolutionary process:
//! initialization → scoring → termination check → selection → crossover →
//! mutation → repeat.

use super::config::{EvolutionConfig, SizePolicy};
use super::generators::Populate;
use super::observer::Observer;
use super::operators::{
    check_uniform_length, Crossover, FlipMutation, Mutation, SinglePointCrossover,
};
use super::selection::{SelectPair, Selection};
use super::types::{FitnessEvaluator, Genome, Population};
use crate::error::{EvolveError, Result};
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The last evaluated population, sorted best first.
    pub population: Population,

    /// Index of the last evaluated generation.
    ///
    /// On success this is the generation in which the target was met; on
    /// exhaustion it is `generation_limit - 1`.
    pub generations: usize,

    /// Score of `population[0]`.
    pub best_fitness: i64,

    /// Whether `best_fitness >= fitness_limit`.
    pub converged: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score of each generation that was reported to the observer.
    ///
    /// A generation found cancelled is not recorded, so a cancelled run
    /// holds `generations` entries and a finished run `generations + 1`.
    pub fitness_history: Vec<i64>,
}

impl EvolutionResult {
    /// The best genome of the final population.
    pub fn best(&self) -> &Genome {
        &self.population[0]
    }
}

/// Executes the evolutionary loop.
///
/// The evaluator and the three operators are strategies: defaults are
/// roulette selection, single-point crossover and single-gene flip
/// mutation, and each can be swapped with a `with_*` method.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{CountOnes, Evolution, EvolutionConfig, RandomPopulation};
///
/// let config = EvolutionConfig::new(8).with_seed(42);
/// let result = Evolution::new(CountOnes, config)
///     .run(&RandomPopulation::new(10, 8))
///     .unwrap();
/// assert!(result.generations < 100);
/// assert_eq!(result.converged, result.best_fitness >= 8);
/// ```
pub struct Evolution<F, S = Selection, C = SinglePointCrossover, M = FlipMutation> {
    fitness: F,
    selection: S,
    crossover: C,
    mutation: M,
    config: EvolutionConfig,
}

impl<F: FitnessEvaluator> Evolution<F> {
    /// Creates an engine with the default operators.
    pub fn new(fitness: F, config: EvolutionConfig) -> Self {
        Self {
            fitness,
            selection: Selection::default(),
            crossover: SinglePointCrossover,
            mutation: FlipMutation::default(),
            config,
        }
    }
}

impl<F, S, C, M> Evolution<F, S, C, M>
where
    F: FitnessEvaluator,
    S: SelectPair,
    C: Crossover,
    M: Mutation,
{
    /// Replaces the selection strategy.
    pub fn with_selection<S2: SelectPair>(self, selection: S2) -> Evolution<F, S2, C, M> {
        Evolution {
            fitness: self.fitness,
            selection,
            crossover: self.crossover,
            mutation: self.mutation,
            config: self.config,
        }
    }

    /// Replaces the crossover operator.
    pub fn with_crossover<C2: Crossover>(self, crossover: C2) -> Evolution<F, S, C2, M> {
        Evolution {
            fitness: self.fitness,
            selection: self.selection,
            crossover,
            mutation: self.mutation,
            config: self.config,
        }
    }

    /// Replaces the mutation operator.
    pub fn with_mutation<M2: Mutation>(self, mutation: M2) -> Evolution<F, S, C, M2> {
        Evolution {
            fitness: self.fitness,
            selection: self.selection,
            crossover: self.crossover,
            mutation,
            config: self.config,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The fitness evaluator.
    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Runs the evolution without an observer.
    pub fn run<P: Populate>(&self, populate: &P) -> Result<EvolutionResult> {
        self.run_with_cancel(populate, None, None)
    }

    /// Runs the evolution, reporting every generation to `observer`.
    pub fn run_with_observer<P: Populate>(
        &self,
        populate: &P,
        observer: &mut dyn Observer,
    ) -> Result<EvolutionResult> {
        self.run_with_cancel(populate, Some(observer), None)
    }

    /// Runs the evolution with an optional observer and cancellation token.
    ///
    /// The random source is seeded from [`EvolutionConfig::seed`].
    /// If `cancel` is set to `true`, the run stops at the next generation
    /// boundary and returns the last evaluated population.
    pub fn run_with_cancel<P: Populate>(
        &self,
        populate: &P,
        observer: Option<&mut dyn Observer>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult> {
        let mut rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        self.run_with_rng(populate, &mut rng, observer, cancel)
    }

    /// Runs the evolution with an injected random source.
    ///
    /// # Errors
    /// - [`EvolveError::InvalidConfig`] if the configuration is invalid
    /// - [`EvolveError::InvalidInput`] if the initial population is empty or
    ///   its genomes differ in length
    /// - any error raised by the selection, crossover or mutation operators
    pub fn run_with_rng<P: Populate, R: Rng>(
        &self,
        populate: &P,
        rng: &mut R,
        mut observer: Option<&mut dyn Observer>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult> {
        self.config.validate()?;
        let config = &self.config;

        // 1. Initialize population
        let mut population = populate.populate(rng)?;
        if population.is_empty() {
            return Err(EvolveError::InvalidInput(
                "initial population must not be empty".into(),
            ));
        }
        check_uniform_length(&population, population[0].len())?;

        let mut fitness_history = Vec::with_capacity(config.generation_limit);
        let mut cancelled = false;
        let mut generation = 0;

        // 2. Evolutionary loop
        for gen in 0..config.generation_limit {
            generation = gen;

            // Sort population by fitness (descending = best first)
            let best_fitness = self.sort_population(&mut population);

            // Check cancellation
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    log::info!("evolution cancelled at generation {gen}");
                    break;
                }
            }
            fitness_history.push(best_fitness);

            if let Some(obs) = observer.as_mut() {
                obs.on_generation(&population, gen, &self.fitness);
            }

            log::debug!(
                "generation {gen}: best fitness {best_fitness}, population {}",
                population.len()
            );

            // Termination check
            if best_fitness >= config.fitness_limit {
                log::info!(
                    "fitness limit {} reached at generation {gen}",
                    config.fitness_limit
                );
                return Ok(EvolutionResult {
                    population,
                    generations: gen,
                    best_fitness,
                    converged: true,
                    cancelled: false,
                    fitness_history,
                });
            }

            // No successor is needed after the last evaluated generation.
            if gen + 1 == config.generation_limit {
                break;
            }

            population = self.next_generation(&population, rng)?;
        }

        let best_fitness = self.fitness.evaluate(&population[0]);
        if !cancelled {
            log::info!(
                "generation limit {} exhausted, best fitness {best_fitness} below limit {}",
                config.generation_limit,
                config.fitness_limit
            );
        }

        Ok(EvolutionResult {
            population,
            generations: generation,
            best_fitness,
            converged: false,
            cancelled,
            fitness_history,
        })
    }

    /// Builds the next generation from a population sorted best first.
    fn next_generation<R: Rng>(&self, population: &[Genome], rng: &mut R) -> Result<Population> {
        let size = population.len();
        let elites = self.config.elite_count.min(size);
        let pairs = self.config.pair_count(size, elites);
        let target = match self.config.size_policy {
            SizePolicy::Preserve => size,
            SizePolicy::Shrink => elites + 2 * pairs,
        };

        // Elite preservation
        let mut next_gen: Population = Vec::with_capacity(elites + 2 * pairs);
        next_gen.extend_from_slice(&population[..elites]);

        // Generate offspring
        for _ in 0..pairs {
            let (a, b) = self.selection.select_pair(population, &self.fitness, rng)?;
            let (child_a, child_b) = self.crossover.crossover(a, b, rng)?;
            next_gen.push(self.mutation.mutate(&child_a, rng)?);
            next_gen.push(self.mutation.mutate(&child_b, rng)?);
        }

        next_gen.truncate(target);
        if next_gen.is_empty() {
            return Err(EvolveError::InvalidInput(
                "next generation is empty: keep at least one elite or breed offspring".into(),
            ));
        }
        Ok(next_gen)
    }

    /// Sorts `population` by descending fitness and returns the best score.
    ///
    /// Every genome is scored exactly once. The sort is stable.
    fn sort_population(&self, population: &mut Population) -> i64 {
        let scores = self.score_all(population);
        let mut scored: Vec<(i64, Genome)> =
            scores.into_iter().zip(population.drain(..)).collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let best = scored[0].0;
        population.extend(scored.into_iter().map(|(_, genome)| genome));
        best
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, population: &[Genome]) -> Vec<i64> {
        use rayon::prelude::*;

        let fitness = &self.fitness;
        if self.config.parallel {
            population
                .par_iter()
                .map(|genome| fitness.evaluate(genome))
                .collect()
        } else {
            population
                .iter()
                .map(|genome| self.fitness.evaluate(genome))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, population: &[Genome]) -> Vec<i64> {
        population
            .iter()
            .map(|genome| self.fitness.evaluate(genome))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{CountOnes, RandomPopulation};

    fn genome(s: &str) -> Genome {
        s.parse().unwrap()
    }

    #[test]
    fn test_sort_population_descending() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(4));
        let mut pop = vec![genome("0001"), genome("1111"), genome("0000"), genome("0111")];
        let best = engine.sort_population(&mut pop);
        assert_eq!(best, 4);
        let scores: Vec<usize> = pop.iter().map(Genome::count_ones).collect();
        assert_eq!(scores, vec![4, 3, 1, 0]);
    }

    #[test]
    fn test_sort_population_stable() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(4));
        let mut pop = vec![genome("10"), genome("01"), genome("11")];
        engine.sort_population(&mut pop);
        assert_eq!(pop, vec![genome("11"), genome("10"), genome("01")]);
    }

    #[test]
    fn test_next_generation_keeps_elites() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(8));
        let mut rng = create_rng(42);
        let mut pop = RandomPopulation::new(10, 8).populate(&mut rng).unwrap();
        engine.sort_population(&mut pop);

        let next = engine.next_generation(&pop, &mut rng).unwrap();
        assert_eq!(next.len(), 10);
        assert_eq!(next[0], pop[0]);
        assert_eq!(next[1], pop[1]);
        assert!(next.iter().all(|g| g.len() == 8));
    }

    #[test]
    fn test_next_generation_odd_sizes() {
        let mut rng = create_rng(42);
        let mut pop = RandomPopulation::new(9, 6).populate(&mut rng).unwrap();
        // Guarantee positive weights for the roulette wheel.
        pop[0] = genome("111111");

        let preserve = Evolution::new(CountOnes, EvolutionConfig::new(6));
        assert_eq!(preserve.next_generation(&pop, &mut rng).unwrap().len(), 9);

        let shrink = Evolution::new(
            CountOnes,
            EvolutionConfig::new(6).with_size_policy(SizePolicy::Shrink),
        );
        assert_eq!(shrink.next_generation(&pop, &mut rng).unwrap().len(), 8);
    }

    #[test]
    fn test_single_genome_population() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(4).with_generation_limit(5));
        let result = engine.run(&vec![genome("0101")]).unwrap();
        assert_eq!(result.population, vec![genome("0101")]);
        assert_eq!(result.generations, 4);
        assert!(!result.converged);
    }

    #[test]
    fn test_initial_population_length_mismatch() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(4));
        let err = engine
            .run(&vec![genome("0101"), genome("01")])
            .unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_config() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(4).with_generation_limit(0));
        let err = engine.run(&RandomPopulation::new(4, 4)).unwrap_err();
        assert!(matches!(err, EvolveError::InvalidConfig(_)));
    }

    #[test]
    fn test_all_zero_population_fails_in_roulette() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(4));
        let pop = vec![genome("0000"); 4];
        assert_eq!(engine.run(&pop).unwrap_err(), EvolveError::DegenerateWeights);
    }

    #[test]
    fn test_empty_genomes_fail_in_mutation() {
        let engine = Evolution::new(CountOnes, EvolutionConfig::new(1))
            .with_selection(Selection::Tournament(2));
        let pop = vec![Genome::default(); 4];
        let err = engine.run(&pop).unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));
    }
}
