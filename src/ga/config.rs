//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{EvolveError, Result};

/// How the next generation is sized when the offspring pairs do not
/// exactly fill it (odd population sizes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizePolicy {
    /// Keep the population size constant. An extra pair is bred and its
    /// surplus second child dropped.
    #[default]
    Preserve,

    /// Breed exactly `(size - elites) / 2` pairs. An odd population loses
    /// one genome in the first generation and stays even afterwards.
    Shrink,
}

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.generation_limit, 100);
/// assert_eq!(config.elite_count, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{EvolutionConfig, SizePolicy};
///
/// let config = EvolutionConfig::new(8)
///     .with_generation_limit(200)
///     .with_size_policy(SizePolicy::Shrink)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Target score. The run succeeds once the best genome of a
    /// generation scores at least this much.
    pub fitness_limit: i64,

    /// Maximum number of generations to evaluate.
    pub generation_limit: usize,

    /// Number of top genomes copied unchanged into the next generation.
    pub elite_count: usize,

    /// Sizing rule for the next generation.
    pub size_policy: SizePolicy,

    /// Whether to score genomes in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            fitness_limit: i64::MAX,
            generation_limit: 100,
            elite_count: 2,
            size_policy: SizePolicy::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Creates a default configuration with the given fitness target.
    pub fn new(fitness_limit: i64) -> Self {
        Self {
            fitness_limit,
            ..Self::default()
        }
    }

    /// Sets the fitness target.
    pub fn with_fitness_limit(mut self, limit: i64) -> Self {
        self.fitness_limit = limit;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_generation_limit(mut self, n: usize) -> Self {
        self.generation_limit = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the odd-size policy.
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`EvolveError::InvalidConfig`] if any parameter is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.generation_limit == 0 {
            return Err(EvolveError::InvalidConfig(
                "generation_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of offspring pairs bred for a population of `size` genomes
    /// whose first `elites` genomes are carried over.
    pub(crate) fn pair_count(&self, size: usize, elites: usize) -> usize {
        let open = size - elites;
        match self.size_policy {
            SizePolicy::Preserve => open.div_ceil(2),
            SizePolicy::Shrink => open / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.fitness_limit, i64::MAX);
        assert_eq!(config.generation_limit, 100);
        assert_eq!(config.elite_count, 2);
        assert_eq!(config.size_policy, SizePolicy::Preserve);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::new(8)
            .with_generation_limit(50)
            .with_elite_count(4)
            .with_size_policy(SizePolicy::Shrink)
            .with_parallel(true)
            .with_seed(42)
            .with_fitness_limit(9);

        assert_eq!(config.fitness_limit, 9);
        assert_eq!(config.generation_limit, 50);
        assert_eq!(config.elite_count, 4);
        assert_eq!(config.size_policy, SizePolicy::Shrink);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(EvolutionConfig::new(8).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = EvolutionConfig::new(8).with_generation_limit(0);
        assert!(matches!(
            config.validate(),
            Err(EvolveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_pair_count_even() {
        let config = EvolutionConfig::default();
        assert_eq!(config.pair_count(10, 2), 4);
        let shrink = config.with_size_policy(SizePolicy::Shrink);
        assert_eq!(shrink.pair_count(10, 2), 4);
    }

    #[test]
    fn test_pair_count_odd() {
        let config = EvolutionConfig::default();
        assert_eq!(config.pair_count(9, 2), 4);
        let shrink = config.with_size_policy(SizePolicy::Shrink);
        // floor(9 / 2) - 1
        assert_eq!(shrink.pair_count(9, 2), 3);
    }

    #[test]
    fn test_pair_count_all_elites() {
        let config = EvolutionConfig::default();
        assert_eq!(config.pair_count(2, 2), 0);
        assert_eq!(config.pair_count(1, 1), 0);
    }
}
