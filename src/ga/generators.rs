//! Random genome and population generators.

use super::types::{Gene, Genome, Population};
use crate::error::{EvolveError, Result};
use rand::{Rng, RngCore};

/// Generates a genome of `length` genes, each drawn uniformly from {0, 1}.
pub fn generate_genome<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Genome {
    (0..length).map(|_| Gene::from(rng.random_bool(0.5))).collect()
}

/// Generates `size` independent random genomes of `genome_length` genes.
pub fn generate_population<R: Rng + ?Sized>(
    size: usize,
    genome_length: usize,
    rng: &mut R,
) -> Population {
    (0..size)
        .map(|_| generate_genome(genome_length, rng))
        .collect()
}

/// Produces the initial population of a run.
///
/// Implemented by [`RandomPopulation`], by `Vec<Genome>`, which hands out
/// a copy of a fixed starting population, and by closures taking the run's
/// RNG:
///
/// ```
/// use rand::RngCore;
/// use u_evolve::ga::{generate_population, Populate};
/// use u_evolve::random::create_rng;
///
/// let wide = |rng: &mut dyn RngCore| generate_population(4, 32, rng);
/// let population = wide.populate(&mut create_rng(7)).unwrap();
/// assert_eq!(population.len(), 4);
/// ```
pub trait Populate {
    /// Builds the generation-0 population.
    fn populate<R: Rng>(&self, rng: &mut R) -> Result<Population>;
}

/// Uniformly random initial population.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::{Populate, RandomPopulation};
/// use u_evolve::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let population = RandomPopulation::new(10, 8).populate(&mut rng).unwrap();
/// assert_eq!(population.len(), 10);
/// assert!(population.iter().all(|g| g.len() == 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomPopulation {
    /// Number of genomes.
    pub size: usize,
    /// Number of genes per genome.
    pub genome_length: usize,
}

impl RandomPopulation {
    /// Creates a generator for `size` genomes of `genome_length` genes.
    pub fn new(size: usize, genome_length: usize) -> Self {
        Self {
            size,
            genome_length,
        }
    }
}

impl Populate for RandomPopulation {
    fn populate<R: Rng>(&self, rng: &mut R) -> Result<Population> {
        if self.size == 0 {
            return Err(EvolveError::InvalidInput(
                "population size must be at least 1".into(),
            ));
        }
        Ok(generate_population(self.size, self.genome_length, rng))
    }
}

impl Populate for Vec<Genome> {
    fn populate<R: Rng>(&self, _rng: &mut R) -> Result<Population> {
        if self.is_empty() {
            return Err(EvolveError::InvalidInput(
                "initial population must not be empty".into(),
            ));
        }
        Ok(self.clone())
    }
}

impl<F> Populate for F
where
    F: Fn(&mut dyn RngCore) -> Population,
{
    fn populate<R: Rng>(&self, rng: &mut R) -> Result<Population> {
        let population = self(rng);
        if population.is_empty() {
            return Err(EvolveError::InvalidInput(
                "initial population must not be empty".into(),
            ));
        }
        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_genome_length() {
        let mut rng = create_rng(42);
        for len in [0, 1, 8, 100] {
            assert_eq!(generate_genome(len, &mut rng).len(), len);
        }
    }

    #[test]
    fn test_genes_roughly_balanced() {
        let mut rng = create_rng(42);
        let genome = generate_genome(10_000, &mut rng);
        let ones = genome.count_ones();
        assert!(
            (4_500..=5_500).contains(&ones),
            "expected about half ones, got {ones}/10000"
        );
    }

    #[test]
    fn test_population_shape() {
        let mut rng = create_rng(1);
        let population = generate_population(7, 12, &mut rng);
        assert_eq!(population.len(), 7);
        assert!(population.iter().all(|g| g.len() == 12));
    }

    #[test]
    fn test_zero_size_population_rejected() {
        let mut rng = create_rng(1);
        let err = RandomPopulation::new(0, 8).populate(&mut rng).unwrap_err();
        assert!(matches!(err, EvolveError::InvalidInput(_)));
    }

    #[test]
    fn test_fixed_population_is_copied() {
        let mut rng = create_rng(1);
        let fixed: Vec<Genome> = vec!["0101".parse().unwrap(), "1111".parse().unwrap()];
        assert_eq!(fixed.populate(&mut rng).unwrap(), fixed);

        let empty: Vec<Genome> = Vec::new();
        assert!(empty.populate(&mut rng).is_err());
    }

    #[test]
    fn test_closure_population() {
        let mut rng = create_rng(3);
        let half = |rng: &mut dyn RngCore| generate_population(5, 6, rng);
        let population = half.populate(&mut rng).unwrap();
        assert_eq!(population.len(), 5);
        assert!(population.iter().all(|g| g.len() == 6));

        let nothing = |_: &mut dyn RngCore| Population::new();
        assert!(matches!(
            nothing.populate(&mut rng),
            Err(EvolveError::InvalidInput(_))
        ));
    }
}
