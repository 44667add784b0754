//! Core data model for the GA framework.
//!
//! A [`Genome`] is a fixed-length sequence of binary [`Gene`]s. A
//! [`Population`] is an ordered list of genomes, and a
//! [`FitnessEvaluator`] assigns each genome an integer score where
//! **higher is better**.

use crate::error::{EvolveError, Result};
use std::fmt;
use std::str::FromStr;

/// A single value of the two-valued gene domain {0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gene {
    /// The `0` allele.
    Zero,
    /// The `1` allele.
    One,
}

impl Gene {
    /// Returns the other value of the domain.
    pub fn flip(self) -> Self {
        match self {
            Gene::Zero => Gene::One,
            Gene::One => Gene::Zero,
        }
    }

    /// Numeric value of the gene (`0` or `1`).
    pub fn value(self) -> u8 {
        match self {
            Gene::Zero => 0,
            Gene::One => 1,
        }
    }
}

impl From<bool> for Gene {
    fn from(bit: bool) -> Self {
        if bit {
            Gene::One
        } else {
            Gene::Zero
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A candidate solution: an ordered, fixed-length sequence of genes.
///
/// Genomes are plain values. Operators never modify a genome they were
/// handed; they build new ones.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Genome;
///
/// let genome: Genome = "10110".parse().unwrap();
/// assert_eq!(genome.len(), 5);
/// assert_eq!(genome.count_ones(), 3);
/// assert_eq!(genome.to_string(), "10110");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    genes: Vec<Gene>,
}

impl Genome {
    /// Wraps a gene vector.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Borrows the genes.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Iterates over the genes in order.
    pub fn iter(&self) -> impl Iterator<Item = Gene> + '_ {
        self.genes.iter().copied()
    }

    /// Number of `One` genes.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g == Gene::One).count()
    }

    /// Consumes the genome and returns its genes.
    pub fn into_genes(self) -> Vec<Gene> {
        self.genes
    }
}

impl From<Vec<Gene>> for Genome {
    fn from(genes: Vec<Gene>) -> Self {
        Self::new(genes)
    }
}

impl FromIterator<Gene> for Genome {
    fn from_iter<T: IntoIterator<Item = Gene>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genes {
            write!(f, "{gene}")?;
        }
        Ok(())
    }
}

impl FromStr for Genome {
    type Err = EvolveError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(Gene::Zero),
                '1' => Ok(Gene::One),
                other => Err(EvolveError::InvalidInput(format!(
                    "genome digit must be '0' or '1', got {other:?}"
                ))),
            })
            .collect()
    }
}

/// An ordered collection of genomes evaluated together in one generation.
///
/// Directly after the engine sorts it, index 0 holds the best genome.
pub type Population = Vec<Genome>;

/// Scores a genome. Higher scores are better.
///
/// Evaluators must be deterministic within a run: the engine may score the
/// same genome several times and expects the same answer. Scores are not
/// cached between generations, so expensive evaluators should memoize
/// internally.
///
/// Fitness-proportionate selection ([`Selection::Roulette`]) additionally
/// requires non-negative scores.
///
/// Any `Fn(&Genome) -> i64` closure is an evaluator:
///
/// ```
/// use u_evolve::ga::{FitnessEvaluator, Genome};
///
/// let leading_ones = |g: &Genome| g.iter().take_while(|b| b.value() == 1).count() as i64;
/// let genome: Genome = "11010".parse().unwrap();
/// assert_eq!(leading_ones.evaluate(&genome), 2);
/// ```
///
/// [`Selection::Roulette`]: super::Selection::Roulette
pub trait FitnessEvaluator: Send + Sync {
    /// Returns the score of `genome`.
    fn evaluate(&self, genome: &Genome) -> i64;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&Genome) -> i64 + Send + Sync,
{
    fn evaluate(&self, genome: &Genome) -> i64 {
        self(genome)
    }
}

/// The OneMax evaluator: the score is the number of `One` genes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountOnes;

impl FitnessEvaluator for CountOnes {
    fn evaluate(&self, genome: &Genome) -> i64 {
        genome.count_ones() as i64
    }
}
