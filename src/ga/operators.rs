//! Crossover and mutation operators for binary genomes.
//!
//! Each operator kind has a trait ([`Crossover`], [`Mutation`]) so the
//! engine can be handed a different strategy, plus a default
//! implementation backed by a free function.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: splice both parents at one random point
//!
//! # Mutation Operators
//!
//! - [`flip_mutation`]: flip randomly chosen genes with a given probability
//!
//! Operators never modify their inputs; offspring are new genomes.

use super::types::{Genome, Population};
use crate::error::{EvolveError, Result};
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Recombines two parents into two offspring.
pub trait Crossover {
    /// Returns two children of the same length as the parents.
    fn crossover<R: Rng>(&self, a: &Genome, b: &Genome, rng: &mut R)
        -> Result<(Genome, Genome)>;
}

/// Single-point crossover. See [`single_point_crossover`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SinglePointCrossover;

impl Crossover for SinglePointCrossover {
    fn crossover<R: Rng>(
        &self,
        a: &Genome,
        b: &Genome,
        rng: &mut R,
    ) -> Result<(Genome, Genome)> {
        single_point_crossover(a, b, rng)
    }
}

/// Single-point crossover.
///
/// Picks a split point `p` uniformly from `[1, len - 1]` and returns
/// `(a[..p] ++ b[p..], b[..p] ++ a[p..])`.
///
/// Genomes shorter than two genes cannot be split; they are returned
/// unchanged and no randomness is consumed.
///
/// # Errors
/// [`EvolveError::InvalidInput`] if the parents differ in length.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn single_point_crossover<R: Rng>(
    a: &Genome,
    b: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome)> {
    let n = a.len();
    if n != b.len() {
        return Err(EvolveError::InvalidInput(format!(
            "crossover parents must have equal length, got {} and {}",
            n,
            b.len()
        )));
    }

    if n < 2 {
        return Ok((a.clone(), b.clone()));
    }

    let p = rng.random_range(1..n);
    let (a_head, a_tail) = a.genes().split_at(p);
    let (b_head, b_tail) = b.genes().split_at(p);

    let child1 = a_head.iter().chain(b_tail).copied().collect();
    let child2 = b_head.iter().chain(a_tail).copied().collect();

    Ok((child1, child2))
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Randomly perturbs a genome.
pub trait Mutation {
    /// Returns a mutated copy of `genome`. The input is left untouched.
    fn mutate<R: Rng>(&self, genome: &Genome, rng: &mut R) -> Result<Genome>;
}

/// Gene-flip mutation. See [`flip_mutation`].
///
/// # Examples
///
/// ```
/// use u_evolve::ga::{FlipMutation, Genome, Mutation};
/// use u_evolve::random::create_rng;
///
/// let mut rng = create_rng(3);
/// let genome: Genome = "00000000".parse().unwrap();
/// let mutated = FlipMutation::new(1, 1.0).mutate(&genome, &mut rng).unwrap();
/// assert_eq!(mutated.count_ones(), 1);
/// assert_eq!(genome.count_ones(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlipMutation {
    /// Number of gene positions drawn per mutation.
    pub num: usize,
    /// Probability that a drawn gene is flipped.
    pub probability: f64,
}

impl Default for FlipMutation {
    fn default() -> Self {
        Self {
            num: 1,
            probability: 0.5,
        }
    }
}

impl FlipMutation {
    /// Creates a mutation drawing `num` positions, each flipped with
    /// `probability`.
    pub fn new(num: usize, probability: f64) -> Self {
        Self { num, probability }
    }
}

impl Mutation for FlipMutation {
    fn mutate<R: Rng>(&self, genome: &Genome, rng: &mut R) -> Result<Genome> {
        flip_mutation(genome, self.num, self.probability, rng)
    }
}

/// Gene-flip mutation.
///
/// Repeats `num` times: pick a position uniformly at random, draw
/// `r ∈ [0, 1)`, and flip the gene unless `r > probability`. Positions may
/// repeat, so a gene can be flipped back; at most `num` positions differ
/// from the input.
///
/// # Errors
/// [`EvolveError::InvalidInput`] if the genome is empty or `probability`
/// is not within `[0, 1]`.
///
/// # Complexity
/// O(n + num)
pub fn flip_mutation<R: Rng>(
    genome: &Genome,
    num: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Genome> {
    if genome.is_empty() {
        return Err(EvolveError::InvalidInput(
            "cannot mutate an empty genome".into(),
        ));
    }
    if !(0.0..=1.0).contains(&probability) {
        return Err(EvolveError::InvalidInput(format!(
            "mutation probability must be within [0, 1], got {probability}"
        )));
    }

    let mut genes = genome.genes().to_vec();
    let n = genes.len();
    for _ in 0..num {
        let index = rng.random_range(0..n);
        let r: f64 = rng.random();
        if r <= probability {
            genes[index] = genes[index].flip();
        }
    }

    Ok(Genome::new(genes))
}

/// Checks that every genome in `population` has `expected` genes.
pub(crate) fn check_uniform_length(population: &Population, expected: usize) -> Result<()> {
    match population.iter().find(|g| g.len() != expected) {
        Some(g) => Err(EvolveError::InvalidInput(format!(
            "all genomes in a run must share one length: expected {expected}, found {}",
            g.len()
        ))),
        None => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================
