//! Parent selection for the evolution loop.
//!
//! Every strategy draws a *pair* of parents with replacement from the
//! current population, favouring higher scores. The pair is borrowed from
//! the population, so callers clone only what they breed from.
//!
//! Roulette weights are the raw scores, which therefore must be
//! non-negative with a positive sum. Tournament and rank selection only
//! compare scores and accept any sign.

use super::types::{FitnessEvaluator, Genome};
use crate::error::{EvolveError, Result};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Chooses a pair of parents from a population.
///
/// Both parents are borrowed from `population`, so a selection can never
/// return a genome that is not a member of it. The two draws are
/// independent and may return the same genome twice.
pub trait SelectPair {
    /// Draws two parents.
    fn select_pair<'a, F, R>(
        &self,
        population: &'a [Genome],
        fitness: &F,
        rng: &mut R,
    ) -> Result<(&'a Genome, &'a Genome)>
    where
        F: FitnessEvaluator + ?Sized,
        R: Rng;
}

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// // Roulette wheel (fitness-proportionate), the default
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Roulette);
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// A genome is drawn with probability `fitness(g) / Σ fitness`.
    /// Requires non-negative scores with a positive sum.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    ///
    /// # Complexity
    /// O(n) per pair
    #[default]
    Roulette,

    /// Tournament selection: pick `k` genomes at random, select the best.
    ///
    /// Higher `k` = stronger selection pressure. Accepts any scores.
    ///
    /// # Complexity
    /// O(k) per draw
    Tournament(usize),

    /// Linear rank-based selection.
    ///
    /// Genomes are ranked by fitness and the best of `n` receives weight
    /// `n`, the worst weight `1`. Accepts any scores.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per pair
    Rank,
}

impl SelectPair for Selection {
    fn select_pair<'a, F, R>(
        &self,
        population: &'a [Genome],
        fitness: &F,
        rng: &mut R,
    ) -> Result<(&'a Genome, &'a Genome)>
    where
        F: FitnessEvaluator + ?Sized,
        R: Rng,
    {
        if population.is_empty() {
            return Err(EvolveError::InvalidInput(
                "cannot select from an empty population".into(),
            ));
        }

        let (i, j) = match self {
            Selection::Roulette => roulette(population, fitness, rng)?,
            Selection::Tournament(k) => (
                tournament(population, fitness, *k, rng),
                tournament(population, fitness, *k, rng),
            ),
            Selection::Rank => rank(population, fitness, rng)?,
        };

        Ok((&population[i], &population[j]))
    }
}

/// Roulette wheel selection with the raw scores as weights.
fn roulette<F, R>(population: &[Genome], fitness: &F, rng: &mut R) -> Result<(usize, usize)>
where
    F: FitnessEvaluator + ?Sized,
    R: Rng,
{
    let weights: Vec<i64> = population.iter().map(|g| fitness.evaluate(g)).collect();

    if let Some(&score) = weights.iter().find(|&&w| w < 0) {
        return Err(EvolveError::NegativeFitness { score });
    }
    if weights.iter().all(|&w| w == 0) {
        return Err(EvolveError::DegenerateWeights);
    }

    // Large scores can overflow an i64 running total; spin a u128 wheel then.
    let fits_i64 = weights
        .iter()
        .try_fold(0i64, |acc, &w| acc.checked_add(w))
        .is_some();
    if fits_i64 {
        let wheel = WeightedIndex::new(&weights).map_err(wheel_error)?;
        Ok((wheel.sample(rng), wheel.sample(rng)))
    } else {
        log::debug!("roulette weights overflow i64, using u128 wheel");
        let wide: Vec<u128> = weights.iter().map(|&w| w as u128).collect();
        let wheel = WeightedIndex::new(&wide).map_err(wheel_error)?;
        Ok((wheel.sample(rng), wheel.sample(rng)))
    }
}

fn wheel_error(err: impl std::fmt::Display) -> EvolveError {
    EvolveError::InvalidInput(format!("roulette wheel rejected weights: {err}"))
}

/// Tournament selection: pick k random genomes, return the fittest.
fn tournament<F, R>(population: &[Genome], fitness: &F, k: usize, rng: &mut R) -> usize
where
    F: FitnessEvaluator + ?Sized,
    R: Rng,
{
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    let mut best_score = fitness.evaluate(&population[best_idx]);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let score = fitness.evaluate(&population[idx]);
        if score > best_score {
            best_idx = idx;
            best_score = score;
        }
    }
    best_idx
}

/// Linear ranking: rank 0 (best) gets weight n, the last rank weight 1.
fn rank<F, R>(population: &[Genome], fitness: &F, rng: &mut R) -> Result<(usize, usize)>
where
    F: FitnessEvaluator + ?Sized,
    R: Rng,
{
    let n = population.len();
    if n == 1 {
        return Ok((0, 0));
    }

    let mut indexed: Vec<(usize, i64)> = population
        .iter()
        .enumerate()
        .map(|(i, g)| (i, fitness.evaluate(g)))
        .collect();
    indexed.sort_by(|a, b| b.1.cmp(&a.1));

    let weights: Vec<usize> = (1..=n).rev().collect();
    let wheel = WeightedIndex::new(&weights).map_err(|err| {
        EvolveError::InvalidInput(format!("rank weights rejected: {err}"))
    })?;

    Ok((
        indexed[wheel.sample(rng)].0,
        indexed[wheel.sample(rng)].0,
    ))
}
