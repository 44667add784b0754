//! Error taxonomy for the evolution engine and its operators.

use thiserror::Error;

/// Errors raised by generators, operators and the evolution loop.
///
/// Running out of generations is not an error; see
/// [`EvolutionResult::converged`](crate::ga::EvolutionResult::converged).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvolveError {
    /// An operator received arguments outside its contract
    /// (mismatched genome lengths, empty genome, empty population, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fitness-proportionate selection was asked to draw from a population
    /// whose scores are all zero.
    #[error("degenerate weights: fitness scores sum to zero")]
    DegenerateWeights,

    /// Fitness-proportionate selection received a negative score.
    #[error("negative fitness score {score} cannot be used as a selection weight")]
    NegativeFitness {
        /// The offending score.
        score: i64,
    },

    /// The engine configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EvolveError>;
