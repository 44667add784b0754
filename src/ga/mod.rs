//! Genetic Algorithm framework over binary genomes.
//!
//! A generic GA engine built on trait-based abstractions. Callers plug in
//! a [`FitnessEvaluator`] and, optionally, their own [`SelectPair`],
//! [`Crossover`] and [`Mutation`] strategies.
//!
//! # Core Traits
//!
//! - [`FitnessEvaluator`]: Scores a genome (higher is better)
//! - [`Populate`]: Builds the initial population
//! - [`SelectPair`], [`Crossover`], [`Mutation`]: Genetic operators
//! - [`Observer`]: Per-generation reporting hook
//!
//! # Key Types
//!
//! - [`Genome`], [`Gene`], [`Population`]: Candidate representation
//! - [`EvolutionConfig`]: Fitness target, generation cap, elitism, seed
//! - [`Evolution`]: Executes the evolutionary loop
//! - [`EvolutionResult`]: Final population and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and flip mutation
//! - [`generators`]: Random genomes and populations
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod generators;
mod observer;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{EvolutionConfig, SizePolicy};
pub use generators::{generate_genome, generate_population, Populate, RandomPopulation};
pub use observer::{GenerationStats, Observer, StatsPrinter};
pub use operators::{
    flip_mutation, single_point_crossover, Crossover, FlipMutation, Mutation,
    SinglePointCrossover,
};
pub use runner::{Evolution, EvolutionResult};
pub use selection::{SelectPair, Selection};
pub use types::{CountOnes, FitnessEvaluator, Gene, Genome, Population};
