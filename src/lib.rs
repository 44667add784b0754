//! Bit-string genetic algorithm engine.
//!
//! Evolves a population of fixed-length binary genomes toward a fitness
//! target:
//!
//! - **Generators**: uniformly random genomes and populations
//! - **Operators**: roulette/tournament/rank selection, single-point
//!   crossover, gene-flip mutation, each behind its own trait
//! - **Engine**: elitist generational loop with a fitness target, a
//!   generation cap, an optional observer and a cancellation token
//!
//! # Example
//!
//! ```
//! use u_evolve::ga::{CountOnes, Evolution, EvolutionConfig, RandomPopulation};
//!
//! let config = EvolutionConfig::new(16)
//!     .with_generation_limit(500)
//!     .with_seed(7);
//! let result = Evolution::new(CountOnes, config)
//!     .run(&RandomPopulation::new(20, 16))
//!     .unwrap();
//! println!("best {} after {} generations", result.best(), result.generations);
//! ```
//!
//! Randomness is always drawn from an explicit generator; see
//! [`random::create_rng`] and [`ga::Evolution::run_with_rng`].

pub mod error;
pub mod ga;
pub mod random;

pub use error::{EvolveError, Result};
