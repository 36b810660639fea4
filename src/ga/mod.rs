//! Genetic algorithm over stop permutations.
//!
//! A population of random tours evolves by tournament selection, order
//! crossover and swap mutation. The best tour ever seen is carried into
//! every new generation unchanged. The run ends when the population's
//! fitness variance collapses or the generation cap is reached.
//!
//! # Key Types
//!
//! - [`GaConfig`]: algorithm parameters (population size, rates, caps)
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: best candidate plus run statistics
//! - [`GeneticOptimizer`]: the [`Optimizer`](crate::optimizer::Optimizer) adapter
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GeneticOptimizer};
pub use selection::tournament;
pub use types::Candidate;
