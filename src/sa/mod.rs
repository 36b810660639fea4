//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search over tours. Each step proposes a
//! 2-opt reversal and accepts worsening moves with a probability that
//! shrinks as the temperature cools, so the search can leave local optima
//! early on and settles later.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{SaConfig, DEFAULT_INITIAL_TEMPERATURE};
pub use runner::{AnnealingOptimizer, SaResult, SaRunner};
