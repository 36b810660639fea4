//! Tabu Search (TS).
//!
//! A single-solution trajectory search over tours that remembers its most
//! recent moves (the tabu list) and refuses to repeat them, which prevents
//! cycling between a few neighbors. The neighborhood is every 2-opt
//! reversal plus every pairwise swap.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuOptimizer, TabuResult, TabuRunner};
pub use types::{Move, MoveKind, TabuList};
