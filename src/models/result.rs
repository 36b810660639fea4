//! Optimization result.

use serde::{Deserialize, Serialize};

use crate::optimizer::Algorithm;

/// Whether the result came from the requested search or from the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Success,
    Fallback,
}

/// The outcome of one optimization request.
///
/// Built once at the end of a run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Stop indices in visiting order; always a permutation of `0..n`.
    pub optimized_sequence: Vec<usize>,
    /// Path length in kilometers (no return leg).
    pub total_distance: f64,
    /// Path duration in minutes.
    pub total_time: u32,
    pub algorithm: Algorithm,
    /// Wall-clock optimization time in milliseconds.
    pub optimization_time: u64,
    pub iterations: usize,
    pub fitness: f64,
    pub status: ResultStatus,
    pub total_stops: usize,
    pub route_efficiency: f64,
    pub is_optimal: bool,
    /// Set when the matrices were the fixed-default fallback.
    pub degraded_input: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl OptimizationResult {
    pub fn is_fallback(&self) -> bool {
        self.status == ResultStatus::Fallback
    }

    /// Copy of this result carrying one more warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// `1 / (1 + distance)`: a unitless score in `(0, 1]`.
pub fn route_efficiency(total_distance: f64) -> f64 {
    1.0 / (1.0 + total_distance)
}
