//! Tabu Search configuration.

use crate::models::TuningParameters;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use lastmile_routing::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(500)
///     .with_tabu_tenure(7);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.tabu_tenure, 7);
/// ```
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Capacity of the FIFO tabu list.
    pub tabu_tenure: usize,
    /// Maximum consecutive iterations without a new best before stopping.
    pub max_no_improve: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tabu_tenure: 10,
            max_no_improve: 100,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Sets maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Overrides the list capacity and iteration cap from a request.
    pub fn apply(&self, tuning: &TuningParameters) -> Self {
        let mut config = self.clone();
        if let Some(size) = tuning.tabu_list_size {
            config = config.with_tabu_tenure(size);
        }
        if let Some(n) = tuning.max_iterations {
            config = config.with_max_iterations(n);
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_no_improve == 0 {
            return Err("max_no_improve must be at least 1".into());
        }
        Ok(())
    }
}
