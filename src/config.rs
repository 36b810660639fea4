//! Engine-wide configuration.

use crate::ga::GaConfig;
use crate::matrix::MatrixConfig;
use crate::models::Constraints;
use crate::sa::SaConfig;
use crate::tabu::TabuConfig;

/// Settings of a [`RouteOptimizationService`](crate::service::RouteOptimizationService).
///
/// The algorithm configs are the defaults that each request's tuning
/// parameters are applied on top of.
///
/// # Examples
///
/// ```
/// use lastmile_routing::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_result_cache(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub matrix: MatrixConfig,
    pub ga: GaConfig,
    pub sa: SaConfig,
    pub tabu: TabuConfig,
    /// Reuse successful results for the same depot, driver and algorithm.
    pub result_cache: bool,
    /// Fixed seed for every run; `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Constraints applied when rerouting an existing route.
    pub reroute_constraints: Constraints,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matrix: MatrixConfig::default(),
            ga: GaConfig::default(),
            sa: SaConfig::default(),
            tabu: TabuConfig::default(),
            result_cache: true,
            seed: None,
            reroute_constraints: Constraints::unconstrained()
                .with_max_duration_hours(8)
                .with_max_distance_km(200.0),
        }
    }
}

impl EngineConfig {
    pub fn with_matrix(mut self, matrix: MatrixConfig) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    pub fn with_result_cache(mut self, enabled: bool) -> Self {
        self.result_cache = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reroute_constraints(mut self, constraints: Constraints) -> Self {
        self.reroute_constraints = constraints;
        self
    }

    /// Validates every nested configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.matrix.validate().map_err(|e| format!("matrix: {e}"))?;
        self.ga.validate().map_err(|e| format!("ga: {e}"))?;
        self.sa.validate().map_err(|e| format!("sa: {e}"))?;
        self.tabu.validate().map_err(|e| format!("tabu: {e}"))?;
        Ok(())
    }
}
