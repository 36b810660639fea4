//! Optimization request.

use serde::{Deserialize, Serialize};

use super::stop::Stop;
use crate::error::RequestError;

/// Soft limits applied as cost penalties, never as hard feasibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    pub max_distance_km: Option<f64>,
    pub max_duration_hours: Option<u32>,
}

impl Constraints {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    pub fn with_max_duration_hours(mut self, hours: u32) -> Self {
        self.max_duration_hours = Some(hours);
        self
    }

    /// Duration limit in minutes, if set.
    pub fn max_duration_minutes(&self) -> Option<u32> {
        self.max_duration_hours.map(|h| h.saturating_mul(60))
    }
}

/// Per-request overrides for the algorithm defaults.
///
/// Each algorithm reads only the fields that concern it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningParameters {
    pub max_iterations: Option<usize>,
    pub population_size: Option<usize>,
    pub mutation_rate: Option<f64>,
    pub crossover_rate: Option<f64>,
    pub cooling_rate: Option<f64>,
    pub tabu_list_size: Option<usize>,
}

/// A request to optimize one vehicle's stop sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub depot_id: String,
    pub driver_id: String,
    #[serde(default)]
    pub vehicle_id: String,
    pub stops: Vec<Stop>,
    pub algorithm: String,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(flatten)]
    pub tuning: TuningParameters,
}

impl OptimizationRequest {
    pub fn new(
        depot_id: impl Into<String>,
        driver_id: impl Into<String>,
        stops: Vec<Stop>,
        algorithm: impl Into<String>,
    ) -> Self {
        Self {
            depot_id: depot_id.into(),
            driver_id: driver_id.into(),
            vehicle_id: String::new(),
            stops,
            algorithm: algorithm.into(),
            constraints: Constraints::default(),
            tuning: TuningParameters::default(),
        }
    }

    pub fn with_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = vehicle_id.into();
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_tuning(mut self, tuning: TuningParameters) -> Self {
        self.tuning = tuning;
        self
    }

    /// Checks the request-level invariants before any optimization work.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.stops.is_empty() {
            return Err(RequestError::EmptyStops);
        }
        if self.depot_id.trim().is_empty() {
            return Err(RequestError::MissingDepotId);
        }
        if self.driver_id.trim().is_empty() {
            return Err(RequestError::MissingDriverId);
        }
        Ok(())
    }

    /// Key of the result cache: depot, driver and algorithm name.
    ///
    /// The stop set is not part of the key, so two different stop lists for
    /// the same depot/driver/algorithm share an entry.
    pub fn result_cache_key(&self) -> String {
        format!("{}_{}_{}", self.depot_id, self.driver_id, self.algorithm)
    }
}
