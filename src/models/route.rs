//! Persisted route built from an optimization result.

use serde::{Deserialize, Serialize};

use super::request::OptimizationRequest;
use super::result::OptimizationResult;
use super::stop::{Address, Stop};
use crate::optimizer::Algorithm;

/// Lifecycle of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    Optimizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopType {
    Pickup,
    Delivery,
    Depot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub stop_id: String,
    pub address: Address,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub stop_type: StopType,
    pub sequence: usize,
    pub status: StopStatus,
}

/// Run statistics kept alongside the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetadata {
    pub optimization_time: u64,
    pub iterations: usize,
    pub fitness: f64,
}

/// A vehicle route: the stops in visiting order plus planning times.
///
/// Times are unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route_id: String,
    pub depot_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub status: RouteStatus,
    pub stops: Vec<RouteStop>,
    pub total_distance_km: f64,
    pub estimated_duration_minutes: u32,
    pub planned_start_time: u64,
    pub planned_end_time: u64,
    pub actual_start_time: Option<u64>,
    pub actual_end_time: Option<u64>,
    pub optimization_algorithm: Algorithm,
    pub last_updated: u64,
    pub metadata: RouteMetadata,
}

const HOUR_MS: u64 = 60 * 60 * 1000;
const MINUTE_MS: u64 = 60 * 1000;

impl Route {
    /// Builds a `PLANNED` route from a request and its result.
    ///
    /// The route starts one hour after `now_ms` and ends after the
    /// result's total time.
    pub fn planned(
        request: &OptimizationRequest,
        result: &OptimizationResult,
        now_ms: u64,
    ) -> Self {
        let planned_start_time = now_ms + HOUR_MS;
        Self {
            route_id: format!("ROUTE_{}_{}", now_ms, request.depot_id),
            depot_id: request.depot_id.clone(),
            driver_id: request.driver_id.clone(),
            vehicle_id: request.vehicle_id.clone(),
            status: RouteStatus::Planned,
            stops: route_stops(&request.stops, &result.optimized_sequence, now_ms),
            total_distance_km: result.total_distance,
            estimated_duration_minutes: result.total_time,
            planned_start_time,
            planned_end_time: planned_start_time + u64::from(result.total_time) * MINUTE_MS,
            actual_start_time: None,
            actual_end_time: None,
            optimization_algorithm: result.algorithm,
            last_updated: now_ms,
            metadata: RouteMetadata {
                optimization_time: result.optimization_time,
                iterations: result.iterations,
                fitness: result.fitness,
            },
        }
    }

    /// Replaces the stop list with a re-optimized one and marks the route
    /// as `OPTIMIZING`.
    pub fn apply_reroute(&mut self, stops: &[Stop], result: &OptimizationResult, now_ms: u64) {
        self.stops = route_stops(stops, &result.optimized_sequence, now_ms);
        self.total_distance_km = result.total_distance;
        self.estimated_duration_minutes = result.total_time;
        self.optimization_algorithm = result.algorithm;
        self.metadata = RouteMetadata {
            optimization_time: result.optimization_time,
            iterations: result.iterations,
            fitness: result.fitness,
        };
        self.last_updated = now_ms;
        self.status = RouteStatus::Optimizing;
    }

    /// Moves the route to `status`, stamping actual start/end times.
    pub fn transition(&mut self, status: RouteStatus, now_ms: u64) {
        self.status = status;
        match status {
            RouteStatus::InProgress => self.actual_start_time = Some(now_ms),
            RouteStatus::Completed => self.actual_end_time = Some(now_ms),
            _ => {}
        }
        self.last_updated = now_ms;
    }
}

/// Orders `stops` by `sequence`; the first visited stop is the depot.
fn route_stops(stops: &[Stop], sequence: &[usize], now_ms: u64) -> Vec<RouteStop> {
    sequence
        .iter()
        .enumerate()
        .filter_map(|(position, &index)| {
            let stop = stops.get(index)?;
            Some(RouteStop {
                stop_id: format!("STOP_{position}_{now_ms}"),
                address: stop.address.clone(),
                latitude: stop.latitude,
                longitude: stop.longitude,
                stop_type: if position == 0 {
                    StopType::Depot
                } else {
                    StopType::Delivery
                },
                sequence: position,
                status: StopStatus::Pending,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result::ResultStatus;

    fn result(sequence: Vec<usize>) -> OptimizationResult {
        OptimizationResult {
            total_stops: sequence.len(),
            optimized_sequence: sequence,
            total_distance: 12.5,
            total_time: 25,
            algorithm: Algorithm::Greedy,
            optimization_time: 3,
            iterations: 1,
            fitness: 0.07,
            status: ResultStatus::Success,
            route_efficiency: 0.07,
            is_optimal: false,
            degraded_input: false,
            warnings: Vec::new(),
        }
    }

    fn request() -> OptimizationRequest {
        let stops = vec![
            Stop::new(51.50, -0.12),
            Stop::new(51.51, -0.13),
            Stop::new(51.52, -0.14),
        ];
        OptimizationRequest::new("DEPOT_1", "DRIVER_1", stops, "GREEDY").with_vehicle("VAN_1")
    }

    #[test]
    fn test_planned_route() {
        let route = Route::planned(&request(), &result(vec![0, 2, 1]), 1_000);

        assert_eq!(route.route_id, "ROUTE_1000_DEPOT_1");
        assert_eq!(route.status, RouteStatus::Planned);
        assert_eq!(route.planned_start_time, 1_000 + HOUR_MS);
        assert_eq!(route.planned_end_time, 1_000 + HOUR_MS + 25 * MINUTE_MS);
        assert_eq!(route.stops.len(), 3);
        assert_eq!(route.stops[0].stop_type, StopType::Depot);
        assert_eq!(route.stops[1].stop_type, StopType::Delivery);
        assert_eq!(route.stops[1].latitude, 51.52);
        assert!(route.stops.iter().all(|s| s.status == StopStatus::Pending));
    }

    #[test]
    fn test_transition_stamps_times() {
        let mut route = Route::planned(&request(), &result(vec![0, 1, 2]), 0);
        route.transition(RouteStatus::InProgress, 10);
        assert_eq!(route.actual_start_time, Some(10));
        assert_eq!(route.actual_end_time, None);

        route.transition(RouteStatus::Completed, 20);
        assert_eq!(route.actual_end_time, Some(20));
        assert_eq!(route.last_updated, 20);
    }

    #[test]
    fn test_apply_reroute() {
        let mut route = Route::planned(&request(), &result(vec![0, 1, 2]), 0);
        let new_stops = vec![Stop::new(52.0, -1.0), Stop::new(52.1, -1.1)];
        route.apply_reroute(&new_stops, &result(vec![1, 0]), 50);

        assert_eq!(route.status, RouteStatus::Optimizing);
        assert_eq!(route.stops.len(), 2);
        assert_eq!(route.stops[0].latitude, 52.1);
        assert_eq!(route.last_updated, 50);
    }
}
