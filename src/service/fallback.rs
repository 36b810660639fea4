//! The result returned when an optimizer run fails.

use crate::matrix::{haversine_km, travel_minutes};
use crate::models::{route_efficiency, OptimizationResult, ResultStatus, Stop};
use crate::optimizer::Algorithm;
use crate::tour::natural_order;

/// Natural-order result scored straight from the stop coordinates.
///
/// Distance is the Haversine path length; time assumes `speed_kmh` over
/// the whole path. The matrices are not consulted, so this works even when
/// they are the cause of the failure.
pub fn fallback_result(
    stops: &[Stop],
    algorithm: Algorithm,
    speed_kmh: f64,
    optimization_time: u64,
    degraded_input: bool,
) -> OptimizationResult {
    let sequence = natural_order(stops.len());
    let total_distance: f64 = stops
        .windows(2)
        .map(|leg| haversine_km(leg[0].location(), leg[1].location()))
        .sum();

    OptimizationResult {
        total_stops: sequence.len(),
        optimized_sequence: sequence,
        total_distance,
        total_time: travel_minutes(total_distance, speed_kmh),
        algorithm,
        optimization_time,
        iterations: 0,
        fitness: 1.0,
        status: ResultStatus::Fallback,
        route_efficiency: route_efficiency(total_distance),
        is_optimal: false,
        degraded_input,
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order_and_haversine_totals() {
        let stops = vec![
            Stop::new(51.50, -0.12),
            Stop::new(51.59, -0.12),
            Stop::new(51.68, -0.12),
        ];
        let result = fallback_result(&stops, Algorithm::TabuSearch, 30.0, 4, false);

        assert_eq!(result.optimized_sequence, vec![0, 1, 2]);
        assert_eq!(result.status, ResultStatus::Fallback);
        assert_eq!(result.algorithm, Algorithm::TabuSearch);
        assert_eq!(result.iterations, 0);
        // 0.18 degrees of latitude ~ 20 km
        assert!(
            (result.total_distance - 20.0).abs() < 0.1,
            "expected ~20 km, got {}",
            result.total_distance
        );
        assert_eq!(result.total_time, travel_minutes(result.total_distance, 30.0));
        assert!(result.is_fallback());
    }

    #[test]
    fn test_single_stop() {
        let result = fallback_result(&[Stop::new(51.5, -0.1)], Algorithm::Genetic, 30.0, 0, true);
        assert_eq!(result.optimized_sequence, vec![0]);
        assert_eq!(result.total_distance, 0.0);
        assert_eq!(result.total_time, 0);
        assert!(result.degraded_input);
    }
}
