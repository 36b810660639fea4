//! Property tests: every algorithm returns a permutation of the stops.

use lastmile_routing::ga::GaConfig;
use lastmile_routing::models::Constraints;
use lastmile_routing::sa::SaConfig;
use lastmile_routing::tabu::TabuConfig;
use lastmile_routing::tour::is_permutation;
use lastmile_routing::{
    Algorithm, EngineConfig, OptimizationRequest, ResultStatus, RouteOptimizationService, Stop,
};
use proptest::prelude::*;

fn service(seed: u64) -> RouteOptimizationService {
    RouteOptimizationService::new(
        EngineConfig::default()
            .with_seed(seed)
            .with_result_cache(false)
            .with_ga(GaConfig::default().with_population_size(20).with_max_generations(30))
            .with_sa(SaConfig::default().with_max_iterations(200))
            .with_tabu(TabuConfig::default().with_max_iterations(30)),
    )
}

fn stops_strategy() -> impl Strategy<Value = Vec<Stop>> {
    prop::collection::vec((51.30f64..51.70, -0.50f64..0.30), 1..12)
        .prop_map(|coords| coords.into_iter().map(|(lat, lng)| Stop::new(lat, lng)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_algorithm_returns_a_permutation(stops in stops_strategy(), seed in any::<u64>()) {
        let service = service(seed);
        let n = stops.len();
        for algorithm in Algorithm::ALL {
            let request =
                OptimizationRequest::new("PROP", "DRV", stops.clone(), algorithm.as_str());
            let result = service.optimize(&request).expect("valid request");

            prop_assert_eq!(result.status, ResultStatus::Success);
            prop_assert!(is_permutation(&result.optimized_sequence, n));
            prop_assert_eq!(result.total_stops, n);
            prop_assert!(result.total_distance >= 0.0);
            prop_assert!(result.fitness > 0.0 && result.fitness <= 1.0);
        }
    }

    #[test]
    fn constraints_never_change_reported_distance(
        stops in stops_strategy(),
        limit in 0.5f64..50.0,
    ) {
        let service = service(11);
        let free = OptimizationRequest::new("PROP_FREE", "DRV", stops.clone(), "GREEDY");
        let limited = OptimizationRequest::new("PROP_LIMIT", "DRV", stops, "GREEDY")
            .with_constraints(Constraints::unconstrained().with_max_distance_km(limit));

        let free = service.optimize(&free).expect("valid request");
        let limited = service.optimize(&limited).expect("valid request");
        prop_assert_eq!(free.optimized_sequence, limited.optimized_sequence);
        prop_assert_eq!(free.total_distance, limited.total_distance);
        prop_assert!(limited.fitness <= free.fitness);
    }
}
