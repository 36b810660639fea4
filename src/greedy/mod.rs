//! Nearest-neighbor construction.
//!
//! Starts at stop 0 and repeatedly moves to the closest unvisited stop.
//! Deterministic: equal distances go to the lowest stop index. One pass,
//! O(n²) matrix lookups.

use rand::Rng;
use tracing::debug;

use crate::cost::PenaltyScale;
use crate::error::OptimizeError;
use crate::optimizer::{Algorithm, Optimizer, RoutingProblem, RunOutcome};

/// Greedy nearest-neighbor optimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyOptimizer;

impl GreedyOptimizer {
    /// Builds the nearest-neighbor tour from stop 0.
    pub fn tour(problem: &RoutingProblem<'_>) -> Vec<usize> {
        let n = problem.len();
        if n == 0 {
            return Vec::new();
        }
        let distances = &problem.matrices().distances;

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        let mut current = 0;
        visited[0] = true;
        tour.push(0);

        while tour.len() < n {
            let unvisited = (0..n).filter(|&i| !visited[i]);
            let Some(next) = distances.nearest_neighbor(current, unvisited) else {
                break;
            };
            visited[next] = true;
            tour.push(next);
            current = next;
        }
        tour
    }
}

impl Optimizer for GreedyOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Greedy
    }

    fn optimize<R: Rng>(
        &self,
        problem: &RoutingProblem<'_>,
        _rng: &mut R,
    ) -> Result<RunOutcome, OptimizeError> {
        let tour = Self::tour(problem);
        let cost = problem.cost_model().evaluate(&tour, PenaltyScale::FITNESS);
        debug!(stops = tour.len(), distance = cost.total_distance, "nearest-neighbor tour built");
        Ok(RunOutcome {
            tour,
            iterations: 1,
            fitness: cost.fitness(),
            cost_history: vec![cost.penalized_cost],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DistanceMatrix, MatrixPair, TimeMatrix};
    use crate::models::Constraints;
    use crate::random::create_rng;

    fn pair(distances: DistanceMatrix) -> MatrixPair {
        let n = distances.size();
        MatrixPair {
            distances,
            times: TimeMatrix::filled(n, 1),
            degraded: false,
        }
    }

    #[test]
    fn test_follows_nearest() {
        // 0 -> 2 (1 km) -> 1 (2 km) -> 3
        let mut dm = DistanceMatrix::filled(4, 10.0);
        dm.set(0, 2, 1.0);
        dm.set(2, 1, 2.0);
        let pair = pair(dm);
        let problem = RoutingProblem::new(4, &pair, Constraints::default()).expect("sizes match");

        let outcome = GreedyOptimizer
            .optimize(&problem, &mut create_rng(0))
            .expect("greedy never fails");
        assert_eq!(outcome.tour, vec![0, 2, 1, 3]);
        assert_eq!(outcome.iterations, 1);
        assert!((outcome.fitness - 1.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let pair = pair(DistanceMatrix::filled(5, 5.0));
        let problem = RoutingProblem::new(5, &pair, Constraints::default()).expect("sizes match");
        assert_eq!(GreedyOptimizer::tour(&problem), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_deterministic_across_seeds() {
        let dm = DistanceMatrix::from_fn(6, 0.0, |i, j| ((i * 7 + j * 3) % 11) as f64 + 1.0);
        let pair = pair(dm);
        let problem = RoutingProblem::new(6, &pair, Constraints::default()).expect("sizes match");

        let a = GreedyOptimizer.optimize(&problem, &mut create_rng(1)).expect("ok");
        let b = GreedyOptimizer.optimize(&problem, &mut create_rng(99)).expect("ok");
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_stop() {
        let pair = pair(DistanceMatrix::filled(1, 5.0));
        let problem = RoutingProblem::new(1, &pair, Constraints::default()).expect("sizes match");
        let outcome = GreedyOptimizer.optimize(&problem, &mut create_rng(0)).expect("ok");
        assert_eq!(outcome.tour, vec![0]);
        assert_eq!(outcome.fitness, 1.0);
    }
}
