//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random tour
//! 2. At each iteration:
//!    a. Evaluate every 2-opt and swap move
//!    b. Select the cheapest non-tabu move, or the cheapest move overall
//!       when all of them are tabu
//!    c. Apply the move and push it onto the tabu list
//!    d. Update the global best if improved
//! 3. Terminate after max iterations or stagnation
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use rand::Rng;
use tracing::debug;

use super::config::TabuConfig;
use super::types::{Move, TabuList};
use crate::error::OptimizeError;
use crate::optimizer::{Algorithm, Optimizer, RoutingProblem, RunOutcome};
use crate::random::shuffled_tour;
use crate::tour;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best tour found.
    pub best: Vec<usize>,
    /// Cost of the best tour.
    pub best_cost: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best tour was found (0 = initial tour).
    pub best_iteration: usize,
    /// Whether the run ended on the no-improvement limit.
    pub stagnated: bool,
    /// Best cost at each iteration.
    pub cost_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given problem.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run<R: Rng>(
        problem: &RoutingProblem<'_>,
        config: &TabuConfig,
        rng: &mut R,
    ) -> TabuResult {
        assert!(config.validate().is_ok(), "invalid TabuConfig");

        let n = problem.len();
        let model = problem.cost_model();

        let mut current = shuffled_tour(n, rng);
        let mut best = current.clone();
        let mut best_cost = model.cost(&current);
        let mut best_iteration = 0;

        let mut tabu = TabuList::new(config.tabu_tenure);
        let moves = Move::neighborhood(n);
        let mut scratch = Vec::with_capacity(n);

        let mut cost_history = Vec::new();
        let mut no_improve_count = 0;
        let mut stagnated = false;

        for iteration in 0..config.max_iterations {
            if no_improve_count >= config.max_no_improve {
                stagnated = true;
                debug!(iteration, "tabu search stopped without improvement");
                break;
            }
            if moves.is_empty() {
                break;
            }

            let evaluated: Vec<(Move, f64)> = moves
                .iter()
                .map(|mv| {
                    scratch.clear();
                    scratch.extend_from_slice(&current);
                    mv.apply_in_place(&mut scratch);
                    (*mv, model.cost(&scratch))
                })
                .collect();

            // Cheapest admissible move; if everything is tabu, the cheapest move
            let chosen = cheapest(evaluated.iter().filter(|(mv, _)| !tabu.contains(mv)))
                .or_else(|| cheapest(evaluated.iter()));
            let Some(&(mv, cost)) = chosen else {
                break;
            };

            mv.apply_in_place(&mut current);
            tabu.push(mv);

            if cost < best_cost {
                best.clone_from(&current);
                best_cost = cost;
                best_iteration = iteration + 1;
                no_improve_count = 0;
            } else {
                no_improve_count += 1;
            }

            cost_history.push(best_cost);
        }

        TabuResult {
            best,
            best_cost,
            iterations: cost_history.len(),
            best_iteration,
            stagnated,
            cost_history,
        }
    }
}

/// First entry with the strictly lowest cost.
fn cheapest<'a, I>(entries: I) -> Option<&'a (Move, f64)>
where
    I: Iterator<Item = &'a (Move, f64)>,
{
    entries.reduce(|best, e| if e.1 < best.1 { e } else { best })
}

/// [`Optimizer`] adapter running [`TabuRunner`] with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct TabuOptimizer {
    pub config: TabuConfig,
}

impl TabuOptimizer {
    pub fn new(config: TabuConfig) -> Self {
        Self { config }
    }
}

impl Optimizer for TabuOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TabuSearch
    }

    fn optimize<R: Rng>(
        &self,
        problem: &RoutingProblem<'_>,
        rng: &mut R,
    ) -> Result<RunOutcome, OptimizeError> {
        self.config.validate().map_err(OptimizeError::InvalidConfig)?;

        let result = TabuRunner::run(problem, &self.config, rng);
        tour::validate(&result.best, problem.len())?;

        Ok(RunOutcome {
            tour: result.best,
            iterations: result.iterations,
            fitness: 1.0 / (1.0 + result.best_cost),
            cost_history: result.cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DistanceMatrix, MatrixPair, TimeMatrix};
    use crate::models::Constraints;
    use crate::random::create_rng;

    fn line_pair(n: usize) -> MatrixPair {
        MatrixPair {
            distances: DistanceMatrix::from_fn(n, 0.0, |i, j| (i as f64 - j as f64).abs()),
            times: TimeMatrix::from_fn(n, 0, |i, j| {
                2 * (i as i64 - j as i64).unsigned_abs() as u32
            }),
            degraded: false,
        }
    }

    #[test]
    fn test_solves_line() {
        let pair = line_pair(8);
        let problem = RoutingProblem::new(8, &pair, Constraints::default()).expect("sizes match");

        let result = TabuRunner::run(&problem, &TabuConfig::default(), &mut create_rng(42));

        assert!(tour::is_permutation(&result.best, 8));
        // any sweep from one end to the other costs 7 km
        assert!(
            (result.best_cost - 7.0).abs() < 1e-9,
            "expected optimal cost 7.0, got {}",
            result.best_cost
        );
    }

    #[test]
    fn test_best_cost_matches_best_tour() {
        let n = 40;
        let pair = MatrixPair {
            distances: DistanceMatrix::from_fn(n, 0.0, |i, j| ((i * 7 + j * 3) % 11) as f64 + 1.0),
            times: TimeMatrix::from_fn(n, 0, |i, j| ((i + j) % 5) as u32),
            degraded: false,
        };
        let problem = RoutingProblem::new(n, &pair, Constraints::default()).expect("sizes match");
        let config = TabuConfig::default().with_max_iterations(25);

        let result = TabuRunner::run(&problem, &config, &mut create_rng(17));

        assert!(tour::is_permutation(&result.best, n));
        let recomputed = problem.cost_model().cost(&result.best);
        assert!((recomputed - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_stops_after_no_improvement() {
        let pair = line_pair(6);
        let problem = RoutingProblem::new(6, &pair, Constraints::default()).expect("sizes match");
        let config = TabuConfig::default().with_max_no_improve(5);

        let result = TabuRunner::run(&problem, &config, &mut create_rng(3));

        assert!(result.stagnated);
        assert!(result.iterations < 1000);
        assert_eq!(result.iterations, result.best_iteration + 5);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let pair = line_pair(9);
        let problem = RoutingProblem::new(9, &pair, Constraints::default()).expect("sizes match");
        let config = TabuConfig::default().with_max_iterations(60);

        let result = TabuRunner::run(&problem, &config, &mut create_rng(8));

        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0], "best cost increased: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_single_stop_has_no_moves() {
        let pair = line_pair(1);
        let problem = RoutingProblem::new(1, &pair, Constraints::default()).expect("sizes match");

        let result = TabuRunner::run(&problem, &TabuConfig::default(), &mut create_rng(0));
        assert_eq!(result.best, vec![0]);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_cost, 0.0);
    }

    #[test]
    fn test_all_tabu_takes_cheapest_move() {
        // two stops: the only moves are 2-opt(0,1) and swap(0,1), both tabu
        // after two iterations; the search must keep moving
        let pair = line_pair(2);
        let problem = RoutingProblem::new(2, &pair, Constraints::default()).expect("sizes match");
        let config = TabuConfig::default().with_max_iterations(6).with_max_no_improve(100);

        let result = TabuRunner::run(&problem, &config, &mut create_rng(1));
        assert_eq!(result.iterations, 6);
        assert_eq!(result.best_cost, 1.0);
    }
}
