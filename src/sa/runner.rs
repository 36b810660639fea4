//! SA execution engine.

use rand::Rng;
use tracing::debug;

use super::config::SaConfig;
use crate::error::OptimizeError;
use crate::optimizer::{Algorithm, Optimizer, RoutingProblem, RunOutcome};
use crate::random::shuffled_tour;
use crate::tour;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// Best tour found.
    pub best: Vec<usize>,

    /// Penalized cost of `best`.
    pub best_cost: f64,

    /// Total iterations executed.
    pub iterations: usize,

    /// Temperature at termination.
    pub final_temperature: f64,

    /// Number of accepted moves (improving + uphill).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
}

/// Simulated annealing runner.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from a random tour with 2-opt neighbors.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run<R: Rng>(problem: &RoutingProblem<'_>, config: &SaConfig, rng: &mut R) -> SaResult {
        assert!(config.validate().is_ok(), "invalid SaConfig");

        let n = problem.len();
        let model = problem.cost_model();

        let mut current = shuffled_tour(n, rng);
        let mut current_cost = model.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = Vec::new();

        if n == 0 {
            return SaResult {
                best,
                best_cost,
                iterations,
                final_temperature: temperature,
                accepted_moves,
                improving_moves,
                cost_history,
            };
        }

        for i in 0..config.max_iterations {
            let mut neighbor = current.clone();
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            tour::reverse_segment(&mut neighbor, a, b);
            let neighbor_cost = model.cost(&neighbor);

            // Metropolis acceptance criterion
            let accept = if neighbor_cost < current_cost {
                improving_moves += 1;
                true
            } else if temperature > 0.0 {
                let probability = ((current_cost - neighbor_cost) / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            } else {
                false
            };

            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            }

            temperature *= config.cooling_rate;
            iterations = i + 1;
            cost_history.push(best_cost);

            if temperature < config.min_temperature {
                debug!(iterations, temperature, "temperature fell below minimum, stopping");
                break;
            }
        }

        SaResult {
            best,
            best_cost,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        }
    }
}

/// [`Optimizer`] adapter running [`SaRunner`] with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct AnnealingOptimizer {
    pub config: SaConfig,
}

impl AnnealingOptimizer {
    pub fn new(config: SaConfig) -> Self {
        Self { config }
    }
}

impl Optimizer for AnnealingOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SimulatedAnnealing
    }

    fn optimize<R: Rng>(
        &self,
        problem: &RoutingProblem<'_>,
        rng: &mut R,
    ) -> Result<RunOutcome, OptimizeError> {
        self.config.validate().map_err(OptimizeError::InvalidConfig)?;

        let result = SaRunner::run(problem, &self.config, rng);
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
    fn test_default_schedule_stops_on_temperature() {
        let pair = line_pair(6);
        let problem = RoutingProblem::new(6, &pair, Constraints::default()).expect("sizes match");

        let result = SaRunner::run(&problem, &SaConfig::default(), &mut create_rng(42));

        // 1000 * 0.95^k < 0.1 first holds at k = 180
        assert_eq!(result.iterations, 180);
        assert!(result.final_temperature < 0.1);
        assert_eq!(result.cost_history.len(), 180);
    }

    #[test]
    fn test_max_iterations_limit() {
        let pair = line_pair(6);
        let problem = RoutingProblem::new(6, &pair, Constraints::default()).expect("sizes match");
        let config = SaConfig::default().with_max_iterations(25);

        let result = SaRunner::run(&problem, &config, &mut create_rng(1));
        assert_eq!(result.iterations, 25);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let pair = line_pair(12);
        let problem = RoutingProblem::new(12, &pair, Constraints::default()).expect("sizes match");
        let config = SaConfig::default().with_cooling_rate(0.995).with_max_iterations(2000);

        let result = SaRunner::run(&problem, &config, &mut create_rng(5));

        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0], "best cost increased: {} -> {}", w[0], w[1]);
        }
        assert!(tour::is_permutation(&result.best, 12));
        assert!(
            result.best_cost <= 15.0,
            "expected cost <= 15.0 for a 12-stop line, got {}",
            result.best_cost
        );
    }

    #[test]
    fn test_zero_temperature_rejects_uphill() {
        let pair = line_pair(8);
        let problem = RoutingProblem::new(8, &pair, Constraints::default()).expect("sizes match");
        let config = SaConfig::default()
            .with_initial_temperature(0.0)
            .with_min_temperature(0.0)
            .with_cooling_rate(1.0)
            .with_max_iterations(300);

        let result = SaRunner::run(&problem, &config, &mut create_rng(9));
        assert_eq!(result.accepted_moves, result.improving_moves);
    }

    #[test]
    fn test_fitness_from_cost() {
        let pair = line_pair(5);
        let problem = RoutingProblem::new(5, &pair, Constraints::default()).expect("sizes match");
        let outcome = AnnealingOptimizer::default()
            .optimize(&problem, &mut create_rng(3))
            .expect("valid config");
        let cost = problem.cost_model().cost(&outcome.tour);
        assert!((outcome.fitness - 1.0 / (1.0 + cost)).abs() < 1e-12);
    }
}
