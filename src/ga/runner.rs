//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! evaluation → convergence check → elitism → selection → crossover →
//! mutation → repeat.

use rand::Rng;
use tracing::debug;

use super::config::GaConfig;
use super::operators::{order_crossover, swap_mutation};
use super::selection::tournament;
use super::types::{fitness_variance, fittest, Candidate};
use crate::error::OptimizeError;
use crate::optimizer::{Algorithm, Optimizer, RoutingProblem, RunOutcome};
use crate::random::shuffled_tour;
use crate::tour;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best candidate found during the entire run.
    pub best: Candidate,

    /// Generations that produced offspring.
    ///
    /// A run that converges while evaluating generation `g` reports `g`.
    pub generations: usize,

    /// Whether the run stopped on the variance threshold.
    pub converged: bool,

    /// Best-ever penalized cost after each evaluated generation.
    pub cost_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let config = GaConfig::default().with_population_size(30);
/// let result = GaRunner::run(&problem, &config, &mut create_rng(42));
/// println!("Best fitness: {}", result.best.fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run<R: Rng>(problem: &RoutingProblem<'_>, config: &GaConfig, rng: &mut R) -> GaResult {
        assert!(config.validate().is_ok(), "invalid GaConfig");

        let n = problem.len();
        let model = problem.cost_model();

        // 1. Random initial population
        let mut population: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::new(shuffled_tour(n, rng)))
            .collect();

        let mut best = Candidate::new(tour::natural_order(n));
        let mut cost_history = Vec::new();
        let mut generations = 0;
        let mut converged = false;

        for gen in 0..config.max_generations {
            // 2. Evaluate and track the best ever
            for candidate in &mut population {
                candidate.evaluate(&model);
            }
            if let Some(gen_best) = fittest(&population) {
                if gen_best.fitness > best.fitness {
                    best = gen_best.clone();
                }
            }
            cost_history.push(best.cost);

            // 3. Convergence
            let variance = fitness_variance(&population);
            if variance < config.convergence_variance {
                debug!(generation = gen, variance, "genetic algorithm converged");
                converged = true;
                break;
            }

            // 4. Elitism: the best ever survives unmodified in slot 0
            let mut next_gen = Vec::with_capacity(config.population_size);
            next_gen.push(Candidate::new(best.tour.clone()));

            // 5. Offspring
            while next_gen.len() < config.population_size {
                let p1 = &population[tournament(&population, config.tournament_size, rng)];
                let p2 = &population[tournament(&population, config.tournament_size, rng)];

                let (c1, c2) = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    order_crossover(&p1.tour, &p2.tour, rng)
                } else {
                    (p1.tour.clone(), p2.tour.clone())
                };

                next_gen.push(Candidate::new(c1));
                if next_gen.len() < config.population_size {
                    next_gen.push(Candidate::new(c2));
                }
            }

            // 6. Mutation, skipping the elite
            for child in next_gen.iter_mut().skip(1) {
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    swap_mutation(&mut child.tour, rng);
                }
            }

            population = next_gen;
            generations = gen + 1;
        }

        GaResult {
            best,
            generations,
            converged,
            cost_history,
        }
    }
}

/// [`Optimizer`] adapter running [`GaRunner`] with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct GeneticOptimizer {
    pub config: GaConfig,
}

impl GeneticOptimizer {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }
}

impl Optimizer for GeneticOptimizer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Genetic
    }

    fn optimize<R: Rng>(
        &self,
        problem: &RoutingProblem<'_>,
        rng: &mut R,
    ) -> Result<RunOutcome, OptimizeError> {
        self.config.validate().map_err(OptimizeError::InvalidConfig)?;

        let result = GaRunner::run(problem, &self.config, rng);
        tour::validate(&result.best.tour, problem.len())?;

        Ok(RunOutcome {
            tour: result.best.tour,
            iterations: result.generations,
            fitness: result.best.fitness,
            cost_history: result.cost_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
