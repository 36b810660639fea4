//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::models::TuningParameters;

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use lastmile_routing::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use lastmile_routing::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_tournament_size(3)
///     .with_mutation_rate(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of candidates per generation.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are cloned.
    pub crossover_rate: f64,

    /// Probability of one swap mutation per non-elite child (0.0–1.0).
    pub mutation_rate: f64,

    /// Candidates drawn per tournament, capped at the population size.
    pub tournament_size: usize,

    /// The run stops once the population's fitness variance drops below
    /// this value.
    ///
    /// Set to 0.0 to disable convergence-based termination.
    pub convergence_variance: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            tournament_size: 5,
            convergence_variance: 0.001,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the convergence variance (0.0 disables it).
    pub fn with_convergence_variance(mut self, variance: f64) -> Self {
        self.convergence_variance = variance.max(0.0);
        self
    }

    /// Overrides the fields a request tunes: population size, iteration
    /// cap, mutation and crossover rates.
    pub fn apply(&self, tuning: &TuningParameters) -> Self {
        let mut config = self.clone();
        if let Some(n) = tuning.population_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = tuning.max_iterations {
            config = config.with_max_generations(n);
        }
        if let Some(rate) = tuning.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(rate) = tuning.crossover_rate {
            config = config.with_crossover_rate(rate);
        }
        config
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(format!("crossover_rate must be in [0, 1], got {}", self.crossover_rate));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!("mutation_rate must be in [0, 1], got {}", self.mutation_rate));
        }
        if self.convergence_variance.is_nan() || self.convergence_variance < 0.0 {
            return Err("convergence_variance must be non-negative".into());
        }
        Ok(())
    }
}
