//! SA configuration.

use crate::models::TuningParameters;

/// Temperature the search starts from when the request does not override
/// the cooling rate.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 1000.0;

/// Configuration for simulated annealing.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, applied after every
/// iteration.
///
/// # Examples
///
/// ```
/// use lastmile_routing::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.98)
///     .with_max_iterations(5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Minimum temperature. The run stops once T drops below this.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1].
    pub cooling_rate: f64,

    /// Maximum total iterations.
    pub max_iterations: usize,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            min_temperature: 0.1,
            cooling_rate: 0.95,
            max_iterations: 1000,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Overrides the iteration cap and cooling rate from a request.
    ///
    /// A request that sets the cooling rate `c` also starts the search at
    /// temperature `(1 - c) * 1000`.
    pub fn apply(&self, tuning: &TuningParameters) -> Self {
        let mut config = self.clone();
        if let Some(rate) = tuning.cooling_rate {
            config = config
                .with_cooling_rate(rate)
                .with_initial_temperature((1.0 - rate) * DEFAULT_INITIAL_TEMPERATURE);
        }
        if let Some(n) = tuning.max_iterations {
            config = config.with_max_iterations(n);
        }
        config
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature.is_nan() || self.initial_temperature < 0.0 {
            return Err("initial_temperature must be non-negative".into());
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err("min_temperature must be non-negative".into());
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(format!("cooling_rate must be in (0, 1], got {}", self.cooling_rate));
        }
        Ok(())
    }
}
