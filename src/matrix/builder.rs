//! Per-request matrix construction with degradation and caching.

use std::hash::{Hash, Hasher};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use rustc_hash::FxHasher;
use tracing::{debug, warn};

use super::dense::{DistanceMatrix, TimeMatrix};
use super::haversine::{HaversineSource, DEFAULT_SPEED_KMH};
use crate::cache::SharedCache;
use crate::error::{panic_message, MatrixError};
use crate::models::Stop;

/// Provides raw distance/time matrices for a list of stops.
///
/// The matrices are indexed by stop position. Implementations may call out
/// to a road-network service; failures are absorbed by [`MatrixBuilder`].
pub trait MatrixSource: Send + Sync {
    fn distances(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError>;

    fn times(&self, stops: &[Stop]) -> Result<TimeMatrix, MatrixError>;
}

/// Matrix construction settings.
///
/// # Examples
///
/// ```
/// use lastmile_routing::matrix::MatrixConfig;
///
/// let config = MatrixConfig::default()
///     .with_speed_kmh(25.0)
///     .with_cache(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Average speed for the built-in Haversine source.
    pub speed_kmh: f64,
    /// Off-diagonal distance of a degraded matrix, and the value read for
    /// missing entries.
    pub fallback_distance_km: f64,
    /// Off-diagonal time of a degraded matrix, and the value read for
    /// missing entries.
    pub fallback_time_minutes: u32,
    /// Cache matrices keyed by a hash of the stop coordinates.
    pub cache: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            fallback_distance_km: 5.0,
            fallback_time_minutes: 10,
            cache: true,
        }
    }
}

impl MatrixConfig {
    pub fn with_speed_kmh(mut self, speed: f64) -> Self {
        self.speed_kmh = speed;
        self
    }

    pub fn with_fallback_distance_km(mut self, km: f64) -> Self {
        self.fallback_distance_km = km;
        self
    }

    pub fn with_fallback_time_minutes(mut self, minutes: u32) -> Self {
        self.fallback_time_minutes = minutes;
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(format!("speed_kmh must be positive, got {}", self.speed_kmh));
        }
        if !(self.fallback_distance_km.is_finite() && self.fallback_distance_km >= 0.0) {
            return Err("fallback_distance_km must be non-negative".into());
        }
        Ok(())
    }
}

/// The matrices for one stop set.
///
/// `degraded` is telemetry only: a degraded pair has the same shape as a
/// real one and optimizers treat both identically.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixPair {
    pub distances: DistanceMatrix,
    pub times: TimeMatrix,
    pub degraded: bool,
}

impl MatrixPair {
    pub fn size(&self) -> usize {
        self.distances.size()
    }
}

/// Builds (and caches) the matrices for a request's stops.
pub struct MatrixBuilder {
    source: Arc<dyn MatrixSource>,
    config: MatrixConfig,
    cache: SharedCache<u64, MatrixPair>,
}

impl std::fmt::Debug for MatrixBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixBuilder")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl MatrixBuilder {
    /// Builder over the Haversine source at `config.speed_kmh`.
    pub fn new(config: MatrixConfig) -> Self {
        let source = Arc::new(HaversineSource::new(config.speed_kmh));
        Self::with_source(source, config)
    }

    pub fn with_source(source: Arc<dyn MatrixSource>, config: MatrixConfig) -> Self {
        Self {
            source,
            config,
            cache: SharedCache::new(),
        }
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Returns full-coverage matrices for `stops`.
    ///
    /// Distance and time are built as two independent tasks. A failing or
    /// panicking task is replaced by its fixed-default matrix and the pair
    /// is marked degraded; degraded pairs are not cached.
    pub fn build(&self, stops: &[Stop]) -> Arc<MatrixPair> {
        let key = stop_set_hash(stops);
        if self.config.cache {
            if let Some(hit) = self.cache.get(&key) {
                debug!(stops = stops.len(), "matrix cache hit");
                return hit;
            }
        }

        let (distances, times) = join(
            || guarded(|| self.source.distances(stops)),
            || guarded(|| self.source.times(stops)),
        );

        let n = stops.len();
        let mut degraded = false;

        let distances = match distances.and_then(|m| check_size(m, n)) {
            Ok(m) => m.with_fallback(self.config.fallback_distance_km),
            Err(err) => {
                warn!(
                    error = %err,
                    stops = n,
                    "distance matrix unavailable, using default distances"
                );
                degraded = true;
                DistanceMatrix::filled(n, self.config.fallback_distance_km)
            }
        };

        let times = match times.and_then(|m| check_size(m, n)) {
            Ok(m) => m.with_fallback(self.config.fallback_time_minutes),
            Err(err) => {
                warn!(error = %err, stops = n, "time matrix unavailable, using default times");
                degraded = true;
                TimeMatrix::filled(n, self.config.fallback_time_minutes)
            }
        };

        let pair = MatrixPair {
            distances,
            times,
            degraded,
        };

        if self.config.cache && !degraded {
            self.cache.insert(key, pair)
        } else {
            Arc::new(pair)
        }
    }
}

fn check_size<T: Copy + Default>(
    matrix: super::dense::Matrix<T>,
    stops: usize,
) -> Result<super::dense::Matrix<T>, MatrixError> {
    if matrix.size() == stops {
        Ok(matrix)
    } else {
        Err(MatrixError::Unavailable(format!(
            "source returned a {}x{0} matrix for {stops} stops",
            matrix.size()
        )))
    }
}

/// Runs one source call, turning a panic into [`MatrixError::Panicked`].
fn guarded<T, F>(call: F) -> Result<T, MatrixError>
where
    F: FnOnce() -> Result<T, MatrixError>,
{
    catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(MatrixError::Panicked(panic_message(payload.as_ref()))))
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (a(), b())
}

/// Stable hash of the stop coordinates, in order.
pub fn stop_set_hash(stops: &[Stop]) -> u64 {
    let mut hasher = FxHasher::default();
    stops.len().hash(&mut hasher);
    for stop in stops {
        stop.latitude.to_bits().hash(&mut hasher);
        stop.longitude.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}
