//! Request entry point: validation, matrices, dispatch and fallback.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, error, info, instrument, warn};

use super::fallback::fallback_result;
use super::notifier::{LoggingNotifier, RouteNotifier};
use super::repository::{InMemoryRouteRepository, RouteRepository};
use crate::cache::SharedCache;
use crate::config::EngineConfig;
use crate::cost::{PenaltyScale, TourCostModel};
use crate::error::{
    panic_message, FallbackReason, OptimizeError, RepositoryError, RequestError, RouteServiceError,
};
use crate::ga::GeneticOptimizer;
use crate::greedy::GreedyOptimizer;
use crate::matrix::{MatrixBuilder, MatrixPair, MatrixSource};
use crate::models::{
    route_efficiency, OptimizationRequest, OptimizationResult, ResultStatus, Route, RouteStatus,
    Stop,
};
use crate::optimizer::{Algorithm, Optimizer, RoutingProblem, RunOutcome};
use crate::random::rng_from;
use crate::sa::AnnealingOptimizer;
use crate::tabu::TabuOptimizer;

/// Optimizes stop sequences and manages the resulting routes.
///
/// Every call to [`optimize`](Self::optimize) with a valid request returns
/// a result: optimizer errors and panics become a `FALLBACK` result over
/// the natural stop order.
///
/// # Examples
///
/// ```
/// use lastmile_routing::{EngineConfig, OptimizationRequest, RouteOptimizationService, Stop};
///
/// let service = RouteOptimizationService::new(EngineConfig::default().with_seed(7));
/// let stops = vec![
///     Stop::new(51.5074, -0.1278),
///     Stop::new(51.5155, -0.0922),
///     Stop::new(51.5033, -0.1195),
/// ];
/// let request = OptimizationRequest::new("DEPOT_LON", "DRIVER_1", stops, "GREEDY");
///
/// let result = service.optimize(&request).unwrap();
/// assert_eq!(result.optimized_sequence.len(), 3);
/// assert_eq!(result.optimized_sequence[0], 0);
/// ```
pub struct RouteOptimizationService {
    config: EngineConfig,
    matrices: MatrixBuilder,
    results: SharedCache<String, OptimizationResult>,
    repository: Arc<dyn RouteRepository>,
    notifier: Arc<dyn RouteNotifier>,
}

impl std::fmt::Debug for RouteOptimizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteOptimizationService")
            .field("config", &self.config)
            .field("matrices", &self.matrices)
            .field("cached_results", &self.results.len())
            .finish()
    }
}

impl Default for RouteOptimizationService {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RouteOptimizationService {
    /// Service with Haversine matrices, in-memory storage and log notifications.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            matrices: MatrixBuilder::new(config.matrix.clone()),
            config,
            results: SharedCache::new(),
            repository: Arc::new(InMemoryRouteRepository::new()),
            notifier: Arc::new(LoggingNotifier),
        }
    }

    pub fn with_repository(mut self, repository: Arc<dyn RouteRepository>) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn RouteNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the matrix source; the matrix cache starts empty.
    pub fn with_matrix_source(mut self, source: Arc<dyn MatrixSource>) -> Self {
        self.matrices = MatrixBuilder::with_source(source, self.config.matrix.clone());
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Optimizes one request, persists the planned route and announces it.
    ///
    /// Only validation fails. A successful result is cached under
    /// [`OptimizationRequest::result_cache_key`]; a cache hit is returned
    /// as is, without persisting or notifying again. When concurrent
    /// requests race on one key, the first to cache its result persists
    /// it and the others return that result.
    #[instrument(skip_all, fields(depot = %request.depot_id, driver = %request.driver_id))]
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, RequestError> {
        request.validate()?;

        let key = request.result_cache_key();
        if self.config.result_cache {
            if let Some(hit) = self.results.get(&key) {
                debug!(key = %key, "returning cached result");
                return Ok(hit.as_ref().clone());
            }
        }

        let algorithm = resolve_algorithm(&request.algorithm);
        let result = self.solve(request, algorithm);
        if result.is_fallback() {
            return Ok(result);
        }

        if self.config.result_cache {
            if let Err(winner) = self.results.try_insert(key.clone(), result.clone()) {
                debug!(key = %key, "concurrent request cached this key first");
                return Ok(winner.as_ref().clone());
            }
        }

        let mut route = Route::planned(request, &result, now_ms());
        let result = match self.save_planned(&mut route) {
            Ok(()) => {
                self.announce(&route, false);
                result
            }
            Err(err) => {
                error!(route_id = %route.route_id, error = %err, "failed to persist route");
                if self.config.result_cache {
                    self.results.remove(&key);
                }
                result.with_warning(format!("route {} was not persisted: {err}", route.route_id))
            }
        };

        info!(
            route_id = %route.route_id,
            algorithm = %result.algorithm,
            "route optimization completed"
        );
        Ok(result)
    }

    pub fn get_route(&self, route_id: &str) -> Result<Option<Route>, RepositoryError> {
        self.repository.find(route_id)
    }

    /// Planned routes of a depot.
    pub fn routes_by_depot(&self, depot_id: &str) -> Result<Vec<Route>, RepositoryError> {
        self.repository.find_by_depot_and_status(depot_id, RouteStatus::Planned)
    }

    /// Routes a driver is currently running.
    pub fn routes_by_driver(&self, driver_id: &str) -> Result<Vec<Route>, RepositoryError> {
        self.repository.find_by_driver_and_status(driver_id, RouteStatus::InProgress)
    }

    /// Moves a route to `status`; `Ok(None)` if the route does not exist.
    pub fn update_route_status(
        &self,
        route_id: &str,
        status: RouteStatus,
    ) -> Result<Option<Route>, RepositoryError> {
        let Some(mut route) = self.repository.find(route_id)? else {
            return Ok(None);
        };
        route.transition(status, now_ms());
        self.repository.save(&route)?;
        debug!(route_id, status = ?status, "route status updated");
        Ok(Some(route))
    }

    /// Re-optimizes an existing route over a new stop list.
    ///
    /// Runs the genetic algorithm under the configured reroute constraints,
    /// bypassing the result cache. The route is marked `OPTIMIZING`, saved
    /// and announced as updated.
    #[instrument(skip_all, fields(route_id = %route_id, stops = new_stops.len()))]
    pub fn reroute(
        &self,
        route_id: &str,
        new_stops: Vec<Stop>,
    ) -> Result<Route, RouteServiceError> {
        let mut route = self
            .repository
            .find(route_id)?
            .ok_or_else(|| RouteServiceError::RouteNotFound(route_id.to_string()))?;

        let request = OptimizationRequest::new(
            route.depot_id.clone(),
            route.driver_id.clone(),
            new_stops,
            Algorithm::Genetic.as_str(),
        )
        .with_vehicle(route.vehicle_id.clone())
        .with_constraints(self.config.reroute_constraints);
        request.validate()?;

        let result = self.solve(&request, Algorithm::Genetic);
        route.apply_reroute(&request.stops, &result, now_ms());
        self.repository.save(&route)?;
        self.announce(&route, true);

        info!(status = ?result.status, distance_km = result.total_distance, "route rerouted");
        Ok(route)
    }

    /// Builds matrices, runs `algorithm` and turns the outcome into a result.
    ///
    /// Never fails: an optimizer error or panic yields the fallback result.
    fn solve(&self, request: &OptimizationRequest, algorithm: Algorithm) -> OptimizationResult {
        let started = Instant::now();
        info!(stops = request.stops.len(), algorithm = %algorithm, "starting optimization");

        let matrices = self.matrices.build(&request.stops);
        if matrices.degraded {
            warn!(stops = request.stops.len(), "optimizing over default matrices");
        }

        match self.run_guarded(request, algorithm, &matrices) {
            Ok(outcome) => {
                let elapsed = elapsed_ms(started);
                let result = success_result(request, algorithm, &matrices, outcome, elapsed);
                info!(
                    algorithm = %algorithm,
                    iterations = result.iterations,
                    distance_km = result.total_distance,
                    elapsed_ms = result.optimization_time,
                    "optimization finished"
                );
                if matrices.degraded {
                    result.with_warning(
                        "distance/time matrices unavailable; default values were used",
                    )
                } else {
                    result
                }
            }
            Err(reason) => {
                error!(
                    algorithm = %algorithm,
                    error = %reason,
                    "optimization failed, returning natural order"
                );
                fallback_result(
                    &request.stops,
                    algorithm,
                    self.config.matrix.speed_kmh,
                    elapsed_ms(started),
                    matrices.degraded,
                )
                .with_warning(reason.to_string())
            }
        }
    }

    fn run_guarded(
        &self,
        request: &OptimizationRequest,
        algorithm: Algorithm,
        matrices: &MatrixPair,
    ) -> Result<RunOutcome, FallbackReason> {
        catch_unwind(AssertUnwindSafe(|| self.run_algorithm(request, algorithm, matrices)))
            .map_err(|payload| FallbackReason::Panicked(panic_message(payload.as_ref())))?
            .map_err(FallbackReason::from)
    }

    fn run_algorithm(
        &self,
        request: &OptimizationRequest,
        algorithm: Algorithm,
        matrices: &MatrixPair,
    ) -> Result<RunOutcome, OptimizeError> {
        let problem = RoutingProblem::new(request.stops.len(), matrices, request.constraints)?;
        let mut rng = rng_from(self.config.seed);
        let tuning = &request.tuning;

        match algorithm {
            Algorithm::Greedy => GreedyOptimizer.optimize(&problem, &mut rng),
            Algorithm::Genetic => {
                GeneticOptimizer::new(self.config.ga.apply(tuning)).optimize(&problem, &mut rng)
            }
            Algorithm::SimulatedAnnealing => {
                AnnealingOptimizer::new(self.config.sa.apply(tuning)).optimize(&problem, &mut rng)
            }
            Algorithm::TabuSearch => {
                TabuOptimizer::new(self.config.tabu.apply(tuning)).optimize(&problem, &mut rng)
            }
        }
    }

    /// Stores a new route, appending `_<n>` to its id until it is unused.
    fn save_planned(&self, route: &mut Route) -> Result<(), RepositoryError> {
        let base = route.route_id.clone();
        let mut suffix = 0u32;
        while !self.repository.save_new(route)? {
            suffix += 1;
            route.route_id = format!("{base}_{suffix}");
        }
        if suffix > 0 {
            debug!(route_id = %route.route_id, "route id already taken, suffixed");
        }
        Ok(())
    }

    fn announce(&self, route: &Route, updated: bool) {
        let sent = if updated {
            self.notifier.route_updated(route)
        } else {
            self.notifier.route_optimized(route)
        };
        if let Err(err) = sent {
            warn!(route_id = %route.route_id, error = %err, "route notification failed");
        }
    }
}

/// Parses the request's algorithm name; unknown names run the genetic algorithm.
fn resolve_algorithm(name: &str) -> Algorithm {
    match Algorithm::parse(name) {
        Some(algorithm) => algorithm,
        None => {
            warn!(algorithm = name, "unknown algorithm, falling back to genetic algorithm");
            Algorithm::Genetic
        }
    }
}

fn success_result(
    request: &OptimizationRequest,
    algorithm: Algorithm,
    matrices: &MatrixPair,
    outcome: RunOutcome,
    optimization_time: u64,
) -> OptimizationResult {
    let model = TourCostModel::new(&matrices.distances, &matrices.times, request.constraints);
    let totals = model.evaluate(&outcome.tour, PenaltyScale::FITNESS);

    OptimizationResult {
        total_stops: outcome.tour.len(),
        optimized_sequence: outcome.tour,
        total_distance: totals.total_distance,
        total_time: totals.total_time,
        algorithm,
        optimization_time,
        iterations: outcome.iterations,
        fitness: outcome.fitness,
        status: ResultStatus::Success,
        route_efficiency: route_efficiency(totals.total_distance),
        is_optimal: false,
        degraded_input: matrices.degraded,
        warnings: Vec::new(),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
