//! Route change notifications.

use tracing::info;

use crate::error::NotifyError;
use crate::models::Route;

/// Fire-and-forget publisher of route events.
///
/// Callers log failures and carry on; a notification never affects the
/// outcome of the operation that triggered it.
pub trait RouteNotifier: Send + Sync {
    /// A new route was planned by an optimization request.
    fn route_optimized(&self, route: &Route) -> Result<(), NotifyError>;

    /// An existing route was rerouted.
    fn route_updated(&self, route: &Route) -> Result<(), NotifyError>;
}

/// [`RouteNotifier`] that writes each event to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl RouteNotifier for LoggingNotifier {
    fn route_optimized(&self, route: &Route) -> Result<(), NotifyError> {
        info!(
            route_id = %route.route_id,
            depot_id = %route.depot_id,
            driver_id = %route.driver_id,
            stops = route.stops.len(),
            distance_km = route.total_distance_km,
            "route optimized"
        );
        Ok(())
    }

    fn route_updated(&self, route: &Route) -> Result<(), NotifyError> {
        info!(
            route_id = %route.route_id,
            status = ?route.status,
            stops = route.stops.len(),
            "route updated"
        );
        Ok(())
    }
}
