//! Route persistence boundary.

use std::sync::RwLock;

use rustc_hash::FxHashMap;

use crate::error::RepositoryError;
use crate::models::{Route, RouteStatus};

/// Stores routes by id.
///
/// Saving a route whose id already exists replaces it.
pub trait RouteRepository: Send + Sync {
    fn save(&self, route: &Route) -> Result<(), RepositoryError>;

    /// Saves `route` only if its id is unused; returns whether it was stored.
    ///
    /// The default checks then saves and is not atomic; stores that can
    /// should override it.
    fn save_new(&self, route: &Route) -> Result<bool, RepositoryError> {
        if self.find(&route.route_id)?.is_some() {
            return Ok(false);
        }
        self.save(route)?;
        Ok(true)
    }

    fn find(&self, route_id: &str) -> Result<Option<Route>, RepositoryError>;

    fn find_by_depot_and_status(
        &self,
        depot_id: &str,
        status: RouteStatus,
    ) -> Result<Vec<Route>, RepositoryError>;

    fn find_by_driver_and_status(
        &self,
        driver_id: &str,
        status: RouteStatus,
    ) -> Result<Vec<Route>, RepositoryError>;
}

/// Process-local [`RouteRepository`].
///
/// Query results are ordered by planned start time, then route id.
#[derive(Debug, Default)]
pub struct InMemoryRouteRepository {
    routes: RwLock<FxHashMap<String, Route>>,
}

impl InMemoryRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routes.read().map(|routes| routes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn query<F>(&self, predicate: F) -> Result<Vec<Route>, RepositoryError>
    where
        F: Fn(&Route) -> bool,
    {
        let routes = self.routes.read().map_err(|_| RepositoryError::Poisoned)?;
        let mut found: Vec<Route> = routes.values().filter(|r| predicate(r)).cloned().collect();
        found.sort_by(|a, b| {
            a.planned_start_time
                .cmp(&b.planned_start_time)
                .then_with(|| a.route_id.cmp(&b.route_id))
        });
        Ok(found)
    }
}

impl RouteRepository for InMemoryRouteRepository {
    fn save(&self, route: &Route) -> Result<(), RepositoryError> {
        let mut routes = self.routes.write().map_err(|_| RepositoryError::Poisoned)?;
        routes.insert(route.route_id.clone(), route.clone());
        Ok(())
    }

    fn save_new(&self, route: &Route) -> Result<bool, RepositoryError> {
        let mut routes = self.routes.write().map_err(|_| RepositoryError::Poisoned)?;
        if routes.contains_key(&route.route_id) {
            return Ok(false);
        }
        routes.insert(route.route_id.clone(), route.clone());
        Ok(true)
    }

    fn find(&self, route_id: &str) -> Result<Option<Route>, RepositoryError> {
        let routes = self.routes.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(routes.get(route_id).cloned())
    }

    fn find_by_depot_and_status(
        &self,
        depot_id: &str,
        status: RouteStatus,
    ) -> Result<Vec<Route>, RepositoryError> {
        self.query(|r| r.depot_id == depot_id && r.status == status)
    }

    fn find_by_driver_and_status(
        &self,
        driver_id: &str,
        status: RouteStatus,
    ) -> Result<Vec<Route>, RepositoryError> {
        self.query(|r| r.driver_id == driver_id && r.status == status)
    }
}
