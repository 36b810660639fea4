//! Route optimization service and its collaborators.
//!
//! [`RouteOptimizationService`] validates requests, builds the matrices,
//! dispatches to an optimizer and persists the planned route. Storage and
//! notifications sit behind the [`RouteRepository`] and [`RouteNotifier`]
//! traits; in-memory and logging implementations are provided.

mod fallback;
mod notifier;
mod orchestrator;
mod repository;

pub use fallback::fallback_result;
pub use notifier::{LoggingNotifier, RouteNotifier};
pub use orchestrator::RouteOptimizationService;
pub use repository::{InMemoryRouteRepository, RouteRepository};
