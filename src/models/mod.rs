//! Domain model types shared by the engine and its collaborators.
//!
//! - [`Stop`] and [`Address`]: geocoded stops, identified by list position
//! - [`OptimizationRequest`]: one vehicle's stop set plus constraints and tuning
//! - [`OptimizationResult`]: the immutable outcome of a request
//! - [`Route`]: the persisted artefact built from a result

mod request;
mod result;
mod route;
mod stop;

pub use request::{Constraints, OptimizationRequest, TuningParameters};
pub use result::{route_efficiency, OptimizationResult, ResultStatus};
pub use route::{Route, RouteMetadata, RouteStatus, RouteStop, StopStatus, StopType};
pub use stop::{Address, Stop};
