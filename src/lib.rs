//! Single-vehicle last-mile route optimization.
//!
//! Given a depot, a driver and a list of geocoded stops, the engine returns
//! the order in which to visit them. It provides four interchangeable
//! search strategies:
//!
//! - **Greedy**: nearest-neighbor construction from the first stop.
//! - **Genetic Algorithm (GA)**: tournament selection, order crossover and
//!   swap mutation with an elite carried across generations.
//! - **Simulated Annealing (SA)**: 2-opt moves under a geometric cooling
//!   schedule.
//! - **Tabu Search (TS)**: full 2-opt and swap neighborhood with a
//!   short-term memory of recent moves.
//!
//! All strategies score a tour on the same open-path cost over a
//! great-circle distance matrix and a derived travel-time matrix, with
//! soft penalties for exceeding a distance or duration limit.
//!
//! # Architecture
//!
//! [`RouteOptimizationService`] is the entry point. It validates a
//! request, builds (or reuses) the matrices, dispatches on [`Algorithm`],
//! and persists the resulting [`Route`](models::Route). An optimizer
//! failure never reaches the caller: the service answers with the stops in
//! their original order instead.
//!
//! # Example
//!
//! ```
//! use lastmile_routing::ga::GaConfig;
//! use lastmile_routing::sa::SaConfig;
//! use lastmile_routing::tabu::TabuConfig;
//! use lastmile_routing::{Algorithm, EngineConfig};
//!
//! let config = EngineConfig::default()
//!     .with_ga(GaConfig::default().with_population_size(30))
//!     .with_sa(SaConfig::default().with_cooling_rate(0.9))
//!     .with_tabu(TabuConfig::default().with_tabu_tenure(7));
//! assert!(config.validate().is_ok());
//!
//! assert_eq!("tabu_search".parse::<Algorithm>(), Ok(Algorithm::TabuSearch));
//! assert_eq!(Algorithm::from_name("FOO"), Algorithm::Genetic);
//! ```

pub mod cache;
pub mod config;
pub mod cost;
pub mod error;
pub mod ga;
pub mod greedy;
pub mod matrix;
pub mod models;
pub mod optimizer;
pub mod random;
pub mod sa;
pub mod service;
pub mod tabu;
pub mod tour;

pub use config::EngineConfig;
pub use error::{RepositoryError, RequestError, RouteServiceError};
pub use models::{OptimizationRequest, OptimizationResult, ResultStatus, Route, RouteStatus, Stop};
pub use optimizer::{Algorithm, Optimizer, RoutingProblem, RunOutcome};
pub use service::RouteOptimizationService;
