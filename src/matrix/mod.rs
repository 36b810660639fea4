//! Pairwise distance and time matrices.
//!
//! # Key Types
//!
//! - [`Matrix`]: dense n×n storage with per-entry fallback
//! - [`MatrixSource`]: where raw matrices come from ([`HaversineSource`] by default)
//! - [`MatrixBuilder`]: per-request construction, degradation and caching
//! - [`MatrixPair`]: the distance/time matrices of one stop set

mod builder;
mod dense;
mod haversine;

pub use builder::{stop_set_hash, MatrixBuilder, MatrixConfig, MatrixPair, MatrixSource};
pub use dense::{DistanceMatrix, Matrix, TimeMatrix};
pub use haversine::{
    haversine_km, travel_minutes, HaversineSource, DEFAULT_SPEED_KMH, EARTH_RADIUS_KM,
};
