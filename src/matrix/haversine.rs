//! Great-circle distance and the default matrix source built on it.
//!
//! Straight-line distance ignores the road network; travel time is
//! estimated from an assumed average speed.

use super::builder::MatrixSource;
use super::dense::{DistanceMatrix, TimeMatrix};
use crate::error::MatrixError;
use crate::models::Stop;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average urban delivery speed used for time estimates.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Haversine distance between two `(lat, lng)` points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Whole minutes needed to cover `km` at `speed_kmh`, truncated.
pub fn travel_minutes(km: f64, speed_kmh: f64) -> u32 {
    (km / speed_kmh * 60.0) as u32
}

/// Matrix source computing Haversine distances and speed-based times.
#[derive(Debug, Clone)]
pub struct HaversineSource {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineSource {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineSource {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    fn checked_locations(stops: &[Stop]) -> Result<Vec<(f64, f64)>, MatrixError> {
        stops
            .iter()
            .enumerate()
            .map(|(index, stop)| {
                if stop.has_valid_coordinates() {
                    Ok(stop.location())
                } else {
                    Err(MatrixError::InvalidCoordinate {
                        index,
                        latitude: stop.latitude,
                        longitude: stop.longitude,
                    })
                }
            })
            .collect()
    }
}

impl MatrixSource for HaversineSource {
    fn distances(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError> {
        let locations = Self::checked_locations(stops)?;
        Ok(DistanceMatrix::from_fn(locations.len(), 0.0, |i, j| {
            haversine_km(locations[i], locations[j])
        }))
    }

    fn times(&self, stops: &[Stop]) -> Result<TimeMatrix, MatrixError> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(MatrixError::Unavailable(format!(
                "speed must be positive, got {}",
                self.speed_kmh
            )));
        }
        let locations = Self::checked_locations(stops)?;
        Ok(TimeMatrix::from_fn(locations.len(), 0, |i, j| {
            travel_minutes(haversine_km(locations[i], locations[j]), self.speed_kmh)
        }))
    }
}
