//! Geocoded stops.

use serde::{Deserialize, Serialize};

/// Postal metadata attached to a stop.
///
/// The engine never reads these fields; they travel with the stop so that
/// the persisted route can be rendered for drivers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub instructions: Option<String>,
    pub is_residential: Option<bool>,
    pub is_business: Option<bool>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

/// A stop to visit.
///
/// A stop's identity is its position in the request's stop list; index 0 is
/// the depot or start point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Address,
}

impl Stop {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: Address::default(),
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// `(lat, lng)` pair.
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
