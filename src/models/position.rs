use serde::{Deserialize, Serialize};

/// A point on Earth's surface. A fresh value replaces the old one on every
/// location update; never mutated in place.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Geographic bounds: latitude in [-90, 90], longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub km: f64,
}

impl Distance {
    pub fn new(km: f64) -> Self {
        Self { km }
    }
}
