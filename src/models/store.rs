use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::position::Coordinate;

/// A pharmacy outlet. Static reference data: loaded once, read-only for
/// the lifetime of the session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Store {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub position: Coordinate,
}

impl Store {
    pub fn new(id: u32, name: &str, address: &str, position: Coordinate) -> Self {
        Self {
            id,
            name: name.to_string(),
            address: address.to_string(),
            position,
        }
    }
}

/// Built-in outlet list used by the demo binary and tests.
pub static SAMPLE_STORES: Lazy<Vec<Store>> = Lazy::new(|| {
    vec![
        Store::new(
            1,
            "Jana Aushadhi Kendra - City Center",
            "123 Main Street, Mumbai",
            Coordinate::new(19.0760, 72.8777),
        ),
        Store::new(
            2,
            "Government Medical Store",
            "45 Hospital Road, Delhi",
            Coordinate::new(28.6139, 77.2090),
        ),
        Store::new(
            3,
            "Community Pharmacy",
            "78 Market Street, Bangalore",
            Coordinate::new(12.9716, 77.5946),
        ),
        Store::new(
            4,
            "Jana Aushadhi Kendra - North Point",
            "234 Ring Road, Chennai",
            Coordinate::new(13.0827, 80.2707),
        ),
        Store::new(
            5,
            "People's Pharmacy",
            "56 Gandhi Road, Kolkata",
            Coordinate::new(22.5726, 88.3639),
        ),
    ]
});
