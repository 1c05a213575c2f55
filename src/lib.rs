//! Store-locator core for the pharmacy price-comparison app: a continuous
//! location watch over a pluggable provider, haversine nearby-store
//! ranking, and an actor that turns search requests into map-surface
//! commands and user notifications.

pub mod handlers;
pub mod models;
