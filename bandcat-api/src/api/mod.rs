//! HTTP API handlers for bandcat-api

pub mod bands;
pub mod health;

pub use bands::{bands_for_genre, create_band, get_band, list_bands};
pub use health::health_routes;
