//! bandcat-api library - band catalog service
//!
//! Read/write access to a catalog of bands and their albums, backed by either
//! an in-memory list or a SQLite database.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod store;

use store::BandStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend chosen from configuration at startup
    pub store: Arc<dyn BandStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn BandStore>) -> Self {
        Self { store }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/bands", get(api::list_bands).post(api::create_band))
        .route("/bands/:band_id", get(api::get_band))
        .route("/bands/genre/:genre", get(api::bands_for_genre))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
