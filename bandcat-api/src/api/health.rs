//! Liveness and store reachability

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::error;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `unavailable` when the store cannot be read
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// `memory` or `sqlite`
    pub store: String,
    /// Number of bands in the catalog, absent when the store is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bands: Option<usize>,
}

/// GET /health
///
/// Reads the catalog once so a broken database shows up as 503.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, status, bands) = match state.store.list_all().await {
        Ok(bands) => (StatusCode::OK, "ok", Some(bands.len())),
        Err(e) => {
            error!("Health check could not read store: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", None)
        }
    };

    let body = HealthResponse {
        status,
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.kind().to_string(),
        bands,
    };
    (status_code, Json(body))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
