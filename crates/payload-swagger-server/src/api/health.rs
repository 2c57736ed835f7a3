//! Health check API endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version from Cargo.toml.
    pub version: String,
}

/// Creates the health router.
pub fn router() -> Router {
    Router::new().route("/", get(health_check))
}

/// Returns basic service status, for load balancers and monitoring.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
