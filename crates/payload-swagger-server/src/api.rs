//! HTTP routes of the stand-in host.
//!
//! - `health` - Service health checks
//! - `openapi` - Swagger UI and the generated document

use axum::Router;

pub mod health;
pub mod openapi;

// Re-export the serving helpers for the plugin and the gen-openapi binary
pub use openapi::{get_openapi_json, normalize_mount_path, swagger_json_path, swagger_router};

/// Creates the base router the host starts from.
///
/// # Route Structure
///
/// ```text
/// /health                - Health check
/// /api/swagger           - Swagger UI (mounted by the plugin on init)
/// /api/swagger.json      - Generated document (`/openapi.json` for a root mount)
/// ```
pub fn create_router() -> Router {
    Router::new().nest("/health", health::router())
}
