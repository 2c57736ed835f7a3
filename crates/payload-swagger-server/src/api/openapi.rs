//! Serving the generated document.
//!
//! The explorer is `utoipa-swagger-ui`'s bundled Swagger UI. Because the
//! document is produced at runtime from the host configuration rather than
//! derived from handler annotations, it is registered as an external URL
//! carrying a prebuilt JSON value.

use axum::Router;
use payload_swagger_core::{GeneratorOptions, HostConfig, SwaggerGenerator};
use serde_json::Value;
use utoipa_swagger_ui::SwaggerUi;

/// Document location when the explorer is mounted at the root.
pub const ROOT_DOCUMENT_PATH: &str = "/openapi.json";

/// Characters axum reads as route syntax, or that cannot appear in a path.
const RESERVED: [char; 6] = ['{', '}', '*', ':', '?', '#'];

/// Normalize a mount path: a leading `/`, no trailing `/` except for the
/// root itself. Paths that axum would reject or read as captures give `None`.
#[must_use]
pub fn normalize_mount_path(path: &str) -> Option<String> {
    let path = path.trim();
    if path.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c)) {
        return None;
    }

    let trimmed = path.trim_matches('/');
    if !trimmed.is_empty() && trimmed.split('/').any(str::is_empty) {
        return None;
    }
    Some(format!("/{trimmed}"))
}

/// Where the JSON document is served for an explorer mounted at `path`.
///
/// `/api/swagger` serves `/api/swagger.json`; the root serves `/openapi.json`.
#[must_use]
pub fn swagger_json_path(path: &str) -> String {
    match path.trim().trim_matches('/') {
        "" => ROOT_DOCUMENT_PATH.to_owned(),
        trimmed => format!("/{trimmed}.json"),
    }
}

/// Router serving the explorer at `path` and `document` at
/// [`swagger_json_path`], or `None` when `path` cannot be routed.
pub fn swagger_router(path: &str, document: Value) -> Option<Router> {
    let ui_path = normalize_mount_path(path)?;
    let json_path = swagger_json_path(&ui_path);
    Some(
        SwaggerUi::new(ui_path)
            .external_url_unchecked(json_path, document)
            .into(),
    )
}

/// Returns the document as pretty-printed JSON.
/// Used by the gen-openapi binary.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn get_openapi_json(
    config: &HostConfig,
    options: &GeneratorOptions,
) -> payload_swagger_core::Result<String> {
    SwaggerGenerator::generate_pretty(config, options)
}
