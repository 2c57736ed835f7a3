//! # payload-swagger-server
//!
//! Host integration for payload-swagger.
//!
//! This library provides the init-hook plugin that generates the OpenAPI
//! document when the host starts, the Swagger UI router that serves it,
//! server settings and logging.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod api;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod settings;

pub use host::{Host, InitHook};
pub use plugin::{SwaggerPlugin, SwaggerPluginOptions, DEFAULT_SWAGGER_PATH};
pub use settings::{ServerSettings, SettingsError};
