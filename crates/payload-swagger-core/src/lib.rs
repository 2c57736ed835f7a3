//! # payload-swagger-core
//!
//! OpenAPI 3.0 document generation for Payload-style collection configs.
//!
//! This crate provides:
//! - A typed model of the host configuration (collections, fields, endpoints)
//! - Field-to-JSON-Schema translation with localized descriptions
//! - Entity, DTO, response envelope and parameter generators
//! - Assembly of a complete, deterministic OpenAPI document
//!
//! ## Architecture
//!
//! - [`config`] - Host and collection configuration, loading and validation
//! - [`properties`] - Field descriptors to JSON Schema properties
//! - [`entry`] - `{Slug}Entry` and `{Slug}VersionEntry` schemas
//! - [`dto`] - Create, update and login request bodies
//! - [`responses`] - Pagination, auth and basic envelopes
//! - [`parameters`] - Reusable path and query parameters
//! - [`generator`] - Per-collection fragments folded into the document
//! - [`merge`] - Deep merge used for `custom.swagger` overlays
//! - [`error`] - Unified error types for the crate
//!
//! ## Example
//!
//! ```
//! use payload_swagger_core::{CollectionConfig, Field, FieldKind, GeneratorOptions, HostConfig, SwaggerGenerator};
//!
//! let config = HostConfig {
//!     collections: vec![CollectionConfig::new(
//!         "posts",
//!         vec![Field::named("title", FieldKind::Text).required()],
//!     )],
//!     ..HostConfig::default()
//! };
//! let document = SwaggerGenerator::generate(&config, &GeneratorOptions::default());
//! assert!(document["paths"].get("/api/posts/{id}").is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod entry;
pub mod error;
pub mod generator;
pub mod locale;
pub mod merge;
pub mod naming;
pub mod parameters;
pub mod properties;
pub mod responses;
pub mod types;

// Re-export primary types for convenience
pub use config::{
    CollectionConfig, Endpoint, Field, FieldKind, HostConfig, Method, RelationTo, SelectOption,
    Tab, Toggle, Versions,
};
pub use error::{Result, SwaggerError};
pub use generator::{collection_fragment, CollectionFragment, GeneratorOptions, SwaggerGenerator};
pub use locale::{extract_by_locale, LocalizedText, DEFAULT_LOCALE};
pub use merge::deep_merge;
pub use types::SwaggerComponent;
