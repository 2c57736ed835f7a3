//! Shared types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Example document id used wherever the host would show a generated id.
pub const EXAMPLE_DOCUMENT_ID: &str = "64f1c2b7e4b0a1d2c3e4f5a6";

/// Example ISO-8601 timestamp; fixed so repeated generation is byte-identical.
pub const EXAMPLE_TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

/// A named schema registered under `components.schemas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerComponent {
    /// Key under `components.schemas`.
    pub name: String,

    /// JSON Schema value.
    pub schema: Value,
}

impl SwaggerComponent {
    /// Pair a name with its schema.
    #[must_use]
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// `$ref` pointing at this component.
    #[must_use]
    pub fn reference(&self) -> String {
        crate::naming::component_ref(&self.name)
    }
}
