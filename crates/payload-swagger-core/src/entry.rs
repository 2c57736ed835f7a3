//! Entity schemas: the full document and its version wrapper.

use serde_json::{json, Map, Value};

use crate::config::CollectionConfig;
use crate::naming::{name_from_slug, ENTRY_NAME_SUFFIX, VERSION_ENTRY_NAME_SUFFIX};
use crate::properties::{self, PropertiesOptions};
use crate::types::{SwaggerComponent, EXAMPLE_DOCUMENT_ID, EXAMPLE_TIMESTAMP};

fn id_property() -> Value {
    json!({
        "type": "string",
        "example": EXAMPLE_DOCUMENT_ID,
        "description": "Document ID"
    })
}

fn timestamp_property() -> Value {
    json!({"type": "string", "example": EXAMPLE_TIMESTAMP})
}

/// `{Slug}Entry`: id, translated fields with expanded relations, and the
/// timestamp triad when the collection keeps timestamps.
#[must_use]
pub fn generate_entry(collection: &CollectionConfig, locale: &str) -> SwaggerComponent {
    let mut properties = Map::new();
    properties.insert("id".into(), id_property());
    properties.extend(properties::generate(
        &collection.fields,
        &PropertiesOptions::with_locale(locale),
    ));

    if collection.timestamps {
        properties.insert("createdAt".into(), timestamp_property());
        properties.insert("updatedAt".into(), timestamp_property());
        properties.insert(
            "deletedAt".into(),
            json!({"type": "string", "example": null, "nullable": true}),
        );
    }

    SwaggerComponent::new(
        name_from_slug(&collection.slug, ENTRY_NAME_SUFFIX),
        json!({"type": "object", "properties": properties}),
    )
}

/// `{Slug}VersionEntry`: a stored version of a document.
#[must_use]
pub fn generate_version_entry(collection: &CollectionConfig, locale: &str) -> SwaggerComponent {
    let version = properties::generate(&collection.fields, &PropertiesOptions::with_locale(locale));

    SwaggerComponent::new(
        name_from_slug(&collection.slug, VERSION_ENTRY_NAME_SUFFIX),
        json!({
            "type": "object",
            "properties": {
                "id": id_property(),
                "parent": id_property(),
                "version": {"type": "object", "properties": version},
                "createdAt": timestamp_property(),
                "updatedAt": timestamp_property()
            }
        }),
    )
}
