//! Field descriptors to JSON Schema `properties`.
//!
//! [`generate`] walks a field list in declaration order and emits one schema
//! fragment per data-carrying field. Layout containers without a name (rows,
//! collapsibles, unnamed tabs) are flattened into the parent object. Hidden
//! fields and fields named `password` are never emitted.
//!
//! Required fields carry `required: true` on their own fragment, matching
//! the host's REST documentation style rather than a parent `required` list.

use serde_json::{json, Map, Value};

use crate::config::{Field, FieldKind, RelationTo, Tab};
use crate::locale::{extract_by_locale, DEFAULT_LOCALE};
use crate::naming::{component_ref, name_from_slug, ENTRY_NAME_SUFFIX};
use crate::types::EXAMPLE_TIMESTAMP;

/// Field name that never appears in generated schemas.
pub const PASSWORD_FIELD: &str = "password";

/// Options for [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesOptions {
    /// Render relations as bare id strings instead of entity references.
    pub flatten_relationships: bool,

    /// Locale used to resolve labels.
    pub locale: String,
}

impl Default for PropertiesOptions {
    fn default() -> Self {
        Self {
            flatten_relationships: false,
            locale: DEFAULT_LOCALE.to_owned(),
        }
    }
}

impl PropertiesOptions {
    /// Options for `locale` with relations expanded.
    #[must_use]
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            flatten_relationships: false,
            locale: locale.into(),
        }
    }

    /// Same options with relations flattened to ids.
    #[must_use]
    pub fn flattened(mut self) -> Self {
        self.flatten_relationships = true;
        self
    }
}

/// Translate `fields` into a `properties` map.
#[must_use]
pub fn generate(fields: &[Field], options: &PropertiesOptions) -> Map<String, Value> {
    let mut result = Map::new();
    for field in fields {
        if field.hidden {
            continue;
        }
        match field.name.as_deref() {
            Some(PASSWORD_FIELD) => {}
            Some(name) => {
                if let Some(schema) = field_schema(field, options) {
                    result.insert(name.to_owned(), Value::Object(schema));
                }
            }
            None => flatten_layout(&field.kind, options, &mut result),
        }
    }
    result
}

/// Schema of a single named field, `None` when the field holds no data.
fn field_schema(field: &Field, options: &PropertiesOptions) -> Option<Map<String, Value>> {
    let mut schema = Map::new();
    if let Some(description) = extract_by_locale(field.label.as_ref(), &options.locale) {
        schema.insert("description".into(), description.into());
    }
    if field.required {
        schema.insert("required".into(), Value::Bool(true));
    }

    match &field.kind {
        FieldKind::Text | FieldKind::Code | FieldKind::Email | FieldKind::Textarea => {
            schema.insert("type".into(), "string".into());
        }
        FieldKind::Date => {
            schema.insert("type".into(), "string".into());
            schema.insert("example".into(), EXAMPLE_TIMESTAMP.into());
        }
        FieldKind::Radio { options: choices } => {
            schema.extend(enum_schema(choices.iter().map(|o| o.value())));
        }
        FieldKind::Select {
            options: choices,
            has_many,
        } => {
            let select = enum_schema(choices.iter().map(|o| o.value()));
            if *has_many {
                schema.insert("type".into(), "array".into());
                schema.insert("items".into(), Value::Object(select));
            } else {
                schema.extend(select);
            }
        }
        FieldKind::Number => {
            schema.insert("type".into(), "number".into());
        }
        FieldKind::Checkbox => {
            schema.insert("type".into(), "boolean".into());
        }
        FieldKind::RichText => {
            schema.insert("type".into(), "array".into());
            schema.insert("items".into(), json!({"type": "object"}));
        }
        FieldKind::Json => {
            schema.insert(
                "oneOf".into(),
                json!([
                    {"type": "null"},
                    {"type": "array"},
                    {"type": "string"},
                    {"type": "number"},
                    {"type": "boolean"},
                    {"type": "object", "format": "json"}
                ]),
            );
        }
        FieldKind::Point => {
            schema.insert("type".into(), "array".into());
            schema.insert("minItems".into(), json!(2));
            schema.insert("maxItems".into(), json!(2));
            schema.insert("items".into(), json!([{"type": "number"}, {"type": "number"}]));
        }
        FieldKind::Relationship {
            relation_to,
            has_many,
        }
        | FieldKind::Upload {
            relation_to,
            has_many,
        } => {
            // Polymorphic relations stay unconstrained.
            if let RelationTo::One(slug) = relation_to {
                schema.extend(relationship_schema(
                    slug,
                    *has_many,
                    options.flatten_relationships,
                ));
            }
        }
        FieldKind::Array { fields } => {
            schema.insert("type".into(), "array".into());
            schema.insert(
                "items".into(),
                json!({"type": "object", "properties": generate(fields, options)}),
            );
        }
        FieldKind::Group { fields } => {
            schema.insert("type".into(), "object".into());
            schema.insert("properties".into(), Value::Object(generate(fields, options)));
        }
        FieldKind::Ui => return None,
        FieldKind::Row { .. }
        | FieldKind::Collapsible { .. }
        | FieldKind::Tabs { .. }
        | FieldKind::Unknown => {
            tracing::trace!(kind = ?field.kind, "Field passed through without a type");
        }
    }

    Some(schema)
}

/// Merge the fields of a nameless layout container into `result`.
fn flatten_layout(kind: &FieldKind, options: &PropertiesOptions, result: &mut Map<String, Value>) {
    match kind {
        FieldKind::Row { fields } | FieldKind::Collapsible { fields } => {
            result.extend(generate(fields, options));
        }
        FieldKind::Tabs { tabs } => {
            for tab in tabs {
                tab_properties(tab, options, result);
            }
        }
        _ => {}
    }
}

fn tab_properties(tab: &Tab, options: &PropertiesOptions, result: &mut Map<String, Value>) {
    let properties = generate(&tab.fields, options);
    let Some(name) = tab.name.as_deref() else {
        result.extend(properties);
        return;
    };

    let mut schema = Map::new();
    if let Some(description) = extract_by_locale(tab.label.as_ref(), &options.locale) {
        schema.insert("description".into(), description.into());
    }
    schema.insert("type".into(), "object".into());
    schema.insert("properties".into(), Value::Object(properties));
    result.insert(name.to_owned(), Value::Object(schema));
}

fn enum_schema<'a>(values: impl Iterator<Item = &'a str>) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), "string".into());
    schema.insert(
        "enum".into(),
        Value::Array(values.map(Value::from).collect()),
    );
    schema
}

fn relationship_schema(slug: &str, has_many: bool, flatten: bool) -> Map<String, Value> {
    let single = if flatten {
        json!({"type": "string"})
    } else {
        json!({
            "allOf": [
                {"type": "string"},
                {"$ref": component_ref(&name_from_slug(slug, ENTRY_NAME_SUFFIX))}
            ]
        })
    };

    if has_many {
        let mut schema = Map::new();
        schema.insert("type".into(), "array".into());
        schema.insert("uniqueItems".into(), Value::Bool(true));
        schema.insert("items".into(), single);
        schema
    } else if let Value::Object(map) = single {
        map
    } else {
        Map::new()
    }
}
