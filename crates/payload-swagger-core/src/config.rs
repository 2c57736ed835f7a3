//! Host configuration model.
//!
//! A typed, read-only view of the host framework's sanitized configuration:
//! collections, their fields, auth/upload/versioning settings and custom
//! endpoints. Configurations are loaded from JSON or TOML files that mirror
//! the host's own camelCase keys.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SwaggerError};
use crate::locale::LocalizedText;

/// Key under `custom` holding a document fragment.
pub const CUSTOM_SWAGGER_KEY: &str = "swagger";

/// Root of the host configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Collections in declaration order.
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,

    /// Admin panel settings.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Prefix of the auth cookie name (`{prefix}-token`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_prefix: Option<String>,
}

/// Global admin settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Page metadata.
    #[serde(default)]
    pub meta: AdminMeta,
}

/// Admin page metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMeta {
    /// Suffix appended to page titles, reused in the document title.
    #[serde(default)]
    pub title_suffix: String,
}

/// One collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Unique identifier used in paths and component names.
    pub slug: String,

    /// Field descriptors in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Whether documents carry `createdAt`/`updatedAt`/`deletedAt`.
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Upload support (file collections).
    #[serde(default)]
    pub upload: Toggle,

    /// Authentication support (user collections).
    #[serde(default)]
    pub auth: Toggle,

    /// Versioning, optionally with drafts.
    #[serde(default)]
    pub versions: Versions,

    /// Custom endpoints mounted under the collection.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    /// Free-form custom data; `custom.swagger` is merged into the document.
    #[serde(default)]
    pub custom: Map<String, Value>,

    /// Admin panel metadata.
    #[serde(default)]
    pub admin: CollectionAdmin,
}

const fn default_timestamps() -> bool {
    true
}

impl CollectionConfig {
    /// Create a collection with defaults for everything but the slug and fields.
    #[must_use]
    pub fn new(slug: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            slug: slug.into(),
            fields,
            timestamps: true,
            upload: Toggle::default(),
            auth: Toggle::default(),
            versions: Versions::default(),
            endpoints: Vec::new(),
            custom: Map::new(),
            admin: CollectionAdmin::default(),
        }
    }

    /// The `custom.swagger` fragment, if any.
    #[must_use]
    pub fn swagger_fragment(&self) -> Option<&Value> {
        self.custom.get(CUSTOM_SWAGGER_KEY)
    }
}

/// Admin metadata of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionAdmin {
    /// Description shown in the admin panel and used as the tag description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
}

/// A setting the host accepts either as a flag or as an options object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    /// Plain on/off.
    Flag(bool),
    /// Enabled with options.
    Options(Map<String, Value>),
}

impl Default for Toggle {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Toggle {
    /// Whether the feature is turned on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(enabled) => *enabled,
            Self::Options(_) => true,
        }
    }
}

/// Versioning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Versions {
    /// Plain on/off.
    Flag(bool),
    /// Enabled with options.
    Options(VersionOptions),
}

impl Default for Versions {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Versions {
    /// Whether versioning is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(enabled) => *enabled,
            Self::Options(_) => true,
        }
    }

    /// Whether drafts are enabled; only possible with an options object.
    #[must_use]
    pub const fn has_drafts(&self) -> bool {
        match self {
            Self::Flag(_) => false,
            Self::Options(options) => options.drafts.is_enabled(),
        }
    }
}

/// Versioning options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionOptions {
    /// Draft support.
    #[serde(default)]
    pub drafts: Toggle,
}

/// HTTP method of a custom endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// GET
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// CONNECT
    Connect,
    /// OPTIONS
    Options,
}

impl Method {
    /// Key used for this method inside an OpenAPI path item.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Head => "head",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Connect => "connect",
            Self::Options => "options",
        }
    }
}

/// A custom endpoint declared on a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path relative to the collection root.
    pub path: String,

    /// HTTP method.
    pub method: Method,

    /// Free-form custom data; `custom.swagger` becomes the operation object.
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl Endpoint {
    /// The `custom.swagger` operation fragment, if it is an object.
    #[must_use]
    pub fn swagger_fragment(&self) -> Option<&Map<String, Value>> {
        self.custom.get(CUSTOM_SWAGGER_KEY).and_then(Value::as_object)
    }
}

/// A field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Property name; absent for pure layout containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Admin label, used as the property description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LocalizedText>,

    /// Whether a value is required.
    #[serde(default)]
    pub required: bool,

    /// Hidden fields never reach the API.
    #[serde(default)]
    pub hidden: bool,

    /// Type-specific attributes.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// Create a named field of the given kind.
    #[must_use]
    pub fn named(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: Some(name.into()),
            label: None,
            required: false,
            hidden: false,
            kind,
        }
    }

    /// Create a nameless layout field.
    #[must_use]
    pub fn layout(kind: FieldKind) -> Self {
        Self {
            name: None,
            label: None,
            required: false,
            hidden: false,
            kind,
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<LocalizedText>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Field type tag and the attributes that go with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// Single line text.
    Text,
    /// Source code.
    Code,
    /// Email address.
    Email,
    /// Multi line text.
    Textarea,
    /// Date/time.
    Date,
    /// Radio group.
    Radio {
        /// Allowed values.
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    /// Select box.
    Select {
        /// Allowed values.
        #[serde(default)]
        options: Vec<SelectOption>,
        /// Multiple selection.
        #[serde(default, rename = "hasMany")]
        has_many: bool,
    },
    /// Number.
    Number,
    /// Checkbox.
    Checkbox,
    /// Rich text document.
    RichText,
    /// Arbitrary JSON.
    Json,
    /// Geographic point.
    Point,
    /// Reference to documents of other collections.
    Relationship {
        /// Target collection slug(s).
        #[serde(rename = "relationTo")]
        relation_to: RelationTo,
        /// Multiple references.
        #[serde(default, rename = "hasMany")]
        has_many: bool,
    },
    /// Reference to upload documents.
    Upload {
        /// Target collection slug(s).
        #[serde(rename = "relationTo")]
        relation_to: RelationTo,
        /// Multiple references.
        #[serde(default, rename = "hasMany")]
        has_many: bool,
    },
    /// Repeating rows of nested fields.
    Array {
        /// Fields of one row.
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Nested object.
    Group {
        /// Nested fields.
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Horizontal layout.
    Row {
        /// Laid out fields.
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Collapsible layout.
    Collapsible {
        /// Laid out fields.
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Tabbed layout.
    Tabs {
        /// Tabs in display order.
        #[serde(default)]
        tabs: Vec<Tab>,
    },
    /// Admin-only component, holds no data.
    Ui,
    /// A field type this crate does not know.
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Whether this kind only arranges nested fields.
    #[must_use]
    pub const fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::Row { .. } | Self::Collapsible { .. } | Self::Tabs { .. }
        )
    }
}

/// One tab of a tabs layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Named tabs nest their fields under this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tab label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LocalizedText>,

    /// Fields of the tab.
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// An option of a radio or select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    /// Bare value.
    Value(String),
    /// Value with a label.
    Labeled {
        /// Stored value.
        value: String,
        /// Display label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<LocalizedText>,
    },
}

impl SelectOption {
    /// The stored value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Value(value) | Self::Labeled { value, .. } => value,
        }
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

/// Target of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTo {
    /// A single collection.
    One(String),
    /// Polymorphic relation to several collections.
    Many(Vec<String>),
}

impl From<&str> for RelationTo {
    fn from(slug: &str) -> Self {
        Self::One(slug.to_owned())
    }
}

impl HostConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SwaggerError::ConfigParseError`] if the JSON does not match the model.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SwaggerError::ConfigParseError(e.to_string()))
    }

    /// Parse a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SwaggerError::ConfigParseError`] if the TOML does not match the model.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, of an unsupported
    /// format, or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SwaggerError::ConfigNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;

        let config = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "toml" => Self::from_toml_str(&content)?,
            other => return Err(SwaggerError::UnsupportedConfigFormat(other.to_owned())),
        };

        tracing::debug!(
            path = %path.display(),
            collections = config.collections.len(),
            "Loaded host configuration"
        );
        Ok(config)
    }

    /// Check that every collection has a unique, non-empty slug.
    ///
    /// # Errors
    ///
    /// Returns [`SwaggerError::ConfigValidationError`] listing every problem found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();

        for (index, collection) in self.collections.iter().enumerate() {
            if collection.slug.trim().is_empty() {
                problems.push(format!("collections[{index}]: slug cannot be empty"));
            } else if !seen.insert(collection.slug.as_str()) {
                problems.push(format!(
                    "collections[{index}]: duplicate slug '{}'",
                    collection.slug
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SwaggerError::ConfigValidationError(problems.join("; ")))
        }
    }

    /// Look up a collection by slug.
    #[must_use]
    pub fn collection(&self, slug: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_collection_defaults() {
        let collection: CollectionConfig = serde_json::from_value(json!({"slug": "posts"})).unwrap();
        assert!(collection.timestamps);
        assert!(!collection.auth.is_enabled());
        assert!(!collection.upload.is_enabled());
        assert!(!collection.versions.is_enabled());
        assert!(collection.fields.is_empty());
        assert!(collection.swagger_fragment().is_none());
    }

    #[test]
    fn test_toggles_accept_flags_and_objects() {
        let collection: CollectionConfig = serde_json::from_value(json!({
            "slug": "users",
            "auth": {"tokenExpiration": 7200},
            "upload": true,
            "versions": {"drafts": true}
        }))
        .unwrap();
        assert!(collection.auth.is_enabled());
        assert!(collection.upload.is_enabled());
        assert!(collection.versions.is_enabled());
        assert!(collection.versions.has_drafts());
    }

    #[test]
    fn test_versions_flag_has_no_drafts() {
        assert!(!Versions::Flag(true).has_drafts());
        assert!(Versions::Flag(true).is_enabled());
        let options: Versions = serde_json::from_value(json!({"maxPerDoc": 5})).unwrap();
        assert!(options.is_enabled());
        assert!(!options.has_drafts());
    }

    #[test]
    fn test_field_kinds_deserialize() {
        let fields: Vec<Field> = serde_json::from_value(json!([
            {"name": "title", "type": "text", "required": true},
            {"name": "body", "type": "richText"},
            {"name": "status", "type": "select", "hasMany": true, "options": ["a", {"value": "b", "label": "B"}]},
            {"name": "author", "type": "relationship", "relationTo": "users"},
            {"name": "related", "type": "relationship", "relationTo": ["posts", "pages"], "hasMany": true},
            {"type": "row", "fields": [{"name": "x", "type": "number"}]},
            {"name": "widget", "type": "colorPicker", "fields": []}
        ]))
        .unwrap();

        assert!(fields[0].required);
        assert_eq!(fields[1].kind, FieldKind::RichText);
        match &fields[2].kind {
            FieldKind::Select { options, has_many } => {
                assert!(has_many);
                let values: Vec<&str> = options.iter().map(SelectOption::value).collect();
                assert_eq!(values, ["a", "b"]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(
            fields[3].kind,
            FieldKind::Relationship {
                relation_to: RelationTo::One("users".into()),
                has_many: false
            }
        );
        assert!(matches!(
            &fields[4].kind,
            FieldKind::Relationship { relation_to: RelationTo::Many(slugs), has_many: true } if slugs.len() == 2
        ));
        assert!(fields[5].name.is_none());
        assert!(fields[5].kind.is_layout());
        assert_eq!(fields[6].kind, FieldKind::Unknown);
    }

    #[test]
    fn test_endpoint_fragment() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "path": "/publish",
            "method": "post",
            "custom": {"swagger": {"summary": "Publish"}}
        }))
        .unwrap();
        assert_eq!(endpoint.method.as_str(), "post");
        assert_eq!(
            endpoint.swagger_fragment().and_then(|f| f.get("summary")),
            Some(&json!("Publish"))
        );
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = HostConfig {
            collections: vec![
                CollectionConfig::new("posts", vec![]),
                CollectionConfig::new("", vec![]),
                CollectionConfig::new("posts", vec![]),
            ],
            ..HostConfig::default()
        };
        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("collections[1]: slug cannot be empty"));
        assert!(message.contains("collections[2]: duplicate slug 'posts'"));
    }

    #[test]
    fn test_validate_accepts_unique_slugs() {
        let config = HostConfig {
            collections: vec![
                CollectionConfig::new("posts", vec![]),
                CollectionConfig::new("users", vec![]),
            ],
            ..HostConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.collection("users").is_some());
        assert!(config.collection("pages").is_none());
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"cookiePrefix": "app", "admin": {{"meta": {{"titleSuffix": "- Blog"}}}}, "collections": [{{"slug": "posts"}}]}}"#
        )
        .unwrap();

        let config = HostConfig::load(file.path()).unwrap();
        assert_eq!(config.cookie_prefix.as_deref(), Some("app"));
        assert_eq!(config.admin.meta.title_suffix, "- Blog");
        assert_eq!(config.collections.len(), 1);
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[collections]]
slug = "posts"
timestamps = false

[[collections.fields]]
name = "title"
type = "text"
required = true
"#
        )
        .unwrap();

        let config = HostConfig::load(file.path()).unwrap();
        let posts = &config.collections[0];
        assert!(!posts.timestamps);
        assert_eq!(posts.fields[0].name.as_deref(), Some("title"));
        assert_eq!(posts.fields[0].kind, FieldKind::Text);
    }

    #[test]
    fn test_load_missing_file() {
        let err = HostConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SwaggerError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = HostConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SwaggerError::UnsupportedConfigFormat(ext) if ext == "yaml"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = HostConfig::from_json_str(r#"{"collections": [{"fields": []}]}"#).unwrap_err();
        assert!(matches!(err, SwaggerError::ConfigParseError(_)));
    }
}
