//! OpenAPI 3.0 document assembly.
//!
//! Each included collection is turned into a [`CollectionFragment`] holding
//! its tag, schemas, paths and custom overlay. [`SwaggerGenerator::generate`]
//! folds the fragments, in configuration order, into a document skeleton.
//!
//! ```text
//! /api/{slug}                  GET list, POST create
//! /api/{slug}/{id}             GET, PATCH, DELETE
//! /api/{slug}/versions         GET list            (versions enabled)
//! /api/{slug}/versions/{id}    GET, POST restore   (versions enabled)
//! /api/{slug}/{endpoint}       custom endpoints
//! /api/{slug}/me|login|logout  auth               (auth enabled)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;
use utoipa::openapi::external_docs::ExternalDocsBuilder;
use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::tag::TagBuilder;

use crate::config::{CollectionConfig, HostConfig};
use crate::dto::{generate_entry_dto, generate_login_dto, DtoOperation};
use crate::entry::{generate_entry, generate_version_entry};
use crate::locale::{extract_by_locale, DEFAULT_LOCALE};
use crate::merge::deep_merge;
use crate::naming::{component_ref, operation_id_from_slug, VERSIONS_PREFIX};
use crate::parameters::{self, ParametersOptions};
use crate::responses::{
    generate_error_response, generate_login_response, generate_me_response,
    generate_message_response, generate_pagination_response, PaginationOptions, BASIC_PREFIX,
};
use crate::types::SwaggerComponent;

/// OpenAPI version of the generated document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// `info.version` when no override is supplied.
pub const DEFAULT_DOCUMENT_VERSION: &str = "0.0.1";

/// Cookie name prefix when the host does not configure one.
pub const DEFAULT_COOKIE_PREFIX: &str = "payload";

const EXTERNAL_DOCS_URL: &str = "https://payloadcms.com/docs/rest-api/overview";
const EXTERNAL_DOCS_DESCRIPTION: &str = "Payload REST API Overview";

/// Options controlling which collections are documented and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Allow-list of collection slugs; empty documents every collection.
    #[serde(default)]
    pub collections: Vec<String>,

    /// Locale used for labels and descriptions.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Overrides `info.version`.
    #[serde(default)]
    pub version: Option<String>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            collections: Vec::new(),
            locale: default_locale(),
            version: None,
        }
    }
}

impl GeneratorOptions {
    /// Whether the collection with `slug` is documented.
    #[must_use]
    pub fn includes(&self, slug: &str) -> bool {
        self.collections.is_empty() || self.collections.iter().any(|s| s == slug)
    }
}

/// The two envelopes shared by every collection.
#[derive(Debug, Clone)]
struct BasicResponses {
    error: SwaggerComponent,
    message: SwaggerComponent,
}

impl BasicResponses {
    fn new() -> Self {
        Self {
            error: generate_error_response(BASIC_PREFIX),
            message: generate_message_response(BASIC_PREFIX),
        }
    }
}

/// Everything one collection contributes to the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionFragment {
    /// Tag entry, present when the collection has a description.
    pub tag: Option<Value>,

    /// Components to register, in registration order.
    pub schemas: Vec<SwaggerComponent>,

    /// Path items keyed by path.
    pub paths: Map<String, Value>,

    /// `custom.swagger`, deep-merged into the whole document last.
    pub overlay: Option<Value>,
}

impl CollectionFragment {
    /// Fold this fragment into `document`.
    ///
    /// Schemas replace same-named entries. Path items merge per method, so
    /// operations an earlier overlay added to the same path survive. The
    /// overlay is applied with [`deep_merge`] last.
    pub fn apply(self, document: &mut Value) {
        if let Some(tag) = self.tag {
            if let Some(tags) = document.get_mut("tags").and_then(Value::as_array_mut) {
                tags.push(tag);
            }
        }
        if let Some(schemas) = document
            .pointer_mut("/components/schemas")
            .and_then(Value::as_object_mut)
        {
            for component in self.schemas {
                schemas.insert(component.name, component.schema);
            }
        }
        if let Some(paths) = document.get_mut("paths").and_then(Value::as_object_mut) {
            for (path, item) in self.paths {
                match (paths.get_mut(&path).and_then(Value::as_object_mut), item) {
                    (Some(existing), Value::Object(operations)) => existing.extend(operations),
                    (_, item) => {
                        paths.insert(path, item);
                    }
                }
            }
        }
        if let Some(overlay) = self.overlay {
            deep_merge(document, &overlay);
        }
    }
}

/// Builds OpenAPI documents from a host configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerGenerator;

impl SwaggerGenerator {
    /// Generate the complete document.
    #[must_use]
    pub fn generate(config: &HostConfig, options: &GeneratorOptions) -> Value {
        let basics = BasicResponses::new();
        let mut document = skeleton(config, options);

        if let Some(schemas) = document
            .pointer_mut("/components/schemas")
            .and_then(Value::as_object_mut)
        {
            for component in [&basics.error, &basics.message] {
                schemas.insert(component.name.clone(), component.schema.clone());
            }
        }

        config
            .collections
            .iter()
            .filter(|collection| {
                let included = options.includes(&collection.slug);
                if !included {
                    debug!(slug = %collection.slug, "Collection excluded by allow-list");
                }
                included
            })
            .map(|collection| build_fragment(collection, options, &basics))
            .fold(document, |mut document, fragment| {
                fragment.apply(&mut document);
                document
            })
    }

    /// Generate the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn generate_pretty(
        config: &HostConfig,
        options: &GeneratorOptions,
    ) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(&Self::generate(config, options))?)
    }
}

/// Build the contribution of a single collection.
#[must_use]
pub fn collection_fragment(
    collection: &CollectionConfig,
    options: &GeneratorOptions,
) -> CollectionFragment {
    build_fragment(collection, options, &BasicResponses::new())
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}

fn document_title(config: &HostConfig) -> String {
    let suffix = config.admin.meta.title_suffix.trim();
    let head: Vec<&str> = ["Swagger", suffix]
        .into_iter()
        .filter(|part| part.chars().count() > 1)
        .collect();
    format!("{} API - OpenAPI 3.0", head.join(" "))
}

fn skeleton(config: &HostConfig, options: &GeneratorOptions) -> Value {
    let info = InfoBuilder::new()
        .title(document_title(config))
        .version(
            options
                .version
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_DOCUMENT_VERSION),
        )
        .build();
    let external_docs = ExternalDocsBuilder::new()
        .url(EXTERNAL_DOCS_URL)
        .description(Some(EXTERNAL_DOCS_DESCRIPTION))
        .build();

    let cookie_prefix = config
        .cookie_prefix
        .as_deref()
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(DEFAULT_COOKIE_PREFIX);
    let cookie_auth = SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(format!(
        "{cookie_prefix}-token"
    ))));
    let bearer_auth = SecurityScheme::Http(
        HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .build(),
    );

    json!({
        "openapi": OPENAPI_VERSION,
        "info": to_json(&info),
        "tags": [],
        "paths": {},
        "externalDocs": to_json(&external_docs),
        "components": {
            "securitySchemes": {
                "cookieAuth": to_json(&cookie_auth),
                "bearerAuth": to_json(&bearer_auth)
            },
            "schemas": {}
        }
    })
}

/// `{description, content: {application/json: {schema: $ref}}}`
fn json_response(description: &str, component: &SwaggerComponent) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {"$ref": component.reference()}
            }
        }
    })
}

fn json_request_body(component: &SwaggerComponent) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": {"$ref": component.reference()}
            }
        }
    })
}

fn create_request_body(collection: &CollectionConfig, dto: &SwaggerComponent) -> Value {
    let mut content = Map::new();
    if collection.upload.is_enabled() {
        content.insert(
            "multipart/form-data".into(),
            json!({
                "schema": {
                    "type": "object",
                    "properties": {
                        "file": {
                            "type": "array",
                            "items": {"type": "string", "format": "binary"}
                        }
                    }
                }
            }),
        );
    }
    content.insert(
        "application/json".into(),
        json!({"schema": {"$ref": component_ref(&dto.name)}}),
    );
    json!({"required": true, "content": content})
}

/// Express-style `:param` segments become OpenAPI `{param}` templates.
fn endpoint_path(slug: &str, path: &str) -> String {
    let relative: Vec<String> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .map_or_else(|| segment.to_owned(), |name| format!("{{{name}}}"))
        })
        .collect();
    format!("/api/{slug}/{}", relative.join("/"))
}

#[allow(clippy::too_many_lines)]
fn build_fragment(
    collection: &CollectionConfig,
    options: &GeneratorOptions,
    basics: &BasicResponses,
) -> CollectionFragment {
    let slug = collection.slug.as_str();
    let locale = options.locale.as_str();
    let tags = json!([slug]);
    debug!(slug, "Generating collection fragment");

    let mut fragment = CollectionFragment {
        tag: extract_by_locale(collection.admin.description.as_ref(), locale).map(|description| {
            to_json(
                &TagBuilder::new()
                    .name(slug)
                    .description(Some(description))
                    .build(),
            )
        }),
        ..CollectionFragment::default()
    };

    let entry = generate_entry(collection, locale);
    let create_dto = generate_entry_dto(collection, DtoOperation::Create, locale);
    let update_dto = generate_entry_dto(collection, DtoOperation::Update, locale);
    let pagination = generate_pagination_response(collection, PaginationOptions::default());
    let with_draft_query = collection.versions.has_drafts();
    let not_found = json_response("Document not found", &basics.error);
    let unauthorized = json_response("Unauthorized", &basics.error);

    fragment.paths.insert(
        format!("/api/{slug}"),
        json!({
            "get": {
                "tags": tags,
                "summary": "Find paginated documents",
                "parameters": parameters::generate(ParametersOptions {
                    with_basic_query: true,
                    with_find_query: true,
                    with_draft_query,
                    ..ParametersOptions::default()
                }),
                "operationId": operation_id_from_slug(slug, "find"),
                "responses": {
                    "200": json_response("Success", &pagination)
                }
            },
            "post": {
                "tags": tags,
                "summary": "Create a new document",
                "parameters": parameters::generate(ParametersOptions {
                    with_draft_query,
                    ..ParametersOptions::default()
                }),
                "operationId": operation_id_from_slug(slug, "create"),
                "requestBody": create_request_body(collection, &create_dto),
                "responses": {
                    "201": json_response("Success", &entry)
                }
            }
        }),
    );

    let id_params = ParametersOptions {
        path_params: &["id"],
        with_basic_query: true,
        with_draft_query,
        ..ParametersOptions::default()
    };
    fragment.paths.insert(
        format!("/api/{slug}/{{id}}"),
        json!({
            "get": {
                "tags": tags,
                "summary": "Find a specific document by ID",
                "parameters": parameters::generate(ParametersOptions {
                    with_find_query: true,
                    ..id_params
                }),
                "operationId": operation_id_from_slug(slug, "getById"),
                "responses": {
                    "200": json_response("Success", &entry),
                    "404": not_found
                }
            },
            "patch": {
                "tags": tags,
                "summary": "Update a document by ID",
                "parameters": parameters::generate(id_params),
                "operationId": operation_id_from_slug(slug, "updateById"),
                "requestBody": json_request_body(&update_dto),
                "responses": {
                    "200": json_response("Success", &entry),
                    "404": not_found
                }
            },
            "delete": {
                "tags": tags,
                "summary": "Delete an existing document by ID",
                "parameters": parameters::generate(id_params),
                "operationId": operation_id_from_slug(slug, "deleteById"),
                "responses": {
                    "200": json_response("Success", &entry),
                    "404": not_found
                }
            }
        }),
    );

    fragment.schemas.extend([pagination, create_dto, update_dto, entry]);

    if collection.versions.is_enabled() {
        let version_entry = generate_version_entry(collection, locale);
        let version_pagination = generate_pagination_response(
            collection,
            PaginationOptions {
                docs_component_name: Some(version_entry.name.as_str()),
                prefix: Some(VERSIONS_PREFIX),
            },
        );
        let version_params = ParametersOptions {
            path_params: &["id"],
            with_basic_query: true,
            ..ParametersOptions::default()
        };

        fragment.paths.insert(
            format!("/api/{slug}/versions"),
            json!({
                "get": {
                    "tags": tags,
                    "summary": "Find and query paginated versions",
                    "parameters": parameters::generate(ParametersOptions {
                        with_basic_query: true,
                        with_find_query: true,
                        ..ParametersOptions::default()
                    }),
                    "operationId": operation_id_from_slug(slug, "findVersions"),
                    "responses": {
                        "200": json_response("Success", &version_pagination)
                    }
                }
            }),
        );
        fragment.paths.insert(
            format!("/api/{slug}/versions/{{id}}"),
            json!({
                "get": {
                    "tags": tags,
                    "summary": "Find a specific version by ID",
                    "parameters": parameters::generate(version_params),
                    "operationId": operation_id_from_slug(slug, "getVersionById"),
                    "responses": {
                        "200": json_response("Success", &version_entry)
                    }
                },
                "post": {
                    "tags": tags,
                    "summary": "Restore a version by ID",
                    "parameters": parameters::generate(version_params),
                    "operationId": operation_id_from_slug(slug, "restoreVersionById"),
                    "responses": {
                        "200": json_response("Success", &version_entry)
                    }
                }
            }),
        );

        fragment.schemas.extend([version_entry, version_pagination]);
    }

    for endpoint in &collection.endpoints {
        // The endpoint's own fragment goes first so the collection tag wins.
        let mut operation = endpoint.swagger_fragment().cloned().unwrap_or_default();
        operation.insert("tags".into(), tags.clone());

        let item = fragment
            .paths
            .entry(endpoint_path(slug, &endpoint.path))
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(item) = item.as_object_mut() {
            item.insert(endpoint.method.as_str().into(), Value::Object(operation));
        }
    }

    if collection.auth.is_enabled() {
        let login_dto = generate_login_dto(collection);
        let me_response = generate_me_response(collection, None);
        let login_response = generate_login_response(collection, None);

        fragment.paths.insert(
            format!("/api/{slug}/me"),
            json!({
                "get": {
                    "tags": tags,
                    "summary": "Returns the currently logged in user with token",
                    "operationId": operation_id_from_slug(slug, "getMe"),
                    "responses": {
                        "200": json_response("Success", &me_response),
                        "401": unauthorized
                    }
                }
            }),
        );
        fragment.paths.insert(
            format!("/api/{slug}/login"),
            json!({
                "post": {
                    "tags": tags,
                    "summary": "Logs in a user with email / password",
                    "operationId": operation_id_from_slug(slug, "login"),
                    "requestBody": json_request_body(&login_dto),
                    "responses": {
                        "200": json_response("Success", &login_response),
                        "401": unauthorized
                    }
                }
            }),
        );
        fragment.paths.insert(
            format!("/api/{slug}/logout"),
            json!({
                "post": {
                    "tags": tags,
                    "summary": "Logs out a user.",
                    "operationId": operation_id_from_slug(slug, "logout"),
                    "responses": {
                        "204": {"description": "Success logout without response data"},
                        "200": json_response("Success logout", &basics.message),
                        "401": unauthorized
                    }
                }
            }),
        );

        fragment.schemas.extend([login_dto, me_response, login_response]);
    }

    fragment.overlay = collection.swagger_fragment().filter(|v| v.is_object()).cloned();
    fragment
}
