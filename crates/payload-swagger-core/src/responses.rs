//! Response envelope schemas.
//!
//! Envelopes reference entity components by name; the referenced collection
//! must itself be part of the document for the `$ref` to resolve.

use serde_json::json;

use crate::config::CollectionConfig;
use crate::naming::{
    component_ref, name_from_slug, ENTRY_NAME_SUFFIX, ERROR_RESPONSE_NAME_SUFFIX,
    LOGIN_RESPONSE_NAME_SUFFIX, ME_RESPONSE_NAME_SUFFIX, MESSAGE_RESPONSE_NAME_SUFFIX,
    PAGINATION_RESPONSE_NAME_SUFFIX,
};
use crate::types::SwaggerComponent;

/// Prefix of the shared error and message envelopes.
pub const BASIC_PREFIX: &str = "Basic";

const EXAMPLE_TOKEN: &str = "34o4345324...";
const EXAMPLE_EXPIRATION: u64 = 1_609_619_861;

/// Options for [`generate_pagination_response`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationOptions<'a> {
    /// Component listed in `docs`; defaults to the collection's entry.
    pub docs_component_name: Option<&'a str>,

    /// Inserted between the slug and the suffix, e.g. `Versions`.
    pub prefix: Option<&'a str>,
}

/// `{Prefix}ErrorResponse`: a list of error messages.
#[must_use]
pub fn generate_error_response(prefix: &str) -> SwaggerComponent {
    SwaggerComponent::new(
        format!("{prefix}{ERROR_RESPONSE_NAME_SUFFIX}"),
        json!({
            "type": "object",
            "properties": {
                "errors": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "message": {"type": "string", "required": true}
                        }
                    }
                }
            }
        }),
    )
}

/// `{Prefix}MessageResponse`: a single message.
#[must_use]
pub fn generate_message_response(prefix: &str) -> SwaggerComponent {
    SwaggerComponent::new(
        format!("{prefix}{MESSAGE_RESPONSE_NAME_SUFFIX}"),
        json!({
            "type": "object",
            "properties": {
                "message": {"type": "string", "required": true}
            }
        }),
    )
}

/// `{Slug}[Prefix]PaginatedDocs`: one page of documents plus paging metadata.
#[must_use]
pub fn generate_pagination_response(
    collection: &CollectionConfig,
    options: PaginationOptions<'_>,
) -> SwaggerComponent {
    let docs = options.docs_component_name.map_or_else(
        || name_from_slug(&collection.slug, ENTRY_NAME_SUFFIX),
        str::to_owned,
    );
    let suffix = format!(
        "{}{PAGINATION_RESPONSE_NAME_SUFFIX}",
        options.prefix.unwrap_or_default()
    );

    SwaggerComponent::new(
        name_from_slug(&collection.slug, &suffix),
        json!({
            "type": "object",
            "properties": {
                "docs": {
                    "type": "array",
                    "items": {"$ref": component_ref(&docs)}
                },
                "hasPrevPage": {"type": "boolean", "example": false},
                "hasNextPage": {"type": "boolean", "example": false},
                "prevPage": {"nullable": true, "example": null, "type": "string"},
                "nextPage": {"nullable": true, "example": null, "type": "string"},
                "pagingCounter": {"type": "number", "example": 1},
                "totalPages": {"type": "number", "example": 1},
                "limit": {"type": "number", "example": 10},
                "page": {"type": "number", "example": 1}
            }
        }),
    )
}

fn user_name(collection: &CollectionConfig, user_component_name: Option<&str>) -> String {
    user_component_name.map_or_else(
        || name_from_slug(&collection.slug, ENTRY_NAME_SUFFIX),
        str::to_owned,
    )
}

/// `{Slug}LoginResponse`: the authenticated user with a token.
#[must_use]
pub fn generate_login_response(
    collection: &CollectionConfig,
    user_component_name: Option<&str>,
) -> SwaggerComponent {
    let user = user_name(collection, user_component_name);
    SwaggerComponent::new(
        name_from_slug(&collection.slug, LOGIN_RESPONSE_NAME_SUFFIX),
        json!({
            "type": "object",
            "properties": {
                "user": {"$ref": component_ref(&user)},
                "token": {"type": "string", "example": EXAMPLE_TOKEN},
                "exp": {"type": "number", "example": EXAMPLE_EXPIRATION}
            }
        }),
    )
}

/// `{Slug}MeResponse`: the current user, its collection and token.
#[must_use]
pub fn generate_me_response(
    collection: &CollectionConfig,
    user_component_name: Option<&str>,
) -> SwaggerComponent {
    let user = user_name(collection, user_component_name);
    SwaggerComponent::new(
        name_from_slug(&collection.slug, ME_RESPONSE_NAME_SUFFIX),
        json!({
            "type": "object",
            "properties": {
                "user": {"$ref": component_ref(&user)},
                "collection": {"type": "string"},
                "token": {"type": "string", "example": EXAMPLE_TOKEN},
                "exp": {"type": "number", "example": EXAMPLE_EXPIRATION}
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> CollectionConfig {
        CollectionConfig::new("users", vec![])
    }

    #[test]
    fn test_basic_envelopes() {
        let error = generate_error_response(BASIC_PREFIX);
        assert_eq!(error.name, "BasicErrorResponse");
        assert_eq!(
            error.schema["properties"]["errors"]["items"]["properties"]["message"]["type"],
            json!("string")
        );

        let message = generate_message_response(BASIC_PREFIX);
        assert_eq!(message.name, "BasicMessageResponse");
        assert_eq!(message.schema["properties"]["message"]["required"], json!(true));
    }

    #[test]
    fn test_pagination_defaults_to_entry_docs() {
        let page = generate_pagination_response(&users(), PaginationOptions::default());
        assert_eq!(page.name, "UsersPaginatedDocs");
        assert_eq!(
            page.schema["properties"]["docs"]["items"]["$ref"],
            json!("#/components/schemas/UsersEntry")
        );

        let keys: Vec<&str> = page.schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            [
                "docs",
                "hasPrevPage",
                "hasNextPage",
                "prevPage",
                "nextPage",
                "pagingCounter",
                "totalPages",
                "limit",
                "page"
            ]
        );
    }

    #[test]
    fn test_version_pagination() {
        let page = generate_pagination_response(
            &users(),
            PaginationOptions {
                docs_component_name: Some("UsersVersionEntry"),
                prefix: Some("Versions"),
            },
        );
        assert_eq!(page.name, "UsersVersionsPaginatedDocs");
        assert_eq!(
            page.schema["properties"]["docs"]["items"]["$ref"],
            json!("#/components/schemas/UsersVersionEntry")
        );
    }

    #[test]
    fn test_auth_envelopes_reference_user_entry() {
        let login = generate_login_response(&users(), None);
        assert_eq!(login.name, "UsersLoginResponse");
        assert_eq!(
            login.schema["properties"]["user"]["$ref"],
            json!("#/components/schemas/UsersEntry")
        );
        assert_eq!(login.schema["properties"]["exp"]["type"], json!("number"));

        let me = generate_me_response(&users(), Some("AdminsEntry"));
        assert_eq!(me.name, "UsersMeResponse");
        assert_eq!(
            me.schema["properties"]["user"]["$ref"],
            json!("#/components/schemas/AdminsEntry")
        );
        assert_eq!(me.schema["properties"]["collection"], json!({"type": "string"}));
    }
}
