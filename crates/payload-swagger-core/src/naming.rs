//! Component names, `$ref` paths and operation ids.
//!
//! Every generated name goes through [`name_from_slug`], so a `$ref` built
//! here always matches the key its component is registered under.

use convert_case::{Case, Casing};

/// Suffix of the full document representation.
pub const ENTRY_NAME_SUFFIX: &str = "Entry";
/// Suffix of the version wrapper representation.
pub const VERSION_ENTRY_NAME_SUFFIX: &str = "VersionEntry";
/// Suffix of create/update input representations.
pub const DTO_NAME_SUFFIX: &str = "Dto";
/// Suffix of the login credentials input.
pub const LOGIN_DTO_NAME_SUFFIX: &str = "LoginDto";
/// Suffix of paginated listing envelopes.
pub const PAGINATION_RESPONSE_NAME_SUFFIX: &str = "PaginatedDocs";
/// Prefix inserted before the pagination suffix for version listings.
pub const VERSIONS_PREFIX: &str = "Versions";
/// Suffix of the login envelope.
pub const LOGIN_RESPONSE_NAME_SUFFIX: &str = "LoginResponse";
/// Suffix of the current-user envelope.
pub const ME_RESPONSE_NAME_SUFFIX: &str = "MeResponse";
/// Suffix of the error envelope.
pub const ERROR_RESPONSE_NAME_SUFFIX: &str = "ErrorResponse";
/// Suffix of the message envelope.
pub const MESSAGE_RESPONSE_NAME_SUFFIX: &str = "MessageResponse";

/// Build a PascalCase component name from `slug` followed by `suffix`.
///
/// Words are split on separators and case changes, so `blog-posts` with
/// `Entry` becomes `BlogPostsEntry`.
#[must_use]
pub fn name_from_slug(slug: &str, suffix: &str) -> String {
    format!("{slug}{suffix}").to_case(Case::Pascal)
}

/// OpenAPI 3 reference to a component schema.
#[must_use]
pub fn component_ref(name: &str) -> String {
    format!("#/components/schemas/{name}")
}

/// Swagger 2 reference to a definition.
#[must_use]
pub fn definition_ref(name: &str) -> String {
    format!("#/definitions/{name}")
}

/// Build a camelCase operation id from `op` and `slug`.
#[must_use]
pub fn operation_id_from_slug(slug: &str, op: &str) -> String {
    format!("{op}_{slug}").to_case(Case::Camel)
}
