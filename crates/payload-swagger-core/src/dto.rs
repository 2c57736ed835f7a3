//! Request body schemas.

use serde_json::{json, Value};

use crate::config::CollectionConfig;
use crate::naming::{name_from_slug, DTO_NAME_SUFFIX, LOGIN_DTO_NAME_SUFFIX};
use crate::properties::{self, PropertiesOptions};
use crate::types::SwaggerComponent;

/// Which write operation an input schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtoOperation {
    /// `POST /api/{slug}`
    Create,
    /// `PATCH /api/{slug}/{id}`
    Update,
}

impl DtoOperation {
    /// Name prefix of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
        }
    }
}

/// Name of the `{Operation}{Slug}Dto` component.
#[must_use]
pub fn entry_dto_name(slug: &str, operation: DtoOperation) -> String {
    name_from_slug(&format!("{}_{slug}", operation.as_str()), DTO_NAME_SUFFIX)
}

/// `{Operation}{Slug}Dto`: writable fields with relations flattened to ids.
#[must_use]
pub fn generate_entry_dto(
    collection: &CollectionConfig,
    operation: DtoOperation,
    locale: &str,
) -> SwaggerComponent {
    let properties = properties::generate(
        &collection.fields,
        &PropertiesOptions::with_locale(locale).flattened(),
    );

    SwaggerComponent::new(
        entry_dto_name(&collection.slug, operation),
        json!({"type": "object", "properties": properties}),
    )
}

/// `{Slug}LoginDto`: email and password credentials.
#[must_use]
pub fn generate_login_dto(collection: &CollectionConfig) -> SwaggerComponent {
    SwaggerComponent::new(
        name_from_slug(&collection.slug, LOGIN_DTO_NAME_SUFFIX),
        login_schema(),
    )
}

fn login_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "email": {
                "type": "string",
                "example": "example@example.com",
                "required": true
            },
            "password": {
                "type": "string",
                "example": "12345678",
                "required": true
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Field, FieldKind};

    fn articles() -> CollectionConfig {
        CollectionConfig::new(
            "blog-articles",
            vec![
                Field::named("title", FieldKind::Text),
                Field::named(
                    "tags",
                    FieldKind::Relationship {
                        relation_to: "tags".into(),
                        has_many: true,
                    },
                ),
            ],
        )
    }

    #[test]
    fn test_dto_names() {
        assert_eq!(
            entry_dto_name("blog-articles", DtoOperation::Create),
            "CreateBlogArticlesDto"
        );
        assert_eq!(entry_dto_name("posts", DtoOperation::Update), "UpdatePostsDto");
    }

    #[test]
    fn test_dto_flattens_relations_and_omits_identity() {
        let dto = generate_entry_dto(&articles(), DtoOperation::Create, "en");
        let properties = dto.schema["properties"].as_object().unwrap();
        assert!(!properties.contains_key("id"));
        assert!(!properties.contains_key("createdAt"));
        assert_eq!(
            properties["tags"],
            json!({"type": "array", "uniqueItems": true, "items": {"type": "string"}})
        );
    }

    #[test]
    fn test_login_dto_ignores_collection_fields() {
        let dto = generate_login_dto(&articles());
        assert_eq!(dto.name, "BlogArticlesLoginDto");
        let properties = dto.schema["properties"].as_object().unwrap();
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["email", "password"]);
    }
}
