//! Generation from configuration files as a host would export them.

use std::io::Write;

use payload_swagger_core::{GeneratorOptions, HostConfig, SwaggerGenerator};
use serde_json::{json, Value};

const BLOG: &str = r#"{
  "admin": {"meta": {"titleSuffix": "- Blog"}},
  "cookiePrefix": "blog",
  "collections": [
    {
      "slug": "users",
      "auth": {"tokenExpiration": 7200},
      "admin": {"description": {"en": "Accounts", "de": "Konten"}},
      "fields": [
        {"name": "name", "type": "text", "label": {"en": "Name", "de": "Name"}},
        {"name": "roles", "type": "select", "hasMany": true, "options": ["admin", {"label": "Editor", "value": "editor"}]},
        {"name": "password", "type": "text"},
        {"name": "secret", "type": "text", "hidden": true}
      ]
    },
    {
      "slug": "blog-posts",
      "versions": {"drafts": true},
      "upload": false,
      "fields": [
        {"name": "title", "type": "text", "required": true},
        {"name": "author", "type": "relationship", "relationTo": "users"},
        {"type": "row", "fields": [{"name": "publishedAt", "type": "date"}]},
        {"name": "location", "type": "point"},
        {"name": "meta", "type": "json"},
        {"name": "widget", "type": "blocks"}
      ],
      "endpoints": [
        {"path": "/:id/publish", "method": "post", "custom": {"swagger": {"summary": "Publish a post"}}}
      ],
      "custom": {"swagger": {"info": {"description": "The blog API"}}}
    }
  ]
}"#;

fn generate(config: &HostConfig, locale: &str) -> Value {
    let options = GeneratorOptions {
        locale: locale.into(),
        ..GeneratorOptions::default()
    };
    SwaggerGenerator::generate(config, &options)
}

#[test]
fn test_blog_document() {
    let config = HostConfig::from_json_str(BLOG).unwrap();
    config.validate().unwrap();
    let document = generate(&config, "en");

    assert_eq!(document["info"]["title"], json!("Swagger - Blog API - OpenAPI 3.0"));
    assert_eq!(document["info"]["description"], json!("The blog API"));
    assert_eq!(
        document["components"]["securitySchemes"]["cookieAuth"]["name"],
        json!("blog-token")
    );
    assert_eq!(document["tags"], json!([{"name": "users", "description": "Accounts"}]));

    let schemas = &document["components"]["schemas"];
    let user = &schemas["UsersEntry"]["properties"];
    assert!(user.get("password").is_none());
    assert!(user.get("secret").is_none());
    assert_eq!(user["name"]["description"], json!("Name"));
    assert_eq!(
        user["roles"],
        json!({"type": "array", "items": {"type": "string", "enum": ["admin", "editor"]}})
    );

    let post = &schemas["BlogPostsEntry"]["properties"];
    assert_eq!(
        post["author"],
        json!({"allOf": [{"type": "string"}, {"$ref": "#/components/schemas/UsersEntry"}]})
    );
    assert!(post.get("publishedAt").is_some());
    assert!(post.get("widget").is_some());
    assert_eq!(
        schemas["CreateBlogPostsDto"]["properties"]["author"],
        json!({"type": "string"})
    );

    let paths = &document["paths"];
    assert!(paths.get("/api/users/login").is_some());
    assert!(paths.get("/api/blog-posts/versions/{id}").is_some());
    assert_eq!(
        paths["/api/blog-posts/{id}/publish"]["post"],
        json!({"summary": "Publish a post", "tags": ["blog-posts"]})
    );
    assert_eq!(
        paths["/api/blog-posts"]["get"]["parameters"][0]["name"],
        json!("draft")
    );
}

#[test]
fn test_locale_selects_translations() {
    let config = HostConfig::from_json_str(BLOG).unwrap();
    let document = generate(&config, "de");
    assert_eq!(document["tags"][0]["description"], json!("Konten"));

    let document = generate(&config, "fr");
    assert_eq!(document["tags"][0]["description"], json!("Accounts"));
}

#[test]
fn test_json_and_toml_files_agree() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("payload.json");
    std::fs::write(
        &json_path,
        r#"{"collections": [{"slug": "posts", "fields": [{"name": "title", "type": "text", "required": true}]}]}"#,
    )
    .unwrap();

    let toml_path = dir.path().join("payload.toml");
    let mut file = std::fs::File::create(&toml_path).unwrap();
    writeln!(
        file,
        r#"
[[collections]]
slug = "posts"

[[collections.fields]]
name = "title"
type = "text"
required = true
"#
    )
    .unwrap();

    let from_json = HostConfig::load(&json_path).unwrap();
    let from_toml = HostConfig::load(&toml_path).unwrap();
    assert_eq!(from_json, from_toml);

    let options = GeneratorOptions::default();
    assert_eq!(
        SwaggerGenerator::generate_pretty(&from_json, &options).unwrap(),
        SwaggerGenerator::generate_pretty(&from_toml, &options).unwrap()
    );
}
