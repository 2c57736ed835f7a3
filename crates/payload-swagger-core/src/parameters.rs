//! Reusable operation parameters.
//!
//! Parameters are always emitted in the same order: path parameters, the
//! draft flag, the basic query trio, then the find query quartet.

use serde_json::{json, Value};

/// Which parameter groups to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParametersOptions<'a> {
    /// Required string path parameters, in order.
    pub path_params: &'a [&'a str],

    /// `sort`, `limit`, `page` and `additional` for listings.
    pub with_find_query: bool,

    /// `depth`, `locale` and `fallback-locale`.
    pub with_basic_query: bool,

    /// The `draft` flag.
    pub with_draft_query: bool,
}

/// Build the parameter list for `options`.
#[must_use]
pub fn generate(options: ParametersOptions<'_>) -> Vec<Value> {
    let mut result: Vec<Value> = options
        .path_params
        .iter()
        .map(|name| {
            json!({
                "in": "path",
                "name": name,
                "required": true,
                "schema": {"type": "string"}
            })
        })
        .collect();

    if options.with_draft_query {
        result.push(json!({
            "in": "query",
            "name": "draft",
            "schema": {"type": "boolean", "nullable": true}
        }));
    }

    if options.with_basic_query {
        result.extend([
            json!({
                "in": "query",
                "name": "depth",
                "description": "automatically populates relationships and uploads",
                "schema": {"type": "number", "format": "int64", "nullable": true}
            }),
            json!({
                "in": "query",
                "name": "locale",
                "description": "retrieves document(s) in a specific `locale`",
                "schema": {"type": "string", "nullable": true}
            }),
            json!({
                "in": "query",
                "name": "fallback-locale",
                "description": "specifies a fallback `locale` if no locale value exists",
                "schema": {"type": "string", "nullable": true}
            }),
        ]);
    }

    if options.with_find_query {
        result.extend([
            json!({
                "in": "query",
                "name": "sort",
                "description": "`sort` by field",
                "schema": {"type": "string"}
            }),
            json!({
                "in": "query",
                "name": "limit",
                "description": "`limit` the returned documents to a certain number",
                "schema": {"type": "number", "format": "int64"}
            }),
            json!({
                "in": "query",
                "name": "page",
                "description": "get a specific `page` of documents",
                "schema": {"type": "number", "format": "int64"}
            }),
            json!({
                "in": "query",
                "name": "additional",
                "description": "additional `query` parameters (can override query), see [where in rest-queries](https://payloadcms.com/docs/queries/overview#rest-queries)",
                "schema": {
                    "type": "object",
                    "required": ["where"],
                    "properties": {"where": {"type": "object"}}
                }
            }),
        ]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(parameters: &[Value]) -> Vec<&str> {
        parameters
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect()
    }

    #[test]
    fn test_empty_options_emit_nothing() {
        assert!(generate(ParametersOptions::default()).is_empty());
    }

    #[test]
    fn test_fixed_order_with_every_group() {
        let parameters = generate(ParametersOptions {
            path_params: &["id"],
            with_find_query: true,
            with_basic_query: true,
            with_draft_query: true,
        });
        assert_eq!(
            names(&parameters),
            [
                "id",
                "draft",
                "depth",
                "locale",
                "fallback-locale",
                "sort",
                "limit",
                "page",
                "additional"
            ]
        );
    }

    #[test]
    fn test_path_params_are_required_strings() {
        let parameters = generate(ParametersOptions {
            path_params: &["id", "version"],
            ..ParametersOptions::default()
        });
        assert_eq!(parameters.len(), 2);
        for parameter in &parameters {
            assert_eq!(parameter["in"], json!("path"));
            assert_eq!(parameter["required"], json!(true));
            assert_eq!(parameter["schema"], json!({"type": "string"}));
        }
    }

    #[test]
    fn test_basic_query_is_nullable() {
        let parameters = generate(ParametersOptions {
            with_basic_query: true,
            ..ParametersOptions::default()
        });
        assert_eq!(names(&parameters), ["depth", "locale", "fallback-locale"]);
        assert!(parameters
            .iter()
            .all(|p| p["schema"]["nullable"] == json!(true)));
    }

    #[test]
    fn test_additional_requires_where() {
        let parameters = generate(ParametersOptions {
            with_find_query: true,
            ..ParametersOptions::default()
        });
        let additional = parameters.last().unwrap();
        assert_eq!(additional["schema"]["required"], json!(["where"]));
    }
}
