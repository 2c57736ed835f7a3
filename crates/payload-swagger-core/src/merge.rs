//! Deep merge of custom document fragments.
//!
//! Merge law: when both sides are objects they merge key by key, recursing
//! into keys present on both sides and appending new keys in source order.
//! Any other source value, arrays and `null` included, replaces the target.

use serde_json::Value;

/// Merge `source` into `target` in place.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_merge_recursively() {
        let mut target = json!({"info": {"title": "API", "version": "1"}, "paths": {}});
        deep_merge(&mut target, &json!({"info": {"version": "2", "description": "x"}}));
        assert_eq!(
            target,
            json!({"info": {"title": "API", "version": "2", "description": "x"}, "paths": {}})
        );
    }

    #[test]
    fn test_arrays_are_replaced_wholesale() {
        let mut target = json!({"tags": [{"name": "posts"}, {"name": "users"}]});
        deep_merge(&mut target, &json!({"tags": [{"name": "media"}]}));
        assert_eq!(target, json!({"tags": [{"name": "media"}]}));
    }

    #[test]
    fn test_scalars_and_null_override() {
        let mut target = json!({"a": 1, "b": {"c": true}});
        deep_merge(&mut target, &json!({"a": "one", "b": null}));
        assert_eq!(target, json!({"a": "one", "b": null}));
    }

    #[test]
    fn test_object_replaces_scalar() {
        let mut target = json!({"a": 1});
        deep_merge(&mut target, &json!({"a": {"b": 2}}));
        assert_eq!(target, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_new_keys_append_in_source_order() {
        let mut target = json!({"z": 0});
        deep_merge(&mut target, &json!({"b": 1, "a": 2}));
        let keys: Vec<&str> = target
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["z", "b", "a"]);
    }

    #[test]
    fn test_empty_source_is_a_no_op() {
        let mut target = json!({"a": [1, 2]});
        deep_merge(&mut target, &json!({}));
        assert_eq!(target, json!({"a": [1, 2]}));
    }
}
