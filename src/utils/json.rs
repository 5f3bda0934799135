//! JSON helpers for case-insensitive field reads.

use serde_json::Value;

/// Recursively lowercase every object key.
///
/// Config and record files come from hand-edited JSON and an external
/// transform step, both of which are loose about field casing. Folding
/// keys before deserialization makes every field name case-insensitive,
/// while the target structs declare lowercase names.
pub fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
            .collect::<serde_json::Map<_, _>>()
            .into(),
        Value::Array(items) => items.into_iter().map(lowercase_keys).collect::<Vec<_>>().into(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lowercase_keys_flat() {
        let v = lowercase_keys(json!({"Part": "blog", "SLUG": "a"}));
        assert_eq!(v, json!({"part": "blog", "slug": "a"}));
    }

    #[test]
    fn test_lowercase_keys_nested() {
        let v = lowercase_keys(json!({"Parts": [{"Loc": "slug", "PartAsSolo": true}]}));
        assert_eq!(v, json!({"parts": [{"loc": "slug", "partassolo": true}]}));
    }

    #[test]
    fn test_lowercase_keys_leaves_values() {
        let v = lowercase_keys(json!({"Part": "Blog"}));
        assert_eq!(v, json!({"part": "Blog"}));
    }
}
