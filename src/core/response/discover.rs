//! Depth-first search for the core data node inside an arbitrary payload.

use serde_json::Value;

/// Payloads are vendor-controlled; deeper nesting is treated as "not found".
pub(super) const MAX_DEPTH: usize = 32;

/// JavaScript-style truthiness, which is what the upstream workflow relies on.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True when the object exposes a non-empty `products` array.
pub(super) fn has_products(value: &Value) -> bool {
    value
        .get("products")
        .and_then(Value::as_array)
        .is_some_and(|p| !p.is_empty())
}

fn is_core_node(value: &Value) -> bool {
    value.is_object()
        && (has_products(value)
            || value.get("intro").is_some_and(is_truthy)
            || value.get("outro").is_some_and(is_truthy))
}

/// Parse a string that may hold JSON, possibly wrapped in a markdown code fence.
/// Returns `None` when the text is not JSON.
pub(super) fn parse_embedded_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let candidate = if trimmed.starts_with("```") {
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        if start > end {
            return None;
        }
        &trimmed[start..=end]
    } else {
        trimmed
    };
    serde_json::from_str(candidate).ok()
}

/// Find the first object exposing `products`, `intro` or `outro`.
/// Strings are parsed as (fenced) JSON and searched too; first match wins.
pub(super) fn find_core_data(node: &Value) -> Option<Value> {
    find_at(node, 0)
}

fn find_at(node: &Value, depth: usize) -> Option<Value> {
    if depth > MAX_DEPTH {
        return None;
    }
    match node {
        Value::String(s) => {
            let parsed = parse_embedded_json(s)?;
            find_at(&parsed, depth + 1)
        }
        Value::Object(map) => {
            if is_core_node(node) {
                return Some(node.clone());
            }
            map.values().find_map(|v| find_at(v, depth + 1))
        }
        Value::Array(items) => items.iter().find_map(|v| find_at(v, depth + 1)),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_upstream_expectations() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(2)));
    }

    #[test]
    fn finds_object_at_top_level() {
        let found = find_core_data(&json!({"intro": "Hi"})).unwrap();
        assert_eq!(found["intro"], "Hi");
    }

    #[test]
    fn empty_products_alone_is_not_a_match() {
        assert!(find_core_data(&json!({"products": []})).is_none());
    }

    #[test]
    fn finds_inside_wrapper_objects_and_arrays() {
        let payload = json!([{"data": {"body": {"outro": "Bye", "products": []}}}]);
        let found = find_core_data(&payload).unwrap();
        assert_eq!(found["outro"], "Bye");
    }

    #[test]
    fn finds_inside_stringified_json() {
        let payload = json!([{"output": "{\"intro\":\"Hello\"}"}]);
        let found = find_core_data(&payload).unwrap();
        assert_eq!(found["intro"], "Hello");
    }

    #[test]
    fn fenced_json_is_sliced_between_braces() {
        let parsed = parse_embedded_json("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(parsed, json!({"a": 1}));
    }

    #[test]
    fn invalid_json_strings_are_leaves() {
        assert!(parse_embedded_json("not json").is_none());
        assert!(parse_embedded_json("```json\n{broken\n```").is_none());
        assert!(parse_embedded_json("```\n}{\n```").is_none());
        assert!(find_core_data(&json!("{\"intro\": ")).is_none());
    }

    #[test]
    fn depth_cap_stops_runaway_nesting() {
        let mut payload = json!({"intro": "deep"});
        for _ in 0..(MAX_DEPTH + 5) {
            payload = json!({ "wrap": payload });
        }
        assert!(find_core_data(&payload).is_none());

        let mut shallow = json!({"intro": "near"});
        for _ in 0..4 {
            shallow = json!({ "wrap": shallow });
        }
        assert!(find_core_data(&shallow).is_some());
    }
}
