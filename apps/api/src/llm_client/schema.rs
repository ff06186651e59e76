//! Post-decode validation of model output against the response schema we sent.
//!
//! Structured-output mode constrains the model but does not guarantee conformance,
//! so decoded payloads are checked against the same schema before use.

use serde_json::Value;

/// Returns one message per violation, e.g. `$.skills: missing required field`.
/// An empty vector means the value conforms.
pub fn schema_violations(schema: &Value, value: &Value) -> Vec<String> {
    let mut violations = Vec::new();
    check(schema, value, "$", &mut violations);
    violations
}

fn check(schema: &Value, value: &Value, path: &str, out: &mut Vec<String>) {
    let expected = schema.get("type").and_then(Value::as_str).unwrap_or_default();

    match expected {
        "OBJECT" => {
            let Some(object) = value.as_object() else {
                out.push(format!("{path}: expected object"));
                return;
            };
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for key in required.iter().filter_map(Value::as_str) {
                    if object.get(key).map_or(true, Value::is_null) {
                        out.push(format!("{path}.{key}: missing required field"));
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, sub_schema) in properties {
                    if let Some(child) = object.get(key).filter(|v| !v.is_null()) {
                        check(sub_schema, child, &format!("{path}.{key}"), out);
                    }
                }
            }
        }
        "ARRAY" => {
            let Some(items) = value.as_array() else {
                out.push(format!("{path}: expected array"));
                return;
            };
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check(item_schema, item, &format!("{path}[{i}]"), out);
                }
            }
        }
        "STRING" if !value.is_string() => out.push(format!("{path}: expected string")),
        "NUMBER" | "INTEGER" if !value.is_number() => {
            out.push(format!("{path}: expected number"))
        }
        "BOOLEAN" if !value.is_boolean() => out.push(format!("{path}: expected boolean")),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "tags": {"type": "ARRAY", "items": {"type": "STRING"}},
                "inner": {
                    "type": "OBJECT",
                    "properties": {"score": {"type": "NUMBER"}},
                    "required": ["score"]
                }
            },
            "required": ["name", "tags", "inner"]
        })
    }

    #[test]
    fn test_conforming_value_has_no_violations() {
        let value = json!({"name": "x", "tags": ["a"], "inner": {"score": 1.5}});
        assert!(schema_violations(&schema(), &value).is_empty());
    }

    #[test]
    fn test_missing_and_null_fields_reported() {
        let value = json!({"name": null, "inner": {}});
        let violations = schema_violations(&schema(), &value);
        assert_eq!(
            violations,
            vec![
                "$.name: missing required field",
                "$.tags: missing required field",
                "$.inner.score: missing required field",
            ]
        );
    }

    #[test]
    fn test_type_mismatches_reported_with_paths() {
        let value = json!({"name": 3, "tags": ["a", 2], "inner": {"score": "high"}});
        let violations = schema_violations(&schema(), &value);
        assert!(violations.contains(&"$.name: expected string".to_string()));
        assert!(violations.contains(&"$.tags[1]: expected string".to_string()));
        assert!(violations.contains(&"$.inner.score: expected number".to_string()));
    }

    #[test]
    fn test_root_type_mismatch() {
        let violations = schema_violations(&json!({"type": "ARRAY"}), &json!({}));
        assert_eq!(violations, vec!["$: expected array"]);
    }
}
