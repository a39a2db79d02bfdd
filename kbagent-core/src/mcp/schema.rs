//! Lightweight JSON Schema checks for tool arguments.
//!
//! This is not a full JSON Schema validator. It catches the failures
//! LLMs actually produce (missing required fields, wrong primitive
//! types, non-object payloads) locally, so the user sees a clear
//! message instead of a remote protocol error.

use serde_json::Value;

/// Validate `input` against a tool's input schema. Errors carry a human
/// readable description of the first violation found.
pub fn validate_against_schema(schema: &Value, input: &Value) -> Result<(), String> {
    if input.is_null() {
        return Err("arguments cannot be null".to_string());
    }

    if let Some(expected_type) = schema.get("type").and_then(Value::as_str) {
        if expected_type == "object" && !input.is_object() {
            return Err(format!("expected object, got {}", json_type_name(input)));
        }
    }

    let input_obj = match input.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !input_obj.contains_key(key) {
                return Err(format!("missing required property '{key}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, prop_schema) in properties {
            let Some(value) = input_obj.get(key) else {
                continue;
            };
            let Some(expected_type) = prop_schema.get("type").and_then(Value::as_str) else {
                continue;
            };
            let matches = match expected_type {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.as_i64().is_some() || value.as_u64().is_some(),
                "boolean" => value.is_boolean(),
                "object" => value.is_object(),
                "array" => value.is_array(),
                _ => true,
            };
            if !matches {
                return Err(format!(
                    "property '{key}': expected {expected_type}, got {}",
                    json_type_name(value)
                ));
            }
        }
    }

    Ok(())
}

fn json_type_name(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
