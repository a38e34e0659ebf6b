use serde_json::Value;

/// Convert arbitrary JSON values into sanitized strings for display.
pub fn value_to_string(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    sanitize(raw)
}

/// Backend payloads end up on a terminal; strip control characters.
pub fn sanitize(s: String) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
