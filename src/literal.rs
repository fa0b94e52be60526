use serde_json::Value;

/// Render a JSON value as a Noir literal.
///
/// Numbers are reproduced with their source token (serde_json is built
/// with `arbitrary_precision`, so no reformatting happens on the way
/// through), arrays become bracketed comma-separated lists, recursively.
/// The generator never interprets the values numerically.
pub fn render(value: &Value) -> String {
    match value {
        Value::Array(items) => render_list(items),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Render a slice of JSON values as a bracketed Noir array literal.
pub fn render_list(values: &[Value]) -> String {
    let parts: Vec<String> = values.iter().map(render).collect();
    format!("[{}]", parts.join(", "))
}
