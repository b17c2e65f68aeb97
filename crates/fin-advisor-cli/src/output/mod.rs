pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` section of a computation envelope, or the whole value.
pub(crate) fn result_section(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Nested results as `(dotted.path, text)` rows. Arrays of scalars stay on
/// one row; arrays of objects are indexed.
pub(crate) fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(&join(key), val, rows);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object()) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(&join(&i.to_string()), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), scalar_text(value))),
    }
}

pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_result() {
        let v = json!({
            "comparison": {"recommended": "NEW", "savings": "24700"},
            "installments": [{"due_date": "15 June"}, {"due_date": "15 September"}],
            "funds": ["Hybrid", "Large Cap"],
        });
        let rows = flatten(&v);
        assert!(rows.contains(&("comparison.recommended".into(), "NEW".into())));
        assert!(rows.contains(&("installments.1.due_date".into(), "15 September".into())));
        assert!(rows.contains(&("funds".into(), "Hybrid, Large Cap".into())));
    }
}
