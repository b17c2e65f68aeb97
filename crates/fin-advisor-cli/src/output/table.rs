use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, result_section};

/// Format output as a two-column table using the tabled crate, followed by
/// warnings, methodology and any narrative text.
pub fn print_table(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, text) in flatten(result_section(value)) {
        builder.push_record([field, text]);
    }
    println!("{}", Table::from(builder));

    let Value::Object(envelope) = value else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }

    let narrative = envelope
        .get("narrative")
        .and_then(Value::as_str)
        .or_else(|| envelope.get("narration").and_then(|n| n.get("text")).and_then(Value::as_str));
    if let Some(text) = narrative {
        println!("\n{text}");
    }
}
