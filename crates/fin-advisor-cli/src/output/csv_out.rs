use serde_json::Value;
use std::io;

use super::{flatten, result_section};

/// Write the result as two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["field", "value"]);
    for (field, text) in flatten(result_section(value)) {
        let _ = wtr.write_record([field.as_str(), text.as_str()]);
    }

    let _ = wtr.flush();
}
