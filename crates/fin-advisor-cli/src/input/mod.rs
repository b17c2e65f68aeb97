pub mod file;
pub mod stdin;

use serde_json::Value;

use fin_advisor_core::assumptions::Assumptions;
use fin_advisor_core::snapshot::FinancialSnapshot;

/// Defaults, or the override file passed with `--assumptions`.
pub fn load_assumptions(path: Option<&str>) -> Result<Assumptions, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(Assumptions::from_path(file::resolve_path(p)?)?),
        None => Ok(Assumptions::default()),
    }
}

/// JSON from `--input` if given, otherwise from piped stdin.
pub fn read_input(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(Some(file::read_json_value(p)?)),
        None => stdin::read_stdin(),
    }
}

/// A snapshot from file or stdin; an empty household when neither is given.
pub fn load_snapshot(path: Option<&str>) -> Result<FinancialSnapshot, Box<dyn std::error::Error>> {
    match read_input(path)? {
        Some(value) => Ok(FinancialSnapshot::from_value(value)?),
        None => Ok(FinancialSnapshot::default()),
    }
}
