use napi::Result as NapiResult;
use napi_derive::napi;

use fin_advisor_core::assumptions::Assumptions;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Defaults, or a partial JSON override.
fn load_assumptions(assumptions_json: Option<String>) -> NapiResult<Assumptions> {
    match assumptions_json {
        Some(json) => Assumptions::from_json_str(&json).map_err(to_napi_error),
        None => Ok(Assumptions::default()),
    }
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct TaxComparisonOutput {
    comparison: fin_advisor_core::tax::RegimeComparison,
    narrative: String,
}

/// `input_json` is a tax profile: `gross_income` plus optional
/// `deductions`, `self_senior` and `parents_senior`.
#[napi]
pub fn compare_tax_regimes(input_json: String, assumptions_json: Option<String>) -> NapiResult<String> {
    let assumptions = load_assumptions(assumptions_json)?;
    let profile: fin_advisor_core::tax::TaxProfile =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let comparison = fin_advisor_core::tax::compare_regimes(
        profile.gross_income,
        &profile.claims,
        &assumptions.tax,
    )
    .map_err(to_napi_error)?;
    let output = TaxComparisonOutput {
        narrative: fin_advisor_core::narrative::fallback_tax_narrative(&comparison),
        comparison,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_scenario(
    text: String,
    snapshot_json: String,
    assumptions_json: Option<String>,
) -> NapiResult<String> {
    let assumptions = load_assumptions(assumptions_json)?;
    let snapshot = fin_advisor_core::snapshot::FinancialSnapshot::from_json_str(&snapshot_json)
        .map_err(to_napi_error)?;
    let output = fin_advisor_core::scenarios::analyze_query(&text, &snapshot, &assumptions);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn classify_scenario(text: String) -> NapiResult<String> {
    let output = fin_advisor_core::scenarios::classify_scenario(&text);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Template text for a serialized `ScenarioResult`, including the error shape.
#[napi]
pub fn fallback_narrative(result_json: String) -> NapiResult<String> {
    let result: fin_advisor_core::scenarios::ScenarioResult =
        serde_json::from_str(&result_json).map_err(to_napi_error)?;
    Ok(fin_advisor_core::narrative::fallback_scenario_narrative(&result))
}

// ---------------------------------------------------------------------------
// Behavioral
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct BehavioralOutput {
    classification: fin_advisor_core::behavioral::BehavioralClassification,
    narrative: String,
}

#[napi]
pub fn classify_behavioral_question(text: String) -> NapiResult<String> {
    let classification = fin_advisor_core::behavioral::classify_behavioral_question(&text);
    let output = BehavioralOutput {
        narrative: fin_advisor_core::narrative::fallback_behavioral_narrative(&classification),
        classification,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}
