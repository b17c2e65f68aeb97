use clap::Args;
use serde_json::{json, Value};

use fin_advisor_core::assumptions::Assumptions;
use fin_advisor_core::narrative::narrate_or_fallback;
use fin_advisor_core::scenarios::{analyze_query, classify_scenario};
use fin_advisor_core::tax::classify_tax_question;

use crate::input;

/// Arguments for scenario analysis
#[derive(Args)]
pub struct ScenarioArgs {
    /// The question, in plain language
    #[arg(long)]
    pub text: String,

    /// Path to a JSON financial snapshot (or pipe it on stdin)
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Attach a plain-language summary of the result
    #[arg(long)]
    pub narrate: bool,
}

/// Arguments for question classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// The question, in plain language
    #[arg(long)]
    pub text: String,
}

pub fn run_scenario(
    args: ScenarioArgs,
    assumptions: &Assumptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = input::load_snapshot(args.snapshot.as_deref())?;
    let out = analyze_query(&args.text, &snapshot, assumptions);

    let mut value = serde_json::to_value(&out)?;
    if args.narrate {
        // No model-backed narrator is wired into the CLI.
        let narration = narrate_or_fallback(None, &args.text, &out.result.result);
        if let Value::Object(map) = &mut value {
            map.insert("narration".into(), serde_json::to_value(narration)?);
        }
    }
    Ok(value)
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = classify_scenario(&args.text);
    let tax_question = classify_tax_question(&args.text);
    Ok(json!({
        "result": {
            "scenario": scenario,
            "tax_question": tax_question,
        }
    }))
}
