use clap::Args;
use serde_json::{json, Value};

use fin_advisor_core::behavioral::{analyze_behavior, classify_behavioral_question, coping_strategies};
use fin_advisor_core::narrative::fallback_behavioral_narrative;

/// Arguments for investment-coaching analysis
#[derive(Args)]
pub struct BehaviorArgs {
    /// The question, in plain language
    #[arg(long)]
    pub text: String,
}

pub fn run_behavior(args: BehaviorArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let classification = classify_behavioral_question(&args.text);
    let profile = analyze_behavior(&args.text);
    let strategies = coping_strategies(profile.primary_emotion());
    let narrative = fallback_behavioral_narrative(&classification);

    Ok(json!({
        "result": {
            "classification": classification,
            "profile": profile,
            "coping_strategies": strategies,
        },
        "narrative": narrative,
    }))
}
