pub mod format;
pub mod templates;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::scenarios::ScenarioResult;

pub use templates::{
    fallback_behavioral_narrative, fallback_scenario_narrative, fallback_tax_narrative,
};

#[derive(Debug, Error)]
pub enum NarratorError {
    #[error("Narrator unavailable: {0}")]
    Unavailable(String),

    #[error("Narrator failed: {0}")]
    Failed(String),
}

/// Turns a scenario result into prose, typically by calling a language
/// model. Implementations own their timeout and retry policy.
pub trait Narrator: Send + Sync {
    fn narrate(&self, user_text: &str, result: &ScenarioResult) -> Result<String, NarratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationSource {
    Narrator,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    pub text: String,
    pub source: NarrationSource,
}

/// Use the narrator when there is one and it returns non-blank text;
/// otherwise the deterministic template.
pub fn narrate_or_fallback(
    narrator: Option<&dyn Narrator>,
    user_text: &str,
    result: &ScenarioResult,
) -> Narration {
    if let Some(n) = narrator {
        match n.narrate(user_text, result) {
            Ok(text) if !text.trim().is_empty() => {
                return Narration {
                    text,
                    source: NarrationSource::Narrator,
                };
            }
            Ok(_) => warn!("narrator returned empty text, using fallback template"),
            Err(e) => warn!(error = %e, "narrator failed, using fallback template"),
        }
    }
    Narration {
        text: fallback_scenario_narrative(result),
        source: NarrationSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl Narrator for Fixed {
        fn narrate(&self, _: &str, _: &ScenarioResult) -> Result<String, NarratorError> {
            Ok(self.0.to_string())
        }
    }

    struct Down;

    impl Narrator for Down {
        fn narrate(&self, _: &str, _: &ScenarioResult) -> Result<String, NarratorError> {
            Err(NarratorError::Unavailable("no API key".into()))
        }
    }

    fn result() -> ScenarioResult {
        ScenarioResult::error("Missing loan amount information")
    }

    #[test]
    fn test_narrator_text_wins() {
        let n = narrate_or_fallback(Some(&Fixed("All good.") as &dyn Narrator), "q", &result());
        assert_eq!(n.source, NarrationSource::Narrator);
        assert_eq!(n.text, "All good.");
    }

    #[test]
    fn test_fallback_paths() {
        for narrator in [None, Some(&Down as &dyn Narrator), Some(&Fixed("   ") as &dyn Narrator)] {
            let n = narrate_or_fallback(narrator, "q", &result());
            assert_eq!(n.source, NarrationSource::Fallback);
            assert_eq!(n.text, fallback_scenario_narrative(&result()));
        }
    }
}
