use serde::{Deserialize, Serialize};

use crate::behavioral::signals::{contains_term, normalize};

const PANIC_TERMS: &[&str] = &["panic", "scared", "terrified", "disaster"];
const ANXIOUS_TERMS: &[&str] = &["worried", "anxious", "nervous", "concerned", "stressed"];
const INVESTMENT_TERMS: &[&str] = &["invest", "buy", "money"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    ImmediateSupport,
    GuidedReflection,
    ProceedNormally,
}

/// Rule-based read of an investor's emotional state. Stress and confidence
/// are on a 1-10 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    pub emotional_state: Vec<String>,
    pub stress_level: u8,
    pub behavioral_biases: Vec<String>,
    pub confidence_level: u8,
    pub decision_quality_risk: DecisionRisk,
    pub recommended_action: RecommendedAction,
    pub intervention_needed: bool,
    pub key_insights: Vec<String>,
}

impl BehavioralProfile {
    /// The dominant emotion, used to pick coping strategies.
    pub fn primary_emotion(&self) -> &str {
        self.emotional_state.first().map(String::as_str).unwrap_or("calm")
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Four bands checked in order: panic, anxiety, investment focus, calm.
pub fn analyze_behavior(text: &str) -> BehavioralProfile {
    let normalized = normalize(text);
    let any = |terms: &[&str]| terms.iter().any(|t| contains_term(&normalized, t));

    if any(PANIC_TERMS) {
        BehavioralProfile {
            emotional_state: owned(&["panic", "fear"]),
            stress_level: 9,
            behavioral_biases: owned(&["panic_selling", "loss_aversion"]),
            confidence_level: 2,
            decision_quality_risk: DecisionRisk::High,
            recommended_action: RecommendedAction::ImmediateSupport,
            intervention_needed: true,
            key_insights: owned(&["High stress detected"]),
        }
    } else if any(ANXIOUS_TERMS) {
        BehavioralProfile {
            emotional_state: owned(&["anxious", "uncertain"]),
            stress_level: 7,
            behavioral_biases: owned(&["loss_aversion"]),
            confidence_level: 4,
            decision_quality_risk: DecisionRisk::Medium,
            recommended_action: RecommendedAction::GuidedReflection,
            intervention_needed: false,
            key_insights: owned(&["Moderate anxiety detected"]),
        }
    } else if any(INVESTMENT_TERMS) {
        BehavioralProfile {
            emotional_state: owned(&["focused", "analytical"]),
            stress_level: 4,
            behavioral_biases: owned(&["confirmation_bias"]),
            confidence_level: 7,
            decision_quality_risk: DecisionRisk::Medium,
            recommended_action: RecommendedAction::GuidedReflection,
            intervention_needed: false,
            key_insights: owned(&["Investment focused mindset"]),
        }
    } else {
        BehavioralProfile {
            emotional_state: owned(&["calm", "curious"]),
            stress_level: 3,
            behavioral_biases: Vec::new(),
            confidence_level: 6,
            decision_quality_risk: DecisionRisk::Low,
            recommended_action: RecommendedAction::ProceedNormally,
            intervention_needed: false,
            key_insights: owned(&["Balanced emotional state"]),
        }
    }
}

/// Coping strategies for `emotion` (panic, anxious, fomo, overconfident);
/// anything else gets the general list.
pub fn coping_strategies(emotion: &str) -> &'static [&'static str] {
    match emotion.trim().to_ascii_lowercase().as_str() {
        "panic" => &[
            "Breathing exercise: five deep breaths, in for 4, hold for 4, out for 6",
            "24-hour rule: wait a full day before placing any trade",
            "Digital detox: close trading apps and step away from financial news",
            "Call someone you trust: a friend, family member or advisor",
            "Reality check: the portfolio was built for the long term",
        ],
        "anxious" => &[
            "Zoom out: revisit your long-term goals and time horizon",
            "Study history: look at how markets recovered from past downturns",
            "Automate decisions: systematic investments reduce emotional trading",
            "Write it down: concerns are often less frightening on paper",
            "Remember your why: reconnect with the reasons you started investing",
        ],
        "fomo" => &[
            "Strategy check: does this fit your existing investment plan?",
            "Wait 48 hours: good opportunities rarely vanish overnight",
            "Review what you already hold and how it is performing",
            "Acknowledge the feeling without acting on it",
            "Opportunity cost: decide what you would sell to fund the new buy",
        ],
        "overconfident" => &[
            "Review past mistakes and what they taught you",
            "Acknowledge luck: some gains came from timing, not skill",
            "Size the downside: estimate what you could lose, not only gain",
            "Record the reasoning behind every investment decision",
            "Seek out contrarian views before committing",
        ],
        _ => &[
            "Focus on your long-term investment strategy",
            "Review your portfolio's overall performance",
            "Take time to reflect before making decisions",
            "Consider seeking a second opinion",
        ],
    }
}
