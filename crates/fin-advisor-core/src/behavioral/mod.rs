pub mod classifier;
pub mod profile;
pub mod signals;

pub use classifier::{classify_behavioral_question, BehavioralClassification, BehavioralQuestionType};
pub use profile::{analyze_behavior, coping_strategies, BehavioralProfile};
pub use signals::BehavioralSignals;
