use fin_advisor_core::behavioral::{
    analyze_behavior, classify_behavioral_question, coping_strategies, BehavioralQuestionType,
};
use fin_advisor_core::narrative::fallback_behavioral_narrative;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn kind(text: &str) -> BehavioralQuestionType {
    classify_behavioral_question(text).question_type
}

// ===========================================================================
// Question classification
// ===========================================================================

#[test]
fn test_company_names_become_tickers() {
    let c = classify_behavioral_question("I keep buying Apple and Tesla when I'm nervous");
    assert_eq!(c.question_type, BehavioralQuestionType::StockBehavioralEmotional);
    assert_eq!(c.extracted_symbols, vec!["AAPL", "TSLA"]);
    assert!(c.emotional_content);
}

#[test]
fn test_finance_acronyms_are_not_tickers() {
    let c = classify_behavioral_question("Should I start an SIP in NIFTY ETF?");
    assert_eq!(c.extracted_symbols, vec!["NIFTY"]);
    assert_eq!(c.question_type, BehavioralQuestionType::StockAnalysis);
}

#[test]
fn test_amount_with_emotion_and_risk() {
    let c = classify_behavioral_question("I'm scared about investing ₹5 lakh, is it too risky?");
    assert_eq!(c.question_type, BehavioralQuestionType::InvestmentEmotionalRisk);
    assert_eq!(c.extracted_amount, Some(dec!(500000)));
    assert_eq!(c.confidence, dec!(0.9));
    assert!(c.requires_recommendations);
}

#[test]
fn test_market_without_portfolio() {
    let c = classify_behavioral_question("How volatile is the market today?");
    assert_eq!(c.question_type, BehavioralQuestionType::MarketConditions);
    assert!(c.signals.has_risk);
    assert!(c.requires_market_data);
}

#[test]
fn test_portfolio_with_own_decisions() {
    assert_eq!(
        kind("My portfolio keeps losing because of my bad decisions"),
        BehavioralQuestionType::PortfolioBehavioral
    );
}

#[test]
fn test_keywords_do_not_fire_inside_words() {
    let c = classify_behavioral_question("I know what I want");
    assert!(!c.signals.has_timing);
    assert_eq!(c.question_type, BehavioralQuestionType::General);
}

#[test]
fn test_question_type_json_shape() {
    let c = classify_behavioral_question("I keep buying Apple and Tesla when I'm nervous");
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["question_type"], "stock_behavioral_emotional");
    assert_eq!(json["extracted_symbols"], serde_json::json!(["AAPL", "TSLA"]));
}

// ===========================================================================
// Profile and narration
// ===========================================================================

#[test]
fn test_panic_profile_needs_intervention() {
    let p = analyze_behavior("The market crash has me terrified, should I sell?");
    assert!(p.intervention_needed);
    assert_eq!(p.stress_level, 9);
    assert_eq!(coping_strategies(p.primary_emotion()).len(), 5);
}

#[test]
fn test_narration_substitutes_amount_and_symbol() {
    let c = classify_behavioral_question("I'm scared about investing ₹5 lakh, is it too risky?");
    assert!(fallback_behavioral_narrative(&c).contains("₹5,00,000"));

    let c = classify_behavioral_question("I keep buying Apple and Tesla when I'm nervous");
    assert!(fallback_behavioral_narrative(&c).contains("AAPL"));
}
