use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::behavioral::signals::{
    detect_signals, extract_investment_amount, extract_stock_symbols, BehavioralSignals,
};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehavioralQuestionType {
    PortfolioMarketEmotional,
    InvestmentMarketBehavioral,
    StockMarketTiming,
    PortfolioWithMarketContext,
    InvestmentEmotionalRisk,
    StockBehavioralEmotional,
    PortfolioBehavioral,
    InvestmentMarketTiming,
    StockEmotional,
    PortfolioRiskAnalysis,
    MarketConditions,
    InvestmentRequest,
    StockAnalysis,
    PortfolioReview,
    EmotionalSupport,
    BehavioralInsight,
    General,
}

impl BehavioralQuestionType {
    pub const ALL: [BehavioralQuestionType; 17] = [
        BehavioralQuestionType::PortfolioMarketEmotional,
        BehavioralQuestionType::InvestmentMarketBehavioral,
        BehavioralQuestionType::StockMarketTiming,
        BehavioralQuestionType::PortfolioWithMarketContext,
        BehavioralQuestionType::InvestmentEmotionalRisk,
        BehavioralQuestionType::StockBehavioralEmotional,
        BehavioralQuestionType::PortfolioBehavioral,
        BehavioralQuestionType::InvestmentMarketTiming,
        BehavioralQuestionType::StockEmotional,
        BehavioralQuestionType::PortfolioRiskAnalysis,
        BehavioralQuestionType::MarketConditions,
        BehavioralQuestionType::InvestmentRequest,
        BehavioralQuestionType::StockAnalysis,
        BehavioralQuestionType::PortfolioReview,
        BehavioralQuestionType::EmotionalSupport,
        BehavioralQuestionType::BehavioralInsight,
        BehavioralQuestionType::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BehavioralQuestionType::PortfolioMarketEmotional => "portfolio_market_emotional",
            BehavioralQuestionType::InvestmentMarketBehavioral => "investment_market_behavioral",
            BehavioralQuestionType::StockMarketTiming => "stock_market_timing",
            BehavioralQuestionType::PortfolioWithMarketContext => "portfolio_with_market_context",
            BehavioralQuestionType::InvestmentEmotionalRisk => "investment_emotional_risk",
            BehavioralQuestionType::StockBehavioralEmotional => "stock_behavioral_emotional",
            BehavioralQuestionType::PortfolioBehavioral => "portfolio_behavioral",
            BehavioralQuestionType::InvestmentMarketTiming => "investment_market_timing",
            BehavioralQuestionType::StockEmotional => "stock_emotional",
            BehavioralQuestionType::PortfolioRiskAnalysis => "portfolio_risk_analysis",
            BehavioralQuestionType::MarketConditions => "market_conditions",
            BehavioralQuestionType::InvestmentRequest => "investment_request",
            BehavioralQuestionType::StockAnalysis => "stock_analysis",
            BehavioralQuestionType::PortfolioReview => "portfolio_review",
            BehavioralQuestionType::EmotionalSupport => "emotional_support",
            BehavioralQuestionType::BehavioralInsight => "behavioral_insight",
            BehavioralQuestionType::General => "general",
        }
    }
}

/// One row of the priority table. Rows are tried top to bottom and the
/// first whose predicate holds decides the question type.
#[derive(Clone, Copy)]
pub struct BehavioralRule {
    pub question_type: BehavioralQuestionType,
    pub confidence: Decimal,
    pub requires_market_data: bool,
    pub emotional_content: bool,
    pub requires_recommendations: bool,
    pub predicate: fn(&BehavioralSignals) -> bool,
}

macro_rules! rule {
    ($kind:ident, $conf:expr, $market:expr, $emotional:expr, $recs:expr, |$s:ident| $pred:expr) => {
        BehavioralRule {
            question_type: BehavioralQuestionType::$kind,
            confidence: $conf,
            requires_market_data: $market,
            emotional_content: $emotional,
            requires_recommendations: $recs,
            predicate: {
                fn check($s: &BehavioralSignals) -> bool {
                    $pred
                }
                check
            },
        }
    };
}

/// Triple combinations first, then pairs, then single signals. Order is
/// load-bearing: reordering rows changes classifications.
pub static BEHAVIORAL_RULES: [BehavioralRule; 16] = [
    rule!(PortfolioMarketEmotional, dec!(0.95), true, true, false,
        |s| s.has_portfolio && s.has_market && s.has_emotional),
    rule!(InvestmentMarketBehavioral, dec!(0.95), true, true, true,
        |s| s.has_investment_amount && s.has_market && s.has_behavioral),
    rule!(StockMarketTiming, dec!(0.95), true, false, false,
        |s| s.has_stock_symbol && s.has_market && s.has_timing),
    rule!(PortfolioWithMarketContext, dec!(0.9), true, false, false,
        |s| s.has_portfolio && s.has_market),
    rule!(InvestmentEmotionalRisk, dec!(0.9), true, true, true,
        |s| s.has_investment_amount && s.has_emotional && s.has_risk),
    rule!(StockBehavioralEmotional, dec!(0.9), true, true, false,
        |s| s.has_stock_symbol && s.has_behavioral && s.has_emotional),
    rule!(PortfolioBehavioral, dec!(0.85), true, true, false,
        |s| s.has_portfolio && s.has_behavioral),
    rule!(InvestmentMarketTiming, dec!(0.85), true, false, true,
        |s| s.has_investment_amount && s.has_market && s.has_timing),
    rule!(StockEmotional, dec!(0.85), true, true, false,
        |s| s.has_stock_symbol && s.has_emotional),
    rule!(PortfolioRiskAnalysis, dec!(0.8), true, false, false,
        |s| s.has_portfolio && s.has_risk),
    rule!(MarketConditions, dec!(0.9), true, false, false,
        |s| s.has_market && !s.has_portfolio),
    rule!(InvestmentRequest, dec!(0.8), false, false, true,
        |s| s.has_investment_amount),
    rule!(StockAnalysis, dec!(0.8), true, false, false,
        |s| s.has_stock_symbol),
    rule!(PortfolioReview, dec!(0.8), false, false, false,
        |s| s.has_portfolio),
    rule!(EmotionalSupport, dec!(0.8), false, true, false,
        |s| s.has_emotional),
    rule!(BehavioralInsight, dec!(0.8), false, true, false,
        |s| s.has_behavioral),
];

const GENERAL_CONFIDENCE: Decimal = dec!(0.5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralClassification {
    pub question_type: BehavioralQuestionType,
    pub confidence: Decimal,
    pub extracted_amount: Option<Money>,
    pub extracted_symbols: Vec<String>,
    pub signals: BehavioralSignals,
    pub requires_market_data: bool,
    pub emotional_content: bool,
    pub requires_recommendations: bool,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

pub fn classify_behavioral_question(text: &str) -> BehavioralClassification {
    let extracted_amount = extract_investment_amount(text);
    let extracted_symbols = extract_stock_symbols(text);
    let signals = detect_signals(text, extracted_amount, &extracted_symbols);

    let matched = BEHAVIORAL_RULES.iter().find(|r| (r.predicate)(&signals));
    let (question_type, confidence, requires_market_data, emotional_content, requires_recommendations) =
        match matched {
            Some(r) => (
                r.question_type,
                r.confidence,
                r.requires_market_data,
                r.emotional_content,
                r.requires_recommendations,
            ),
            None => (BehavioralQuestionType::General, GENERAL_CONFIDENCE, false, false, false),
        };

    BehavioralClassification {
        question_type,
        confidence,
        extracted_amount,
        extracted_symbols,
        signals,
        requires_market_data,
        emotional_content,
        requires_recommendations,
    }
}
