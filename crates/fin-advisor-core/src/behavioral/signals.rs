//! Boolean signals and entity extraction for investment-coaching questions.
//!
//! Keywords match at the start of a word, so "risk" also catches "risky"
//! and "risks" while "now" does not fire inside "know". Company names must
//! match whole words.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scenarios::extract::extract_amounts;
use crate::types::Money;

static TICKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("ticker pattern is valid"));

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9']+").expect("separator pattern is valid"));

const PORTFOLIO_TERMS: &[&str] = &[
    "portfolio", "my investments", "my holdings", "my stocks", "my positions",
    "my money", "my assets", "allocation",
];

const MARKET_TERMS: &[&str] = &[
    "market", "today", "current environment", "volatility", "trends", "environment",
    "given today",
];

const EMOTIONAL_TERMS: &[&str] = &[
    "worried", "anxious", "scared", "nervous", "stressed", "panic", "uncertain",
    "confused", "frustrated", "overwhelmed", "fearful", "terrified", "angry",
];

const BEHAVIORAL_TERMS: &[&str] = &[
    "why do i", "pattern", "mistake", "decision", "behavior", "behaviour", "tendency",
    "habit", "always", "keep", "irrational", "emotional", "bad timing", "wrong time",
];

const TIMING_TERMS: &[&str] = &[
    "when", "timing", "now", "should i", "right time", "good time", "best time",
    "is it time", "given today", "current conditions",
];

const RISK_TERMS: &[&str] = &[
    "risk", "safe", "volatile", "conservative", "aggressive", "diversif", "dangerous",
    "secure", "stability",
];

/// Company names recognised in lower-case text, in lookup order.
pub const COMPANY_TICKERS: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("tesla", "TSLA"),
    ("amazon", "AMZN"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("meta", "META"),
    ("facebook", "META"),
    ("netflix", "NFLX"),
    ("nvidia", "NVDA"),
    ("intel", "INTC"),
    ("amd", "AMD"),
    ("disney", "DIS"),
    ("boeing", "BA"),
    ("walmart", "WMT"),
    ("visa", "V"),
    ("mastercard", "MA"),
    ("jpmorgan", "JPM"),
    ("goldman", "GS"),
    ("coca cola", "KO"),
    ("pepsi", "PEP"),
    ("johnson", "JNJ"),
    ("pfizer", "PFE"),
    ("exxon", "XOM"),
    ("berkshire", "BRK.B"),
    ("salesforce", "CRM"),
    ("oracle", "ORCL"),
    ("ibm", "IBM"),
    ("reliance", "RELIANCE"),
    ("infosys", "INFY"),
    ("tcs", "TCS"),
    ("wipro", "WIPRO"),
    ("hdfc bank", "HDFCBANK"),
];

/// Upper-case words that are never tickers.
pub const TICKER_STOPWORDS: &[&str] = &[
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "HAS", "HER", "WAS",
    "ONE", "OUR", "OUT", "DAY", "GET", "USE", "MAN", "NEW", "NOW", "OLD", "SEE", "HIM",
    "TWO", "HOW", "ITS", "WHO", "SIT", "SET", "MAY", "WAY", "TOO", "BUY", "SELL", "HOLD",
    "STOP", "LOSS", "GAIN", "TAKE", "GIVE", "MAKE", "CALL", "PUT", "TIME", "YEAR", "WEEK",
    "MONTH", "SIP", "EMI", "ETF", "IPO", "NAV", "INR", "USD",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralSignals {
    pub has_portfolio: bool,
    pub has_market: bool,
    pub has_emotional: bool,
    pub has_behavioral: bool,
    pub has_timing: bool,
    pub has_risk: bool,
    pub has_investment_amount: bool,
    pub has_stock_symbol: bool,
}

/// Lower-cased text with punctuation collapsed to single spaces and padded
/// on both sides, ready for boundary matching.
pub(crate) fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    format!(" {} ", NON_WORD.replace_all(&lower, " ").trim())
}

/// `term` starts at a word boundary in `normalized`.
pub(crate) fn contains_term(normalized: &str, term: &str) -> bool {
    normalized.contains(&format!(" {term}"))
}

fn contains_word(normalized: &str, word: &str) -> bool {
    normalized.contains(&format!(" {word} "))
}

fn any_term(normalized: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(normalized, t))
}

/// First currency amount in the message.
pub fn extract_investment_amount(text: &str) -> Option<Money> {
    extract_amounts(text).into_iter().next()
}

/// Tickers from known company names, then from upper-case tokens in the
/// original text, de-duplicated in order of discovery.
pub fn extract_stock_symbols(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let mut symbols: Vec<String> = Vec::new();
    let mut push = |s: &str| {
        if !symbols.iter().any(|x| x == s) {
            symbols.push(s.to_string());
        }
    };

    for &(name, ticker) in COMPANY_TICKERS {
        if contains_word(&normalized, name) {
            push(ticker);
        }
    }
    for m in TICKER_PATTERN.find_iter(text) {
        if !TICKER_STOPWORDS.contains(&m.as_str()) {
            push(m.as_str());
        }
    }
    symbols
}

pub fn detect_signals(text: &str, amount: Option<Money>, symbols: &[String]) -> BehavioralSignals {
    let normalized = normalize(text);
    BehavioralSignals {
        has_portfolio: any_term(&normalized, PORTFOLIO_TERMS),
        has_market: any_term(&normalized, MARKET_TERMS),
        has_emotional: any_term(&normalized, EMOTIONAL_TERMS),
        has_behavioral: any_term(&normalized, BEHAVIORAL_TERMS),
        has_timing: any_term(&normalized, TIMING_TERMS),
        has_risk: any_term(&normalized, RISK_TERMS),
        has_investment_amount: amount.is_some(),
        has_stock_symbol: !symbols.is_empty(),
    }
}
