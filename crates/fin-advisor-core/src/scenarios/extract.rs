//! Numeric parameter extraction from free text.
//!
//! Amounts are recognised when they carry a currency marker (₹, rs, inr,
//! rupees), an Indian unit (lakh, crore, k, thousand) or comma grouping.
//! Bare numbers are left alone so that "3 years" or "2 kids" never turn into
//! money. Tokens that fail to parse are skipped rather than read as zero.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use crate::types::MAX_TIMELINE_YEARS;
use crate::types::{Money, Years, MAX_AMOUNT};

/// Percentages beyond this are treated as noise.
pub const MAX_PERCENTAGE: Decimal = dec!(1000);

// =============================================================================
// STATIC REGEX PATTERNS
// =============================================================================

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?P<prefix>₹|\brs\.?|\binr)?\s*
        (?P<num>\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)
        \s*
        (?P<unit>lakhs?|lacs?|crores?|cr|thousand|k|rupees?|l)?\b",
    )
    .expect("amount pattern is valid")
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(years?|yrs?|months?|mos?)\b").expect("time pattern is valid")
});

static PERCENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("percent pattern is valid"));

static HIKE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(\d+(?:\.\d+)?)\s*%\s*(?:salary\s+|pay\s+)?(?:hike|raise|increase|increment)")
            .expect("hike pattern is valid"),
        Regex::new(r"(?:hike|raise|increase|increment)\s+(?:of\s+)?(\d+(?:\.\d+)?)\s*%")
            .expect("hike pattern is valid"),
    ]
});

static SALARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:salary|income)\s*(?:of|is|:)?\s*
        (?:₹|rs\.?)?\s*
        (?P<num>\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)
        \s*(?P<unit>lakhs?|lacs?|crores?|cr|thousand|k|l)?\b",
    )
    .expect("salary pattern is valid")
});

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+").expect("word pattern is valid"));

const EPF_ABSENT: [&str; 4] = ["no epf", "no pf", "without epf", "without pf"];
const EPF_PRESENT: [&str; 3] = ["with epf", "with pf", "epf available"];
const ABROAD_WORDS: [&str; 5] = ["abroad", "us", "usa", "uk", "canada"];

// =============================================================================
// Types
// =============================================================================

/// Numbers pulled out of a user's message, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedParameters {
    pub amounts: Vec<Money>,
    pub time_periods: Vec<Years>,
    pub percentages: Vec<Decimal>,
    pub salary_hike_pct: Option<Decimal>,
    pub salary_amount: Option<Money>,
    /// `Some` only when the text says whether the new employer offers EPF.
    pub epf_available: Option<bool>,
    pub is_abroad: bool,
    pub has_amounts: bool,
    pub has_timeline: bool,
}

impl ExtractedParameters {
    pub fn has_salary_info(&self) -> bool {
        self.salary_hike_pct.is_some() || self.salary_amount.is_some()
    }
}

// =============================================================================
// Extraction
// =============================================================================

fn unit_multiplier(unit: &str) -> Decimal {
    match unit {
        "lakh" | "lakhs" | "lac" | "lacs" | "l" => dec!(100000),
        "crore" | "crores" | "cr" => dec!(10000000),
        "thousand" | "k" => dec!(1000),
        _ => Decimal::ONE,
    }
}

fn parse_scaled(num: &str, unit: Option<&str>) -> Option<Money> {
    let value = Decimal::from_str(&num.replace(',', "")).ok()?;
    value.checked_mul(unit.map(unit_multiplier).unwrap_or(Decimal::ONE))
}

/// True when the digits at `start..end` are only part of a longer number,
/// e.g. the "1" of "1,0,0" or the "12,34,567" of "12,34,5678".
fn is_partial_number(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let continues = digit_at(end) || (bytes.get(end) == Some(&b',') && digit_at(end + 1));
    let resumes = start > 0
        && (digit_at(start - 1)
            || (bytes[start - 1] == b',' && start > 1 && digit_at(start - 2)));
    continues || resumes
}

/// Currency amounts in order of appearance, normalised to rupees.
/// Malformed digit groups yield no amount rather than a truncated one.
pub fn extract_amounts(text: &str) -> Vec<Money> {
    let lower = text.to_lowercase();
    AMOUNT_PATTERN
        .captures_iter(&lower)
        .filter_map(|caps| {
            let matched = caps.name("num")?;
            if is_partial_number(&lower, matched.start(), matched.end()) {
                return None;
            }
            let num = matched.as_str();
            let unit = caps.name("unit").map(|m| m.as_str());
            let is_money = caps.name("prefix").is_some() || unit.is_some() || num.contains(',');
            if !is_money {
                return None;
            }
            parse_scaled(num, unit).filter(|v| *v <= MAX_AMOUNT)
        })
        .collect()
}

/// Time spans in years; months are converted by dividing by 12.
pub fn extract_time_periods(text: &str) -> Vec<Years> {
    let lower = text.to_lowercase();
    TIME_PATTERN
        .captures_iter(&lower)
        .filter_map(|caps| {
            let value = Decimal::from_str(caps.get(1)?.as_str()).ok()?;
            let years = if caps.get(2)?.as_str().starts_with('m') {
                value / dec!(12)
            } else {
                value
            };
            (years <= MAX_TIMELINE_YEARS).then_some(years)
        })
        .collect()
}

pub fn extract_percentages(text: &str) -> Vec<Decimal> {
    PERCENT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| Decimal::from_str(caps.get(1)?.as_str()).ok())
        .filter(|p| *p <= MAX_PERCENTAGE)
        .collect()
}

pub fn extract_salary_hike(text: &str) -> Option<Decimal> {
    let lower = text.to_lowercase();
    HIKE_PATTERNS.iter().find_map(|re| {
        re.captures(&lower)
            .and_then(|caps| Decimal::from_str(caps.get(1)?.as_str()).ok())
            .filter(|p| *p <= MAX_PERCENTAGE)
    })
}

pub fn extract_salary_amount(text: &str) -> Option<Money> {
    let lower = text.to_lowercase();
    SALARY_PATTERN.captures_iter(&lower).find_map(|caps| {
        let num = caps.name("num")?.as_str();
        parse_scaled(num, caps.name("unit").map(|m| m.as_str())).filter(|v| *v <= MAX_AMOUNT)
    })
}

pub fn detect_epf_availability(text: &str) -> Option<bool> {
    let lower = text.to_lowercase();
    if EPF_ABSENT.iter().any(|p| lower.contains(p)) {
        Some(false)
    } else if EPF_PRESENT.iter().any(|p| lower.contains(p)) {
        Some(true)
    } else {
        None
    }
}

/// Whole-word match so that "business" or "usual" do not count as "us".
pub fn detect_abroad(text: &str) -> bool {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .any(|w| ABROAD_WORDS.contains(&w.as_str()))
}

pub fn extract_parameters(text: &str) -> ExtractedParameters {
    let amounts = extract_amounts(text);
    let time_periods = extract_time_periods(text);
    ExtractedParameters {
        has_amounts: !amounts.is_empty(),
        has_timeline: !time_periods.is_empty(),
        amounts,
        time_periods,
        percentages: extract_percentages(text),
        salary_hike_pct: extract_salary_hike(text),
        salary_amount: extract_salary_amount(text),
        epf_available: detect_epf_availability(text),
        is_abroad: detect_abroad(text),
    }
}
