use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// All monetary values, in rupees. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Largest amount accepted from user input (10^15 rupees). Keeps every
/// downstream projection inside Decimal range.
pub const MAX_AMOUNT: Money = rust_decimal_macros::dec!(1000000000000000);

/// Longest planning horizon accepted from user input, in years.
pub const MAX_TIMELINE_YEARS: Years = rust_decimal_macros::dec!(100);

/// A quantity that may be mathematically unreachable.
///
/// `Infinite` is the "never" answer of the inverse formulas (a SIP that can
/// never reach its target, a loan with no valid schedule). It sorts above
/// every finite value and serializes as the string `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    Finite(Decimal),
    Infinite,
}

impl Limit {
    pub const ZERO: Limit = Limit::Finite(Decimal::ZERO);

    pub fn is_infinite(self) -> bool {
        matches!(self, Limit::Infinite)
    }

    pub fn is_finite(self) -> bool {
        !self.is_infinite()
    }

    pub fn finite(self) -> Option<Decimal> {
        match self {
            Limit::Finite(v) => Some(v),
            Limit::Infinite => None,
        }
    }

    pub fn unwrap_or(self, fallback: Decimal) -> Decimal {
        self.finite().unwrap_or(fallback)
    }

    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Limit {
        match self {
            Limit::Finite(v) => Limit::Finite(f(v)),
            Limit::Infinite => Limit::Infinite,
        }
    }

    pub fn round_dp(self, dp: u32) -> Limit {
        self.map(|v| v.round_dp(dp))
    }
}

impl From<Decimal> for Limit {
    fn from(value: Decimal) -> Self {
        Limit::Finite(value)
    }
}

impl From<Option<Decimal>> for Limit {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Limit::Infinite, Limit::Finite)
    }
}

impl PartialOrd for Limit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Limit {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Limit::Finite(a), Limit::Finite(b)) => a.cmp(b),
            (Limit::Finite(_), Limit::Infinite) => Ordering::Less,
            (Limit::Infinite, Limit::Finite(_)) => Ordering::Greater,
            (Limit::Infinite, Limit::Infinite) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Finite(v) => write!(f, "{v}"),
            Limit::Infinite => f.write_str("Infinity"),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Finite(v) => Serialize::serialize(v, serializer),
            Limit::Infinite => serializer.serialize_str("Infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(Decimal),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Limit::Finite(v)),
            Repr::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "infinity" | "+infinity" | "inf" | "+inf" => Ok(Limit::Infinite),
                other => Err(serde::de::Error::custom(format!(
                    "expected a decimal or \"Infinity\", got \"{other}\""
                ))),
            },
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
