use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Limit, Money};

/// Rendering of `Limit::Infinite` in any user-facing text.
pub const UNREACHABLE: &str = "not achievable with current inputs";

/// Rupees rounded to whole units with Indian digit grouping: ₹12,34,567.
pub fn format_inr(amount: Money) -> String {
    let rounded = amount.round_dp(0);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

pub fn format_inr_limit(amount: Limit) -> String {
    match amount {
        Limit::Finite(v) => format_inr(v),
        Limit::Infinite => UNREACHABLE.to_string(),
    }
}

/// Short form in lakhs or crores, e.g. "57.9 L", "1.2 Cr".
pub fn format_lakh_crore(amount: Money) -> String {
    if amount.abs() >= dec!(10000000) {
        format!("{} Cr", (amount / dec!(10000000)).round_dp(1))
    } else if amount.abs() >= dec!(100000) {
        format!("{} L", (amount / dec!(100000)).round_dp(1))
    } else {
        format_inr(amount)
    }
}

/// A value that is already a percentage.
pub fn format_pct(pct: Decimal) -> String {
    format!("{}%", pct.round_dp(1).normalize())
}

/// A fractional rate such as 0.12.
pub fn format_rate(rate: Decimal) -> String {
    format_pct(rate * dec!(100))
}

pub fn format_pct_limit(pct: Limit) -> String {
    match pct {
        Limit::Finite(v) => format_pct(v),
        Limit::Infinite => UNREACHABLE.to_string(),
    }
}

pub fn format_years(years: Limit) -> String {
    match years {
        Limit::Finite(v) => {
            let v = v.round_dp(1).normalize();
            if v == Decimal::ONE {
                "1 year".to_string()
            } else {
                format!("{v} years")
            }
        }
        Limit::Infinite => UNREACHABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(dec!(1234567)), "₹12,34,567");
        assert_eq!(format_inr(dec!(5788125)), "₹57,88,125");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(123456789.6)), "₹12,34,56,790");
        assert_eq!(format_inr(dec!(-25000)), "-₹25,000");
        assert_eq!(format_inr(dec!(-0.2)), "₹0");
    }

    #[test]
    fn test_infinite_renders_as_unreachable() {
        assert_eq!(format_inr_limit(Limit::Infinite), UNREACHABLE);
        assert_eq!(format_years(Limit::Infinite), UNREACHABLE);
        assert_eq!(format_inr_limit(Limit::Finite(dec!(2500))), "₹2,500");
    }

    #[test]
    fn test_short_forms() {
        assert_eq!(format_lakh_crore(dec!(5788125)), "57.9 L");
        assert_eq!(format_lakh_crore(dec!(25000000)), "2.5 Cr");
        assert_eq!(format_rate(dec!(0.12)), "12%");
        assert_eq!(format_pct(dec!(26.789)), "26.8%");
        assert_eq!(format_years(Limit::Finite(dec!(2.25))), "2.2 years");
        assert_eq!(format_years(Limit::Finite(dec!(1))), "1 year");
    }
}
