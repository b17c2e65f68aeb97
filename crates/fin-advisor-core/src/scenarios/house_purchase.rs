use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::time_value::{
    compound_lump_sum, future_value_of_sip, inflation_adjusted_cost, loan_emi,
    sip_required_for_target,
};
use crate::types::{Limit, Money, Years};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityBand {
    Comfortable,
    Tight,
    Unaffordable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousePurchaseResult {
    pub house_price: Money,
    pub timeline_years: Years,
    pub monthly_savings: Money,
    pub future_price: Money,
    pub down_payment_required: Money,
    pub loan_amount: Money,
    /// Portfolio plus the usable share of the emergency fund.
    pub current_corpus: Money,
    pub corpus_future_value: Money,
    pub sip_future_value: Money,
    pub available_funds: Money,
    pub is_affordable: bool,
    /// Available funds minus the down payment; negative is a shortfall.
    pub shortfall_or_surplus: Money,
    pub monthly_emi: Limit,
    pub emi_to_income_pct: Limit,
    pub affordability_band: AffordabilityBand,
    /// Extra monthly SIP needed to close a down-payment shortfall.
    pub additional_sip_needed: Limit,
}

pub fn affordability_band(emi_to_income_pct: Limit, assumptions: &Assumptions) -> AffordabilityBand {
    match emi_to_income_pct {
        Limit::Finite(pct) if pct < assumptions.emi_comfortable_pct => AffordabilityBand::Comfortable,
        Limit::Finite(pct) if pct <= assumptions.emi_stretched_pct => AffordabilityBand::Tight,
        _ => AffordabilityBand::Unaffordable,
    }
}

/// Needs a price and a timeline; a second amount overrides the snapshot's
/// monthly savings.
pub fn analyze_house_purchase(
    params: &ExtractedParameters,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let (Some(&house_price), Some(&timeline_years)) =
        (params.amounts.first(), params.time_periods.first())
    else {
        return ScenarioResult::error("House price and timeline are required for house purchase analysis");
    };

    let monthly_savings = params
        .amounts
        .get(1)
        .copied()
        .unwrap_or_else(|| snapshot.monthly_savings())
        .max(Decimal::ZERO);

    let future_price =
        inflation_adjusted_cost(house_price, timeline_years, assumptions.real_estate_inflation);
    let down_payment_required = future_price * assumptions.down_payment_share;
    let loan_amount = future_price - down_payment_required;

    let current_corpus = snapshot.assets.total_portfolio_value
        + snapshot.assets.emergency_fund * assumptions.emergency_fund_usable_share;
    let corpus_future_value =
        compound_lump_sum(current_corpus, timeline_years, assumptions.equity_return);
    let sip_future_value =
        future_value_of_sip(monthly_savings, timeline_years, assumptions.equity_return).future_value;
    let available_funds = corpus_future_value + sip_future_value;

    let is_affordable = available_funds >= down_payment_required;
    let shortfall_or_surplus = available_funds - down_payment_required;

    let monthly_emi = loan_emi(
        loan_amount,
        assumptions.home_loan_rate,
        assumptions.home_loan_tenure_years,
    );
    let income = snapshot.monthly_income();
    let emi_to_income_pct = match monthly_emi {
        Limit::Finite(emi) if !income.is_zero() => Limit::Finite(emi / income * dec!(100)),
        _ => Limit::Infinite,
    };

    let additional_sip_needed = if is_affordable {
        Limit::ZERO
    } else {
        sip_required_for_target(-shortfall_or_surplus, timeline_years, assumptions.equity_return)
    };

    ScenarioResult::HousePurchase(HousePurchaseResult {
        house_price,
        timeline_years,
        monthly_savings,
        future_price,
        down_payment_required,
        loan_amount,
        current_corpus,
        corpus_future_value,
        sip_future_value,
        available_funds,
        is_affordable,
        shortfall_or_surplus,
        monthly_emi,
        emi_to_income_pct,
        affordability_band: affordability_band(emi_to_income_pct, assumptions),
        additional_sip_needed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(params: &ExtractedParameters, snapshot: &FinancialSnapshot) -> ScenarioResult {
        analyze_house_purchase(params, snapshot, &Assumptions::default())
    }

    fn params(amounts: Vec<Decimal>, years: Vec<Decimal>) -> ExtractedParameters {
        ExtractedParameters {
            has_amounts: !amounts.is_empty(),
            has_timeline: !years.is_empty(),
            amounts,
            time_periods: years,
            ..ExtractedParameters::default()
        }
    }

    #[test]
    fn test_missing_timeline_is_error_result() {
        let r = run(&params(vec![dec!(5000000)], vec![]), &FinancialSnapshot::default());
        assert!(r.is_error());
    }

    #[test]
    fn test_reference_case() {
        let mut snapshot = FinancialSnapshot::default();
        snapshot.income.monthly_salary = dec!(150000);
        let r = match run(&params(vec![dec!(5000000), dec!(30000)], vec![dec!(3)]), &snapshot) {
            ScenarioResult::HousePurchase(r) => r,
            other => panic!("unexpected result {other:?}"),
        };
        assert_eq!(r.future_price, dec!(5788125));
        assert_eq!(r.down_payment_required, dec!(1157625));
        assert_eq!(r.loan_amount, dec!(4630500));
        // 30,000/month for 36 months at 1% ~ 12.92 lakh
        assert!((r.sip_future_value - dec!(1292306.35)).abs() < dec!(0.01));
        assert!(r.is_affordable);
        assert_eq!(r.additional_sip_needed, Limit::ZERO);
        // EMI ~40,184 on 46.3 lakh over 20 years at 8.5%: ~26.8% of income
        assert_eq!(r.affordability_band, AffordabilityBand::Comfortable);
    }

    #[test]
    fn test_shortfall_needs_more_sip() {
        let r = match run(
            &params(vec![dec!(20000000), dec!(10000)], vec![dec!(2)]),
            &FinancialSnapshot::default(),
        ) {
            ScenarioResult::HousePurchase(r) => r,
            other => panic!("unexpected result {other:?}"),
        };
        assert!(!r.is_affordable);
        assert!(r.shortfall_or_surplus < Decimal::ZERO);
        assert!(r.additional_sip_needed > Limit::ZERO);
        assert!(r.additional_sip_needed.is_finite());
        // No income at all
        assert!(r.emi_to_income_pct.is_infinite());
        assert_eq!(r.affordability_band, AffordabilityBand::Unaffordable);
    }

    #[test]
    fn test_bands() {
        let a = Assumptions::default();
        assert_eq!(affordability_band(Limit::Finite(dec!(29.9)), &a), AffordabilityBand::Comfortable);
        assert_eq!(affordability_band(Limit::Finite(dec!(30)), &a), AffordabilityBand::Tight);
        assert_eq!(affordability_band(Limit::Finite(dec!(40)), &a), AffordabilityBand::Tight);
        assert_eq!(affordability_band(Limit::Finite(dec!(40.1)), &a), AffordabilityBand::Unaffordable);
    }
}
