use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::time_value::{compound_lump_sum, future_value_of_sip, loan_emi};
use crate::types::{Money, Rate, Years};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanRecommendation {
    Prepay,
    Invest,
}

/// Close the loan now and invest the freed EMI every month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepaymentPath {
    pub immediate_outflow: Money,
    pub monthly_savings_if_prepaid: Money,
    pub future_wealth_from_emi_investment: Money,
}

/// Keep paying the EMI and invest the lump sum instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueEmiPath {
    pub total_interest_cost: Money,
    pub investment_returns_on_lump_sum: Money,
    pub net_wealth: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPrepaymentResult {
    pub outstanding_loan: Money,
    pub loan_interest_rate: Rate,
    pub investment_return_rate: Rate,
    pub remaining_years: Years,
    pub current_emi: Money,
    pub total_interest_remaining: Money,
    pub prepayment: PrepaymentPath,
    pub continue_emi: ContinueEmiPath,
    /// Prepayment path minus continue path; negative favours investing.
    pub net_benefit_of_prepaying: Money,
    pub recommendation: LoanRecommendation,
    pub rationale: String,
}

/// Prepay exactly when the loan costs at least what investing earns.
pub fn loan_recommendation(loan_rate: Rate, investment_rate: Rate) -> LoanRecommendation {
    if loan_rate >= investment_rate {
        LoanRecommendation::Prepay
    } else {
        LoanRecommendation::Invest
    }
}

fn rationale(recommendation: LoanRecommendation, loan_rate: Rate, investment_rate: Rate) -> String {
    let loan_pct = (loan_rate * dec!(100)).round_dp(1);
    let invest_pct = (investment_rate * dec!(100)).round_dp(1);
    match recommendation {
        LoanRecommendation::Prepay => format!(
            "The loan costs {loan_pct}% a year, at least the {invest_pct}% expected from investing. \
             Every rupee prepaid earns a guaranteed {loan_pct}%, so prepaying is the better use of the money."
        ),
        LoanRecommendation::Invest => format!(
            "The loan costs {loan_pct}% a year, below the {invest_pct}% expected from investing. \
             Keep paying the EMI and invest surplus funds, accepting market risk for the higher return."
        ),
    }
}

/// Needs the outstanding amount. The first percentage in the text is read as
/// the loan rate and the first time span as the remaining tenure.
pub fn analyze_loan_prepayment(
    params: &ExtractedParameters,
    _snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let Some(&outstanding_loan) = params.amounts.first() else {
        return ScenarioResult::error("Missing loan amount information");
    };

    let loan_rate = params
        .percentages
        .first()
        .map(|p| *p / dec!(100))
        .unwrap_or(assumptions.default_loan_rate);
    let remaining_years = params
        .time_periods
        .first()
        .copied()
        .filter(|y| *y > Decimal::ZERO)
        .unwrap_or(assumptions.default_loan_tenure_years);
    let investment_rate = assumptions.equity_return;

    let Some(current_emi) = loan_emi(outstanding_loan, loan_rate, remaining_years).finite() else {
        return ScenarioResult::error("Loan has no valid repayment schedule for the given rate and tenure");
    };

    let total_paid = current_emi * dec!(12) * remaining_years;
    let total_interest_remaining = (total_paid - outstanding_loan).max(Decimal::ZERO);

    let investment_returns_on_lump_sum =
        compound_lump_sum(outstanding_loan, remaining_years, investment_rate);
    let continue_net_wealth = investment_returns_on_lump_sum - total_interest_remaining;
    let future_wealth_from_emi_investment =
        future_value_of_sip(current_emi, remaining_years, investment_rate).future_value;

    let recommendation = loan_recommendation(loan_rate, investment_rate);

    ScenarioResult::LoanPrepayment(LoanPrepaymentResult {
        outstanding_loan,
        loan_interest_rate: loan_rate,
        investment_return_rate: investment_rate,
        remaining_years,
        current_emi,
        total_interest_remaining,
        prepayment: PrepaymentPath {
            immediate_outflow: outstanding_loan,
            monthly_savings_if_prepaid: current_emi,
            future_wealth_from_emi_investment,
        },
        continue_emi: ContinueEmiPath {
            total_interest_cost: total_interest_remaining,
            investment_returns_on_lump_sum,
            net_wealth: continue_net_wealth,
        },
        net_benefit_of_prepaying: future_wealth_from_emi_investment - continue_net_wealth,
        recommendation,
        rationale: rationale(recommendation, loan_rate, investment_rate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(params: &ExtractedParameters) -> ScenarioResult {
        analyze_loan_prepayment(params, &FinancialSnapshot::default(), &Assumptions::default())
    }

    fn loan(amount: Decimal, pct: Option<Decimal>, years: Option<Decimal>) -> LoanPrepaymentResult {
        let params = ExtractedParameters {
            amounts: vec![amount],
            percentages: pct.into_iter().collect(),
            time_periods: years.into_iter().collect(),
            ..ExtractedParameters::default()
        };
        match run(&params) {
            ScenarioResult::LoanPrepayment(r) => r,
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_missing_amount_is_error_result() {
        assert!(run(&ExtractedParameters::default()).is_error());
    }

    #[test]
    fn test_defaults_recommend_investing() {
        let r = loan(dec!(1000000), None, None);
        assert_eq!(r.loan_interest_rate, dec!(0.10));
        assert_eq!(r.remaining_years, dec!(5));
        assert!((r.current_emi - dec!(21247.04)).abs() < dec!(0.01));
        assert!((r.total_interest_remaining - dec!(274822.4)).abs() < dec!(1));
        assert_eq!(r.recommendation, LoanRecommendation::Invest);
        assert!(r.rationale.contains("below"));
    }

    #[test]
    fn test_expensive_loan_recommends_prepaying() {
        let r = loan(dec!(500000), Some(dec!(14)), Some(dec!(3)));
        assert_eq!(r.loan_interest_rate, dec!(0.14));
        assert_eq!(r.remaining_years, dec!(3));
        assert_eq!(r.recommendation, LoanRecommendation::Prepay);
    }

    #[test]
    fn test_equal_rates_prepay() {
        assert_eq!(loan_recommendation(dec!(0.12), dec!(0.12)), LoanRecommendation::Prepay);
    }

    #[test]
    fn test_zero_tenure_falls_back_to_default() {
        let r = loan(dec!(100000), None, Some(Decimal::ZERO));
        assert_eq!(r.remaining_years, dec!(5));
    }

    #[test]
    fn test_continue_path_accounts_for_interest() {
        let r = loan(dec!(1000000), None, None);
        assert_eq!(
            r.continue_emi.net_wealth,
            r.continue_emi.investment_returns_on_lump_sum - r.total_interest_remaining
        );
        assert_eq!(
            r.net_benefit_of_prepaying,
            r.prepayment.future_wealth_from_emi_investment - r.continue_emi.net_wealth
        );
    }
}
