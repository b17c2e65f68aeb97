use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::scenarios::classifier::ScenarioKind;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::types::{Limit, Money, Rate, Years};

/// Headline figures of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub portfolio_value: Money,
    pub emergency_fund: Money,
    pub emergency_fund_months: Limit,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub monthly_savings: Money,
    pub savings_rate: Rate,
    pub total_debt: Money,
    pub net_worth: Money,
}

impl SnapshotSummary {
    pub fn from_snapshot(snapshot: &FinancialSnapshot) -> Self {
        SnapshotSummary {
            portfolio_value: snapshot.assets.total_portfolio_value,
            emergency_fund: snapshot.assets.emergency_fund,
            emergency_fund_months: snapshot.emergency_fund_months(),
            monthly_income: snapshot.monthly_income(),
            monthly_expenses: snapshot.monthly_outgoings(),
            monthly_savings: snapshot.monthly_savings(),
            savings_rate: snapshot.savings.savings_rate,
            total_debt: snapshot.total_debt(),
            net_worth: snapshot.net_worth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralPlanningResult {
    /// The classified scenario; retirement and emergency-fund questions land
    /// here as well as unmatched ones.
    pub classified_as: ScenarioKind,
    pub summary: SnapshotSummary,
    pub amounts: Vec<Money>,
    pub time_periods: Vec<Years>,
    pub percentages: Vec<Decimal>,
}

pub fn analyze_general(
    kind: ScenarioKind,
    params: &ExtractedParameters,
    snapshot: &FinancialSnapshot,
) -> ScenarioResult {
    ScenarioResult::GeneralPlanning(GeneralPlanningResult {
        classified_as: kind,
        summary: SnapshotSummary::from_snapshot(snapshot),
        amounts: params.amounts.clone(),
        time_periods: params.time_periods.clone(),
        percentages: params.percentages.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_echoes_parameters() {
        let mut s = FinancialSnapshot::default();
        s.assets.emergency_fund = dec!(120000);
        s.expenses.monthly_expenses = dec!(40000);
        s.debts.credit_card_debt = dec!(20000);
        let params = ExtractedParameters {
            amounts: vec![dec!(500000)],
            ..ExtractedParameters::default()
        };
        match analyze_general(ScenarioKind::EmergencyFund, &params, &s) {
            ScenarioResult::GeneralPlanning(r) => {
                assert_eq!(r.classified_as, ScenarioKind::EmergencyFund);
                assert_eq!(r.summary.emergency_fund_months, Limit::Finite(dec!(3)));
                assert_eq!(r.summary.net_worth, dec!(100000));
                assert_eq!(r.amounts, vec![dec!(500000)]);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
