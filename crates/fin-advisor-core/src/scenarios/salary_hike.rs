use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::time_value::{future_value_of_sip, years_to_reach_target};
use crate::types::{Limit, Money};

/// Horizon over which the extra SIP is projected for illustration.
const PROJECTION_YEARS: Decimal = dec!(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalAcceleration {
    pub goal: String,
    pub remaining_amount: Money,
    pub current_monthly_allocation: Money,
    pub boosted_monthly_allocation: Money,
    pub original_years: Limit,
    pub new_years: Limit,
    /// Zero when either timeline is unreachable.
    pub months_saved: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryHikeResult {
    pub hike_percentage: Decimal,
    pub current_monthly_salary: Money,
    pub new_monthly_salary: Money,
    pub additional_monthly_income: Money,
    pub current_annual_salary: Money,
    pub new_annual_salary: Money,
    pub sip_increase: Money,
    pub emergency_fund_boost: Money,
    pub goal_acceleration_fund: Money,
    pub new_monthly_sip: Money,
    /// Value of the SIP increase alone after ten years.
    pub additional_sip_value_10y: Money,
    pub goal_accelerations: Vec<GoalAcceleration>,
}

fn months_saved(original: Limit, boosted: Limit) -> Decimal {
    match (original, boosted) {
        (Limit::Finite(o), Limit::Finite(n)) => ((o - n) * dec!(12)).max(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

pub fn analyze_salary_hike(
    params: &ExtractedParameters,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let hike_percentage = params
        .salary_hike_pct
        .unwrap_or(assumptions.default_salary_hike_pct);
    let current = snapshot.monthly_income();
    let new_salary = current * (Decimal::ONE + hike_percentage / dec!(100));
    let additional = new_salary - current;

    let split = &assumptions.hike_split;
    let sip_increase = additional * split.sip;
    let emergency_fund_boost = additional * split.emergency_fund;
    let goal_acceleration_fund = additional * split.goal_acceleration;

    let goal_count = Decimal::from(snapshot.goals.len().max(1));
    let goal_accelerations = snapshot
        .goals
        .iter()
        .map(|(name, goal)| {
            let remaining = goal.remaining();
            let boosted = goal.monthly_allocation + sip_increase / goal_count;
            let original_years =
                years_to_reach_target(remaining, goal.monthly_allocation, assumptions.equity_return);
            let new_years = years_to_reach_target(remaining, boosted, assumptions.equity_return);
            GoalAcceleration {
                goal: name.clone(),
                remaining_amount: remaining,
                current_monthly_allocation: goal.monthly_allocation,
                boosted_monthly_allocation: boosted,
                original_years,
                new_years,
                months_saved: months_saved(original_years, new_years),
            }
        })
        .collect();

    let additional_sip_value_10y =
        future_value_of_sip(sip_increase, PROJECTION_YEARS, assumptions.equity_return).future_value;

    ScenarioResult::SalaryHike(SalaryHikeResult {
        hike_percentage,
        current_monthly_salary: current,
        new_monthly_salary: new_salary,
        additional_monthly_income: additional,
        current_annual_salary: current * dec!(12),
        new_annual_salary: new_salary * dec!(12),
        sip_increase,
        emergency_fund_boost,
        goal_acceleration_fund,
        new_monthly_sip: snapshot.savings.monthly_sip + sip_increase,
        additional_sip_value_10y,
        goal_accelerations,
    })
}
