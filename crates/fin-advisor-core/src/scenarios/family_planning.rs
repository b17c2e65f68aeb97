use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmediateCosts {
    pub delivery: Money,
    pub baby_essentials: Money,
    pub insurance_increase: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCostIncrease {
    pub childcare: Money,
    pub baby_supplies: Money,
    pub healthcare: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPlanningResult {
    pub immediate_costs: ImmediateCosts,
    pub total_immediate_cost: Money,
    pub monthly_cost_increase: MonthlyCostIncrease,
    pub total_monthly_increase: Money,
    pub current_monthly_expenses: Money,
    pub new_monthly_expenses: Money,
    pub emergency_fund_target: Money,
    pub current_emergency_fund: Money,
    /// Never negative.
    pub emergency_fund_gap: Money,
    /// Immediate costs plus the emergency-fund gap.
    pub immediate_savings_target: Money,
    pub preparation_months_min: u32,
    pub preparation_months_max: u32,
    /// Savings target spread over the shorter preparation window.
    pub required_monthly_savings: Money,
    pub current_monthly_savings: Money,
    /// Current savings minus the required figure; negative means the plan
    /// needs more than is saved today.
    pub budget_after_plan: Money,
}

/// Always produces a plan; the only verdict is how much to save each month.
pub fn analyze_family_planning(
    _params: &ExtractedParameters,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let costs = &assumptions.family;
    let total_immediate_cost = costs.immediate_total();
    let total_monthly_increase = costs.monthly_total();

    let current_monthly_expenses = snapshot.monthly_outgoings();
    let new_monthly_expenses = current_monthly_expenses + total_monthly_increase;
    let emergency_fund_target = new_monthly_expenses * assumptions.emergency_fund_months;
    let current_emergency_fund = snapshot.assets.emergency_fund;
    let emergency_fund_gap = (emergency_fund_target - current_emergency_fund).max(Decimal::ZERO);

    let immediate_savings_target = total_immediate_cost + emergency_fund_gap;
    let required_monthly_savings =
        immediate_savings_target / Decimal::from(costs.preparation_months_min.max(1));
    let current_monthly_savings = snapshot.monthly_savings();

    ScenarioResult::FamilyPlanning(FamilyPlanningResult {
        immediate_costs: ImmediateCosts {
            delivery: costs.delivery,
            baby_essentials: costs.baby_essentials,
            insurance_increase: costs.insurance_increase,
        },
        total_immediate_cost,
        monthly_cost_increase: MonthlyCostIncrease {
            childcare: costs.childcare_monthly,
            baby_supplies: costs.baby_supplies_monthly,
            healthcare: costs.healthcare_monthly,
        },
        total_monthly_increase,
        current_monthly_expenses,
        new_monthly_expenses,
        emergency_fund_target,
        current_emergency_fund,
        emergency_fund_gap,
        immediate_savings_target,
        preparation_months_min: costs.preparation_months_min,
        preparation_months_max: costs.preparation_months_max,
        required_monthly_savings,
        current_monthly_savings,
        budget_after_plan: current_monthly_savings - required_monthly_savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn run(snapshot: &FinancialSnapshot) -> FamilyPlanningResult {
        match analyze_family_planning(&ExtractedParameters::default(), snapshot, &Assumptions::default()) {
            ScenarioResult::FamilyPlanning(r) => r,
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_fixed_costs_independent_of_snapshot() {
        let r = run(&FinancialSnapshot::default());
        assert_eq!(r.total_immediate_cost, dec!(225000));
        assert_eq!(r.total_monthly_increase, dec!(16000));
        // 6 x 16,000 with no existing expenses
        assert_eq!(r.emergency_fund_target, dec!(96000));
        assert_eq!(r.emergency_fund_gap, dec!(96000));
        assert_eq!(r.immediate_savings_target, dec!(321000));
    }

    #[test]
    fn test_gap_floors_at_zero() {
        let mut s = FinancialSnapshot::default();
        s.expenses.monthly_expenses = dec!(50000);
        s.assets.emergency_fund = dec!(1000000);
        s.income.monthly_salary = dec!(150000);
        let r = run(&s);
        assert_eq!(r.new_monthly_expenses, dec!(66000));
        assert_eq!(r.emergency_fund_target, dec!(396000));
        assert_eq!(r.emergency_fund_gap, Decimal::ZERO);
        assert_eq!(r.required_monthly_savings, dec!(25000));
        assert_eq!(r.budget_after_plan, dec!(75000));
    }
}
