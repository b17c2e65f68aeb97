use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::time_value::{compound_lump_sum, inflation_adjusted_cost, sip_required_for_target};
use crate::types::{Limit, Money, Rate, Years};

/// Goal names searched, in order, for an existing education corpus.
const EDUCATION_GOALS: [&str; 2] = ["child_education", "education"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationAllocation {
    pub equity_allocation: Rate,
    pub debt_allocation: Rate,
    pub suggested_funds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationGoalResult {
    pub education_cost_today: Money,
    pub education_cost_future: Money,
    pub timeline_years: Years,
    pub is_abroad_education: bool,
    pub current_corpus: Money,
    pub corpus_future_value: Money,
    /// SIP needed if the existing corpus is ignored.
    pub monthly_sip_required: Limit,
    /// Future cost not covered by the grown corpus.
    pub remaining_requirement: Money,
    pub adjusted_monthly_sip: Limit,
    pub total_sip_outlay: Limit,
    pub current_monthly_allocation: Money,
    /// Adjusted SIP beyond what is already allocated to the goal.
    pub monthly_shortfall: Limit,
    pub allocation: EducationAllocation,
    pub risk_notes: Vec<String>,
}

/// Equity/debt split by horizon: over 5 years 80/20, over 3 years 70/30,
/// otherwise 50/50.
pub fn education_allocation(timeline_years: Years) -> EducationAllocation {
    let (equity, debt, funds): (Rate, Rate, [&str; 3]) = if timeline_years > dec!(5) {
        (dec!(0.80), dec!(0.20), ["Large Cap Equity Funds", "Multi-Cap Funds", "International Funds"])
    } else if timeline_years > dec!(3) {
        (dec!(0.70), dec!(0.30), ["Hybrid Funds", "Large Cap Funds", "Short-term Debt Funds"])
    } else {
        (dec!(0.50), dec!(0.50), ["Debt Funds", "Liquid Funds", "Conservative Hybrid Funds"])
    };
    EducationAllocation {
        equity_allocation: equity,
        debt_allocation: debt,
        suggested_funds: funds.iter().map(|f| f.to_string()).collect(),
    }
}

fn risk_notes(timeline_years: Years, is_abroad: bool) -> Vec<String> {
    let mut notes = Vec::new();
    if timeline_years > dec!(3) {
        notes.push("Shift gradually from equity to debt over the final 2-3 years before fees fall due".to_string());
    } else {
        notes.push("Short horizon: keep the corpus in low-volatility debt instruments".to_string());
    }
    if is_abroad {
        notes.push("Foreign fees carry currency risk; consider part of the corpus in international funds".to_string());
    }
    notes.push("An education loan can cover a gap, and its interest is deductible under section 80E".to_string());
    notes
}

pub fn analyze_education_goal(
    params: &ExtractedParameters,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let (Some(&cost_today), Some(&timeline_years)) =
        (params.amounts.first(), params.time_periods.first())
    else {
        return ScenarioResult::error("Missing education cost or timeline information");
    };

    let mut education_cost_future =
        inflation_adjusted_cost(cost_today, timeline_years, assumptions.education_inflation);
    if params.is_abroad {
        education_cost_future = compound_lump_sum(
            education_cost_future,
            timeline_years,
            assumptions.currency_depreciation,
        );
    }

    let current_corpus = snapshot.goal_corpus(&EDUCATION_GOALS);
    let corpus_future_value =
        compound_lump_sum(current_corpus, timeline_years, assumptions.equity_return);

    let monthly_sip_required =
        sip_required_for_target(education_cost_future, timeline_years, assumptions.equity_return);
    let remaining_requirement = (education_cost_future - corpus_future_value).max(Decimal::ZERO);
    let adjusted_monthly_sip =
        sip_required_for_target(remaining_requirement, timeline_years, assumptions.equity_return);

    let current_monthly_allocation = EDUCATION_GOALS
        .iter()
        .find_map(|n| snapshot.goals.get(*n))
        .map(|g| g.monthly_allocation)
        .unwrap_or(Decimal::ZERO);

    ScenarioResult::EducationGoal(EducationGoalResult {
        education_cost_today: cost_today,
        education_cost_future,
        timeline_years,
        is_abroad_education: params.is_abroad,
        current_corpus,
        corpus_future_value,
        monthly_sip_required,
        remaining_requirement,
        adjusted_monthly_sip,
        total_sip_outlay: adjusted_monthly_sip.map(|sip| sip * dec!(12) * timeline_years),
        current_monthly_allocation,
        monthly_shortfall: adjusted_monthly_sip
            .map(|sip| (sip - current_monthly_allocation).max(Decimal::ZERO)),
        allocation: education_allocation(timeline_years),
        risk_notes: risk_notes(timeline_years, params.is_abroad),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Goal;

    fn params(cost: Decimal, years: Decimal, abroad: bool) -> ExtractedParameters {
        ExtractedParameters {
            amounts: vec![cost],
            time_periods: vec![years],
            is_abroad: abroad,
            has_amounts: true,
            has_timeline: true,
            ..ExtractedParameters::default()
        }
    }

    fn run(p: &ExtractedParameters, s: &FinancialSnapshot) -> EducationGoalResult {
        match analyze_education_goal(p, s, &Assumptions::default()) {
            ScenarioResult::EducationGoal(r) => r,
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_missing_cost_is_error_result() {
        let p = ExtractedParameters {
            time_periods: vec![dec!(4)],
            ..ExtractedParameters::default()
        };
        let r = analyze_education_goal(&p, &FinancialSnapshot::default(), &Assumptions::default());
        assert!(r.is_error());
    }

    #[test]
    fn test_domestic_cost_inflates_at_eight_percent() {
        let r = run(&params(dec!(2000000), dec!(5), false), &FinancialSnapshot::default());
        assert_eq!(r.education_cost_future, dec!(2938656.1536));
        assert_eq!(r.monthly_sip_required, r.adjusted_monthly_sip);
        assert_eq!(r.allocation.equity_allocation, dec!(0.70));
        assert_eq!(r.allocation.suggested_funds[0], "Hybrid Funds");
    }

    #[test]
    fn test_abroad_adds_currency_drift() {
        let home = run(&params(dec!(2000000), dec!(5), false), &FinancialSnapshot::default());
        let abroad = run(&params(dec!(2000000), dec!(5), true), &FinancialSnapshot::default());
        assert!(abroad.education_cost_future > home.education_cost_future);
        assert_eq!(abroad.risk_notes.len(), 3);
    }

    #[test]
    fn test_existing_corpus_lowers_sip() {
        let mut s = FinancialSnapshot::default();
        s.goals.insert(
            "child_education".into(),
            Goal {
                current_progress: dec!(500000),
                monthly_allocation: dec!(5000),
                ..Goal::default()
            },
        );
        let r = run(&params(dec!(2000000), dec!(8), false), &s);
        assert!(r.adjusted_monthly_sip < r.monthly_sip_required);
        assert_eq!(r.current_monthly_allocation, dec!(5000));
        assert_eq!(r.allocation.debt_allocation, dec!(0.20));
    }

    #[test]
    fn test_corpus_covering_cost_needs_no_sip() {
        let mut s = FinancialSnapshot::default();
        s.goals.insert(
            "education".into(),
            Goal {
                current_progress: dec!(5000000),
                ..Goal::default()
            },
        );
        let r = run(&params(dec!(1000000), dec!(2), false), &s);
        assert_eq!(r.remaining_requirement, Decimal::ZERO);
        assert_eq!(r.adjusted_monthly_sip, Limit::ZERO);
        assert_eq!(r.monthly_shortfall, Limit::ZERO);
    }
}
