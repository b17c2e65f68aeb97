use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assumptions::Assumptions;
use crate::scenarios::classifier::{classify_scenario, ScenarioClassification, ScenarioKind};
use crate::scenarios::education_goal::analyze_education_goal;
use crate::scenarios::family_planning::analyze_family_planning;
use crate::scenarios::general::analyze_general;
use crate::scenarios::house_purchase::analyze_house_purchase;
use crate::scenarios::job_switch::analyze_job_switch;
use crate::scenarios::loan_prepayment::analyze_loan_prepayment;
use crate::scenarios::result::ScenarioResult;
use crate::scenarios::salary_hike::analyze_salary_hike;
use crate::snapshot::FinancialSnapshot;
use crate::types::{with_metadata, ComputationOutput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub classification: ScenarioClassification,
    pub result: ScenarioResult,
}

/// Route a classification to its analyzer. Retirement, emergency-fund and
/// unmatched questions get the general snapshot summary.
pub fn run_analyzer(
    classification: &ScenarioClassification,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let params = &classification.parameters;
    match classification.primary_scenario {
        ScenarioKind::SalaryHike => analyze_salary_hike(params, snapshot, assumptions),
        ScenarioKind::HousePurchase => analyze_house_purchase(params, snapshot, assumptions),
        ScenarioKind::FamilyPlanning => analyze_family_planning(params, snapshot, assumptions),
        ScenarioKind::JobSwitch => analyze_job_switch(params, snapshot, assumptions),
        ScenarioKind::EducationGoal => analyze_education_goal(params, snapshot, assumptions),
        ScenarioKind::LoanPrepayment => analyze_loan_prepayment(params, snapshot, assumptions),
        kind @ (ScenarioKind::RetirementPlanning
        | ScenarioKind::EmergencyFund
        | ScenarioKind::GeneralPlanning) => analyze_general(kind, params, snapshot),
    }
}

/// Classify `text`, validate the inputs and run the matching analyzer.
///
/// Never fails: invalid snapshots or assumptions come back as
/// `ScenarioResult::Error` with the reason, and are repeated in `warnings`.
pub fn analyze_query(
    text: &str,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ComputationOutput<ScenarioAnalysis> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let classification = classify_scenario(text);
    debug!(
        scenario = classification.primary_scenario.as_str(),
        confidence = %classification.confidence,
        complexity = classification.complexity_score,
        "classified scenario"
    );

    let result = match snapshot.validate().and_then(|()| assumptions.validate()) {
        Ok(()) => run_analyzer(&classification, snapshot, assumptions),
        Err(e) => ScenarioResult::error(e.to_string()),
    };
    if let Some(message) = result.error_message() {
        warn!(
            scenario = classification.primary_scenario.as_str(),
            error = message,
            "analyzer returned an error result"
        );
        warnings.push(message.to_string());
    }

    let analysis = ScenarioAnalysis {
        classification,
        result,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Keyword scenario classification with time-value projections (monthly SIP annuity, EMI amortization, annual compounding)",
        assumptions,
        warnings,
        elapsed,
        analysis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_house_query_end_to_end() {
        let mut snapshot = FinancialSnapshot::default();
        snapshot.income.monthly_salary = dec!(150000);
        let out = analyze_query(
            "Can I buy house worth ₹50 lakh in 3 years saving 30,000 a month?",
            &snapshot,
            &Assumptions::default(),
        );
        assert_eq!(out.result.classification.primary_scenario, ScenarioKind::HousePurchase);
        match out.result.result {
            ScenarioResult::HousePurchase(r) => {
                assert_eq!(r.future_price, dec!(5788125));
                assert_eq!(r.monthly_savings, dec!(30000));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_invalid_snapshot_degrades_to_error() {
        let mut snapshot = FinancialSnapshot::default();
        snapshot.debts.home_loan = dec!(-1);
        let out = analyze_query("having a baby", &snapshot, &Assumptions::default());
        assert!(out.result.result.is_error());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_retirement_routes_to_general() {
        let out = analyze_query(
            "when can I retire early?",
            &FinancialSnapshot::default(),
            &Assumptions::default(),
        );
        match out.result.result {
            ScenarioResult::GeneralPlanning(r) => {
                assert_eq!(r.classified_as, ScenarioKind::RetirementPlanning)
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
