use serde::{Deserialize, Serialize};

use crate::scenarios::education_goal::EducationGoalResult;
use crate::scenarios::family_planning::FamilyPlanningResult;
use crate::scenarios::general::GeneralPlanningResult;
use crate::scenarios::house_purchase::HousePurchaseResult;
use crate::scenarios::job_switch::JobSwitchResult;
use crate::scenarios::loan_prepayment::LoanPrepaymentResult;
use crate::scenarios::salary_hike::SalaryHikeResult;

/// Output of one analyzer, tagged with the scenario that produced it.
///
/// `Error` carries insufficient-parameter conditions and serializes as
/// `{"scenario": "error", "error": "..."}`; callers check for it before
/// reading anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum ScenarioResult {
    SalaryHike(SalaryHikeResult),
    HousePurchase(HousePurchaseResult),
    FamilyPlanning(FamilyPlanningResult),
    JobSwitch(JobSwitchResult),
    EducationGoal(EducationGoalResult),
    LoanPrepayment(LoanPrepaymentResult),
    GeneralPlanning(GeneralPlanningResult),
    Error { error: String },
}

impl ScenarioResult {
    pub fn error(message: impl Into<String>) -> Self {
        ScenarioResult::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScenarioResult::Error { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ScenarioResult::Error { error } => Some(error),
            _ => None,
        }
    }
}
