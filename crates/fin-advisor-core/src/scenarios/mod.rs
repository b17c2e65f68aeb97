pub mod classifier;
pub mod dispatch;
pub mod education_goal;
pub mod extract;
pub mod family_planning;
pub mod general;
pub mod house_purchase;
pub mod job_switch;
pub mod loan_prepayment;
pub mod result;
pub mod salary_hike;

pub use classifier::{classify_scenario, ScenarioClassification, ScenarioKind};
pub use dispatch::{analyze_query, run_analyzer, ScenarioAnalysis};
pub use extract::{extract_parameters, ExtractedParameters};
pub use result::ScenarioResult;
