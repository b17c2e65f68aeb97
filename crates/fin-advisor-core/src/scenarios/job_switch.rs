use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::scenarios::extract::ExtractedParameters;
use crate::scenarios::result::ScenarioResult;
use crate::snapshot::FinancialSnapshot;
use crate::time_value::future_value_of_sip;
use crate::types::{Money, Years};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSwitchResult {
    pub hike_percentage: Decimal,
    pub current_monthly_salary: Money,
    pub new_monthly_salary: Money,
    pub salary_increase_monthly: Money,
    pub epf_available_at_new_job: bool,
    /// Employee plus employer contribution.
    pub current_epf_monthly: Money,
    pub new_epf_monthly: Money,
    pub years_to_retirement: Years,
    pub epf_corpus_current_path: Money,
    pub epf_corpus_new_path: Money,
    /// Monthly amount needed to replace lost EPF.
    pub required_private_investment: Money,
    pub private_investment_corpus: Money,
    /// New path (EPF plus private) minus the current EPF path.
    pub retirement_corpus_delta: Money,
    pub net_monthly_benefit: Money,
    pub is_beneficial: bool,
    pub suggested_ppf_annual: Money,
    pub suggested_nps_annual: Money,
    pub suggested_mf_annual: Money,
}

pub fn analyze_job_switch(
    params: &ExtractedParameters,
    snapshot: &FinancialSnapshot,
    assumptions: &Assumptions,
) -> ScenarioResult {
    let hike_percentage = params
        .salary_hike_pct
        .or_else(|| params.percentages.first().copied())
        .unwrap_or(assumptions.default_job_switch_hike_pct);
    let epf_available = params
        .epf_available
        .unwrap_or(assumptions.epf_available_by_default);

    let current_salary = snapshot.monthly_income();
    let new_salary = current_salary * (Decimal::ONE + hike_percentage / dec!(100));
    let salary_increase = new_salary - current_salary;

    let employee_epf = if snapshot.income.epf_contribution.is_zero() {
        current_salary * assumptions.epf_employee_rate
    } else {
        snapshot.income.epf_contribution
    };
    let current_epf_monthly = employee_epf * dec!(2);

    let years_to_retirement = snapshot
        .goals
        .get("retirement")
        .map(|g| g.timeline_years)
        .filter(|y| *y > Decimal::ZERO)
        .unwrap_or(assumptions.default_years_to_retirement);

    let epf_corpus_current_path =
        future_value_of_sip(current_epf_monthly, years_to_retirement, assumptions.epf_return)
            .future_value;

    let (new_epf_monthly, required_private_investment) = if epf_available {
        (new_salary * assumptions.epf_employee_rate * dec!(2), Decimal::ZERO)
    } else {
        (Decimal::ZERO, current_epf_monthly)
    };
    let epf_corpus_new_path =
        future_value_of_sip(new_epf_monthly, years_to_retirement, assumptions.epf_return).future_value;
    let private_investment_corpus = future_value_of_sip(
        required_private_investment,
        years_to_retirement,
        assumptions.equity_return,
    )
    .future_value;

    let net_monthly_benefit = salary_increase - required_private_investment;
    let annual_private = required_private_investment * dec!(12);

    ScenarioResult::JobSwitch(JobSwitchResult {
        hike_percentage,
        current_monthly_salary: current_salary,
        new_monthly_salary: new_salary,
        salary_increase_monthly: salary_increase,
        epf_available_at_new_job: epf_available,
        current_epf_monthly,
        new_epf_monthly,
        years_to_retirement,
        epf_corpus_current_path,
        epf_corpus_new_path,
        required_private_investment,
        private_investment_corpus,
        retirement_corpus_delta: epf_corpus_new_path + private_investment_corpus
            - epf_corpus_current_path,
        net_monthly_benefit,
        is_beneficial: net_monthly_benefit > Decimal::ZERO,
        suggested_ppf_annual: annual_private.min(assumptions.ppf_annual_cap),
        suggested_nps_annual: annual_private * dec!(0.5),
        suggested_mf_annual: annual_private * dec!(0.5),
    })
}
