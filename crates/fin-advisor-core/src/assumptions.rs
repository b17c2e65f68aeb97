use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::time_value::TaxSlab;
use crate::types::{Limit, Money, Rate, Years};
use crate::AdvisorResult;

// ---------------------------------------------------------------------------
// Planning assumptions
// ---------------------------------------------------------------------------

/// Named planning constants. `Default` is the FY 2024-25 Indian context.
///
/// Every field falls back to its default when absent, so an override file
/// only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub inflation_rate: Rate,
    pub equity_return: Rate,
    pub real_estate_inflation: Rate,
    pub education_inflation: Rate,
    pub currency_depreciation: Rate,
    pub home_loan_rate: Rate,
    pub home_loan_tenure_years: Years,
    pub down_payment_share: Rate,
    /// EMI-to-income percentage below which a loan is comfortable.
    pub emi_comfortable_pct: Decimal,
    /// EMI-to-income percentage above which a loan is unaffordable.
    pub emi_stretched_pct: Decimal,
    pub epf_return: Rate,
    pub epf_employee_rate: Rate,
    /// Whether a new employer is assumed to offer EPF when the text is silent.
    pub epf_available_by_default: bool,
    pub ppf_return: Rate,
    pub ppf_annual_cap: Money,
    pub default_loan_rate: Rate,
    pub default_loan_tenure_years: Years,
    pub default_salary_hike_pct: Decimal,
    pub default_job_switch_hike_pct: Decimal,
    pub default_years_to_retirement: Years,
    pub emergency_fund_months: Decimal,
    /// Share of the emergency fund that may go towards a down payment.
    pub emergency_fund_usable_share: Rate,
    pub hike_split: HikeSplit,
    pub family: FamilyCosts,
    pub tax: TaxRules,
}

impl Default for Assumptions {
    fn default() -> Self {
        Assumptions {
            inflation_rate: dec!(0.06),
            equity_return: dec!(0.12),
            real_estate_inflation: dec!(0.05),
            education_inflation: dec!(0.08),
            currency_depreciation: dec!(0.03),
            home_loan_rate: dec!(0.085),
            home_loan_tenure_years: dec!(20),
            down_payment_share: dec!(0.20),
            emi_comfortable_pct: dec!(30),
            emi_stretched_pct: dec!(40),
            epf_return: dec!(0.085),
            epf_employee_rate: dec!(0.12),
            epf_available_by_default: false,
            ppf_return: dec!(0.075),
            ppf_annual_cap: dec!(150000),
            default_loan_rate: dec!(0.10),
            default_loan_tenure_years: dec!(5),
            default_salary_hike_pct: dec!(25),
            default_job_switch_hike_pct: dec!(30),
            default_years_to_retirement: dec!(30),
            emergency_fund_months: dec!(6),
            emergency_fund_usable_share: dec!(0.5),
            hike_split: HikeSplit::default(),
            family: FamilyCosts::default(),
            tax: TaxRules::default(),
        }
    }
}

/// How additional income from a raise is divided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HikeSplit {
    pub sip: Rate,
    pub emergency_fund: Rate,
    pub goal_acceleration: Rate,
}

impl Default for HikeSplit {
    fn default() -> Self {
        HikeSplit {
            sip: dec!(0.60),
            emergency_fund: dec!(0.20),
            goal_acceleration: dec!(0.20),
        }
    }
}

/// Fixed costs of a new child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyCosts {
    pub delivery: Money,
    pub baby_essentials: Money,
    pub insurance_increase: Money,
    pub childcare_monthly: Money,
    pub baby_supplies_monthly: Money,
    pub healthcare_monthly: Money,
    pub preparation_months_min: u32,
    pub preparation_months_max: u32,
}

impl Default for FamilyCosts {
    fn default() -> Self {
        FamilyCosts {
            delivery: dec!(150000),
            baby_essentials: dec!(50000),
            insurance_increase: dec!(25000),
            childcare_monthly: dec!(8000),
            baby_supplies_monthly: dec!(3000),
            healthcare_monthly: dec!(5000),
            preparation_months_min: 9,
            preparation_months_max: 12,
        }
    }
}

impl FamilyCosts {
    pub fn immediate_total(&self) -> Money {
        self.delivery + self.baby_essentials + self.insurance_increase
    }

    pub fn monthly_total(&self) -> Money {
        self.childcare_monthly + self.baby_supplies_monthly + self.healthcare_monthly
    }
}

// ---------------------------------------------------------------------------
// Tax rules
// ---------------------------------------------------------------------------

/// Statutory caps per deduction section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLimits {
    pub sec_80c: Money,
    pub sec_80d_self: Money,
    pub sec_80d_self_senior: Money,
    pub sec_80d_parents: Money,
    pub sec_80d_parents_senior: Money,
    pub sec_80ccd_1b: Money,
    pub sec_24b: Money,
    pub sec_80e: Limit,
    pub sec_80tta: Money,
    pub sec_80ttb: Money,
}

impl Default for SectionLimits {
    fn default() -> Self {
        SectionLimits {
            sec_80c: dec!(150000),
            sec_80d_self: dec!(25000),
            sec_80d_self_senior: dec!(50000),
            sec_80d_parents: dec!(25000),
            sec_80d_parents_senior: dec!(50000),
            sec_80ccd_1b: dec!(50000),
            sec_24b: dec!(200000),
            sec_80e: Limit::Infinite,
            sec_80tta: dec!(10000),
            sec_80ttb: dec!(50000),
        }
    }
}

/// Rate used to price a rupee of unused deduction headroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MarginalRateMethod {
    /// Flat bracket guess from gross income, kept for parity with the
    /// advisory text users already see.
    Heuristic {
        threshold: Money,
        high_rate: Rate,
        low_rate: Rate,
    },
    /// Marginal rate of the old-regime slab the taxable income falls in.
    SlabTable,
}

impl Default for MarginalRateMethod {
    fn default() -> Self {
        MarginalRateMethod::Heuristic {
            threshold: dec!(1000000),
            high_rate: dec!(0.30),
            low_rate: dec!(0.20),
        }
    }
}

/// One cumulative advance-tax checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceTaxCheckpoint {
    pub day: u32,
    pub month: u32,
    /// Cumulative share of the net liability due by this date, in percent.
    pub cumulative_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    pub old_slabs: Vec<TaxSlab>,
    pub new_slabs: Vec<TaxSlab>,
    pub old_standard_deduction: Money,
    pub new_standard_deduction: Money,
    pub cess_rate: Rate,
    pub limits: SectionLimits,
    pub marginal_rate_method: MarginalRateMethod,
    pub advance_tax_schedule: Vec<AdvanceTaxCheckpoint>,
}

impl Default for TaxRules {
    fn default() -> Self {
        TaxRules {
            old_slabs: vec![
                TaxSlab::new(dec!(250000), dec!(0)),
                TaxSlab::new(dec!(500000), dec!(0.05)),
                TaxSlab::new(dec!(1000000), dec!(0.20)),
                TaxSlab::top(dec!(0.30)),
            ],
            new_slabs: vec![
                TaxSlab::new(dec!(300000), dec!(0)),
                TaxSlab::new(dec!(600000), dec!(0.05)),
                TaxSlab::new(dec!(900000), dec!(0.10)),
                TaxSlab::new(dec!(1200000), dec!(0.15)),
                TaxSlab::new(dec!(1500000), dec!(0.20)),
                TaxSlab::top(dec!(0.30)),
            ],
            old_standard_deduction: dec!(50000),
            new_standard_deduction: dec!(75000),
            cess_rate: dec!(0.04),
            limits: SectionLimits::default(),
            marginal_rate_method: MarginalRateMethod::default(),
            advance_tax_schedule: vec![
                AdvanceTaxCheckpoint { day: 15, month: 6, cumulative_pct: dec!(15) },
                AdvanceTaxCheckpoint { day: 15, month: 9, cumulative_pct: dec!(45) },
                AdvanceTaxCheckpoint { day: 15, month: 12, cumulative_pct: dec!(75) },
                AdvanceTaxCheckpoint { day: 15, month: 3, cumulative_pct: dec!(100) },
            ],
        }
    }
}

fn validate_slabs(field: &str, slabs: &[TaxSlab]) -> AdvisorResult<()> {
    if slabs.is_empty() {
        return Err(AdvisorError::invalid(field, "slab table is empty"));
    }
    let mut previous = Limit::ZERO;
    for slab in slabs {
        if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
            return Err(AdvisorError::invalid(field, "slab rates must lie in [0, 1]"));
        }
        if slab.upper_bound <= previous {
            return Err(AdvisorError::invalid(
                field,
                "slab upper bounds must be strictly increasing",
            ));
        }
        previous = slab.upper_bound;
    }
    if !previous.is_infinite() {
        return Err(AdvisorError::invalid(field, "last slab must be unbounded"));
    }
    Ok(())
}

impl TaxRules {
    pub fn validate(&self) -> AdvisorResult<()> {
        validate_slabs("tax.old_slabs", &self.old_slabs)?;
        validate_slabs("tax.new_slabs", &self.new_slabs)?;

        if self.cess_rate < Decimal::ZERO {
            return Err(AdvisorError::invalid("tax.cess_rate", "must be >= 0"));
        }
        if self.old_standard_deduction < Decimal::ZERO || self.new_standard_deduction < Decimal::ZERO {
            return Err(AdvisorError::invalid(
                "tax.standard_deduction",
                "standard deductions must be >= 0",
            ));
        }

        let mut last_pct = Decimal::ZERO;
        for checkpoint in &self.advance_tax_schedule {
            // Leap year so that 29 February is accepted.
            if NaiveDate::from_ymd_opt(2024, checkpoint.month, checkpoint.day).is_none() {
                return Err(AdvisorError::invalid(
                    "tax.advance_tax_schedule",
                    format!("{}/{} is not a calendar date", checkpoint.day, checkpoint.month),
                ));
            }
            if checkpoint.cumulative_pct < last_pct || checkpoint.cumulative_pct > dec!(100) {
                return Err(AdvisorError::invalid(
                    "tax.advance_tax_schedule",
                    "cumulative percentages must be non-decreasing and at most 100",
                ));
            }
            last_pct = checkpoint.cumulative_pct;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Assumptions {
    pub fn from_yaml_str(s: &str) -> AdvisorResult<Self> {
        let assumptions: Assumptions = serde_yaml::from_str(s)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    pub fn from_json_str(s: &str) -> AdvisorResult<Self> {
        let assumptions: Assumptions = serde_json::from_str(s)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Load an override file: YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> AdvisorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AdvisorError::ConfigError(format!("{}: {e}", path.display())))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn validate(&self) -> AdvisorResult<()> {
        let rates = [
            ("inflation_rate", self.inflation_rate),
            ("equity_return", self.equity_return),
            ("real_estate_inflation", self.real_estate_inflation),
            ("education_inflation", self.education_inflation),
            ("currency_depreciation", self.currency_depreciation),
            ("home_loan_rate", self.home_loan_rate),
            ("epf_return", self.epf_return),
            ("ppf_return", self.ppf_return),
            ("default_loan_rate", self.default_loan_rate),
        ];
        for (field, rate) in rates {
            if rate <= dec!(-1) {
                return Err(AdvisorError::invalid(field, "rate must be greater than -100%"));
            }
        }

        let shares = [
            ("down_payment_share", self.down_payment_share),
            ("epf_employee_rate", self.epf_employee_rate),
            ("emergency_fund_usable_share", self.emergency_fund_usable_share),
            ("hike_split.sip", self.hike_split.sip),
            ("hike_split.emergency_fund", self.hike_split.emergency_fund),
            ("hike_split.goal_acceleration", self.hike_split.goal_acceleration),
        ];
        for (field, share) in shares {
            if share < Decimal::ZERO || share > Decimal::ONE {
                return Err(AdvisorError::invalid(field, "share must lie in [0, 1]"));
            }
        }

        if self.emi_comfortable_pct > self.emi_stretched_pct {
            return Err(AdvisorError::invalid(
                "emi_comfortable_pct",
                "comfortable band must not exceed the stretched band",
            ));
        }
        if self.family.preparation_months_min == 0
            || self.family.preparation_months_min > self.family.preparation_months_max
        {
            return Err(AdvisorError::invalid(
                "family.preparation_months_min",
                "preparation window must be non-empty and start above zero",
            ));
        }
        if self.home_loan_tenure_years <= Decimal::ZERO {
            return Err(AdvisorError::invalid("home_loan_tenure_years", "must be > 0"));
        }

        self.tax.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Assumptions::default().validate().unwrap();
    }

    #[test]
    fn test_partial_yaml_override_keeps_defaults() {
        let yaml = "equity_return: '0.10'\ntax:\n  cess_rate: '0.05'\n";
        let a = Assumptions::from_yaml_str(yaml).unwrap();
        assert_eq!(a.equity_return, dec!(0.10));
        assert_eq!(a.tax.cess_rate, dec!(0.05));
        assert_eq!(a.inflation_rate, dec!(0.06));
        assert_eq!(a.tax.old_slabs.len(), 4);
        assert_eq!(a.tax.limits.sec_80c, dec!(150000));
    }

    #[test]
    fn test_json_override_with_slab_table_method() {
        let json = r#"{"tax": {"marginal_rate_method": {"method": "slab_table"}}}"#;
        let a = Assumptions::from_json_str(json).unwrap();
        assert_eq!(a.tax.marginal_rate_method, MarginalRateMethod::SlabTable);
    }

    #[test]
    fn test_bounded_top_slab_rejected() {
        let mut rules = TaxRules::default();
        rules.new_slabs.pop();
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_unordered_slabs_rejected() {
        let mut rules = TaxRules::default();
        rules.old_slabs.swap(0, 1);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_bad_schedule_date_rejected() {
        let mut rules = TaxRules::default();
        rules.advance_tax_schedule[0].day = 31;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_family_totals() {
        let f = FamilyCosts::default();
        assert_eq!(f.immediate_total(), dec!(225000));
        assert_eq!(f.monthly_total(), dec!(16000));
    }
}
