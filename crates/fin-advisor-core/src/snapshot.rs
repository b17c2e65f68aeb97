use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::types::{Limit, Money, Rate, Years, MAX_AMOUNT, MAX_TIMELINE_YEARS};
use crate::AdvisorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A user's finances at the moment a question is asked. Read-only for the
/// duration of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSnapshot {
    pub assets: Assets,
    pub income: Income,
    pub expenses: Expenses,
    pub savings: Savings,
    pub goals: BTreeMap<String, Goal>,
    pub debts: Debts,
    pub user_profile: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub total_portfolio_value: Money,
    pub emergency_fund: Money,
    pub real_estate: Money,
    pub other_assets: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Income {
    pub monthly_salary: Money,
    pub annual_bonus: Money,
    pub other_income: Money,
    /// Employee EPF contribution per month.
    pub epf_contribution: Money,
    /// Stored total; derived from the other fields when absent.
    pub total_monthly_income: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expenses {
    pub monthly_expenses: Money,
    pub rent_emi: Money,
    pub insurance_premiums: Money,
    pub discretionary_expenses: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Savings {
    pub monthly_sip: Money,
    pub savings_rate: Rate,
    /// Stored figure; derived as income minus expenses when absent.
    pub current_monthly_savings: Option<Money>,
}

impl Default for Savings {
    fn default() -> Self {
        Savings {
            monthly_sip: Decimal::ZERO,
            savings_rate: dec!(0.20),
            current_monthly_savings: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    pub target_amount: Money,
    pub current_progress: Money,
    pub timeline_years: Years,
    pub monthly_allocation: Money,
    pub priority: String,
    pub category: String,
}

impl Default for Goal {
    fn default() -> Self {
        Goal {
            target_amount: Decimal::ZERO,
            current_progress: Decimal::ZERO,
            timeline_years: Decimal::ZERO,
            monthly_allocation: Decimal::ZERO,
            priority: "medium".into(),
            category: "general".into(),
        }
    }
}

impl Goal {
    /// Amount still to be accumulated, never negative.
    pub fn remaining(&self) -> Money {
        (self.target_amount - self.current_progress).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Debts {
    pub home_loan: Money,
    pub personal_loans: Money,
    pub credit_card_debt: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub risk_tolerance: String,
    pub investment_goals: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            risk_tolerance: "moderate".into(),
            investment_goals: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl FinancialSnapshot {
    pub fn from_json_str(s: &str) -> AdvisorResult<Self> {
        let snapshot: FinancialSnapshot = serde_json::from_str(s)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_value(value: serde_json::Value) -> AdvisorResult<Self> {
        let snapshot: FinancialSnapshot = serde_json::from_value(value)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject shapes the calculators must never see.
    pub fn validate(&self) -> AdvisorResult<()> {
        let mut amounts: Vec<(String, Money)> = vec![
            ("assets.total_portfolio_value".into(), self.assets.total_portfolio_value),
            ("assets.emergency_fund".into(), self.assets.emergency_fund),
            ("assets.real_estate".into(), self.assets.real_estate),
            ("assets.other_assets".into(), self.assets.other_assets),
            ("income.monthly_salary".into(), self.income.monthly_salary),
            ("income.annual_bonus".into(), self.income.annual_bonus),
            ("income.other_income".into(), self.income.other_income),
            ("income.epf_contribution".into(), self.income.epf_contribution),
            ("expenses.monthly_expenses".into(), self.expenses.monthly_expenses),
            ("expenses.rent_emi".into(), self.expenses.rent_emi),
            ("expenses.insurance_premiums".into(), self.expenses.insurance_premiums),
            ("expenses.discretionary_expenses".into(), self.expenses.discretionary_expenses),
            ("savings.monthly_sip".into(), self.savings.monthly_sip),
            ("debts.home_loan".into(), self.debts.home_loan),
            ("debts.personal_loans".into(), self.debts.personal_loans),
            ("debts.credit_card_debt".into(), self.debts.credit_card_debt),
        ];
        if let Some(total) = self.income.total_monthly_income {
            amounts.push(("income.total_monthly_income".into(), total));
        }
        for (name, goal) in &self.goals {
            amounts.push((format!("goals.{name}.target_amount"), goal.target_amount));
            amounts.push((format!("goals.{name}.current_progress"), goal.current_progress));
            amounts.push((format!("goals.{name}.timeline_years"), goal.timeline_years));
            amounts.push((format!("goals.{name}.monthly_allocation"), goal.monthly_allocation));
        }

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(AdvisorError::InvalidInput {
                    field,
                    reason: "must be >= 0".into(),
                });
            }
            if value > MAX_AMOUNT {
                return Err(AdvisorError::InvalidInput {
                    field,
                    reason: format!("must be <= {MAX_AMOUNT}"),
                });
            }
        }

        for (name, goal) in &self.goals {
            if goal.timeline_years > MAX_TIMELINE_YEARS {
                return Err(AdvisorError::InvalidInput {
                    field: format!("goals.{name}.timeline_years"),
                    reason: format!("must be <= {MAX_TIMELINE_YEARS}"),
                });
            }
        }

        if self.savings.savings_rate < Decimal::ZERO || self.savings.savings_rate > Decimal::ONE {
            return Err(AdvisorError::invalid(
                "savings.savings_rate",
                "must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Derived figures
    // -----------------------------------------------------------------------

    pub fn monthly_income(&self) -> Money {
        self.income.total_monthly_income.unwrap_or_else(|| {
            self.income.monthly_salary
                + self.income.other_income
                + self.income.annual_bonus / dec!(12)
        })
    }

    pub fn monthly_outgoings(&self) -> Money {
        self.expenses.monthly_expenses
    }

    pub fn monthly_savings(&self) -> Money {
        self.savings
            .current_monthly_savings
            .unwrap_or_else(|| (self.monthly_income() - self.monthly_outgoings()).max(Decimal::ZERO))
    }

    pub fn total_debt(&self) -> Money {
        self.debts.home_loan + self.debts.personal_loans + self.debts.credit_card_debt
    }

    pub fn total_assets(&self) -> Money {
        self.assets.total_portfolio_value
            + self.assets.emergency_fund
            + self.assets.real_estate
            + self.assets.other_assets
    }

    pub fn net_worth(&self) -> Money {
        self.total_assets() - self.total_debt()
    }

    /// Months of expenses the emergency fund covers.
    pub fn emergency_fund_months(&self) -> Limit {
        let expenses = self.monthly_outgoings();
        if expenses.is_zero() {
            return Limit::Infinite;
        }
        Limit::Finite(self.assets.emergency_fund / expenses)
    }

    /// Progress of the first goal found under any of `names`.
    pub fn goal_corpus(&self, names: &[&str]) -> Money {
        names
            .iter()
            .find_map(|n| self.goals.get(*n))
            .map(|g| g.current_progress)
            .unwrap_or(Decimal::ZERO)
    }
}
