use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::TaxRules;
use crate::error::AdvisorError;
use crate::types::Money;
use crate::AdvisorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceTaxInstallment {
    /// e.g. "15 June"
    pub due_date: String,
    pub cumulative_pct: Decimal,
    /// Cumulative amount that should have been paid by the due date.
    pub cumulative_due: Money,
    /// What is still owed against `cumulative_due` after payments so far.
    pub outstanding: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceTaxPlan {
    pub annual_tax: Money,
    pub tds_deducted: Money,
    pub advance_tax_paid: Money,
    /// Annual tax net of TDS, floored at zero.
    pub net_liability: Money,
    /// Signed; negative means an expected refund.
    pub remaining_liability: Money,
    pub next_payment_due: Money,
    pub installments: Vec<AdvanceTaxInstallment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAction {
    pub action: String,
    pub deadline: String,
    pub priority: ActionPriority,
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("unknown month")
}

// ---------------------------------------------------------------------------
// Advance tax
// ---------------------------------------------------------------------------

pub fn advance_tax_schedule(
    annual_tax: Money,
    tds_deducted: Money,
    advance_tax_paid: Money,
    rules: &TaxRules,
) -> AdvisorResult<AdvanceTaxPlan> {
    for (field, value) in [
        ("annual_tax", annual_tax),
        ("tds_deducted", tds_deducted),
        ("advance_tax_paid", advance_tax_paid),
    ] {
        if value < Decimal::ZERO {
            return Err(AdvisorError::invalid(field, "must be >= 0"));
        }
    }

    let net_liability = (annual_tax - tds_deducted).max(Decimal::ZERO);
    let remaining_liability = annual_tax - tds_deducted - advance_tax_paid;

    let installments = rules
        .advance_tax_schedule
        .iter()
        .map(|c| {
            let cumulative_due = net_liability * c.cumulative_pct / dec!(100);
            AdvanceTaxInstallment {
                due_date: format!("{} {}", c.day, month_name(c.month)),
                cumulative_pct: c.cumulative_pct,
                cumulative_due,
                outstanding: (cumulative_due - advance_tax_paid).max(Decimal::ZERO),
            }
        })
        .collect();

    Ok(AdvanceTaxPlan {
        annual_tax,
        tds_deducted,
        advance_tax_paid,
        net_liability,
        remaining_liability,
        next_payment_due: remaining_liability.max(Decimal::ZERO),
        installments,
    })
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

/// Reminders relevant in the month of `today`.
pub fn urgent_tax_actions(today: NaiveDate, rules: &TaxRules) -> Vec<TaxAction> {
    let month = today.month();
    let year = today.year();
    let mut actions = Vec::new();

    if (1..=3).contains(&month) {
        actions.push(TaxAction {
            action: "Complete 80C investments for the current financial year".into(),
            deadline: format!("31 March {year}"),
            priority: ActionPriority::High,
        });
    }
    if (4..=7).contains(&month) {
        actions.push(TaxAction {
            action: format!(
                "File the income tax return for FY {}-{:02}",
                year - 1,
                year.rem_euclid(100)
            ),
            deadline: format!("31 July {year}"),
            priority: ActionPriority::High,
        });
    }
    if let Some(checkpoint) = rules.advance_tax_schedule.iter().find(|c| c.month == month) {
        actions.push(TaxAction {
            action: format!(
                "Pay the advance tax installment ({}% cumulative)",
                checkpoint.cumulative_pct
            ),
            deadline: format!("{} {} {year}", checkpoint.day, month_name(checkpoint.month)),
            priority: ActionPriority::Medium,
        });
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_cumulative_amounts() {
        let plan =
            advance_tax_schedule(dec!(120000), dec!(20000), dec!(10000), &TaxRules::default()).unwrap();
        assert_eq!(plan.net_liability, dec!(100000));
        assert_eq!(plan.remaining_liability, dec!(90000));
        assert_eq!(plan.next_payment_due, dec!(90000));

        let due: Vec<_> = plan.installments.iter().map(|i| i.cumulative_due).collect();
        assert_eq!(due, vec![dec!(15000), dec!(45000), dec!(75000), dec!(100000)]);
        assert_eq!(plan.installments[0].outstanding, dec!(5000));
        assert_eq!(plan.installments[0].due_date, "15 June");
        assert_eq!(plan.installments[3].due_date, "15 March");
    }

    #[test]
    fn test_overpaid_never_negative_due() {
        let plan =
            advance_tax_schedule(dec!(50000), dec!(40000), dec!(30000), &TaxRules::default()).unwrap();
        assert_eq!(plan.remaining_liability, dec!(-20000));
        assert_eq!(plan.next_payment_due, Decimal::ZERO);
        assert!(plan.installments.iter().all(|i| i.outstanding.is_zero()));
    }

    #[test]
    fn test_negative_input_rejected() {
        assert!(advance_tax_schedule(dec!(-1), dec!(0), dec!(0), &TaxRules::default()).is_err());
    }

    #[test]
    fn test_march_has_80c_and_advance_tax() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let actions = urgent_tax_actions(today, &TaxRules::default());
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].priority, ActionPriority::High);
        assert_eq!(actions[0].deadline, "31 March 2025");
        assert_eq!(actions[1].deadline, "15 March 2025");
        assert_eq!(actions[1].priority, ActionPriority::Medium);
    }

    #[test]
    fn test_june_has_itr_and_advance_tax() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let actions = urgent_tax_actions(today, &TaxRules::default());
        assert_eq!(actions.len(), 2);
        assert!(actions[0].action.contains("FY 2024-25"));
        assert_eq!(actions[1].deadline, "15 June 2025");
    }

    #[test]
    fn test_quiet_month() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert!(urgent_tax_actions(today, &TaxRules::default()).is_empty());
    }
}
