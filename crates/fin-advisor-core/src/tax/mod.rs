pub mod advance;
pub mod deductions;
pub mod query;
pub mod regime;

use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assumptions::TaxRules;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::AdvisorResult;

pub use advance::{advance_tax_schedule, urgent_tax_actions, AdvanceTaxPlan, TaxAction};
pub use deductions::{optimize_deductions, DeductionOptimization};
pub use query::{classify_tax_question, TaxQuestion, TaxQuestionType};
pub use regime::{
    calculate_tax, compare_regimes, DeductionClaims, DeductionSection, RegimeComparison,
    TaxCalculation, TaxRegime,
};

/// Everything needed for a full tax review of one taxpayer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub gross_income: Money,
    #[serde(flatten)]
    pub claims: DeductionClaims,
    #[serde(default)]
    pub tds_deducted: Money,
    #[serde(default)]
    pub advance_tax_paid: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxProfileAnalysis {
    pub comparison: RegimeComparison,
    pub optimization: DeductionOptimization,
    pub advance_tax: AdvanceTaxPlan,
    pub urgent_actions: Vec<TaxAction>,
}

/// Regime comparison, deduction headroom, advance-tax position and
/// reminders for `today`, in one envelope.
pub fn analyze_tax_profile(
    profile: &TaxProfile,
    rules: &TaxRules,
    today: NaiveDate,
) -> AdvisorResult<ComputationOutput<TaxProfileAnalysis>> {
    let start = Instant::now();
    let mut warnings = Vec::new();
    rules.validate()?;

    let comparison = compare_regimes(profile.gross_income, &profile.claims, rules)?;
    let optimization = optimize_deductions(profile.gross_income, &profile.claims, rules)?;
    let advance_tax = advance_tax_schedule(
        comparison.recommended_calculation().total_tax,
        profile.tds_deducted,
        profile.advance_tax_paid,
        rules,
    )?;
    let urgent_actions = urgent_tax_actions(today, rules);

    if comparison.recommended == TaxRegime::New && optimization.total_potential_saving > Decimal::ZERO {
        warnings.push(
            "Deduction headroom only lowers tax under the old regime, which is not recommended"
                .into(),
        );
    }
    for (section, claimed) in &profile.claims.deductions {
        let capped = profile.claims.capped(*section, rules);
        if *claimed > capped {
            warnings.push(format!(
                "Section {section} claim of {claimed} truncated to the limit of {capped}"
            ));
        }
    }

    let analysis = TaxProfileAnalysis {
        comparison,
        optimization,
        advance_tax,
        urgent_actions,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Indian income tax: old vs new regime slab computation plus health and education cess",
        rules,
        warnings,
        elapsed,
        analysis,
    ))
}
