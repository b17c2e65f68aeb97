use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::{MarginalRateMethod, TaxRules};
use crate::tax::regime::{calculate_tax, DeductionClaims, DeductionSection, TaxRegime};
use crate::time_value::marginal_rate;
use crate::types::{Money, Rate};
use crate::AdvisorResult;

/// Sections worth actively topping up; the rest depend on loans or interest
/// the taxpayer cannot simply buy more of.
const OPTIMIZABLE: [DeductionSection; 4] = [
    DeductionSection::Sec80C,
    DeductionSection::Sec80Ccd1B,
    DeductionSection::Sec80DSelf,
    DeductionSection::Sec80DParents,
];

const ELSS_SUGGESTION_CAP: Money = dec!(100000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSuggestion {
    pub instrument: String,
    pub amount: Money,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOpportunity {
    pub section: DeductionSection,
    pub description: String,
    pub claimed: Money,
    pub limit: Money,
    pub headroom: Money,
    pub marginal_rate: Rate,
    pub tax_saving: Money,
    pub suggestions: Vec<InstrumentSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionOptimization {
    pub method: MarginalRateMethod,
    pub marginal_rate: Rate,
    pub opportunities: Vec<SectionOpportunity>,
    pub total_potential_saving: Money,
}

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

/// Rate at which one more rupee of deduction reduces tax.
pub fn deduction_marginal_rate(
    gross_income: Money,
    claims: &DeductionClaims,
    rules: &TaxRules,
) -> AdvisorResult<Rate> {
    match &rules.marginal_rate_method {
        MarginalRateMethod::Heuristic {
            threshold,
            high_rate,
            low_rate,
        } => Ok(if gross_income > *threshold { *high_rate } else { *low_rate }),
        MarginalRateMethod::SlabTable => {
            let old = calculate_tax(gross_income, claims, TaxRegime::Old, rules)?;
            Ok(marginal_rate(old.taxable_income, &rules.old_slabs))
        }
    }
}

fn suggestions_for(section: DeductionSection, headroom: Money) -> Vec<InstrumentSuggestion> {
    match section {
        DeductionSection::Sec80C => vec![
            InstrumentSuggestion {
                instrument: "PPF".into(),
                amount: headroom,
                note: "Government-backed, tax-free interest, 15-year lock-in".into(),
            },
            InstrumentSuggestion {
                instrument: "ELSS".into(),
                amount: headroom.min(ELSS_SUGGESTION_CAP),
                note: "Equity exposure with the shortest 80C lock-in of 3 years".into(),
            },
            InstrumentSuggestion {
                instrument: "Life insurance premium".into(),
                amount: headroom,
                note: "Term cover premiums also count towards 80C".into(),
            },
        ],
        DeductionSection::Sec80Ccd1B => vec![InstrumentSuggestion {
            instrument: "NPS Tier I".into(),
            amount: headroom,
            note: "Over and above the 80C limit".into(),
        }],
        DeductionSection::Sec80DSelf => vec![InstrumentSuggestion {
            instrument: "Family floater health insurance".into(),
            amount: headroom,
            note: "Covers self, spouse and children".into(),
        }],
        DeductionSection::Sec80DParents => vec![InstrumentSuggestion {
            instrument: "Parents' health insurance".into(),
            amount: headroom,
            note: "Higher limit when parents are senior citizens".into(),
        }],
        _ => Vec::new(),
    }
}

/// Unused headroom per section, priced at the configured marginal rate.
pub fn optimize_deductions(
    gross_income: Money,
    claims: &DeductionClaims,
    rules: &TaxRules,
) -> AdvisorResult<DeductionOptimization> {
    let rate = deduction_marginal_rate(gross_income, claims, rules)?;

    let mut opportunities = Vec::new();
    for section in OPTIMIZABLE {
        // Every optimizable section has a finite cap.
        let Some(limit) = claims.limit(section, rules).finite() else {
            continue;
        };
        let claimed = claims.capped(section, rules);
        let headroom = limit - claimed;
        if headroom <= Decimal::ZERO {
            continue;
        }
        opportunities.push(SectionOpportunity {
            section,
            description: section.description().into(),
            claimed,
            limit,
            headroom,
            marginal_rate: rate,
            tax_saving: headroom * rate,
            suggestions: suggestions_for(section, headroom),
        });
    }

    let total_potential_saving = opportunities.iter().map(|o| o.tax_saving).sum();

    Ok(DeductionOptimization {
        method: rules.marginal_rate_method.clone(),
        marginal_rate: rate,
        opportunities,
        total_potential_saving,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_rate_by_gross() {
        let rules = TaxRules::default();
        let claims = DeductionClaims::new();
        assert_eq!(deduction_marginal_rate(dec!(1000000), &claims, &rules).unwrap(), dec!(0.20));
        assert_eq!(deduction_marginal_rate(dec!(1000001), &claims, &rules).unwrap(), dec!(0.30));
    }

    #[test]
    fn test_slab_table_rate() {
        let rules = TaxRules {
            marginal_rate_method: MarginalRateMethod::SlabTable,
            ..TaxRules::default()
        };
        // Taxable 1,150,000 falls in the 30% old slab, 550,000 in the 20% slab.
        let claims = DeductionClaims::new();
        assert_eq!(deduction_marginal_rate(dec!(1200000), &claims, &rules).unwrap(), dec!(0.30));
        assert_eq!(deduction_marginal_rate(dec!(600000), &claims, &rules).unwrap(), dec!(0.20));
    }

    #[test]
    fn test_headroom_and_saving() {
        let claims = DeductionClaims::new()
            .claim(DeductionSection::Sec80C, dec!(100000))
            .claim(DeductionSection::Sec80DSelf, dec!(25000));
        let opt = optimize_deductions(dec!(1500000), &claims, &TaxRules::default()).unwrap();

        let sections: Vec<_> = opt.opportunities.iter().map(|o| o.section).collect();
        assert_eq!(
            sections,
            vec![
                DeductionSection::Sec80C,
                DeductionSection::Sec80Ccd1B,
                DeductionSection::Sec80DParents
            ]
        );
        let c = &opt.opportunities[0];
        assert_eq!(c.headroom, dec!(50000));
        assert_eq!(c.tax_saving, dec!(15000));
        assert_eq!(c.suggestions[0].amount, dec!(50000));
        // 50,000 + 50,000 + 25,000 headroom at 30%
        assert_eq!(opt.total_potential_saving, dec!(37500));
    }

    #[test]
    fn test_fully_utilized_has_no_opportunities() {
        let claims = DeductionClaims::new()
            .claim(DeductionSection::Sec80C, dec!(200000))
            .claim(DeductionSection::Sec80Ccd1B, dec!(50000))
            .claim(DeductionSection::Sec80DSelf, dec!(25000))
            .claim(DeductionSection::Sec80DParents, dec!(25000));
        let opt = optimize_deductions(dec!(800000), &claims, &TaxRules::default()).unwrap();
        assert!(opt.opportunities.is_empty());
        assert_eq!(opt.total_potential_saving, Decimal::ZERO);
    }
}
