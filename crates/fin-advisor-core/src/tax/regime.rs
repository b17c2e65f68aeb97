use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::TaxRules;
use crate::error::AdvisorError;
use crate::time_value::progressive_tax;
use crate::types::{Limit, Money};
use crate::AdvisorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxRegime {
    Old,
    New,
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRegime::Old => f.write_str("OLD"),
            TaxRegime::New => f.write_str("NEW"),
        }
    }
}

impl FromStr for TaxRegime {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(TaxRegime::Old),
            "new" => Ok(TaxRegime::New),
            other => Err(AdvisorError::invalid(
                "regime",
                format!("unknown regime '{other}', expected 'old' or 'new'"),
            )),
        }
    }
}

/// Statutory deduction sections recognised under the old regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeductionSection {
    #[serde(rename = "80C", alias = "80c")]
    Sec80C,
    #[serde(rename = "80D_self", alias = "80D", alias = "80d")]
    Sec80DSelf,
    #[serde(rename = "80D_parents")]
    Sec80DParents,
    #[serde(rename = "80CCD_1B", alias = "80CCD(1B)", alias = "80ccd1b")]
    Sec80Ccd1B,
    #[serde(rename = "24b", alias = "24(b)", alias = "24B")]
    Sec24B,
    #[serde(rename = "80E", alias = "80e")]
    Sec80E,
    #[serde(rename = "80TTA", alias = "80tta")]
    Sec80Tta,
    #[serde(rename = "80TTB", alias = "80ttb")]
    Sec80Ttb,
}

impl DeductionSection {
    pub const ALL: [DeductionSection; 8] = [
        DeductionSection::Sec80C,
        DeductionSection::Sec80DSelf,
        DeductionSection::Sec80DParents,
        DeductionSection::Sec80Ccd1B,
        DeductionSection::Sec24B,
        DeductionSection::Sec80E,
        DeductionSection::Sec80Tta,
        DeductionSection::Sec80Ttb,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DeductionSection::Sec80C => "80C",
            DeductionSection::Sec80DSelf => "80D_self",
            DeductionSection::Sec80DParents => "80D_parents",
            DeductionSection::Sec80Ccd1B => "80CCD_1B",
            DeductionSection::Sec24B => "24b",
            DeductionSection::Sec80E => "80E",
            DeductionSection::Sec80Tta => "80TTA",
            DeductionSection::Sec80Ttb => "80TTB",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DeductionSection::Sec80C => "PPF, ELSS, EPF, life insurance, principal repayment",
            DeductionSection::Sec80DSelf => "Health insurance for self and family",
            DeductionSection::Sec80DParents => "Health insurance for parents",
            DeductionSection::Sec80Ccd1B => "Additional NPS contribution",
            DeductionSection::Sec24B => "Home loan interest on a self-occupied property",
            DeductionSection::Sec80E => "Education loan interest",
            DeductionSection::Sec80Tta => "Savings account interest",
            DeductionSection::Sec80Ttb => "Deposit interest for senior citizens",
        }
    }
}

impl fmt::Display for DeductionSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DeductionSection {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let key = key.strip_prefix("section").unwrap_or(&key);
        match key {
            "80c" => Ok(DeductionSection::Sec80C),
            "80d" | "80dself" => Ok(DeductionSection::Sec80DSelf),
            "80dparents" => Ok(DeductionSection::Sec80DParents),
            "80ccd1b" => Ok(DeductionSection::Sec80Ccd1B),
            "24b" => Ok(DeductionSection::Sec24B),
            "80e" => Ok(DeductionSection::Sec80E),
            "80tta" => Ok(DeductionSection::Sec80Tta),
            "80ttb" => Ok(DeductionSection::Sec80Ttb),
            _ => Err(AdvisorError::invalid(
                "deduction_section",
                format!("unknown deduction section '{s}'"),
            )),
        }
    }
}

/// Amounts claimed per section, before capping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionClaims {
    pub deductions: BTreeMap<DeductionSection, Money>,
    pub self_senior: bool,
    pub parents_senior: bool,
}

impl DeductionClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(mut self, section: DeductionSection, amount: Money) -> Self {
        *self.deductions.entry(section).or_insert(Decimal::ZERO) += amount;
        self
    }

    pub fn seniors(mut self, self_senior: bool, parents_senior: bool) -> Self {
        self.self_senior = self_senior;
        self.parents_senior = parents_senior;
        self
    }

    pub fn claimed(&self, section: DeductionSection) -> Money {
        self.deductions.get(&section).copied().unwrap_or(Decimal::ZERO)
    }

    /// Statutory cap for `section` given the senior-citizen flags.
    /// 80TTA applies to non-seniors only and 80TTB to seniors only.
    pub fn limit(&self, section: DeductionSection, rules: &TaxRules) -> Limit {
        let l = &rules.limits;
        match section {
            DeductionSection::Sec80C => l.sec_80c.into(),
            DeductionSection::Sec80DSelf if self.self_senior => l.sec_80d_self_senior.into(),
            DeductionSection::Sec80DSelf => l.sec_80d_self.into(),
            DeductionSection::Sec80DParents if self.parents_senior => l.sec_80d_parents_senior.into(),
            DeductionSection::Sec80DParents => l.sec_80d_parents.into(),
            DeductionSection::Sec80Ccd1B => l.sec_80ccd_1b.into(),
            DeductionSection::Sec24B => l.sec_24b.into(),
            DeductionSection::Sec80E => l.sec_80e,
            DeductionSection::Sec80Tta if self.self_senior => Limit::ZERO,
            DeductionSection::Sec80Tta => l.sec_80tta.into(),
            DeductionSection::Sec80Ttb if self.self_senior => l.sec_80ttb.into(),
            DeductionSection::Sec80Ttb => Limit::ZERO,
        }
    }

    /// Claimed amount truncated to the section cap. Over-claims are not errors.
    pub fn capped(&self, section: DeductionSection, rules: &TaxRules) -> Money {
        let claimed = self.claimed(section).max(Decimal::ZERO);
        match self.limit(section, rules) {
            Limit::Finite(cap) => claimed.min(cap),
            Limit::Infinite => claimed,
        }
    }
}

/// One regime's liability for one taxpayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub regime: TaxRegime,
    pub gross_income: Money,
    pub standard_deduction: Money,
    /// Capped amount per section; empty under the new regime.
    pub deductions_used: BTreeMap<DeductionSection, Money>,
    /// Standard deduction plus all capped section deductions.
    pub total_deductions: Money,
    pub taxable_income: Money,
    /// Slab tax before cess.
    pub income_tax: Money,
    pub cess: Money,
    pub total_tax: Money,
    pub effective_rate_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old_regime: TaxCalculation,
    pub new_regime: TaxCalculation,
    pub recommended: TaxRegime,
    /// Absolute difference in total tax.
    pub savings: Money,
    /// New minus old; positive when the old regime is cheaper.
    pub savings_with_old: Money,
    /// Savings relative to the costlier regime, in percent.
    pub percentage_savings: Decimal,
}

impl RegimeComparison {
    pub fn recommended_calculation(&self) -> &TaxCalculation {
        match self.recommended {
            TaxRegime::Old => &self.old_regime,
            TaxRegime::New => &self.new_regime,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

pub fn calculate_tax(
    gross_income: Money,
    claims: &DeductionClaims,
    regime: TaxRegime,
    rules: &TaxRules,
) -> AdvisorResult<TaxCalculation> {
    if gross_income < Decimal::ZERO {
        return Err(AdvisorError::invalid("gross_income", "must be >= 0"));
    }
    if let Some((section, _)) = claims.deductions.iter().find(|(_, v)| **v < Decimal::ZERO) {
        return Err(AdvisorError::invalid(
            &format!("deductions.{section}"),
            "claimed amount must be >= 0",
        ));
    }

    let (standard, slabs) = match regime {
        TaxRegime::Old => (rules.old_standard_deduction, &rules.old_slabs),
        TaxRegime::New => (rules.new_standard_deduction, &rules.new_slabs),
    };
    let standard_deduction = standard.min(gross_income);

    let mut deductions_used = BTreeMap::new();
    if regime == TaxRegime::Old {
        for section in DeductionSection::ALL {
            let capped = claims.capped(section, rules);
            if !capped.is_zero() {
                deductions_used.insert(section, capped);
            }
        }
    }

    let total_deductions = standard_deduction + deductions_used.values().copied().sum::<Decimal>();
    let taxable_income = (gross_income - total_deductions).max(Decimal::ZERO);
    let income_tax = progressive_tax(taxable_income, slabs);
    let cess = income_tax * rules.cess_rate;
    let total_tax = income_tax + cess;

    let effective_rate_pct = if gross_income.is_zero() {
        Decimal::ZERO
    } else {
        total_tax / gross_income * dec!(100)
    };

    Ok(TaxCalculation {
        regime,
        gross_income,
        standard_deduction,
        deductions_used,
        total_deductions,
        taxable_income,
        income_tax,
        cess,
        total_tax,
        effective_rate_pct,
    })
}

/// Both regimes side by side. A tie in total tax recommends the new regime.
pub fn compare_regimes(
    gross_income: Money,
    claims: &DeductionClaims,
    rules: &TaxRules,
) -> AdvisorResult<RegimeComparison> {
    let old_regime = calculate_tax(gross_income, claims, TaxRegime::Old, rules)?;
    let new_regime = calculate_tax(gross_income, claims, TaxRegime::New, rules)?;

    let recommended = if old_regime.total_tax < new_regime.total_tax {
        TaxRegime::Old
    } else {
        TaxRegime::New
    };
    let savings_with_old = new_regime.total_tax - old_regime.total_tax;
    let savings = savings_with_old.abs();
    let costlier = old_regime.total_tax.max(new_regime.total_tax);
    let percentage_savings = if costlier.is_zero() {
        Decimal::ZERO
    } else {
        savings / costlier * dec!(100)
    };

    Ok(RegimeComparison {
        old_regime,
        new_regime,
        recommended,
        savings,
        savings_with_old,
        percentage_savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> TaxRules {
        TaxRules::default()
    }

    #[test]
    fn test_old_regime_caps_each_section() {
        let claims = DeductionClaims::new()
            .claim(DeductionSection::Sec80C, dec!(200000))
            .claim(DeductionSection::Sec80DSelf, dec!(40000))
            .claim(DeductionSection::Sec80E, dec!(90000));
        let calc = calculate_tax(dec!(1500000), &claims, TaxRegime::Old, &rules()).unwrap();
        assert_eq!(calc.deductions_used[&DeductionSection::Sec80C], dec!(150000));
        assert_eq!(calc.deductions_used[&DeductionSection::Sec80DSelf], dec!(25000));
        assert_eq!(calc.deductions_used[&DeductionSection::Sec80E], dec!(90000));
        assert_eq!(calc.total_deductions, dec!(315000));
        assert_eq!(calc.taxable_income, dec!(1185000));
    }

    #[test]
    fn test_senior_limits_and_interest_exclusivity() {
        let claims = DeductionClaims::new()
            .claim(DeductionSection::Sec80DParents, dec!(60000))
            .claim(DeductionSection::Sec80Tta, dec!(10000))
            .claim(DeductionSection::Sec80Ttb, dec!(40000))
            .seniors(false, true);
        assert_eq!(claims.capped(DeductionSection::Sec80DParents, &rules()), dec!(50000));
        assert_eq!(claims.capped(DeductionSection::Sec80Tta, &rules()), dec!(10000));
        assert_eq!(claims.capped(DeductionSection::Sec80Ttb, &rules()), Decimal::ZERO);

        let senior = claims.seniors(true, true);
        assert_eq!(senior.capped(DeductionSection::Sec80Tta, &rules()), Decimal::ZERO);
        assert_eq!(senior.capped(DeductionSection::Sec80Ttb, &rules()), dec!(40000));
    }

    #[test]
    fn test_new_regime_ignores_section_claims() {
        let claims = DeductionClaims::new().claim(DeductionSection::Sec80C, dec!(150000));
        let calc = calculate_tax(dec!(1200000), &claims, TaxRegime::New, &rules()).unwrap();
        assert!(calc.deductions_used.is_empty());
        assert_eq!(calc.taxable_income, dec!(1125000));
        assert_eq!(calc.income_tax, dec!(78750));
        assert_eq!(calc.total_tax, dec!(81900));
    }

    #[test]
    fn test_zero_income() {
        let calc = calculate_tax(Decimal::ZERO, &DeductionClaims::new(), TaxRegime::Old, &rules()).unwrap();
        assert_eq!(calc.total_tax, Decimal::ZERO);
        assert_eq!(calc.effective_rate_pct, Decimal::ZERO);
        assert_eq!(calc.standard_deduction, Decimal::ZERO);
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(calculate_tax(dec!(-1), &DeductionClaims::new(), TaxRegime::New, &rules()).is_err());
    }

    #[test]
    fn test_tie_goes_to_new() {
        // Old: 1.5M - 425k = 1,075,000 -> 112,500 + 22,500 = 135,000
        // New: 1.5M - 75k = 1,425,000 -> 90,000 + 45,000 = 135,000
        let claims = DeductionClaims::new()
            .claim(DeductionSection::Sec80C, dec!(150000))
            .claim(DeductionSection::Sec80DSelf, dec!(25000))
            .claim(DeductionSection::Sec24B, dec!(200000));
        let cmp = compare_regimes(dec!(1500000), &claims, &rules()).unwrap();
        assert_eq!(cmp.old_regime.income_tax, dec!(135000));
        assert_eq!(cmp.new_regime.income_tax, dec!(135000));
        assert_eq!(cmp.recommended, TaxRegime::New);
        assert_eq!(cmp.savings, Decimal::ZERO);
        assert_eq!(cmp.percentage_savings, Decimal::ZERO);
    }

    #[test]
    fn test_regime_from_str() {
        assert_eq!("OLD".parse::<TaxRegime>().unwrap(), TaxRegime::Old);
        assert_eq!(" new ".parse::<TaxRegime>().unwrap(), TaxRegime::New);
        assert!("flat".parse::<TaxRegime>().is_err());
    }

    #[test]
    fn test_section_from_str_aliases() {
        assert_eq!("80C".parse::<DeductionSection>().unwrap(), DeductionSection::Sec80C);
        assert_eq!("80CCD(1B)".parse::<DeductionSection>().unwrap(), DeductionSection::Sec80Ccd1B);
        assert_eq!("section 24(b)".parse::<DeductionSection>().unwrap(), DeductionSection::Sec24B);
        assert_eq!("80D_parents".parse::<DeductionSection>().unwrap(), DeductionSection::Sec80DParents);
    }

    #[test]
    fn test_claims_json_keys() {
        let claims: DeductionClaims =
            serde_json::from_str(r#"{"deductions": {"80C": 100000, "24b": 50000}, "self_senior": true}"#)
                .unwrap();
        assert_eq!(claims.claimed(DeductionSection::Sec80C), dec!(100000));
        assert_eq!(claims.claimed(DeductionSection::Sec24B), dec!(50000));
        assert!(claims.self_senior);
    }
}
