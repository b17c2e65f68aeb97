use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fin_advisor_core::assumptions::Assumptions;
use fin_advisor_core::narrative::fallback_tax_narrative;
use fin_advisor_core::tax::{
    advance_tax_schedule, analyze_tax_profile, DeductionClaims, DeductionSection, TaxProfile,
};

use crate::input;

/// Arguments for a full tax review
#[derive(Args)]
pub struct TaxArgs {
    /// Path to a JSON tax profile (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross annual income
    #[arg(long)]
    pub gross_income: Option<Decimal>,

    /// Section claims as SECTION=AMOUNT (e.g. "80C=150000,24b=200000")
    #[arg(long = "deduction", value_delimiter = ',')]
    pub deductions: Vec<String>,

    /// The taxpayer is a senior citizen
    #[arg(long)]
    pub senior: bool,

    /// The taxpayer's parents are senior citizens
    #[arg(long)]
    pub parents_senior: bool,

    /// Tax deducted at source so far this year
    #[arg(long, default_value = "0")]
    pub tds: Decimal,

    /// Advance tax already paid this year
    #[arg(long, default_value = "0")]
    pub paid: Decimal,

    /// Date used for deadline reminders (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the advance-tax schedule
#[derive(Args)]
pub struct AdvanceTaxArgs {
    /// Estimated tax for the year
    #[arg(long)]
    pub annual_tax: Decimal,

    /// Tax deducted at source so far this year
    #[arg(long, default_value = "0")]
    pub tds: Decimal,

    /// Advance tax already paid this year
    #[arg(long, default_value = "0")]
    pub paid: Decimal,
}

fn parse_claim(raw: &str) -> Result<(DeductionSection, Decimal), Box<dyn std::error::Error>> {
    let (section, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("Deduction '{raw}' must look like SECTION=AMOUNT"))?;
    let section: DeductionSection = section.parse()?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("Invalid amount in deduction '{raw}': {e}"))?;
    Ok((section, amount))
}

pub fn run_tax(args: TaxArgs, assumptions: &Assumptions) -> Result<Value, Box<dyn std::error::Error>> {
    let profile: TaxProfile = if let Some(data) = input::read_input(args.input.as_deref())? {
        serde_json::from_value(data)?
    } else {
        let mut claims = DeductionClaims::new().seniors(args.senior, args.parents_senior);
        for raw in &args.deductions {
            let (section, amount) = parse_claim(raw)?;
            claims = claims.claim(section, amount);
        }
        TaxProfile {
            gross_income: args
                .gross_income
                .ok_or("--gross-income is required (or provide --input)")?,
            claims,
            tds_deducted: args.tds,
            advance_tax_paid: args.paid,
        }
    };

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let out = analyze_tax_profile(&profile, &assumptions.tax, today)?;
    let narrative = fallback_tax_narrative(&out.result.comparison);

    let mut value = serde_json::to_value(&out)?;
    if let Value::Object(map) = &mut value {
        map.insert("narrative".into(), Value::String(narrative));
    }
    Ok(value)
}

pub fn run_advance_tax(
    args: AdvanceTaxArgs,
    assumptions: &Assumptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = advance_tax_schedule(args.annual_tax, args.tds, args.paid, &assumptions.tax)?;
    Ok(serde_json::to_value(plan)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_claim() {
        let (section, amount) = parse_claim("80CCD(1B)=50000").unwrap();
        assert_eq!(section, DeductionSection::Sec80Ccd1B);
        assert_eq!(amount, dec!(50000));
        assert!(parse_claim("80C").is_err());
        assert!(parse_claim("80Z=100").is_err());
        assert!(parse_claim("80C=lots").is_err());
    }
}
