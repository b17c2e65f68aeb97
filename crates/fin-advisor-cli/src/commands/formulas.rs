use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fin_advisor_core::assumptions::Assumptions;
use fin_advisor_core::time_value::{
    future_value_of_sip, inflation_adjusted_cost, loan_emi, sip_required_for_target,
    years_to_reach_target,
};
use fin_advisor_core::types::{Limit, Money, Rate, MAX_AMOUNT, MAX_TIMELINE_YEARS};

/// Arguments for SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Monthly contribution
    #[arg(long)]
    pub monthly: Decimal,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Decimal,

    /// Expected annual return as a fraction (defaults to the equity return assumption)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,
}

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a fraction (defaults to the home-loan rate)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years (defaults to the home-loan tenure)
    #[arg(long)]
    pub years: Option<Decimal>,
}

/// Arguments for the SIP needed to reach a target
#[derive(Args)]
pub struct SipTargetArgs {
    /// Target corpus
    #[arg(long)]
    pub target: Decimal,

    /// Years available
    #[arg(long)]
    pub years: Decimal,

    /// Expected annual return as a fraction (defaults to the equity return assumption)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,
}

/// Arguments for the time needed to reach a target
#[derive(Args)]
pub struct YearsToTargetArgs {
    /// Target corpus
    #[arg(long)]
    pub target: Decimal,

    /// Monthly contribution
    #[arg(long)]
    pub monthly: Decimal,

    /// Expected annual return as a fraction (defaults to the equity return assumption)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,
}

/// Arguments for inflating a present-day cost
#[derive(Args)]
pub struct InflateArgs {
    /// Cost in today's rupees
    #[arg(long)]
    pub cost: Decimal,

    /// Years until the expense
    #[arg(long)]
    pub years: Decimal,

    /// Annual inflation as a fraction (defaults to the general inflation assumption)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SipOutput {
    future_value: Money,
    total_invested: Money,
    gains: Money,
    annual_rate: Rate,
}

#[derive(Debug, Serialize, Deserialize)]
struct EmiOutput {
    emi: Limit,
    total_payment: Limit,
    total_interest: Limit,
    annual_rate: Rate,
    tenure_years: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
struct SipTargetOutput {
    monthly_sip: Limit,
    target: Money,
    annual_rate: Rate,
}

#[derive(Debug, Serialize, Deserialize)]
struct YearsToTargetOutput {
    years: Limit,
    target: Money,
    monthly_sip: Money,
    annual_rate: Rate,
}

#[derive(Debug, Serialize, Deserialize)]
struct InflateOutput {
    future_cost: Money,
    current_cost: Money,
    annual_rate: Rate,
}

fn amount_in_range(flag: &str, value: Decimal) -> Result<(), Box<dyn std::error::Error>> {
    if value < Decimal::ZERO {
        return Err(format!("--{flag} must be >= 0").into());
    }
    if value > MAX_AMOUNT {
        return Err(format!("--{flag} must be <= {MAX_AMOUNT}").into());
    }
    Ok(())
}

fn years_in_range(value: Decimal) -> Result<(), Box<dyn std::error::Error>> {
    if value > MAX_TIMELINE_YEARS {
        return Err(format!("--years must be <= {MAX_TIMELINE_YEARS}").into());
    }
    Ok(())
}

pub fn run_sip(args: SipArgs, assumptions: &Assumptions) -> Result<Value, Box<dyn std::error::Error>> {
    amount_in_range("monthly", args.monthly)?;
    years_in_range(args.years)?;
    let annual_rate = args.rate.unwrap_or(assumptions.equity_return);
    let p = future_value_of_sip(args.monthly, args.years, annual_rate);
    Ok(serde_json::to_value(SipOutput {
        gains: p.future_value - p.total_invested,
        future_value: p.future_value,
        total_invested: p.total_invested,
        annual_rate,
    })?)
}

pub fn run_emi(args: EmiArgs, assumptions: &Assumptions) -> Result<Value, Box<dyn std::error::Error>> {
    amount_in_range("principal", args.principal)?;
    let annual_rate = args.rate.unwrap_or(assumptions.home_loan_rate);
    let tenure_years = args.years.unwrap_or(assumptions.home_loan_tenure_years);
    years_in_range(tenure_years)?;
    let emi = loan_emi(args.principal, annual_rate, tenure_years);
    let total_payment = emi.map(|e| e.saturating_mul(tenure_years * Decimal::from(12)));
    Ok(serde_json::to_value(EmiOutput {
        emi,
        total_payment,
        total_interest: total_payment.map(|t| t - args.principal),
        annual_rate,
        tenure_years,
    })?)
}

pub fn run_sip_target(
    args: SipTargetArgs,
    assumptions: &Assumptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    amount_in_range("target", args.target)?;
    years_in_range(args.years)?;
    let annual_rate = args.rate.unwrap_or(assumptions.equity_return);
    Ok(serde_json::to_value(SipTargetOutput {
        monthly_sip: sip_required_for_target(args.target, args.years, annual_rate),
        target: args.target,
        annual_rate,
    })?)
}

pub fn run_years_to_target(
    args: YearsToTargetArgs,
    assumptions: &Assumptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    amount_in_range("target", args.target)?;
    amount_in_range("monthly", args.monthly.max(Decimal::ZERO))?;
    let annual_rate = args.rate.unwrap_or(assumptions.equity_return);
    Ok(serde_json::to_value(YearsToTargetOutput {
        years: years_to_reach_target(args.target, args.monthly, annual_rate),
        target: args.target,
        monthly_sip: args.monthly,
        annual_rate,
    })?)
}

pub fn run_inflate(args: InflateArgs, assumptions: &Assumptions) -> Result<Value, Box<dyn std::error::Error>> {
    amount_in_range("cost", args.cost)?;
    years_in_range(args.years)?;
    let annual_rate = args.rate.unwrap_or(assumptions.inflation_rate);
    Ok(serde_json::to_value(InflateOutput {
        future_cost: inflation_adjusted_cost(args.cost, args.years, annual_rate),
        current_cost: args.cost,
        annual_rate,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_totals() {
        let args = EmiArgs {
            principal: dec!(120000),
            rate: Some(Decimal::ZERO),
            years: Some(dec!(1)),
        };
        let v = run_emi(args, &Assumptions::default()).unwrap();
        assert_eq!(v["emi"], "10000");
        assert_eq!(v["total_interest"], "0");
    }

    #[test]
    fn test_unreachable_target_serializes_as_infinity() {
        let args = YearsToTargetArgs {
            target: dec!(100000),
            monthly: Decimal::ZERO,
            rate: None,
        };
        let v = run_years_to_target(args, &Assumptions::default()).unwrap();
        assert_eq!(v["years"], "Infinity");
    }

    #[test]
    fn test_out_of_range_inputs_rejected() {
        let args = SipArgs {
            monthly: dec!(100000000000000),
            years: dec!(1000000000000000),
            rate: None,
        };
        assert!(run_sip(args, &Assumptions::default()).is_err());

        let args = EmiArgs {
            principal: MAX_AMOUNT + Decimal::ONE,
            rate: None,
            years: None,
        };
        assert!(run_emi(args, &Assumptions::default()).is_err());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let args = InflateArgs {
            cost: dec!(-1),
            years: dec!(5),
            rate: None,
        };
        assert!(run_inflate(args, &Assumptions::default()).is_err());
    }
}
