use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Limit, Money, Rate, Years};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const TAYLOR_EXP_TERMS: u32 = 60;
const LN_NEWTON_ITERATIONS: u32 = 40;
const SERIES_EPSILON: Decimal = dec!(0.0000000000000000000001);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Result of compounding a monthly SIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipProjection {
    pub future_value: Money,
    pub total_invested: Money,
}

impl SipProjection {
    pub fn gains(&self) -> Money {
        self.future_value - self.total_invested
    }
}

/// One bracket of a progressive tax table. The lower bound is the previous
/// slab's upper bound (zero for the first slab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub upper_bound: Limit,
    pub rate: Rate,
}

impl TaxSlab {
    pub const fn new(upper_bound: Decimal, rate: Rate) -> Self {
        TaxSlab {
            upper_bound: Limit::Finite(upper_bound),
            rate,
        }
    }

    pub const fn top(rate: Rate) -> Self {
        TaxSlab {
            upper_bound: Limit::Infinite,
            rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Decimal math helpers (no f64, no powd)
// ---------------------------------------------------------------------------

/// Compute base^n for a non-negative integer exponent by repeated squaring.
/// `None` on overflow.
fn iterative_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = n;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

/// Taylor series for exp(x) where x >= 0.
fn decimal_exp_positive(x: Decimal) -> Option<Decimal> {
    // exp(x) = exp(x/2)^2 keeps the series argument small
    if x > dec!(2) {
        let half = decimal_exp_positive(x / dec!(2))?;
        return half.checked_mul(half);
    }

    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for k in 1..=TAYLOR_EXP_TERMS {
        term = term.checked_mul(x)? / Decimal::from(k);
        sum = sum.checked_add(term)?;
        if term < SERIES_EPSILON {
            break;
        }
    }
    Some(sum)
}

fn decimal_exp(x: Decimal) -> Option<Decimal> {
    if x.is_zero() {
        return Some(Decimal::ONE);
    }
    if x < Decimal::ZERO {
        let pos = decimal_exp_positive(-x)?;
        return Some(Decimal::ONE / pos);
    }
    decimal_exp_positive(x)
}

/// Natural logarithm via Newton's method on exp(y) = x. `None` for x <= 0.
fn decimal_ln(x: Decimal) -> Option<Decimal> {
    if x <= Decimal::ZERO {
        return None;
    }
    if x == Decimal::ONE {
        return Some(Decimal::ZERO);
    }

    // Range-reduce by powers of e so Newton starts close to the root.
    let e_approx = dec!(2.718281828459045235360287471);
    let mut guess = Decimal::ZERO;
    let mut temp = x;
    while temp > e_approx {
        temp /= e_approx;
        guess += Decimal::ONE;
    }
    while temp < Decimal::ONE / e_approx {
        temp *= e_approx;
        guess -= Decimal::ONE;
    }
    guess += temp - Decimal::ONE;

    for _ in 0..LN_NEWTON_ITERATIONS {
        let exp_guess = decimal_exp(guess)?;
        if exp_guess.is_zero() {
            return None;
        }
        let delta = (exp_guess - x) / exp_guess;
        guess -= delta;
        if delta.abs() < SERIES_EPSILON {
            break;
        }
    }
    Some(guess)
}

/// (1 + rate)^periods for non-negative, possibly fractional, periods.
/// Integer part by multiplication, fractional part by exp(f * ln(base)).
/// `None` when the base is not positive or the result overflows.
fn growth_factor(rate: Rate, periods: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    if periods.is_zero() {
        return Some(Decimal::ONE);
    }
    if periods < Decimal::ZERO || base <= Decimal::ZERO {
        return None;
    }

    let whole = periods.trunc();
    let frac = periods - whole;
    let mut factor = iterative_pow(base, whole.to_u32()?)?;
    if !frac.is_zero() {
        let partial = decimal_exp(frac * decimal_ln(base)?)?;
        factor = factor.checked_mul(partial)?;
    }
    Some(factor)
}

fn months_in(years: Years) -> Decimal {
    years.saturating_mul(MONTHS_PER_YEAR)
}

// ---------------------------------------------------------------------------
// Forward projections
// ---------------------------------------------------------------------------

/// Value of a lump sum compounded annually for `years`.
/// Non-positive horizons leave the amount unchanged; overflow saturates.
pub fn compound_lump_sum(amount: Money, years: Years, annual_rate: Rate) -> Money {
    if years <= Decimal::ZERO {
        return amount;
    }
    growth_factor(annual_rate, years)
        .and_then(|g| amount.checked_mul(g))
        .unwrap_or(Decimal::MAX)
}

/// Future cost of something that costs `current_cost` today.
pub fn inflation_adjusted_cost(current_cost: Money, years: Years, inflation_rate: Rate) -> Money {
    compound_lump_sum(current_cost, years, inflation_rate)
}

/// Future value of a monthly SIP as an ordinary annuity compounded at
/// `annual_rate / 12` for `years * 12` months.
pub fn future_value_of_sip(monthly_amount: Money, years: Years, annual_rate: Rate) -> SipProjection {
    let months = months_in(years);
    if months <= Decimal::ZERO {
        return SipProjection {
            future_value: Decimal::ZERO,
            total_invested: Decimal::ZERO,
        };
    }

    let total_invested = monthly_amount.saturating_mul(months);
    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return SipProjection {
            future_value: total_invested,
            total_invested,
        };
    }

    let future_value = growth_factor(monthly_rate, months)
        .and_then(|g| (g - Decimal::ONE).checked_div(monthly_rate))
        .and_then(|annuity| monthly_amount.checked_mul(annuity))
        .unwrap_or(Decimal::MAX);

    SipProjection {
        future_value,
        total_invested,
    }
}

/// Equated monthly installment `P·r·(1+r)^n / ((1+r)^n − 1)`.
///
/// Infinite when the loan has no valid schedule (zero or negative tenure,
/// or a degenerate annuity denominator).
pub fn loan_emi(principal: Money, annual_rate: Rate, years: Years) -> Limit {
    let months = months_in(years);
    if months <= Decimal::ZERO {
        return Limit::Infinite;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return Limit::Finite(principal / months);
    }

    match growth_factor(monthly_rate, months) {
        Some(g) => {
            let denominator = g - Decimal::ONE;
            if denominator.is_zero() {
                return Limit::Infinite;
            }
            principal
                .checked_mul(monthly_rate)
                .and_then(|v| v.checked_mul(g))
                .and_then(|v| v.checked_div(denominator))
                .into()
        }
        // (1+r)^n / ((1+r)^n - 1) -> 1 as n grows: interest-only payment
        None if monthly_rate > Decimal::ZERO => principal.checked_mul(monthly_rate).into(),
        None => Limit::Infinite,
    }
}

// ---------------------------------------------------------------------------
// Inverse projections
// ---------------------------------------------------------------------------

/// Monthly SIP needed to accumulate `target` in `years` at `annual_rate`.
pub fn sip_required_for_target(target: Money, years: Years, annual_rate: Rate) -> Limit {
    let months = months_in(years);
    if months <= Decimal::ZERO {
        return Limit::Infinite;
    }
    if target <= Decimal::ZERO {
        return Limit::ZERO;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return Limit::Finite(target / months);
    }

    match growth_factor(monthly_rate, months) {
        Some(g) => {
            let denominator = g - Decimal::ONE;
            if denominator <= Decimal::ZERO {
                return Limit::Infinite;
            }
            target
                .checked_mul(monthly_rate)
                .and_then(|v| v.checked_div(denominator))
                .into()
        }
        // Horizon so long that any positive contribution suffices.
        None if monthly_rate > Decimal::ZERO => Limit::ZERO,
        None => Limit::Infinite,
    }
}

/// Years of monthly SIP needed to reach `target`, solved with a logarithm.
///
/// Covers the whole input domain: any input for which the target can never be
/// reached (non-positive SIP, non-positive log argument, invalid base)
/// yields `Limit::Infinite`.
pub fn years_to_reach_target(target: Money, monthly_sip: Money, annual_rate: Rate) -> Limit {
    if monthly_sip <= Decimal::ZERO {
        return Limit::Infinite;
    }
    if target <= Decimal::ZERO {
        return Limit::ZERO;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return monthly_sip
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|annual| target.checked_div(annual))
            .into();
    }

    let argument = match target
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_div(monthly_sip))
        .and_then(|v| v.checked_add(Decimal::ONE))
    {
        Some(a) => a,
        None => return Limit::Infinite,
    };
    if argument <= Decimal::ZERO {
        return Limit::Infinite;
    }

    let (Some(ln_arg), Some(ln_base)) = (decimal_ln(argument), decimal_ln(Decimal::ONE + monthly_rate))
    else {
        return Limit::Infinite;
    };
    if ln_base.is_zero() {
        return Limit::Infinite;
    }

    let months = ln_arg / ln_base;
    if months < Decimal::ZERO {
        return Limit::Infinite;
    }
    Limit::Finite(months / MONTHS_PER_YEAR)
}

// ---------------------------------------------------------------------------
// Progressive tax
// ---------------------------------------------------------------------------

/// Slab-based progressive tax. Each slab taxes the income between the
/// previous slab's upper bound and its own at its marginal rate.
pub fn progressive_tax(taxable_income: Money, slabs: &[TaxSlab]) -> Money {
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income.max(Decimal::ZERO);
    let mut lower = Decimal::ZERO;

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }
        let in_slab = match slab.upper_bound {
            Limit::Finite(upper) => remaining.min((upper - lower).max(Decimal::ZERO)),
            Limit::Infinite => remaining,
        };
        tax += in_slab * slab.rate;
        remaining -= in_slab;
        if let Limit::Finite(upper) = slab.upper_bound {
            lower = upper;
        }
    }

    tax
}

/// Marginal rate of the slab that the last rupee of `taxable_income` falls in.
pub fn marginal_rate(taxable_income: Money, slabs: &[TaxSlab]) -> Rate {
    slabs
        .iter()
        .find(|s| Limit::Finite(taxable_income) <= s.upper_bound)
        .or(slabs.last())
        .map(|s| s.rate)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_ln_exp_roundtrip() {
        let x = dec!(1234.5);
        let y = decimal_exp(decimal_ln(x).unwrap()).unwrap();
        assert!(close(x, y, dec!(0.0000001)), "got {y}");
        assert!(decimal_ln(Decimal::ZERO).is_none());
    }

    #[test]
    fn test_growth_factor_integer_is_exact() {
        assert_eq!(growth_factor(dec!(0.05), dec!(3)).unwrap(), dec!(1.157625));
    }

    #[test]
    fn test_growth_factor_fractional() {
        // 1.21^0.5 = 1.1
        let g = growth_factor(dec!(0.21), dec!(0.5)).unwrap();
        assert!(close(g, dec!(1.1), dec!(0.0000001)), "got {g}");
    }

    #[test]
    fn test_sip_zero_rate_is_simple_multiplication() {
        let p = future_value_of_sip(dec!(1000), dec!(2), Decimal::ZERO);
        assert_eq!(p.future_value, dec!(24000));
        assert_eq!(p.total_invested, dec!(24000));
    }

    #[test]
    fn test_sip_one_year_at_twelve_percent() {
        // 1000 * ((1.01^12 - 1) / 0.01) = 12682.50
        let p = future_value_of_sip(dec!(1000), dec!(1), dec!(0.12));
        assert!(close(p.future_value, dec!(12682.50), dec!(0.01)), "got {}", p.future_value);
        assert_eq!(p.total_invested, dec!(12000));
    }

    #[test]
    fn test_emi_zero_rate_and_zero_tenure() {
        assert_eq!(loan_emi(dec!(120000), Decimal::ZERO, dec!(1)), Limit::Finite(dec!(10000)));
        assert_eq!(loan_emi(dec!(120000), dec!(0.10), Decimal::ZERO), Limit::Infinite);
    }

    #[test]
    fn test_emi_textbook() {
        // 10 lakh, 10%, 5 years -> ~21,247
        let emi = loan_emi(dec!(1_000_000), dec!(0.10), dec!(5)).finite().unwrap();
        assert!(close(emi, dec!(21247.04), dec!(0.1)), "got {emi}");
    }

    #[test]
    fn test_years_to_target_zero_rate() {
        assert_eq!(
            years_to_reach_target(dec!(120000), dec!(5000), Decimal::ZERO),
            Limit::Finite(dec!(2))
        );
    }

    #[test]
    fn test_years_to_target_unreachable() {
        assert_eq!(years_to_reach_target(dec!(1000), Decimal::ZERO, dec!(0.12)), Limit::Infinite);
        assert_eq!(years_to_reach_target(dec!(1000), dec!(-5), dec!(0.12)), Limit::Infinite);
        // Negative return large enough that the log argument goes negative
        assert_eq!(
            years_to_reach_target(dec!(1_000_000), dec!(100), dec!(-0.12)),
            Limit::Infinite
        );
    }

    #[test]
    fn test_years_to_target_inverts_sip() {
        let fv = future_value_of_sip(dec!(10000), dec!(7), dec!(0.12)).future_value;
        let years = years_to_reach_target(fv, dec!(10000), dec!(0.12)).finite().unwrap();
        assert!(close(years, dec!(7), dec!(0.000001)), "got {years}");
    }

    #[test]
    fn test_progressive_tax_old_slabs() {
        let slabs = [
            TaxSlab::new(dec!(250000), dec!(0)),
            TaxSlab::new(dec!(500000), dec!(0.05)),
            TaxSlab::new(dec!(1000000), dec!(0.20)),
            TaxSlab::top(dec!(0.30)),
        ];
        assert_eq!(progressive_tax(dec!(900000), &slabs), dec!(92500));
        assert_eq!(progressive_tax(dec!(1500000), &slabs), dec!(262500));
        assert_eq!(progressive_tax(Decimal::ZERO, &slabs), Decimal::ZERO);
        assert_eq!(marginal_rate(dec!(900000), &slabs), dec!(0.20));
        assert_eq!(marginal_rate(dec!(5000000), &slabs), dec!(0.30));
    }
}
