use fin_advisor_core::assumptions::TaxRules;
use fin_advisor_core::time_value::{
    compound_lump_sum, future_value_of_sip, inflation_adjusted_cost, loan_emi, marginal_rate,
    progressive_tax, sip_required_for_target, years_to_reach_target,
};
use fin_advisor_core::Limit;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} +/- {tol}, got {actual}"
    );
}

// ===========================================================================
// Lump sums
// ===========================================================================

#[test]
fn test_lump_sum_whole_years_is_exact() {
    assert_eq!(compound_lump_sum(dec!(100000), dec!(2), dec!(0.10)), dec!(121000));
    assert_eq!(inflation_adjusted_cost(dec!(5000000), dec!(3), dec!(0.05)), dec!(5788125));
}

#[test]
fn test_lump_sum_non_positive_horizon_is_identity() {
    assert_eq!(compound_lump_sum(dec!(42000), Decimal::ZERO, dec!(0.12)), dec!(42000));
    assert_eq!(compound_lump_sum(dec!(42000), dec!(-3), dec!(0.12)), dec!(42000));
}

#[test]
fn test_lump_sum_fractional_years_between_neighbours() {
    let half = compound_lump_sum(dec!(100000), dec!(1.5), dec!(0.10));
    assert!(half > dec!(110000) && half < dec!(121000), "got {half}");
}

// ===========================================================================
// SIP
// ===========================================================================

#[test]
fn test_sip_zero_rate_is_plain_sum() {
    let p = future_value_of_sip(dec!(1000), dec!(2), Decimal::ZERO);
    assert_eq!(p.future_value, dec!(24000));
    assert_eq!(p.total_invested, dec!(24000));
}

#[test]
fn test_sip_growth_beats_contributions() {
    let p = future_value_of_sip(dec!(10000), dec!(10), dec!(0.12));
    assert_eq!(p.total_invested, dec!(1200000));
    // Standard annuity table value for 1% a month over 120 months
    assert_close(p.future_value, dec!(2300386.89), dec!(1));
}

#[test]
fn test_sip_target_round_trip() {
    let target = dec!(2500000);
    let sip = sip_required_for_target(target, dec!(7), dec!(0.12))
        .finite()
        .expect("finite sip");
    let projected = future_value_of_sip(sip, dec!(7), dec!(0.12));
    assert_close(projected.future_value, target, dec!(1));
}

#[test]
fn test_years_to_target_inverts_sip() {
    let fv = future_value_of_sip(dec!(10000), dec!(10), dec!(0.12)).future_value;
    let years = years_to_reach_target(fv, dec!(10000), dec!(0.12))
        .finite()
        .expect("finite years");
    assert_close(years, dec!(10), dec!(0.01));
}

// ===========================================================================
// Unreachable targets
// ===========================================================================

#[test]
fn test_zero_horizon_targets_are_unreachable() {
    assert_eq!(sip_required_for_target(dec!(100000), Decimal::ZERO, dec!(0.12)), Limit::Infinite);
    assert_eq!(loan_emi(dec!(100000), dec!(0.10), Decimal::ZERO), Limit::Infinite);
}

#[test]
fn test_no_contribution_never_reaches_target() {
    assert_eq!(years_to_reach_target(dec!(100000), Decimal::ZERO, dec!(0.12)), Limit::Infinite);
    assert_eq!(years_to_reach_target(dec!(100000), dec!(-50), dec!(0.12)), Limit::Infinite);
}

#[test]
fn test_shrinking_returns_can_make_target_unreachable() {
    // 1,000,000 x -0.01 / 1,000 + 1 = -9, no logarithm exists
    assert_eq!(
        years_to_reach_target(dec!(1000000), dec!(1000), dec!(-0.12)),
        Limit::Infinite
    );
}

#[test]
fn test_already_met_targets() {
    assert_eq!(sip_required_for_target(Decimal::ZERO, dec!(5), dec!(0.12)), Limit::ZERO);
    assert_eq!(years_to_reach_target(Decimal::ZERO, dec!(1000), dec!(0.12)), Limit::ZERO);
}

#[test]
fn test_zero_rate_inverses() {
    assert_eq!(
        years_to_reach_target(dec!(120000), dec!(10000), Decimal::ZERO),
        Limit::Finite(dec!(1))
    );
    assert_eq!(loan_emi(dec!(120000), Decimal::ZERO, dec!(1)), Limit::Finite(dec!(10000)));
}

#[test]
fn test_oversized_inputs_saturate() {
    let p = future_value_of_sip(dec!(100000000000000), dec!(1000000000000000), dec!(0.12));
    assert_eq!(p.total_invested, Decimal::MAX);
    assert_eq!(p.future_value, Decimal::MAX);
    assert_eq!(
        compound_lump_sum(dec!(1000000000000000), dec!(1000000000000000), dec!(0.12)),
        Decimal::MAX
    );
    assert_eq!(
        years_to_reach_target(dec!(1000), Decimal::MAX, Decimal::ZERO),
        Limit::Infinite
    );
}

// ===========================================================================
// EMI
// ===========================================================================

#[test]
fn test_emi_reference_value() {
    // 10 lakh at 10% over 5 years
    let emi = loan_emi(dec!(1000000), dec!(0.10), dec!(5)).finite().expect("finite emi");
    assert_close(emi, dec!(21247.04), dec!(0.01));
}

#[test]
fn test_emi_exceeds_interest_only_payment() {
    let emi = loan_emi(dec!(4000000), dec!(0.085), dec!(20)).finite().expect("finite emi");
    let interest_only = dec!(4000000) * dec!(0.085) / dec!(12);
    assert!(emi > interest_only);
    assert!(emi < dec!(4000000) / dec!(12));
}

// ===========================================================================
// Progressive tax
// ===========================================================================

#[test]
fn test_progressive_tax_across_slabs() {
    let rules = TaxRules::default();
    assert_eq!(progressive_tax(dec!(250000), &rules.old_slabs), Decimal::ZERO);
    assert_eq!(progressive_tax(dec!(500000), &rules.old_slabs), dec!(12500));
    assert_eq!(progressive_tax(dec!(1000000), &rules.old_slabs), dec!(112500));
    assert_eq!(progressive_tax(dec!(1425000), &rules.new_slabs), dec!(135000));
    assert_eq!(progressive_tax(dec!(-10), &rules.new_slabs), Decimal::ZERO);
}

#[test]
fn test_marginal_rate_boundaries() {
    let rules = TaxRules::default();
    assert_eq!(marginal_rate(dec!(300000), &rules.new_slabs), Decimal::ZERO);
    assert_eq!(marginal_rate(dec!(300001), &rules.new_slabs), dec!(0.05));
    assert_eq!(marginal_rate(dec!(1125000), &rules.new_slabs), dec!(0.15));
    assert_eq!(marginal_rate(dec!(5000000), &rules.old_slabs), dec!(0.30));
}
