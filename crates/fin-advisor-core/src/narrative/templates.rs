//! Deterministic prose built only from result fields. Always available, so
//! a user gets an answer even when no narrator is configured.

use rust_decimal::Decimal;

use crate::behavioral::{BehavioralClassification, BehavioralQuestionType};
use crate::narrative::format::{
    format_inr, format_inr_limit, format_lakh_crore, format_pct, format_pct_limit, format_rate,
    format_years,
};
use crate::scenarios::education_goal::EducationGoalResult;
use crate::scenarios::family_planning::FamilyPlanningResult;
use crate::scenarios::general::GeneralPlanningResult;
use crate::scenarios::house_purchase::{AffordabilityBand, HousePurchaseResult};
use crate::scenarios::job_switch::JobSwitchResult;
use crate::scenarios::loan_prepayment::{LoanPrepaymentResult, LoanRecommendation};
use crate::scenarios::salary_hike::SalaryHikeResult;
use crate::scenarios::ScenarioResult;
use crate::tax::{RegimeComparison, TaxRegime};
use crate::types::Limit;

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

pub fn fallback_scenario_narrative(result: &ScenarioResult) -> String {
    match result {
        ScenarioResult::SalaryHike(r) => salary_hike(r),
        ScenarioResult::HousePurchase(r) => house_purchase(r),
        ScenarioResult::FamilyPlanning(r) => family_planning(r),
        ScenarioResult::JobSwitch(r) => job_switch(r),
        ScenarioResult::EducationGoal(r) => education_goal(r),
        ScenarioResult::LoanPrepayment(r) => loan_prepayment(r),
        ScenarioResult::GeneralPlanning(r) => general_planning(r),
        ScenarioResult::Error { error } => format!(
            "I couldn't run the numbers for this question: {error}. \
             Try including an amount (for example ₹50 lakh) and a timeline (for example 5 years)."
        ),
    }
}

fn salary_hike(r: &SalaryHikeResult) -> String {
    let mut text = format!(
        "A {} hike takes your monthly salary from {} to {}, an extra {} a month. \
         Routing {} of that into SIPs lifts your monthly SIP to {}, and the increase alone \
         could grow to {} over 10 years. Keep {} a month for your emergency fund and {} for goals.",
        format_pct(r.hike_percentage),
        format_inr(r.current_monthly_salary),
        format_inr(r.new_monthly_salary),
        format_inr(r.additional_monthly_income),
        format_inr(r.sip_increase),
        format_inr(r.new_monthly_sip),
        format_inr(r.additional_sip_value_10y),
        format_inr(r.emergency_fund_boost),
        format_inr(r.goal_acceleration_fund),
    );
    for g in r.goal_accelerations.iter().filter(|g| g.months_saved > Decimal::ZERO) {
        text.push_str(&format!(
            " Your {} goal arrives about {} months sooner ({} instead of {}).",
            g.goal.replace('_', " "),
            g.months_saved.round_dp(0),
            format_years(g.new_years),
            format_years(g.original_years),
        ));
    }
    text
}

fn house_purchase(r: &HousePurchaseResult) -> String {
    let funding = if r.is_affordable {
        format!(
            "You are on track: {} available against the down payment, a surplus of {}.",
            format_inr(r.available_funds),
            format_inr(r.shortfall_or_surplus),
        )
    } else {
        format!(
            "You would fall short by {}. Closing the gap needs an extra monthly SIP of {}.",
            format_inr(-r.shortfall_or_surplus),
            format_inr_limit(r.additional_sip_needed),
        )
    };
    let band = match r.affordability_band {
        AffordabilityBand::Comfortable => "comfortable",
        AffordabilityBand::Tight => "tight but manageable",
        AffordabilityBand::Unaffordable => "beyond a safe limit",
    };
    format!(
        "A home costing {} today will cost about {} in {}. The down payment comes to {}. \
         {funding} The loan of {} means an EMI of {}, which is {} of your income and {band}.",
        format_lakh_crore(r.house_price),
        format_inr(r.future_price),
        format_years(Limit::Finite(r.timeline_years)),
        format_inr(r.down_payment_required),
        format_inr(r.loan_amount),
        format_inr_limit(r.monthly_emi),
        format_pct_limit(r.emi_to_income_pct),
    )
}

fn family_planning(r: &FamilyPlanningResult) -> String {
    let budget = if r.budget_after_plan >= Decimal::ZERO {
        format!("which leaves {} of your current savings free", format_inr(r.budget_after_plan))
    } else {
        format!(
            "which is {} more than you save today",
            format_inr(-r.budget_after_plan)
        )
    };
    format!(
        "Expect about {} in one-time costs (delivery, baby essentials and higher insurance) and \
         {} more in monthly expenses. Your emergency fund should grow to {}, a gap of {}. \
         To be ready in {}-{} months, save {} a month, {budget}.",
        format_inr(r.total_immediate_cost),
        format_inr(r.total_monthly_increase),
        format_inr(r.emergency_fund_target),
        format_inr(r.emergency_fund_gap),
        r.preparation_months_min,
        r.preparation_months_max,
        format_inr(r.required_monthly_savings),
    )
}

fn job_switch(r: &JobSwitchResult) -> String {
    let epf = if r.epf_available_at_new_job {
        "The new employer offers EPF, so your retirement savings continue automatically.".to_string()
    } else {
        format!(
            "Without EPF you need to invest {} a month yourself (PPF, NPS or mutual funds) to keep \
             retirement on track.",
            format_inr(r.required_private_investment)
        )
    };
    let verdict = if r.is_beneficial {
        format!("Net of that, you gain {} a month, so the switch pays off.", format_inr(r.net_monthly_benefit))
    } else {
        format!(
            "Net of that, you are {} a month worse off, so negotiate a higher offer.",
            format_inr(-r.net_monthly_benefit)
        )
    };
    format!(
        "The {} hike moves your salary from {} to {}. {epf} {verdict} Over {} years the retirement \
         corpus changes by {}.",
        format_pct(r.hike_percentage),
        format_inr(r.current_monthly_salary),
        format_inr(r.new_monthly_salary),
        r.years_to_retirement.round_dp(0),
        format_inr(r.retirement_corpus_delta),
    )
}

fn education_goal(r: &EducationGoalResult) -> String {
    let abroad = if r.is_abroad_education {
        " including currency movement for study abroad"
    } else {
        ""
    };
    let shortfall = match r.monthly_shortfall {
        Limit::Finite(v) if v > Decimal::ZERO => format!(
            " That is {} more than the {} you set aside today.",
            format_inr(v),
            format_inr(r.current_monthly_allocation)
        ),
        _ => String::new(),
    };
    format!(
        "Education costing {} today will cost about {} in {}{abroad}. After counting your existing \
         corpus, you need a monthly SIP of {}.{shortfall} Keep {} in equity and {} in debt, \
         for example {}.",
        format_inr(r.education_cost_today),
        format_inr(r.education_cost_future),
        format_years(Limit::Finite(r.timeline_years)),
        format_inr_limit(r.adjusted_monthly_sip),
        format_rate(r.allocation.equity_allocation),
        format_rate(r.allocation.debt_allocation),
        r.allocation.suggested_funds.join(", "),
    )
}

fn loan_prepayment(r: &LoanPrepaymentResult) -> String {
    let action = match r.recommendation {
        LoanRecommendation::Prepay => "prepay the loan",
        LoanRecommendation::Invest => "keep the EMI running and invest",
    };
    format!(
        "Your loan of {} at {} costs an EMI of {} for {}, with {} of interest still to pay. \
         The better choice is to {action}. {} The projected difference is {}.",
        format_inr(r.outstanding_loan),
        format_rate(r.loan_interest_rate),
        format_inr(r.current_emi),
        format_years(Limit::Finite(r.remaining_years)),
        format_inr(r.total_interest_remaining),
        r.rationale,
        format_inr(r.net_benefit_of_prepaying.abs()),
    )
}

fn general_planning(r: &GeneralPlanningResult) -> String {
    let s = &r.summary;
    let cover = match s.emergency_fund_months {
        Limit::Finite(m) => format!("{} months of expenses", m.round_dp(1).normalize()),
        Limit::Infinite => "all of your (zero) recorded expenses".to_string(),
    };
    format!(
        "Here is where you stand: portfolio {}, emergency fund {} covering {cover}, monthly income \
         {} against expenses of {}, saving {} a month. Total debt is {} and net worth {}. \
         Tell me the amount and timeline you have in mind and I can model it.",
        format_inr(s.portfolio_value),
        format_inr(s.emergency_fund),
        format_inr(s.monthly_income),
        format_inr(s.monthly_expenses),
        format_inr(s.monthly_savings),
        format_inr(s.total_debt),
        format_inr(s.net_worth),
    )
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

pub fn fallback_tax_narrative(c: &RegimeComparison) -> String {
    let (winner, loser) = match c.recommended {
        TaxRegime::Old => ("old", "new"),
        TaxRegime::New => ("new", "old"),
    };
    if c.savings.is_zero() {
        return format!(
            "Both regimes cost {} in tax. The new regime is simpler, with no deduction proofs to keep.",
            format_inr(c.new_regime.total_tax)
        );
    }
    format!(
        "Under the old regime you would pay {} and under the new regime {}. \
         The {winner} regime saves {} ({}) compared with the {loser} regime.",
        format_inr(c.old_regime.total_tax),
        format_inr(c.new_regime.total_tax),
        format_inr(c.savings),
        format_pct(c.percentage_savings),
    )
}

// ---------------------------------------------------------------------------
// Behavioral
// ---------------------------------------------------------------------------

pub fn fallback_behavioral_narrative(c: &BehavioralClassification) -> String {
    let amount = c
        .extracted_amount
        .map(format_inr)
        .unwrap_or_else(|| "this amount".to_string());
    let stock = c
        .extracted_symbols
        .first()
        .cloned()
        .unwrap_or_else(|| "this stock".to_string());

    match c.question_type {
        BehavioralQuestionType::PortfolioMarketEmotional => "It's natural to feel uneasy about your \
            portfolio when markets move sharply. Daily swings rarely change a long-term plan. Before \
            acting, check whether your goals or time horizon have changed; if not, the plan still holds."
            .to_string(),
        BehavioralQuestionType::InvestmentMarketBehavioral => format!(
            "Recognising your own patterns before investing {amount} is a real strength. Given current \
             conditions, consider investing in tranches through a SIP so that timing and emotion carry less weight."
        ),
        BehavioralQuestionType::StockMarketTiming => format!(
            "Timing {stock} perfectly is not possible. Decide how much of it belongs in your portfolio, \
             then build the position in stages instead of waiting for the perfect moment."
        ),
        BehavioralQuestionType::PortfolioWithMarketContext => "Your portfolio should be judged against \
            your goals, not against today's market. Review your allocation once, rebalance if it has \
            drifted, and let diversification absorb the noise."
            .to_string(),
        BehavioralQuestionType::InvestmentEmotionalRisk => format!(
            "Feeling cautious about risking {amount} is sensible. Keep money needed within three years \
             in safe instruments, and invest only the rest in equity, gradually."
        ),
        BehavioralQuestionType::StockBehavioralEmotional => format!(
            "Strong feelings about {stock} often lead to repeated mistakes. Write down why you hold it \
             and what would make you sell, and follow that note rather than the mood of the day."
        ),
        BehavioralQuestionType::PortfolioBehavioral => "Spotting patterns in your own decisions is the \
            first step to changing them. Automate contributions and set rebalancing dates so fewer \
            choices depend on how you feel in the moment."
            .to_string(),
        BehavioralQuestionType::InvestmentMarketTiming => format!(
            "Rather than waiting for the right moment to invest {amount}, spread it over the next few \
             months. Time in the market beats timing the market."
        ),
        BehavioralQuestionType::StockEmotional => format!(
            "It's understandable to feel strongly about {stock}. A single stock should be a small part \
             of your portfolio, so its ups and downs don't decide your financial future."
        ),
        BehavioralQuestionType::PortfolioRiskAnalysis => "Portfolio risk comes down to allocation. \
            Check how much sits in equity versus debt and whether any single holding dominates; that \
            tells you more than any single day's return."
            .to_string(),
        BehavioralQuestionType::MarketConditions => "Markets move in cycles and short-term conditions \
            are hard to predict. Focus on what you control: costs, diversification and staying invested."
            .to_string(),
        BehavioralQuestionType::InvestmentRequest => format!(
            "Before investing {amount}, make sure your emergency fund is in place. Then split it \
             between diversified equity and debt funds in line with your time horizon."
        ),
        BehavioralQuestionType::StockAnalysis => format!(
            "Look at {stock} as a business: earnings, debt and valuation. Then decide how much of your \
             portfolio it deserves, and keep that share modest."
        ),
        BehavioralQuestionType::PortfolioReview => "A yearly portfolio review is healthy. Compare your \
            allocation with your target, trim what has grown too large and top up what has fallen behind."
            .to_string(),
        BehavioralQuestionType::EmotionalSupport => "Your feelings about money are valid. Pause before \
            acting on them: a 24-hour wait before any trade lets the rational part of the decision catch up."
            .to_string(),
        BehavioralQuestionType::BehavioralInsight => "Many investors repeat the same mistakes, such as \
            selling in panic or chasing recent winners. Keeping a short decision journal is the simplest \
            way to break the cycle."
            .to_string(),
        BehavioralQuestionType::General => "I'm here to help with your investments. Tell me about your \
            portfolio, an amount you want to invest, or what is worrying you about the market."
            .to_string(),
    }
}
