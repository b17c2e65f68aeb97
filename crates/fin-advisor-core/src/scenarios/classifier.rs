use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::scenarios::extract::{extract_parameters, ExtractedParameters};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    SalaryHike,
    HousePurchase,
    FamilyPlanning,
    JobSwitch,
    EducationGoal,
    LoanPrepayment,
    RetirementPlanning,
    EmergencyFund,
    GeneralPlanning,
}

impl ScenarioKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::SalaryHike => "salary_hike",
            ScenarioKind::HousePurchase => "house_purchase",
            ScenarioKind::FamilyPlanning => "family_planning",
            ScenarioKind::JobSwitch => "job_switch",
            ScenarioKind::EducationGoal => "education_goal",
            ScenarioKind::LoanPrepayment => "loan_prepayment",
            ScenarioKind::RetirementPlanning => "retirement_planning",
            ScenarioKind::EmergencyFund => "emergency_fund",
            ScenarioKind::GeneralPlanning => "general_planning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioCategory {
    IncomeChange,
    MajorPurchase,
    LifeEvent,
    CareerChange,
    EducationInvestment,
    DebtOptimization,
    LongTermGoal,
    RiskManagement,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// One row of the keyword table.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRule {
    pub kind: ScenarioKind,
    pub category: ScenarioCategory,
    pub weight: Decimal,
    pub keywords: &'static [&'static str],
}

/// Keyword table. The highest weight wins; among equal weights the row
/// listed first wins.
pub static SCENARIO_RULES: [ScenarioRule; 8] = [
    ScenarioRule {
        kind: ScenarioKind::SalaryHike,
        category: ScenarioCategory::IncomeChange,
        weight: dec!(0.9),
        keywords: &["salary hike", "salary increase", "promotion", "raise", "pay increase", "income boost"],
    },
    ScenarioRule {
        kind: ScenarioKind::HousePurchase,
        category: ScenarioCategory::MajorPurchase,
        weight: dec!(0.9),
        keywords: &["buy house", "buying house", "home loan", "property", "real estate", "house in"],
    },
    ScenarioRule {
        kind: ScenarioKind::FamilyPlanning,
        category: ScenarioCategory::LifeEvent,
        weight: dec!(0.85),
        keywords: &["baby", "child", "expecting", "pregnancy", "new family member", "having a child"],
    },
    ScenarioRule {
        kind: ScenarioKind::JobSwitch,
        category: ScenarioCategory::CareerChange,
        weight: dec!(0.8),
        keywords: &["job switch", "changing job", "new job", "startup", "no epf", "no pf"],
    },
    ScenarioRule {
        kind: ScenarioKind::EducationGoal,
        category: ScenarioCategory::EducationInvestment,
        weight: dec!(0.85),
        keywords: &["mba", "education", "higher studies", "masters", "abroad study", "university"],
    },
    ScenarioRule {
        kind: ScenarioKind::LoanPrepayment,
        category: ScenarioCategory::DebtOptimization,
        weight: dec!(0.8),
        keywords: &["pay off loan", "prepay", "close loan", "early repayment", "loan closure"],
    },
    ScenarioRule {
        kind: ScenarioKind::RetirementPlanning,
        category: ScenarioCategory::LongTermGoal,
        weight: dec!(0.9),
        keywords: &["retirement", "retire early", "pension", "post-retirement", "financial independence"],
    },
    ScenarioRule {
        kind: ScenarioKind::EmergencyFund,
        category: ScenarioCategory::RiskManagement,
        weight: dec!(0.8),
        keywords: &["emergency fund", "contingency", "job loss", "medical emergency", "unexpected expense"],
    },
];

const GENERAL_CONFIDENCE: Decimal = dec!(0.6);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub scenario: ScenarioKind,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioClassification {
    pub primary_scenario: ScenarioKind,
    pub scenario_type: ScenarioCategory,
    pub confidence: Decimal,
    /// Every scenario whose keywords fired, in table order.
    pub matches: Vec<KeywordMatch>,
    pub parameters: ExtractedParameters,
    pub requires_calculation: bool,
    pub complexity: Complexity,
    pub complexity_score: u32,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// +2 for several scenarios, +2 for amount and timeline together,
/// +1 for several amounts, +1 for salary information.
pub fn complexity_score(match_count: usize, params: &ExtractedParameters) -> u32 {
    let mut score = 0;
    if match_count >= 2 {
        score += 2;
    }
    if params.has_amounts && params.has_timeline {
        score += 2;
    }
    if params.amounts.len() > 1 {
        score += 1;
    }
    if params.has_salary_info() {
        score += 1;
    }
    score
}

pub fn complexity_tier(score: u32) -> Complexity {
    match score {
        s if s >= 4 => Complexity::Complex,
        s if s >= 2 => Complexity::Moderate,
        _ => Complexity::Simple,
    }
}

pub fn classify_scenario(text: &str) -> ScenarioClassification {
    let lower = text.to_lowercase();
    let parameters = extract_parameters(text);

    let mut matches = Vec::new();
    let mut best: Option<&ScenarioRule> = None;
    for rule in &SCENARIO_RULES {
        let hits: Vec<String> = rule
            .keywords
            .iter()
            .filter(|k| lower.contains(*k))
            .map(|k| (*k).to_string())
            .collect();
        if hits.is_empty() {
            continue;
        }
        matches.push(KeywordMatch {
            scenario: rule.kind,
            keywords: hits,
        });
        // Strict comparison keeps the earlier row on equal weight.
        if best.map_or(true, |b| rule.weight > b.weight) {
            best = Some(rule);
        }
    }

    let score = complexity_score(matches.len(), &parameters);
    let (primary_scenario, scenario_type, confidence, requires_calculation) = match best {
        Some(rule) => (rule.kind, rule.category, rule.weight, true),
        None => (
            ScenarioKind::GeneralPlanning,
            ScenarioCategory::General,
            GENERAL_CONFIDENCE,
            parameters.has_amounts || parameters.has_timeline,
        ),
    };

    ScenarioClassification {
        primary_scenario,
        scenario_type,
        confidence,
        matches,
        parameters,
        requires_calculation,
        complexity: complexity_tier(score),
        complexity_score: score,
    }
}
