use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxQuestionType {
    RegimeComparison,
    DeductionOptimization,
    FamilyPlanning,
    SalaryOptimization,
    GeneralTax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxQuestion {
    pub question_type: TaxQuestionType,
    pub focus_area: String,
    pub requires_calculation: bool,
    pub urgency: Urgency,
}

struct Rule {
    keywords: &'static [&'static str],
    question_type: TaxQuestionType,
    focus_area: &'static str,
    requires_calculation: bool,
}

/// Checked in order; the first rule with a matching keyword wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["old regime", "new regime", "which regime", "regime comparison"],
        question_type: TaxQuestionType::RegimeComparison,
        focus_area: "regime_selection",
        requires_calculation: true,
    },
    Rule {
        keywords: &["80c", "80d", "deduction", "tax saving", "investment"],
        question_type: TaxQuestionType::DeductionOptimization,
        focus_area: "deductions",
        requires_calculation: true,
    },
    Rule {
        keywords: &["family", "spouse", "children", "parents"],
        question_type: TaxQuestionType::FamilyPlanning,
        focus_area: "family_tax_planning",
        requires_calculation: false,
    },
    Rule {
        keywords: &["salary", "hra", "allowance", "employer"],
        question_type: TaxQuestionType::SalaryOptimization,
        focus_area: "salary_structure",
        requires_calculation: false,
    },
];

const DEADLINE_WORDS: [&str; 4] = ["deadline", "urgent", "last date", "march 31"];

pub fn classify_tax_question(text: &str) -> TaxQuestion {
    let lower = text.to_lowercase();
    let urgency = if DEADLINE_WORDS.iter().any(|w| lower.contains(w)) {
        Urgency::High
    } else {
        Urgency::Medium
    };

    match RULES
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
    {
        Some(rule) => TaxQuestion {
            question_type: rule.question_type,
            focus_area: rule.focus_area.into(),
            requires_calculation: rule.requires_calculation,
            urgency,
        },
        None => TaxQuestion {
            question_type: TaxQuestionType::GeneralTax,
            focus_area: "general".into(),
            requires_calculation: false,
            urgency,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regime_beats_deduction() {
        let q = classify_tax_question("Old regime or new regime given my 80C investments?");
        assert_eq!(q.question_type, TaxQuestionType::RegimeComparison);
        assert!(q.requires_calculation);
    }

    #[test]
    fn test_deduction_and_urgency() {
        let q = classify_tax_question("What is the last date for 80C deduction proofs?");
        assert_eq!(q.question_type, TaxQuestionType::DeductionOptimization);
        assert_eq!(q.focus_area, "deductions");
        assert_eq!(q.urgency, Urgency::High);
    }

    #[test]
    fn test_salary_structure() {
        let q = classify_tax_question("Can my employer restructure HRA?");
        assert_eq!(q.question_type, TaxQuestionType::SalaryOptimization);
        assert_eq!(q.urgency, Urgency::Medium);
    }

    #[test]
    fn test_general_fallback() {
        let q = classify_tax_question("How are capital gains taxed?");
        assert_eq!(q.question_type, TaxQuestionType::GeneralTax);
        assert!(!q.requires_calculation);
    }
}
