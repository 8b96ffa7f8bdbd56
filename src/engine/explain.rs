//! Human-readable rationale for an evaluation.
//!
//! Output depends only on the inputs: sections come in a fixed order and
//! derived fields are listed in canonical order.

use std::borrow::Borrow;

use super::derived::DerivedFields;
use super::risk::Assessment;
use crate::model::{Applicant, LoanApplication, Rule};

const NO_RISK_FACTORS: &str = "No risk factors were identified.";

/// Build the full evaluation report.
pub fn generate_explanation<R: Borrow<Rule>>(
    applicant: &Applicant,
    application: &LoanApplication,
    derived: &DerivedFields,
    triggered: &[R],
    assessment: &Assessment,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Loan Application Evaluation".to_string());
    lines.push("==========================".to_string());
    lines.push(String::new());
    lines.push(format!("Loan Amount: ${:.2}", application.loan_amount));
    lines.push(format!("Loan Purpose: {}", application.loan_purpose));
    lines.push(format!(
        "Requested Term: {} months",
        application.requested_term_months
    ));
    lines.push(String::new());

    lines.push("Customer Information".to_string());
    lines.push("--------------------".to_string());
    lines.push(format!("Credit Score: {}", applicant.credit_score));
    lines.push(format!("Annual Income: ${:.2}", applicant.annual_income));
    lines.push(format!("Existing Debt: ${:.2}", applicant.existing_debt));
    lines.push(format!("Employment Status: {}", applicant.employment_status));
    lines.push(String::new());

    lines.push("Derived Fields".to_string());
    lines.push("-------------".to_string());
    for (name, value) in derived.iter() {
        lines.push(format!("{}: {:.2}", field_label(name), value));
    }
    lines.push(String::new());

    lines.push("Triggered Risk Factors".to_string());
    lines.push("---------------------".to_string());
    if triggered.is_empty() {
        lines.push(NO_RISK_FACTORS.to_string());
    } else {
        for rule in triggered {
            lines.push(risk_factor_line(rule.borrow()));
        }
    }
    lines.push(String::new());

    lines.push("Risk Assessment".to_string());
    lines.push("---------------".to_string());
    lines.push(format!("Total Risk Score: {}", assessment.risk_score));
    lines.push(format!("Risk Level: {}", assessment.risk_level));
    lines.push(format!("Decision: {}", assessment.decision));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Compact list of the triggered rules and their total.
pub fn summarize_triggered<R: Borrow<Rule>>(triggered: &[R]) -> String {
    if triggered.is_empty() {
        return NO_RISK_FACTORS.to_string();
    }

    let mut lines = vec!["Risk factors identified:".to_string()];
    lines.extend(triggered.iter().map(|rule| risk_factor_line(rule.borrow())));
    lines.push(String::new());
    lines.push(format!(
        "Total risk score: {}",
        super::rules::calculate_risk_score(triggered)
    ));
    lines.join("\n")
}

fn risk_factor_line(rule: &Rule) -> String {
    format!("- {} ({} points)", rule.name, rule.risk_points)
}

/// "debtToIncomeRatio" -> "Debt To Income Ratio"
pub fn field_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;

    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            if previous_lower && c.is_ascii_uppercase() {
                label.push(' ');
            }
            label.push(c);
        }
        previous_lower = c.is_ascii_lowercase();
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fixtures() -> (Applicant, LoanApplication, DerivedFields) {
        let applicant = Applicant {
            name: None,
            age: 35,
            annual_income: dec!(60000),
            credit_score: 720,
            employment_status: "EMPLOYED".to_string(),
            existing_debt: dec!(1000),
        };
        let application = LoanApplication::new(dec!(20000), "HOME_IMPROVEMENT", 36);
        let derived = DerivedFields::calculate(&applicant, &application).unwrap();
        (applicant, application, derived)
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("debtToIncomeRatio"), "Debt To Income Ratio");
        assert_eq!(field_label("ageToTermRatio"), "Age To Term Ratio");
        assert_eq!(field_label("age"), "Age");
        assert_eq!(field_label(""), "");
    }

    #[test]
    fn test_sections_in_order() {
        let (applicant, application, derived) = fixtures();
        let rules = vec![Rule::new(
            1,
            "Good credit score",
            "creditScore",
            "GREATER_THAN_OR_EQUAL",
            "700",
            -20,
            1,
        )];
        let text = generate_explanation(
            &applicant,
            &application,
            &derived,
            &rules,
            &Assessment::from_score(-20),
        );

        let order = [
            "Loan Application Evaluation",
            "Loan Amount: $20000.00",
            "Customer Information",
            "Annual Income: $60000.00",
            "Derived Fields",
            "Debt To Income Ratio: 0.20",
            "Loan To Income Ratio: 0.33",
            "Monthly Loan Payment:",
            "Total Debt Ratio: 0.32",
            "Loan Amount Per Term: 555.56",
            "Age To Term Ratio: 11.67",
            "Triggered Risk Factors",
            "- Good credit score (-20 points)",
            "Risk Assessment",
            "Total Risk Score: -20",
            "Risk Level: LOW",
            "Decision: APPROVE",
        ];
        let mut cursor = 0;
        for needle in order {
            let found = text[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' missing or out of order in:\n{}", needle, text));
            cursor += found + needle.len();
        }
    }

    #[test]
    fn test_no_risk_factors() {
        let (applicant, application, derived) = fixtures();
        let none: Vec<Rule> = vec![];
        let text = generate_explanation(
            &applicant,
            &application,
            &derived,
            &none,
            &Assessment::from_score(0),
        );
        assert!(text.contains("No risk factors were identified."));
        assert!(text.ends_with("Decision: APPROVE\n"));
    }

    #[test]
    fn test_explanation_is_deterministic() {
        let (applicant, application, derived) = fixtures();
        let rules = vec![
            Rule::new(1, "a", "age", "EQUALS", "35", 10, 1),
            Rule::new(2, "b", "age", "EQUALS", "35", 5, 2),
        ];
        let assessment = Assessment::from_score(15);
        let first = generate_explanation(&applicant, &application, &derived, &rules, &assessment);
        let second = generate_explanation(&applicant, &application, &derived, &rules, &assessment);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summarize_triggered() {
        let none: Vec<Rule> = vec![];
        assert_eq!(summarize_triggered(&none), "No risk factors were identified.");

        let rules = vec![
            Rule::new(1, "Low credit", "creditScore", "LESS_THAN", "600", 10, 1),
            Rule::new(2, "High DTI", "debtToIncomeRatio", "GREATER_THAN", "0.4", 5, 2),
        ];
        assert_eq!(
            summarize_triggered(&rules),
            "Risk factors identified:\n\
             - Low credit (10 points)\n\
             - High DTI (5 points)\n\
             \n\
             Total risk score: 15"
        );
    }
}
