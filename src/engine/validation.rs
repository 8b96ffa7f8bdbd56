//! Input and rule-set checks.
//!
//! Every check collects all problems at once instead of stopping at the first.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::operators::OperatorRegistry;
use super::resolver::is_known_field;
use crate::model::{Applicant, LoanApplication, Rule};

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 120;
pub const MIN_CREDIT_SCORE: u32 = 300;
pub const MAX_CREDIT_SCORE: u32 = 850;
pub const MIN_LOAN_AMOUNT: Decimal = dec!(1000);
pub const MIN_TERM_MONTHS: u32 = 6;
pub const MAX_TERM_MONTHS: u32 = 360;
pub const MAX_RISK_POINTS: i32 = 100;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const MAX_EMPLOYMENT_STATUS_LEN: usize = 50;
const MAX_LOAN_PURPOSE_LEN: usize = 100;

pub fn validate_applicant(applicant: &Applicant) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    collect_applicant_errors(applicant, &mut errors);
    into_result(errors)
}

pub fn validate_application(application: &LoanApplication) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    collect_application_errors(application, &mut errors);
    into_result(errors)
}

/// Validate both inputs of an evaluation together.
pub fn validate_inputs(
    applicant: &Applicant,
    application: &LoanApplication,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    collect_applicant_errors(applicant, &mut errors);
    collect_application_errors(application, &mut errors);
    into_result(errors)
}

fn collect_applicant_errors(applicant: &Applicant, errors: &mut Vec<String>) {
    if !(MIN_AGE..=MAX_AGE).contains(&applicant.age) {
        errors.push(format!(
            "applicant.age: must be between {} and {} (got {})",
            MIN_AGE, MAX_AGE, applicant.age
        ));
    }

    // Zero income leaves every income ratio undefined, so it is rejected here.
    if applicant.annual_income <= Decimal::ZERO {
        errors.push(format!(
            "applicant.annual_income: must be greater than zero (got {})",
            applicant.annual_income
        ));
    } else if monthly_income_rounds_to_zero(applicant.annual_income) {
        errors.push(format!(
            "applicant.annual_income: monthly income rounds to zero (got {})",
            applicant.annual_income
        ));
    }

    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&applicant.credit_score) {
        errors.push(format!(
            "applicant.credit_score: must be between {} and {} (got {})",
            MIN_CREDIT_SCORE, MAX_CREDIT_SCORE, applicant.credit_score
        ));
    }

    if applicant.existing_debt < Decimal::ZERO {
        errors.push(format!(
            "applicant.existing_debt: must be non-negative (got {})",
            applicant.existing_debt
        ));
    }

    check_text(
        "applicant.employment_status",
        &applicant.employment_status,
        MAX_EMPLOYMENT_STATUS_LEN,
        errors,
    );
}

/// Monthly income is kept at two decimal places, so incomes below 0.06 a year
/// round to a zero divisor.
fn monthly_income_rounds_to_zero(annual_income: Decimal) -> bool {
    (annual_income / MONTHS_PER_YEAR)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .is_zero()
}

fn collect_application_errors(application: &LoanApplication, errors: &mut Vec<String>) {
    if application.loan_amount < MIN_LOAN_AMOUNT {
        errors.push(format!(
            "application.loan_amount: must be at least {} (got {})",
            MIN_LOAN_AMOUNT, application.loan_amount
        ));
    }

    check_text(
        "application.loan_purpose",
        &application.loan_purpose,
        MAX_LOAN_PURPOSE_LEN,
        errors,
    );

    if !(MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&application.requested_term_months) {
        errors.push(format!(
            "application.requested_term_months: must be between {} and {} (got {})",
            MIN_TERM_MONTHS, MAX_TERM_MONTHS, application.requested_term_months
        ));
    }
}

fn check_text(path: &str, value: &str, max_len: usize, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{}: must not be blank", path));
    } else if value.chars().count() > max_len {
        errors.push(format!("{}: must be at most {} characters", path, max_len));
    }
}

/// Check a rule set for entries the engine would silently skip or that break
/// the store's bounds.
///
/// The engine never calls this: a bad rule only degrades to "not triggered".
/// It exists so configuration problems can be reported up front.
pub fn validate_rules(rules: &[Rule], registry: &OperatorRegistry) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, rule) in rules.iter().enumerate() {
        let at = format!("rules[{}]", i);

        if !seen_ids.insert(rule.id) {
            errors.push(format!("{}.id: duplicate id {}", at, rule.id));
        }

        if rule.name.trim().is_empty() {
            errors.push(format!("{}.name: must not be blank", at));
        }

        if rule.field.trim().is_empty() {
            errors.push(format!("{}.field: must not be blank", at));
        } else if !is_known_field(&rule.field) {
            errors.push(format!("{}.field: unknown field '{}'", at, rule.field));
        }

        if rule.operator.trim().is_empty() {
            errors.push(format!("{}.operator: must not be blank", at));
        } else if !registry.contains(&rule.operator) {
            errors.push(format!("{}.operator: unknown operator '{}'", at, rule.operator));
        }

        if rule.rule_value.trim().is_empty() {
            errors.push(format!("{}.rule_value: must not be blank", at));
        }

        if !(-MAX_RISK_POINTS..=MAX_RISK_POINTS).contains(&rule.risk_points) {
            errors.push(format!(
                "{}.risk_points: must be between -{} and {} (got {})",
                at, MAX_RISK_POINTS, MAX_RISK_POINTS, rule.risk_points
            ));
        }

        if rule.priority < 1 {
            errors.push(format!("{}.priority: must be at least 1", at));
        }
    }

    into_result(errors)
}

fn into_result(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
