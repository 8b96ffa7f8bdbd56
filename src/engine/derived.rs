//! Ratio and payment fields computed from applicant and application data.
//!
//! All arithmetic is fixed-point: every division rounds half-up to two
//! decimal places, except the monthly interest rate which keeps eight.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::{EvaluationError, Result};
use super::value::FieldValue;
use crate::model::{Applicant, LoanApplication};

pub const DEBT_TO_INCOME_RATIO: &str = "debtToIncomeRatio";
pub const LOAN_TO_INCOME_RATIO: &str = "loanToIncomeRatio";
pub const MONTHLY_LOAN_PAYMENT: &str = "monthlyLoanPayment";
pub const TOTAL_DEBT_RATIO: &str = "totalDebtRatio";
pub const LOAN_AMOUNT_PER_TERM: &str = "loanAmountPerTerm";
pub const AGE_TO_TERM_RATIO: &str = "ageToTermRatio";

/// Every derived field name, in canonical (display) order.
pub const DERIVED_FIELD_NAMES: [&str; 6] = [
    DEBT_TO_INCOME_RATIO,
    LOAN_TO_INCOME_RATIO,
    MONTHLY_LOAN_PAYMENT,
    TOTAL_DEBT_RATIO,
    LOAN_AMOUNT_PER_TERM,
    AGE_TO_TERM_RATIO,
];

/// Fixed annual rate used for the amortized payment (5.5%).
pub const ANNUAL_INTEREST_RATE: Decimal = dec!(0.055);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const MONEY_SCALE: u32 = 2;
const RATE_SCALE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    pub debt_to_income_ratio: Decimal,
    pub loan_to_income_ratio: Decimal,
    pub monthly_loan_payment: Decimal,
    pub total_debt_ratio: Decimal,
    pub loan_amount_per_term: Decimal,
    pub age_to_term_ratio: Decimal,
}

impl DerivedFields {
    /// Compute all six derived fields.
    ///
    /// A zero annual income or zero term has no defined ratio and is reported
    /// as [`EvaluationError::UndefinedRatio`]; callers are expected to have
    /// rejected such input during validation.
    pub fn calculate(applicant: &Applicant, application: &LoanApplication) -> Result<Self> {
        let monthly_income = divide(
            DEBT_TO_INCOME_RATIO,
            applicant.annual_income,
            MONTHS_PER_YEAR,
            MONEY_SCALE,
        )?;

        let debt_to_income_ratio = divide(
            DEBT_TO_INCOME_RATIO,
            applicant.existing_debt,
            monthly_income,
            MONEY_SCALE,
        )?;

        let loan_to_income_ratio = divide(
            LOAN_TO_INCOME_RATIO,
            application.loan_amount,
            applicant.annual_income,
            MONEY_SCALE,
        )?;

        let monthly_loan_payment =
            monthly_payment(application.loan_amount, application.requested_term_months)?;

        let total_debt = applicant
            .existing_debt
            .checked_add(monthly_loan_payment)
            .ok_or(EvaluationError::ArithmeticOverflow {
                field: TOTAL_DEBT_RATIO,
            })?;
        let total_debt_ratio = divide(TOTAL_DEBT_RATIO, total_debt, monthly_income, MONEY_SCALE)?;

        let term_months = Decimal::from(application.requested_term_months);
        let loan_amount_per_term = divide(
            LOAN_AMOUNT_PER_TERM,
            application.loan_amount,
            term_months,
            MONEY_SCALE,
        )?;

        let term_years = divide(AGE_TO_TERM_RATIO, term_months, MONTHS_PER_YEAR, MONEY_SCALE)?;
        let age_to_term_ratio = divide(
            AGE_TO_TERM_RATIO,
            Decimal::from(applicant.age),
            term_years,
            MONEY_SCALE,
        )?;

        Ok(Self {
            debt_to_income_ratio,
            loan_to_income_ratio,
            monthly_loan_payment,
            total_debt_ratio,
            loan_amount_per_term,
            age_to_term_ratio,
        })
    }

    /// Look up a derived field by its camelCase name.
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.value_of(name).map(FieldValue::Decimal)
    }

    fn value_of(&self, name: &str) -> Option<Decimal> {
        match name {
            DEBT_TO_INCOME_RATIO => Some(self.debt_to_income_ratio),
            LOAN_TO_INCOME_RATIO => Some(self.loan_to_income_ratio),
            MONTHLY_LOAN_PAYMENT => Some(self.monthly_loan_payment),
            TOTAL_DEBT_RATIO => Some(self.total_debt_ratio),
            LOAN_AMOUNT_PER_TERM => Some(self.loan_amount_per_term),
            AGE_TO_TERM_RATIO => Some(self.age_to_term_ratio),
            _ => None,
        }
    }

    /// (name, value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        DERIVED_FIELD_NAMES
            .iter()
            .filter_map(move |name| self.value_of(name).map(|value| (*name, value)))
    }

    pub fn is_derived_field(name: &str) -> bool {
        DERIVED_FIELD_NAMES.contains(&name)
    }
}

/// Amortized monthly payment: P * r * (1+r)^n / ((1+r)^n - 1).
fn monthly_payment(principal: Decimal, term_months: u32) -> Result<Decimal> {
    let overflow = EvaluationError::ArithmeticOverflow {
        field: MONTHLY_LOAN_PAYMENT,
    };

    let monthly_rate = divide(
        MONTHLY_LOAN_PAYMENT,
        ANNUAL_INTEREST_RATE,
        MONTHS_PER_YEAR,
        RATE_SCALE,
    )?;
    let growth = Decimal::ONE + monthly_rate;

    let compound = (0..term_months)
        .try_fold(Decimal::ONE, |acc, _| acc.checked_mul(growth))
        .ok_or_else(|| overflow.clone())?;

    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|n| n.checked_mul(compound))
        .ok_or(overflow)?;

    divide(
        MONTHLY_LOAN_PAYMENT,
        numerator,
        compound - Decimal::ONE,
        MONEY_SCALE,
    )
}

/// `numerator / denominator`, rounded half-up and padded to exactly `scale` places.
fn divide(
    field: &'static str,
    numerator: Decimal,
    denominator: Decimal,
    scale: u32,
) -> Result<Decimal> {
    if denominator.is_zero() {
        return Err(EvaluationError::UndefinedRatio { field });
    }

    let mut quotient = numerator
        .checked_div(denominator)
        .ok_or(EvaluationError::ArithmeticOverflow { field })?
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    quotient.rescale(scale);
    Ok(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> Applicant {
        Applicant {
            name: Some("Jordan Lee".to_string()),
            age: 35,
            annual_income: dec!(60000.00),
            credit_score: 720,
            employment_status: "EMPLOYED".to_string(),
            existing_debt: dec!(1000.00),
        }
    }

    fn application() -> LoanApplication {
        LoanApplication::new(dec!(20000.00), "HOME_IMPROVEMENT", 36)
    }

    #[test]
    fn test_all_fields_present() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        for name in DERIVED_FIELD_NAMES {
            assert!(derived.get(name).is_some(), "derived field {} should be present", name);
        }
        assert_eq!(derived.iter().count(), 6);
    }

    #[test]
    fn test_debt_to_income_ratio() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        // monthly income 5000.00, 1000.00 / 5000.00
        assert_eq!(derived.debt_to_income_ratio, dec!(0.20));
        assert_eq!(derived.debt_to_income_ratio.to_string(), "0.20");
    }

    #[test]
    fn test_loan_to_income_ratio() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        assert_eq!(derived.loan_to_income_ratio, dec!(0.33));
    }

    #[test]
    fn test_loan_amount_per_term_rounds_half_up() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        // 20000 / 36 = 555.555...
        assert_eq!(derived.loan_amount_per_term, dec!(555.56));
    }

    #[test]
    fn test_age_to_term_ratio() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        // term 3.00 years, 35 / 3.00
        assert_eq!(derived.age_to_term_ratio, dec!(11.67));
    }

    #[test]
    fn test_monthly_payment_is_amortized() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        // 20000 at 5.5% over 36 months is roughly 603.92
        assert!(derived.monthly_loan_payment > dec!(603.50));
        assert!(derived.monthly_loan_payment < dec!(604.50));
        assert_eq!(derived.monthly_loan_payment.scale(), 2);
    }

    #[test]
    fn test_total_debt_ratio_exceeds_debt_to_income() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        assert!(derived.total_debt_ratio > derived.debt_to_income_ratio);
        assert_eq!(derived.total_debt_ratio, dec!(0.32));
    }

    #[test]
    fn test_zero_income_is_undefined() {
        let mut applicant = applicant();
        applicant.annual_income = Decimal::ZERO;
        let err = DerivedFields::calculate(&applicant, &application()).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::UndefinedRatio {
                field: DEBT_TO_INCOME_RATIO
            }
        );
    }

    #[test]
    fn test_zero_term_is_undefined() {
        let mut application = application();
        application.requested_term_months = 0;
        let err = DerivedFields::calculate(&applicant(), &application).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::UndefinedRatio {
                field: MONTHLY_LOAN_PAYMENT
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let first = DerivedFields::calculate(&applicant(), &application()).unwrap();
        let second = DerivedFields::calculate(&applicant(), &application()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_name_is_none() {
        let derived = DerivedFields::calculate(&applicant(), &application()).unwrap();
        assert!(derived.get("creditScore").is_none());
        assert!(DerivedFields::is_derived_field(TOTAL_DEBT_RATIO));
        assert!(!DerivedFields::is_derived_field("loanAmount"));
    }
}
