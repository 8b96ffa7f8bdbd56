use super::derived::DerivedFields;
use super::value::FieldValue;
use crate::model::{Applicant, LoanApplication};

/// Fields read directly from the applicant.
pub const APPLICANT_FIELDS: [&str; 5] = [
    "creditScore",
    "age",
    "annualIncome",
    "existingDebt",
    "employmentStatus",
];

/// Fields read directly from the loan application.
pub const APPLICATION_FIELDS: [&str; 3] = ["loanAmount", "loanPurpose", "requestedTermMonths"];

/// Resolves a rule's field name to a typed value.
///
/// Sources are checked in order: derived fields, then the applicant, then the
/// application. The first source that knows the name wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    derived: &'a DerivedFields,
    applicant: &'a Applicant,
    application: &'a LoanApplication,
}

impl<'a> FieldResolver<'a> {
    pub fn new(
        derived: &'a DerivedFields,
        applicant: &'a Applicant,
        application: &'a LoanApplication,
    ) -> Self {
        Self {
            derived,
            applicant,
            application,
        }
    }

    /// `None` means the field name is unknown to every source.
    pub fn resolve(&self, field: &str) -> Option<FieldValue> {
        self.derived
            .get(field)
            .or_else(|| applicant_field(self.applicant, field))
            .or_else(|| application_field(self.application, field))
    }
}

fn applicant_field(applicant: &Applicant, field: &str) -> Option<FieldValue> {
    match field {
        "creditScore" => Some(FieldValue::from(applicant.credit_score)),
        "age" => Some(FieldValue::from(applicant.age)),
        "annualIncome" => Some(FieldValue::from(applicant.annual_income)),
        "existingDebt" => Some(FieldValue::from(applicant.existing_debt)),
        "employmentStatus" => Some(FieldValue::from(applicant.employment_status.as_str())),
        _ => None,
    }
}

fn application_field(application: &LoanApplication, field: &str) -> Option<FieldValue> {
    match field {
        "loanAmount" => Some(FieldValue::from(application.loan_amount)),
        "loanPurpose" => Some(FieldValue::from(application.loan_purpose.as_str())),
        "requestedTermMonths" => Some(FieldValue::from(application.requested_term_months)),
        _ => None,
    }
}

/// True when some source can resolve `field`.
pub fn is_known_field(field: &str) -> bool {
    DerivedFields::is_derived_field(field)
        || APPLICANT_FIELDS.contains(&field)
        || APPLICATION_FIELDS.contains(&field)
}

/// Every resolvable field name: derived first, then applicant, then application.
pub fn known_fields() -> impl Iterator<Item = &'static str> {
    super::derived::DERIVED_FIELD_NAMES
        .into_iter()
        .chain(APPLICANT_FIELDS)
        .chain(APPLICATION_FIELDS)
}
