pub mod derived;
pub mod error;
pub mod explain;
pub mod operators;
pub mod resolver;
pub mod risk;
pub mod rules;
pub mod validation;
pub mod value;

pub use derived::{DerivedFields, DERIVED_FIELD_NAMES};
pub use error::{EvaluationError, Result};
pub use explain::{field_label, generate_explanation, summarize_triggered};
pub use operators::{Operator, OperatorRegistry};
pub use resolver::{is_known_field, known_fields, FieldResolver};
pub use risk::{
    determine_decision, determine_decision_from_score, determine_tier, Assessment,
};
pub use rules::{
    calculate_risk_score, enabled_rules, find_rule, high_priority_enabled_rules, rules_for_field,
    RuleEngine, RuleFilter,
};
pub use validation::{validate_applicant, validate_application, validate_inputs, validate_rules};
pub use value::FieldValue;
