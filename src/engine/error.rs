use thiserror::Error;

/// Errors that abort a whole evaluation.
///
/// Problems with a single rule (unknown field, unknown operator, a literal
/// that does not parse) are never errors: the rule is skipped or evaluates
/// to false.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// Applicant or application data failed validation
    #[error("invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// A derived field would divide by zero
    #[error("derived field '{field}' is undefined: division by zero")]
    UndefinedRatio { field: &'static str },

    /// A derived field does not fit the decimal range
    #[error("derived field '{field}' overflowed")]
    ArithmeticOverflow { field: &'static str },
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
