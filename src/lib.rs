pub mod config;
pub mod engine;
pub mod evaluation;
pub mod input;
pub mod model;
pub mod output;
pub mod telemetry;

pub use engine::{
    DerivedFields, EvaluationError, FieldValue, Operator, OperatorRegistry, RuleEngine,
};
pub use evaluation::{EvaluationResult, LoanEvaluator};
pub use model::{Applicant, Decision, LoanApplication, RiskLevel, Rule};
