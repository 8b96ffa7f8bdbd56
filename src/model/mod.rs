pub mod types;

pub use types::{Applicant, Decision, LoanApplication, ParseCodeError, RiskLevel, Rule};
