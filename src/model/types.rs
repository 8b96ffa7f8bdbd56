use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single scoring rule: `field OPERATOR rule_value` worth `risk_points`.
///
/// `rule_value` is always stored as text and is parsed into the runtime type of
/// the field it is compared against at evaluation time.
///
/// Example YAML:
/// ```yaml
/// - id: 1
///   name: Poor credit score
///   field: creditScore
///   operator: LESS_THAN
///   rule_value: "580"
///   risk_points: 40
///   priority: 1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub id: u64,
    pub name: String,
    /// Field key, e.g. "creditScore" or "debtToIncomeRatio"
    pub field: String,
    /// Operator code, e.g. "GREATER_THAN_OR_EQUAL"
    pub operator: String,
    pub rule_value: String,
    /// Points added to the score when the rule triggers (may be negative)
    pub risk_points: i32,
    /// Ascending: priority 1 is evaluated first
    pub priority: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        field: impl Into<String>,
        operator: impl Into<String>,
        rule_value: impl Into<String>,
        risk_points: i32,
        priority: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            field: field.into(),
            operator: operator.into(),
            rule_value: rule_value.into(),
            risk_points,
            priority,
            enabled: true,
        }
    }

    /// Same rule, switched off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Condition in "field OPERATOR value" form, for display.
    pub fn condition(&self) -> String {
        format!("{} {} {}", self.field, self.operator, self.rule_value)
    }
}

/// The borrower being scored.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Applicant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub age: u32,
    pub annual_income: Decimal,
    pub credit_score: u32,
    pub employment_status: String,
    pub existing_debt: Decimal,
}

/// A loan request plus the result fields written by an evaluation.
///
/// The four result fields are overwritten on every evaluation, never merged.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoanApplication {
    pub loan_amount: Decimal,
    pub loan_purpose: String,
    pub requested_term_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl LoanApplication {
    pub fn new(
        loan_amount: Decimal,
        loan_purpose: impl Into<String>,
        requested_term_months: u32,
    ) -> Self {
        Self {
            loan_amount,
            loan_purpose: loan_purpose.into(),
            requested_term_months,
            risk_score: None,
            risk_level: None,
            decision: None,
            explanation: None,
        }
    }

    /// True once an evaluation has written its results.
    pub fn is_evaluated(&self) -> bool {
        self.risk_score.is_some() && self.decision.is_some()
    }
}

/// Error returned when a tier or decision code is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code '{code}'")]
pub struct ParseCodeError {
    pub kind: &'static str,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn code(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(ParseCodeError {
                kind: "risk level",
                code: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approve,
    ManualReview,
    Reject,
}

impl Decision {
    pub fn code(self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::ManualReview => "MANUAL_REVIEW",
            Decision::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Decision {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "APPROVE" => Ok(Decision::Approve),
            "MANUAL_REVIEW" => Ok(Decision::ManualReview),
            "REJECT" => Ok(Decision::Reject),
            other => Err(ParseCodeError {
                kind: "decision",
                code: other.to_string(),
            }),
        }
    }
}
