use serde::{Deserialize, Serialize};

use crate::model::Rule;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// log_level: info
/// rules:
///   - id: 1
///     name: Poor credit score
///     field: creditScore
///     operator: LESS_THAN
///     rule_value: "580"
///     risk_points: 40
///     priority: 1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// tracing filter used when RUST_LOG is not set (default: "info")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Scoring rules, evaluated in ascending priority order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            rules: default_rules(),
        }
    }
}

/// Starter rule set written by `init`.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(1, "Poor credit score", "creditScore", "LESS_THAN", "580", 40, 1),
        Rule::new(2, "Fair credit score", "creditScore", "LESS_THAN", "670", 20, 2),
        Rule::new(
            3,
            "Excellent credit score",
            "creditScore",
            "GREATER_THAN_OR_EQUAL",
            "750",
            -10,
            3,
        ),
        Rule::new(
            4,
            "High debt-to-income ratio",
            "debtToIncomeRatio",
            "GREATER_THAN",
            "0.43",
            25,
            4,
        ),
        Rule::new(5, "High total debt ratio", "totalDebtRatio", "GREATER_THAN", "0.50", 20, 5),
        Rule::new(
            6,
            "High loan-to-income ratio",
            "loanToIncomeRatio",
            "GREATER_THAN",
            "0.50",
            15,
            6,
        ),
        Rule::new(7, "Unemployed applicant", "employmentStatus", "EQUALS", "UNEMPLOYED", 35, 7),
        Rule::new(
            8,
            "Self-employed applicant",
            "employmentStatus",
            "EQUALS",
            "SELF_EMPLOYED",
            10,
            8,
        ),
        Rule::new(9, "Long loan term", "requestedTermMonths", "GREATER_THAN", "240", 10, 9),
        Rule::new(10, "Term outlasts working years", "ageToTermRatio", "LESS_THAN", "2.00", 5, 10),
        Rule::new(11, "Business purpose", "loanPurpose", "CONTAINS", "BUSINESS", 10, 11),
    ]
}
