use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::{Applicant, LoanApplication};

/// One applicant plus the loan they are asking for.
///
/// Example YAML:
/// ```yaml
/// applicant:
///   name: Jordan Lee
///   age: 35
///   annual_income: "60000"
///   credit_score: 720
///   employment_status: EMPLOYED
///   existing_debt: "1000"
/// application:
///   loan_amount: "20000"
///   loan_purpose: HOME_IMPROVEMENT
///   requested_term_months: 36
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    pub applicant: Applicant,
    pub application: LoanApplication,
}

/// Parse a case file. `.json` files are read as JSON, anything else as YAML.
pub fn load_case(path: &Path) -> Result<CaseFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse case file: invalid JSON in {}", path.display())
        })
    } else {
        serde_saphyr::from_str(&content).with_context(|| {
            format!("Failed to parse case file: invalid YAML in {}", path.display())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::env;

    const CASE_YAML: &str = r#"
applicant:
  name: Jordan Lee
  age: 35
  annual_income: "60000"
  credit_score: 720
  employment_status: EMPLOYED
  existing_debt: "1000"
application:
  loan_amount: "20000"
  loan_purpose: HOME_IMPROVEMENT
  requested_term_months: 36
"#;

    #[test]
    fn test_parse_yaml_case() {
        let case: CaseFile = serde_saphyr::from_str(CASE_YAML).unwrap();
        assert_eq!(case.applicant.name.as_deref(), Some("Jordan Lee"));
        assert_eq!(case.applicant.annual_income, dec!(60000));
        assert_eq!(case.application.loan_amount, dec!(20000));
        assert!(!case.application.is_evaluated());
    }

    #[test]
    fn test_load_json_case() {
        let path = env::temp_dir().join("loan_risk_test_case.json");
        let json = r#"{
  "applicant": {
    "age": 41,
    "annual_income": "85000.50",
    "credit_score": 680,
    "employment_status": "SELF_EMPLOYED",
    "existing_debt": "12000"
  },
  "application": {
    "loan_amount": "30000",
    "loan_purpose": "BUSINESS_EXPANSION",
    "requested_term_months": 60
  }
}"#;
        fs::write(&path, json).unwrap();

        let case = load_case(&path).unwrap();
        assert!(case.applicant.name.is_none());
        assert_eq!(case.applicant.annual_income, dec!(85000.50));
        assert_eq!(case.application.requested_term_months, 60);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_yaml_case_from_disk() {
        let path = env::temp_dir().join("loan_risk_test_case.yaml");
        fs::write(&path, CASE_YAML).unwrap();

        let case = load_case(&path).unwrap();
        assert_eq!(case.applicant.credit_score, 720);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = CASE_YAML.replace("credit_score: 720", "credit_score: 720\n  salary: 1");
        assert!(serde_saphyr::from_str::<CaseFile>(&yaml).is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = env::temp_dir().join("loan_risk_test_no_such_case.yaml");
        let err = load_case(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read case file"));
    }
}
