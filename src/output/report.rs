use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::evaluation::EvaluationResult;
use crate::model::{Applicant, LoanApplication};

pub const REPORT_VERSION: u32 = 1;

/// Persisted record of one evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub applicant: Applicant,
    /// Application with its result fields filled in
    pub application: LoanApplication,
    pub result: EvaluationResult,
}

impl Report {
    pub fn new(
        applicant: Applicant,
        application: LoanApplication,
        result: EvaluationResult,
    ) -> Self {
        Self {
            version: REPORT_VERSION,
            generated_at: Utc::now(),
            applicant,
            application,
            result,
        }
    }
}

/// Render a report as pretty JSON.
pub fn to_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Save a report to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_report(path: &Path, report: &Report) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}

/// Load a report written by [`save_report`].
pub fn load_report(path: &Path) -> Result<Report> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open report file at {}", path.display()))?;

    let report: Report = serde_json::from_reader(file).context("Failed to load report")?;

    if report.version != REPORT_VERSION {
        anyhow::bail!("Unsupported report version: {}", report.version);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::LoanEvaluator;
    use crate::model::Rule;
    use rust_decimal_macros::dec;
    use std::env;

    fn sample_report() -> Report {
        let applicant = Applicant {
            name: Some("Jordan Lee".to_string()),
            age: 35,
            annual_income: dec!(60000),
            credit_score: 720,
            employment_status: "EMPLOYED".to_string(),
            existing_debt: dec!(1000),
        };
        let mut application = LoanApplication::new(dec!(20000), "HOME_IMPROVEMENT", 36);
        let rules = vec![Rule::new(
            1,
            "Good credit",
            "creditScore",
            "GREATER_THAN_OR_EQUAL",
            "700",
            -20,
            1,
        )];

        let result = LoanEvaluator::default()
            .evaluate(&mut application, &applicant, &rules)
            .unwrap();
        Report::new(applicant, application, result)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = env::temp_dir().join("loan_risk_test_report.json");
        let _ = std::fs::remove_file(&path);

        let report = sample_report();
        save_report(&path, &report).unwrap();

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.application.risk_score, Some(-20));
        assert!(loaded.application.is_evaluated());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["result"]["decision"], "APPROVE");
        assert_eq!(value["result"]["risk_level"], "LOW");
        assert_eq!(value["result"]["derived_fields"]["debtToIncomeRatio"], "0.20");
    }

    #[test]
    fn test_unsupported_version() {
        let path = env::temp_dir().join("loan_risk_test_report_version.json");
        let mut report = sample_report();
        report.version = 99;
        save_report(&path, &report).unwrap();

        let err = load_report(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported report version"));

        let _ = std::fs::remove_file(&path);
    }
}
