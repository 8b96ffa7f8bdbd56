use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::{ensure_parent_dir, Config};

const HEADER: &str = "\
# loan-risk configuration
#
# Each rule compares one field against rule_value using an operator.
# Fields: creditScore, age, annualIncome, existingDebt, employmentStatus,
#         loanAmount, loanPurpose, requestedTermMonths, debtToIncomeRatio,
#         loanToIncomeRatio, monthlyLoanPayment, totalDebtRatio,
#         loanAmountPerTerm, ageToTermRatio
# Operators: EQUALS, NOT_EQUALS, GREATER_THAN, GREATER_THAN_OR_EQUAL,
#            LESS_THAN, LESS_THAN_OR_EQUAL, CONTAINS, NOT_CONTAINS,
#            STARTS_WITH, ENDS_WITH
# Score <= 30 approves, 31-60 goes to manual review, > 60 rejects.

";

/// Write the starter config to `path`.
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic, so an interrupted run never leaves a truncated config behind.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_write_then_load_default_config() {
        let path = env::temp_dir().join("loan_risk_test_init.yaml");
        let _ = std::fs::remove_file(&path);

        write_default_config(&path, false).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, Config::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let path = env::temp_dir().join("loan_risk_test_init_existing.yaml");
        std::fs::write(&path, "rules: []\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "rules: []\n");

        write_default_config(&path, true).unwrap();
        assert_eq!(load_config(&path).unwrap().rules.len(), 11);

        let _ = std::fs::remove_file(&path);
    }
}
