pub mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{default_rules, Config, DEFAULT_LOG_LEVEL};

use anyhow::{Context, Result};
use crate::engine::{validate_rules, OperatorRegistry};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/loan-risk/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("loan-risk"))
}

/// Get the default config file path (~/.config/loan-risk/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Resolve the config path: the explicit one if given, else the default.
pub fn resolve_config_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => get_config_path(),
    }
}

/// Load configuration from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `loan-risk init` to create one",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

/// Log the loaded config and warn about every rule-set problem.
///
/// Call once the tracing subscriber is installed. Returns the problems found.
pub fn log_loaded_config(
    path: &Path,
    config: &Config,
    registry: &OperatorRegistry,
) -> Vec<String> {
    tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded config");

    let problems = validate_rules(&config.rules, registry).err().unwrap_or_default();
    for problem in &problems {
        tracing::warn!("{}", problem);
    }
    problems
}
