use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::dependency::Scope;
use crate::policy::ForbiddenPatterns;
use crate::report::ReportFormat;

pub const CONFIG_FILE: &str = "licensescan.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ordered denylist; literal names or `regex:` patterns
    #[serde(default)]
    pub forbidden_licenses: Vec<String>,

    /// Deprecated spelling of `forbidden_licenses`
    #[serde(default, skip_serializing)]
    pub blacklisted_licenses: Option<Vec<String>>,

    /// Exit with an error when a forbidden license is found
    pub fail_on_violation: Option<bool>,

    /// Deprecated spelling of `fail_on_violation`
    #[serde(default, skip_serializing)]
    pub fail_build_on_blacklisted: Option<bool>,

    /// List each artifact's licenses in the build log
    pub print_licenses: Option<bool>,

    /// Dependency scopes to audit
    pub scopes: Option<Vec<Scope>>,

    /// Directory receiving `license-scan-results/`
    pub report_dir: Option<PathBuf>,

    /// Report files to write
    pub reports: Option<Vec<ReportFormat>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forbidden_licenses: Vec::new(),
            blacklisted_licenses: None,
            fail_on_violation: Some(false),
            fail_build_on_blacklisted: None,
            print_licenses: Some(false),
            scopes: Some(Scope::RUNTIME_CLASSPATH.to_vec()),
            report_dir: Some(PathBuf::from("target")),
            reports: Some(vec![ReportFormat::Json, ReportFormat::Html]),
        }
    }
}

impl Config {
    /// Fold deprecated keys into their replacements
    fn migrate_deprecated(&mut self) {
        if let Some(blacklisted) = self.blacklisted_licenses.take() {
            warn!("'blacklisted_licenses' is deprecated and will be removed, use 'forbidden_licenses' instead");
            if self.forbidden_licenses.is_empty() {
                self.forbidden_licenses = blacklisted;
            }
        }

        if let Some(fail) = self.fail_build_on_blacklisted.take() {
            warn!("'fail_build_on_blacklisted' is deprecated and will be removed, use 'fail_on_violation' instead");
            if self.fail_on_violation.is_none() {
                self.fail_on_violation = Some(fail);
            }
        }
    }

    /// Compile the denylist, failing on the first malformed pattern
    pub fn forbidden_patterns(&self) -> Result<ForbiddenPatterns> {
        ForbiddenPatterns::parse(&self.forbidden_licenses)
            .context("Invalid 'forbidden_licenses' configuration")
    }

    pub fn scopes(&self) -> Vec<Scope> {
        self.scopes
            .clone()
            .unwrap_or_else(|| Scope::RUNTIME_CLASSPATH.to_vec())
    }

    pub fn report_dir(&self) -> PathBuf {
        self.report_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("target"))
    }

    pub fn reports(&self) -> Vec<ReportFormat> {
        self.reports
            .clone()
            .unwrap_or_else(|| vec![ReportFormat::Json, ReportFormat::Html])
    }
}

/// Load `licensescan.toml` from the current directory
pub fn load_config() -> Result<Config> {
    let config_path = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE);

    load_config_from(&config_path)
}

/// Load a configuration file; a missing file yields the defaults
pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    config.migrate_deprecated();
    Ok(config)
}
