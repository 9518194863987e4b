use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dependency::ProjectInfo;
use crate::policy::{LicenseMap, ViolationMap};

pub mod html;

pub const REPORT_SUBDIR: &str = "license-scan-results";
pub const JSON_REPORT_FILE: &str = "license-scan-report.json";
pub const HTML_REPORT_FILE: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Html,
}

/// Payload of the JSON report
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResults {
    pub license_map: LicenseMap,
    pub violations_map: ViolationMap,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub license_scan_results: ScanResults,
}

/// Writes report files under `<report_dir>/license-scan-results/`
pub struct ReportBuilder<'a> {
    project: &'a ProjectInfo,
    results_dir: PathBuf,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(project: &'a ProjectInfo, report_dir: &Path) -> Self {
        Self {
            project,
            results_dir: report_dir.join(REPORT_SUBDIR),
        }
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    fn prepare_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.results_dir)
            .with_context(|| format!("Failed to create {}", self.results_dir.display()))
    }

    pub fn build_json_report(&self, licenses: &LicenseMap, violations: &ViolationMap) -> Result<PathBuf> {
        self.prepare_dir()?;

        let report = JsonReport {
            license_scan_results: ScanResults {
                license_map: licenses.clone(),
                violations_map: violations.clone(),
            },
        };
        let content = serde_json::to_string_pretty(&report)?;

        let path = self.results_dir.join(JSON_REPORT_FILE);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn build_html_report(&self, licenses: &LicenseMap, violations: &ViolationMap) -> Result<PathBuf> {
        self.prepare_dir()?;

        let content = html::render(self.project, licenses, violations)?;

        let path = self.results_dir.join(HTML_REPORT_FILE);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write every requested report, returning the written paths in order
    pub fn build(
        &self,
        formats: &[ReportFormat],
        licenses: &LicenseMap,
        violations: &ViolationMap,
    ) -> Result<Vec<(ReportFormat, PathBuf)>> {
        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            let path = match format {
                ReportFormat::Json => self.build_json_report(licenses, violations)?,
                ReportFormat::Html => self.build_html_report(licenses, violations)?,
            };
            written.push((*format, path));
        }
        Ok(written)
    }
}
