use tracing::{info, warn};

use crate::dependency::ProjectInfo;
use crate::policy::{ForbiddenPatterns, LicenseMap, ViolationMap};

const RULE: &str = "-----------------------";

pub fn format_project_header(project: &ProjectInfo, artifact_count: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Found project: {}:{}:{}\n",
        project.group, project.artifact, project.version
    ));
    output.push_str(&format!(" - artifactId  : {}\n", project.artifact));
    output.push_str(&format!(" - groupId     : {}\n", project.group));
    output.push_str(&format!(" - name        : {}\n", project.display_name()));
    output.push_str(&format!(
        " - description : {}\n",
        project.description.as_deref().unwrap_or("")
    ));
    output.push_str(&format!(" - version     : {}\n", project.version));
    output.push_str(&format!(" - artifacts   : {}\n", artifact_count));
    output
}

/// One section listing artifacts, optionally with their licenses
pub fn format_dependency_section(title: &str, licenses: &LicenseMap, print_licenses: bool) -> String {
    let mut output = String::new();
    output.push('\n');
    output.push_str(title);
    output.push('\n');
    output.push_str(RULE);
    output.push('\n');

    for (label, artifact_licenses) in licenses {
        output.push_str(&format!(" - artifact {}\n", label));
        if print_licenses {
            if artifact_licenses.is_empty() {
                output.push_str("   with license: n/a\n");
            }
            for license in artifact_licenses {
                output.push_str(&format!("   with license: {}\n", license));
            }
        }
    }

    output
}

/// Per-pattern violation counts; empty when no denylist is configured
pub fn format_violation_section(violations: &ViolationMap, patterns: &ForbiddenPatterns) -> String {
    if patterns.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    output.push('\n');
    output.push_str("FORBIDDEN LICENSES\n");
    output.push_str(RULE);
    output.push('\n');
    output.push_str(
        "NOTE: For artifacts with multiple licenses, violation will be marked only when all licenses match the denylist.\n",
    );

    let mut reported = std::collections::HashSet::new();
    for entry in patterns.entries() {
        if !reported.insert(entry) {
            continue;
        }
        let artifacts = violations.get(entry).unwrap_or_default();
        output.push_str(&format!(
            "Found {} violations for license '{}':\n",
            artifacts.len(),
            entry
        ));
        for artifact in artifacts {
            output.push_str(&format!(" - {}\n", artifact));
        }
    }

    output
}

pub fn log_info(block: &str) {
    for line in block.lines() {
        info!("{}", line);
    }
}

pub fn log_warn(block: &str) {
    for line in block.lines() {
        warn!("{}", line);
    }
}
