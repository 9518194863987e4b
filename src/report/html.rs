use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use crate::dependency::ProjectInfo;
use crate::policy::{LicenseMap, ViolationMap};

const REPORT_TEMPLATE_NAME: &str = "report";

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>License Scan Report - {{project_name}}</title>
  <style>
    body { font-family: sans-serif; margin: 2em; }
    table { border-collapse: collapse; margin-bottom: 2em; }
    th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; vertical-align: top; }
    th { background: #eee; }
    .violation { color: #b00020; font-weight: bold; }
    .muted { color: #777; }
  </style>
</head>
<body>
  <h1>License Scan Report</h1>
  <ul>
    <li>Project: {{project_name}}</li>
    <li>Version: {{project_version}}</li>
    <li>Report date: {{report_date}}</li>
    <li>licensescan version: {{tool_version}}</li>
  </ul>

  <h2>Violations</h2>
  <p class="muted">For artifacts with multiple licenses, a violation is recorded only when all licenses match the denylist.</p>
  <table>
    <tr><th>Forbidden license</th><th>Count</th><th>Artifacts</th></tr>
    {{#each violations}}
    <tr>
      <td>{{pattern}}</td>
      <td{{#if artifacts}} class="violation"{{/if}}>{{count}}</td>
      <td>{{#each artifacts}}{{this}}<br>{{else}}<span class="muted">none</span>{{/each}}</td>
    </tr>
    {{/each}}
  </table>

  <h2>Licenses</h2>
  <table>
    <tr><th>Artifact</th><th>Licenses</th></tr>
    {{#each licenses}}
    <tr>
      <td>{{artifact}}</td>
      <td>{{#each licenses}}{{this}}<br>{{else}}<span class="muted">n/a</span>{{/each}}</td>
    </tr>
    {{/each}}
  </table>
</body>
</html>
"#;

#[derive(Serialize)]
struct LicenseRow<'a> {
    artifact: &'a str,
    licenses: &'a [String],
}

#[derive(Serialize)]
struct ViolationRow<'a> {
    pattern: &'a str,
    count: usize,
    artifacts: &'a [String],
}

#[derive(Serialize)]
struct ReportContext<'a> {
    project_name: &'a str,
    project_version: &'a str,
    report_date: String,
    tool_version: &'static str,
    licenses: Vec<LicenseRow<'a>>,
    violations: Vec<ViolationRow<'a>>,
}

/// Render the HTML report; all values are HTML-escaped
pub fn render(project: &ProjectInfo, licenses: &LicenseMap, violations: &ViolationMap) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Invalid HTML report template: {}", e))?;

    let context = ReportContext {
        project_name: project.display_name(),
        project_version: &project.version,
        report_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        tool_version: env!("CARGO_PKG_VERSION"),
        licenses: licenses
            .iter()
            .map(|(artifact, licenses)| LicenseRow { artifact, licenses })
            .collect(),
        violations: violations
            .iter()
            .map(|(pattern, artifacts)| ViolationRow {
                pattern,
                count: artifacts.len(),
                artifacts,
            })
            .collect(),
    };

    handlebars
        .render(REPORT_TEMPLATE_NAME, &context)
        .map_err(|e| anyhow::anyhow!("Failed to render HTML report: {}", e))
}
