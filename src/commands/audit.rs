use anyhow::Result;
use tracing::{debug, error, info};

use crate::cli::AuditArgs;
use licensescan::audit::run_audit;
use licensescan::config::{load_config, load_config_from};
use licensescan::dependency::graph::DEFAULT_GRAPH_FILE;
use licensescan::dependency::DependencyGraph;
use licensescan::license::{DeclaredLicenses, LicenseResolver, PomRepository};
use licensescan::output::{
    format_dependency_section, format_project_header, format_violation_section, log_info, log_warn,
};
use licensescan::report::{ReportBuilder, ReportFormat};

pub fn handle_audit(args: AuditArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    // CLI arguments override config values
    if !args.forbid.is_empty() {
        config.forbidden_licenses = args.forbid.clone();
    }
    let fail_on_violation = args.fail_on_violation || config.fail_on_violation.unwrap_or(false);
    let print_licenses = args.print_licenses || config.print_licenses.unwrap_or(false);
    let report_dir = args.report_dir.clone().unwrap_or_else(|| config.report_dir());

    // Fail fast on malformed patterns before touching the graph
    let patterns = config.forbidden_patterns()?;

    let graph_path = match &args.graph {
        Some(path) => path.clone(),
        None => DependencyGraph::find().ok_or_else(|| {
            anyhow::anyhow!(
                "No {} found in current directory or parent directories",
                DEFAULT_GRAPH_FILE
            )
        })?,
    };
    debug!("Using dependency graph {}", graph_path.display());
    let graph = DependencyGraph::load(&graph_path)?;

    let resolver: Box<dyn LicenseResolver> = match &args.repository {
        Some(repository) => {
            debug!("Resolving licenses from POM repository {}", repository.display());
            Box::new(PomRepository::new(repository))
        }
        None => Box::new(DeclaredLicenses::from_graph(&graph)),
    };

    let outcome = run_audit(&graph, resolver.as_ref(), &patterns, &config.scopes())?;

    log_info(&format_project_header(&graph.project, outcome.licenses.len()));
    log_info(&format_dependency_section("BASE DEPENDENCIES", &outcome.direct, print_licenses));
    log_info(&format_dependency_section(
        "TRANSITIVE DEPENDENCIES",
        &outcome.transitive,
        print_licenses,
    ));

    if !args.no_reports {
        let builder = ReportBuilder::new(&graph.project, &report_dir);
        let written = builder.build(&config.reports(), &outcome.licenses, &outcome.violations)?;
        for (format, path) in written {
            let kind = match format {
                ReportFormat::Json => "JSON",
                ReportFormat::Html => "HTML",
            };
            info!("{} report generated: {}", kind, path.display());
        }
    }

    log_warn(&format_violation_section(&outcome.violations, &patterns));

    let unlicensed = outcome.violations.unlicensed().len();
    if unlicensed > 0 {
        info!("{} artifacts declare no license", unlicensed);
    }

    if outcome.violations.has_forbidden(&patterns) {
        let total = outcome.violations.forbidden_count(&patterns);
        if fail_on_violation {
            error!("Failing build: {} forbidden license violations", total);
            std::process::exit(1);
        }
        info!("{} forbidden license violations found", total);
    }

    Ok(())
}
