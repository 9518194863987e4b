use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "licensescan")]
#[command(about = "Audit resolved dependencies against a denylist of forbidden licenses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the dependency graph for forbidden licenses
    Audit(AuditArgs),
    /// Write a starter licensescan.toml
    Init {
        /// Policy preset
        preset: InitPreset,
    },
    /// Show or validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file, including every pattern
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Args)]
pub struct AuditArgs {
    /// Dependency graph file (default: search for dependency-graph.toml)
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Resolve licenses from POMs in this local Maven repository instead of the graph file
    #[arg(short, long)]
    pub repository: Option<PathBuf>,

    /// Configuration file (default: ./licensescan.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Forbidden license, literal or 'regex:' pattern; replaces the configured list
    #[arg(long = "forbid", value_name = "PATTERN")]
    pub forbid: Vec<String>,

    /// Exit with code 1 when forbidden licenses are found
    #[arg(long)]
    pub fail_on_violation: bool,

    /// List licenses of every artifact in the build log
    #[arg(long)]
    pub print_licenses: bool,

    /// Directory receiving license-scan-results/
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long)]
    pub no_reports: bool,
}

#[derive(Clone, ValueEnum)]
pub enum InitPreset {
    Permissive,
    Copyleft,
    Strict,
}
