use anyhow::Result;
use tracing::{error, info};

use licensescan::config::load_config;

pub fn handle_config(show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        error!("Use --show or --validate");
        std::process::exit(1);
    }

    if show {
        match load_config() {
            Ok(config) => {
                if !quiet {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
            }
            Err(e) => {
                error!("Error loading configuration: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    if validate {
        // loading alone does not compile the patterns
        match load_config().and_then(|config| config.forbidden_patterns()) {
            Ok(patterns) => info!(
                "Configuration is valid ({} forbidden license patterns)",
                patterns.len()
            ),
            Err(e) => {
                error!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
