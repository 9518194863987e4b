use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{Config, CONFIG_FILE};

#[derive(Debug, Clone, Copy)]
pub enum InitPreset {
    /// Report only, nothing forbidden
    Permissive,
    /// Forbid strong copyleft licenses
    Copyleft,
    /// Forbid copyleft, weak copyleft and undeclared licenses
    Strict,
}

pub fn generate_config(preset: InitPreset) -> Result<()> {
    generate_config_at_path(CONFIG_FILE, preset)
}

pub fn generate_config_at_path<P: AsRef<Path>>(path: P, preset: InitPreset) -> Result<()> {
    let config_path = path.as_ref();

    if config_path.exists() {
        return Err(anyhow::anyhow!(
            "{} already exists. Remove it first or edit it by hand.",
            config_path.display()
        ));
    }

    let content = get_preset_config(preset);

    // presets must stay loadable and compilable
    let config: Config = toml::from_str(content).context("Invalid preset config format")?;
    config.forbidden_patterns()?;

    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

fn get_preset_config(preset: InitPreset) -> &'static str {
    match preset {
        InitPreset::Permissive => PERMISSIVE_PRESET,
        InitPreset::Copyleft => COPYLEFT_PRESET,
        InitPreset::Strict => STRICT_PRESET,
    }
}

const PERMISSIVE_PRESET: &str = r#"# licensescan configuration (permissive preset)
# Lists licenses without failing the build.
forbidden_licenses = []
fail_on_violation = false
print_licenses = true
scopes = ["compile", "runtime"]
report_dir = "target"
reports = ["json", "html"]
"#;

const COPYLEFT_PRESET: &str = r#"# licensescan configuration (copyleft preset)
# Entries are literal license names (case-insensitive) or 'regex:' patterns.
forbidden_licenses = [
    'regex:\bA?GPL[- ]?v?[23]',
    'regex:^(The )?GNU (Affero )?General Public License',
]
fail_on_violation = true
print_licenses = false
scopes = ["compile", "runtime"]
report_dir = "target"
reports = ["json", "html"]
"#;

const STRICT_PRESET: &str = r#"# licensescan configuration (strict preset)
# "NONE" flags artifacts that declare no license at all.
forbidden_licenses = [
    'regex:\bA?GPL[- ]?v?[23]',
    'regex:^(The )?GNU (Affero |Lesser |Library )?General Public License',
    'regex:\bLGPL',
    'regex:Mozilla Public License',
    'regex:Eclipse Public License',
    'regex:\bCDDL\b|Common Development and Distribution License',
    "NONE",
]
fail_on_violation = true
print_licenses = true
scopes = ["compile", "runtime"]
report_dir = "target"
reports = ["json", "html"]
"#;
