use anyhow::Result;
use tracing::info;

use crate::cli::InitPreset;
use licensescan::config::CONFIG_FILE;
use licensescan::init;

pub fn handle_init(preset: InitPreset) -> Result<()> {
    let init_preset = match preset {
        InitPreset::Permissive => init::InitPreset::Permissive,
        InitPreset::Copyleft => init::InitPreset::Copyleft,
        InitPreset::Strict => init::InitPreset::Strict,
    };

    init::generate_config(init_preset)?;
    info!("Wrote {}", CONFIG_FILE);
    Ok(())
}
