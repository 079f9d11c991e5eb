//! Effective configuration command

use contextifyer_core::{config::default_config_path, error::Result, Settings};
use std::path::Path;

/// Print the merged settings with secrets masked
pub fn handle(settings: &Settings, config_path: Option<&Path>) -> Result<()> {
    let source = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    println!("# Effective settings (file: {})", source.display());
    print!("{}", settings.to_redacted_toml()?);
    Ok(())
}
