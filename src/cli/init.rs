//! Starter config generation.

use crate::config::{ConfigDescriptor, ConfigFormat};
use crate::log;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a starter config named `file_name` into `dir`.
///
/// Refuses to overwrite an existing file.
pub fn init_config(dir: &Path, file_name: &Path) -> Result<PathBuf> {
    let path = dir.join(file_name);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;

    let content = starter_content(ConfigFormat::from_path(&path))?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "created {}", path.display());
    Ok(path)
}

/// Starter text in `format`.
///
/// JSON has no comments, so the commented TOML template is parsed and
/// re-emitted.
fn starter_content(format: ConfigFormat) -> Result<String> {
    let template = ConfigDescriptor::starter_template();
    match format {
        ConfigFormat::Toml => Ok(template),
        ConfigFormat::Json => ConfigDescriptor::parse_str(&template, ConfigFormat::Toml)?
            .to_string(ConfigFormat::Json),
    }
}
