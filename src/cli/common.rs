//! Shared helpers for commands.

use super::Cli;
use crate::config::{CONFIG, ConfigDescriptor, ConfigError, find_config_file};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;

/// Locate the config file named by `--config`.
pub fn resolve_config_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;

    match find_config_file(&cli.config, &cwd) {
        Some(path) => Ok(path),
        None => bail!(
            "config file '{}' not found. Run '{} init' to create one.",
            cli.config.display(),
            env!("CARGO_PKG_NAME")
        ),
    }
}

/// Locate and load the config into the process-wide handle.
pub fn load_config(cli: &Cli) -> Result<Arc<ConfigDescriptor>> {
    let path = resolve_config_path(cli)?;
    crate::debug!("config"; "loading {}", path.display());
    CONFIG.init(&path).inspect_err(|e| {
        if let Some(field) = e.downcast_ref::<ConfigError>().and_then(ConfigError::field) {
            crate::log!("hint"; "fix `{}` in {}", field.as_str(), path.display());
        }
    })
}
