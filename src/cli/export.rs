//! Engine config export command.

use super::ExportArgs;
use crate::config::{ConfigDescriptor, ConfigError};
use crate::export::{EXPORT_FILE, render_js, write_js};
use crate::log;
use anyhow::Result;
use std::path::PathBuf;

/// Write `tailwind.config.js` for the style engine.
///
/// A config with validation errors is never exported; warnings are printed.
pub fn export_config(config: &ConfigDescriptor, args: &ExportArgs) -> Result<()> {
    let diag = config.validate();
    diag.print_hints_and_warnings();
    diag.into_result().map_err(ConfigError::Diagnostics)?;

    if args.stdout {
        print!("{}", render_js(config));
        return Ok(());
    }

    let path = output_path(config, args);
    write_js(config, &path)?;
    log!("export"; "wrote {}", path.display());
    Ok(())
}

/// `--output`, or `tailwind.config.js` next to the config file.
fn output_path(config: &ConfigDescriptor, args: &ExportArgs) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| config.root().join(EXPORT_FILE))
}
