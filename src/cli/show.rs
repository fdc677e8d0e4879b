//! Print the normalized config.

use crate::config::{ConfigDescriptor, ConfigFormat};
use anyhow::Result;

pub fn show_config(config: &ConfigDescriptor, format: ConfigFormat) -> Result<()> {
    print!("{}", config.to_string(format)?);
    Ok(())
}
