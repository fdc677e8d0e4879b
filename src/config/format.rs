//! On-disk formats of the descriptor.
//!
//! | Extension      | Format |
//! |----------------|--------|
//! | `.toml`, other | TOML   |
//! | `.json`        | JSON   |
//!
//! Both formats are parsed into a `serde_json::Value` first, so the shape
//! checker and the typed deserializer see the same document.

use super::ConfigError;
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    /// Parse text into a generic document.
    pub fn parse(self, content: &str) -> Result<serde_json::Value, ConfigError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse(self, e.to_string())),
            Self::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::Parse(self, e.to_string()))
            }
        }
    }

    /// Serialize a value in this format.
    pub fn serialize<T: Serialize>(self, value: &T) -> anyhow::Result<String> {
        let mut out = match self {
            Self::Toml => toml::to_string_pretty(value)?,
            Self::Json => serde_json::to_string_pretty(value)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
