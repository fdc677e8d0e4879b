//! Style engine configuration descriptor.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Descriptor field definitions
//! │   ├── content    # content globs
//! │   ├── plugins    # plugin handles
//! │   └── theme      # [theme.extend]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Config handle with atomic reload
//! ├── format         # TOML / JSON
//! ├── shape          # Field-path aware shape check
//! └── mod.rs         # ConfigDescriptor (this file)
//! ```
//!
//! # Loading
//!
//! ```text
//! text ─▶ format::parse ─▶ shape::check ─▶ serde (+ ignored fields) ─▶ ConfigDescriptor
//! ```
//!
//! Loading fails on malformed input only. Everything that degrades output
//! without preventing generation is reported by [`ConfigDescriptor::validate`].

mod format;
pub mod section;
mod shape;
pub mod types;
mod util;

pub use format::ConfigFormat;
pub use section::{PluginHandle, ThemeConfig, ThemeExtensions, TokenValue};
pub use types::{CONFIG, ConfigDiagnostics, ConfigError, ConfigHandle, FieldPath, cfg};
pub use util::find_config_file;

use crate::log;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// root configuration
// ============================================================================

/// Declarative configuration handed to the style engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[config(section = "")]
pub struct ConfigDescriptor {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    #[config(skip)]
    pub config_path: PathBuf,

    /// Source files scanned for utility classes.
    #[config(default = "[\"./templates/**/*.html\", \"./static/**/*.js\"]")]
    pub content: Vec<String>,

    /// Plugin modules loaded by the engine.
    #[serde(default)]
    pub plugins: Vec<PluginHandle>,

    /// Additive theme customizations.
    #[serde(default, skip_serializing_if = "ThemeConfig::is_empty")]
    #[config(hidden)]
    pub theme: ThemeConfig,
}

impl ConfigDescriptor {
    /// Load the descriptor from a file.
    ///
    /// The format follows the file extension (`.json`, otherwise TOML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_path_content(path, &content)
    }

    /// Build the descriptor from text already read from `path`.
    pub fn from_path_content(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let (mut config, ignored) = Self::parse_with_ignored(content, ConfigFormat::from_path(path))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = crate::utils::path::normalize_path(path);
        Ok(config)
    }

    /// Parse the descriptor from text.
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Self::parse_with_ignored(content, format).map(|(config, _)| config)
    }

    /// Parse text, collecting the paths of unknown fields.
    fn parse_with_ignored(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let document = format.parse(content)?;
        shape::check(&document)?;

        let mut ignored = Vec::new();
        let config = serde_ignored::deserialize(document, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(|e: serde_json::Error| ConfigError::malformed(FieldPath::ROOT, e.to_string()))?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Serialize the descriptor back to its declarative form.
    pub fn to_string(&self, format: ConfigFormat) -> anyhow::Result<String> {
        format.serialize(self)
    }

    /// Content globs, in declaration order.
    pub fn content_globs(&self) -> &[String] {
        &self.content
    }

    pub fn theme_extensions(&self) -> &ThemeExtensions {
        &self.theme.extend
    }

    pub fn plugins(&self) -> &[PluginHandle] {
        &self.plugins
    }

    /// Directory containing the config file.
    pub fn root(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Commented starter config written by `init`.
    pub fn starter_template() -> String {
        let mut out = format!(
            "# {} configuration file (v{})\n\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        out.push_str(&Self::template());
        out.push_str(
            "\n# Additive theme tokens, merged on top of the engine's base theme.\n\
             # [theme.extend.maxWidth]\n\
             # 8xl = \"90rem\"\n",
        );
        out
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check the descriptor's invariants.
    ///
    /// Collects every violation. Never resolves plugins and never touches the
    /// file system.
    pub fn validate(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        section::content::validate(&self.content, &mut diag);
        self.theme.validate(&mut diag);
        section::plugins::validate(&self.plugins, &mut diag);

        diag
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse TOML with a default `content` entry.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> ConfigDescriptor {
    let config = format!("content = [\"a/*.html\"]\n{extra}");
    let (parsed, ignored) = ConfigDescriptor::parse_with_ignored(&config, ConfigFormat::Toml).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
