//! Configuration error types.

use super::FieldPath;
use crate::config::ConfigFormat;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{0} parsing error: {1}")]
    Parse(ConfigFormat, String),

    /// The document does not have the descriptor's shape.
    #[error("malformed config at {field}: {message}")]
    Malformed { field: FieldPath, message: String },

    /// A plugin handle did not resolve to an installed module.
    #[error("plugin `{handle}` not found (searched {})", searched.display())]
    PluginResolution { handle: String, searched: PathBuf },

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

impl ConfigError {
    pub fn malformed(field: FieldPath, message: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            message: message.into(),
        }
    }

    /// Offending field for shape errors.
    pub fn field(&self) -> Option<&FieldPath> {
        match self {
            Self::Malformed { field, .. } => Some(field),
            _ => None,
        }
    }
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// How bad a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The external engine will reject the config.
    Error,
    /// Generation proceeds with reduced effect.
    Warning,
}

/// A single configuration diagnostic
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    /// Config field path (e.g., "theme.extend.maxWidth")
    pub field: FieldPath,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
    pub severity: Severity,
}

impl ConfigDiagnostic {
    pub fn new(field: FieldPath, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field,
            message: message.into(),
            hint: None,
            severity,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field.as_str().cyan(),
            "]".dimmed()
        )?;
        match self.severity {
            Severity::Error => write!(f, "{} {}", "→".red(), self.message)?,
            Severity::Warning => write!(f, "{} {}", "→".yellow(), self.message)?,
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Result of `validate()`: errors, warnings and informational hints.
///
/// Errors and warnings are violations; hints are not.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<ConfigDiagnostic>,
    hints: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(field, message, Severity::Error).with_hint(hint));
    }

    /// Add a `ConfigValidationWarning` with a hint.
    pub fn warn_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.warnings
            .push(ConfigDiagnostic::new(field, message, Severity::Warning).with_hint(hint));
    }

    /// Add an informational hint (not a violation).
    pub fn hint(&mut self, field: FieldPath, message: impl Into<String>) {
        self.hints.push((field, message.into()));
    }

    /// Print collected warnings and hints in a grouped format.
    pub fn print_hints_and_warnings(&self) {
        if !self.warnings.is_empty() {
            crate::log!(
                "warning";
                "{} may reduce the generated output:",
                crate::utils::plural_count(self.warnings.len(), "setting")
            );
            for warning in &self.warnings {
                eprintln!("{warning}");
            }
        }

        for (field, message) in self.hints() {
            crate::log!("hint"; "[{}] {}", field.as_str(), message);
        }
    }

    /// Turn every warning into an error (`--strict`).
    pub fn promote_warnings(&mut self) {
        for mut warning in self.warnings.drain(..) {
            warning.severity = Severity::Error;
            self.errors.push(warning);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of violations (errors + warnings).
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// No violations. Hints do not count.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    pub fn hints(&self) -> &[(FieldPath, String)] {
        &self.hints
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("tailwind.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("tailwind.toml"));

        let malformed = ConfigError::malformed(FieldPath::new("content"), "expected a sequence");
        let display = format!("{malformed}");
        assert!(display.contains("content"));
        assert!(display.contains("expected a sequence"));
        assert_eq!(malformed.field().map(FieldPath::as_str), Some("content"));
    }

    #[test]
    fn test_plugin_resolution_names_handle() {
        let err = ConfigError::PluginResolution {
            handle: "flowbite/plugin".into(),
            searched: PathBuf::from("/site/node_modules"),
        };
        let display = format!("{err}");
        assert!(display.contains("flowbite/plugin"));
        assert!(display.contains("node_modules"));
    }

    #[test]
    fn test_hints_are_not_violations() {
        let mut diag = ConfigDiagnostics::new();
        diag.hint(FieldPath::new("content[1]"), "duplicate glob");
        assert!(diag.is_empty());
        assert_eq!(diag.len(), 0);

        diag.warn_with_hint(FieldPath::new("content"), "no content globs", "add a glob");
        diag.error_with_hint(FieldPath::new("plugins[0]"), "blank handle", "remove it");
        assert_eq!(diag.len(), 2);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].severity, Severity::Error);
        assert_eq!(diag.warnings()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_warnings_do_not_fail_result() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn_with_hint(FieldPath::new("content"), "no content globs", "add a glob");
        assert!(diag.into_result().is_ok());
    }

    #[test]
    fn test_promote_warnings() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn_with_hint(FieldPath::new("content"), "no content globs", "add a glob");
        diag.hint(FieldPath::new("content[0]"), "matches no files");
        diag.promote_warnings();

        assert!(!diag.has_warnings());
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].severity, Severity::Error);
        assert_eq!(diag.hints().len(), 1);
        assert!(diag.into_result().is_err());
    }
}
