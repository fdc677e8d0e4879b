//! Config validation command.

use super::CheckArgs;
use crate::config::section::plugins::locate_all;
use crate::config::{ConfigDescriptor, ConfigDiagnostics, ConfigError};
use crate::log;
use crate::scan::scan_content;
use crate::utils::plural_count;
use anyhow::Result;

/// Validate the config and report every violation.
///
/// Warnings are printed and do not fail the command unless `--strict` is set.
pub fn check_config(config: &ConfigDescriptor, args: &CheckArgs) -> Result<()> {
    let mut diag = collect_diagnostics(config, args);
    if args.strict {
        diag.promote_warnings();
    }

    diag.print_hints_and_warnings();
    let summary = if diag.is_empty() {
        "valid".to_string()
    } else {
        format!("valid with {}", plural_count(diag.len(), "warning"))
    };
    diag.into_result().map_err(ConfigError::Diagnostics)?;

    log!("check"; "{} is {}", config.config_path.display(), summary);
    Ok(())
}

/// Invariant checks plus the optional file-system passes.
fn collect_diagnostics(config: &ConfigDescriptor, args: &CheckArgs) -> ConfigDiagnostics {
    let mut diag = config.validate();
    let root = config.root();

    if args.scan {
        let report = scan_content(root, config.content_globs());
        for (i, glob) in report.unmatched() {
            diag.hint(
                ConfigDescriptor::FIELDS.content.index(i),
                format!("`{}` matches no files", glob.glob),
            );
        }
        log!(
            "scan";
            "{} matched by {}",
            plural_count(report.files, "file"),
            plural_count(report.globs.len(), "glob")
        );
    }

    if args.resolve_plugins {
        for (i, err) in locate_all(config.plugins(), root) {
            diag.error_with_hint(
                ConfigDescriptor::FIELDS.plugins.index(i),
                err.to_string(),
                "install the package with your JS package manager",
            );
        }
    }

    diag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;
    use std::fs;
    use tempfile::TempDir;

    fn load(dir: &TempDir, content: &str) -> ConfigDescriptor {
        let path = dir.path().join("tailwind.toml");
        fs::write(&path, content).unwrap();
        ConfigDescriptor::load(&path).unwrap()
    }

    #[test]
    fn test_scan_adds_unmatched_hint() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/base.html"), "").unwrap();

        let config = load(&dir, "content = [\"./templates/*.html\", \"./static/*.js\"]\n");
        let args = CheckArgs {
            scan: true,
            ..CheckArgs::default()
        };
        let diag = collect_diagnostics(&config, &args);

        assert!(diag.is_empty());
        assert_eq!(diag.hints().len(), 1);
        assert_eq!(diag.hints()[0].0.as_str(), "content[1]");
    }

    #[test]
    fn test_resolve_plugins_reports_missing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/flowbite")).unwrap();

        let config = load(
            &dir,
            "content = [\"a/*.html\"]\nplugins = [\"flowbite/plugin\", \"@acme/brand\"]\n",
        );
        let args = CheckArgs {
            resolve_plugins: true,
            ..CheckArgs::default()
        };
        let diag = collect_diagnostics(&config, &args);

        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "plugins[1]");
        assert!(diag.errors()[0].message.contains("@acme/brand"));
    }

    #[test]
    fn test_plugins_not_resolved_by_default() {
        let config = ConfigDescriptor::parse_str(
            "content = [\"a/*.html\"]\nplugins = [\"@acme/brand\"]",
            ConfigFormat::Toml,
        )
        .unwrap();
        assert!(collect_diagnostics(&config, &CheckArgs::default()).is_empty());
    }

    #[test]
    fn test_strict_fails_on_warning() {
        let config = ConfigDescriptor::parse_str("content = []", ConfigFormat::Toml).unwrap();
        assert!(check_config(&config, &CheckArgs::default()).is_ok());

        let strict = CheckArgs {
            strict: true,
            ..CheckArgs::default()
        };
        let err = check_config(&config, &strict).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Diagnostics(_))
        ));
    }
}
