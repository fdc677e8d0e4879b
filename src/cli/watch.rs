//! Watch mode.
//!
//! Watches the directory holding the config file, so editors that save by
//! replacing the file are picked up too. Events are debounced; each burst
//! triggers one reload through the config handle, which keeps the previous
//! descriptor when the new text is malformed.

use crate::config::{CONFIG, ConfigDescriptor, ConfigHandle, cfg};
use crate::export::{EXPORT_FILE, write_js};
use crate::logger::{status_error, status_success, status_unchanged, status_warning};
use crate::utils::path::normalize_path;
use crate::utils::plural_count;
use crate::{debug, log};
use anyhow::{Context, Result, anyhow};
use notify::event::ModifyKind;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

const DEBOUNCE_MS: u64 = 300;
/// Upper bound on a single wait, so Ctrl+C is noticed promptly.
const POLL_MS: u64 = 200;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Set up the Ctrl+C handler that ends the watch loop.
fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| SHUTDOWN.store(true, Ordering::SeqCst))
        .map_err(|e| anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Reload the config every time its file changes, until Ctrl+C.
pub fn watch_config(export: bool) -> Result<()> {
    let config = cfg().context("config is not loaded")?;
    let config_path = config.config_path.clone();
    let dir = config.root().to_path_buf();

    setup_shutdown_handler()?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch '{}'", dir.display()))?;

    log!("watch"; "watching {} (Ctrl+C to stop)", config_path.display());
    // Same gate as a reload: a config with errors is never exported
    revalidate(&config, export, "loaded");

    let mut debouncer = Debouncer::default();
    while !SHUTDOWN.load(Ordering::SeqCst) {
        let timeout = debouncer
            .sleep_duration()
            .min(Duration::from_millis(POLL_MS));

        match rx.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                if is_config_event(&event, &config_path) {
                    debug!("watch"; "{:?} {:?}", event.kind, event.paths);
                    debouncer.touch();
                }
            }
            Ok(Err(e)) => log!("watch"; "notify error: {}", e),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.take_if_ready() {
            reload_once(&CONFIG, export);
        }
    }

    log!("watch"; "stopped");
    Ok(())
}

/// Whether `event` may have changed the config file's content.
fn is_config_event(event: &notify::Event, config_path: &Path) -> bool {
    let relevant = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        // mtime/atime/chmod noise
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };

    relevant
        && event.paths.iter().any(|p| {
            p.file_name() == config_path.file_name() && normalize_path(p) == config_path
        })
}

/// What a single reload did.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReloadOutcome {
    Unchanged,
    Reloaded { errors: usize, warnings: usize },
    /// The previous descriptor is still in place.
    Failed(String),
}

/// Reload through `handle` and print the result as a single status line.
fn reload_once(handle: &ConfigHandle, export: bool) -> ReloadOutcome {
    let outcome = match handle.reload() {
        Ok(false) => ReloadOutcome::Unchanged,
        Ok(true) => match handle.get() {
            Some(config) => revalidate(&config, export, "reloaded"),
            None => ReloadOutcome::Failed("config is not loaded".into()),
        },
        Err(e) => ReloadOutcome::Failed(format!("{e:#}")),
    };

    match &outcome {
        ReloadOutcome::Unchanged => status_unchanged("config unchanged"),
        ReloadOutcome::Failed(detail) => {
            status_error("reload failed, keeping previous config", detail);
        }
        ReloadOutcome::Reloaded { .. } => {}
    }
    outcome
}

/// Validate `config` and export it when it has no errors.
///
/// `action` is the verb shown in the status line (`loaded`, `reloaded`).
fn revalidate(config: &ConfigDescriptor, export: bool, action: &str) -> ReloadOutcome {
    let diag = config.validate();
    let errors = diag.errors().len();
    let warnings = diag.warnings().len();

    if diag.has_errors() {
        status_error(&format!("config {action} with errors"), &diag.to_string());
    } else {
        if diag.has_warnings() {
            let detail: Vec<String> = diag.warnings().iter().map(ToString::to_string).collect();
            status_warning(&format!(
                "config {action}, {}:\n{}",
                plural_count(warnings, "warning"),
                detail.join("\n")
            ));
        } else {
            status_success(&format!("config {action}"));
        }
        if export {
            export_current(config);
        }
    }

    ReloadOutcome::Reloaded { errors, warnings }
}

fn export_current(config: &ConfigDescriptor) {
    let path = config.root().join(EXPORT_FILE);
    if let Err(e) = write_js(config, &path) {
        log!("error"; "{:#}", e);
    }
}

/// Collapses a burst of events into one reload.
#[derive(Debug, Default)]
struct Debouncer {
    last_event: Option<Instant>,
}

impl Debouncer {
    fn touch(&mut self) {
        self.last_event = Some(Instant::now());
    }

    /// True once the burst has been quiet for the debounce window.
    fn take_if_ready(&mut self) -> bool {
        match self.last_event {
            Some(last) if last.elapsed() >= Duration::from_millis(DEBOUNCE_MS) => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    fn sleep_duration(&self) -> Duration {
        let Some(last) = self.last_event else {
            return Duration::from_secs(86400);
        };
        Duration::from_millis(DEBOUNCE_MS).saturating_sub(last.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_event(kind: EventKind, path: &Path) -> notify::Event {
        notify::Event {
            kind,
            paths: vec![path.to_path_buf()],
            attrs: Default::default(),
        }
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("tailwind.toml");
        fs::write(&path, content).unwrap();
        normalize_path(&path)
    }

    #[test]
    fn test_is_config_event() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content = []\n");
        let data = EventKind::Modify(ModifyKind::Data(DataChange::Any));

        assert!(is_config_event(&make_event(data, &path), &path));
        assert!(is_config_event(
            &make_event(EventKind::Create(CreateKind::File), &path),
            &path
        ));
        assert!(!is_config_event(
            &make_event(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)), &path),
            &path
        ));
        assert!(!is_config_event(
            &make_event(EventKind::Access(AccessKind::Any), &path),
            &path
        ));

        let other = dir.path().join("tailwind.config.js");
        assert!(!is_config_event(&make_event(data, &other), &path));
    }

    #[test]
    fn test_debouncer_waits_for_quiet() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.take_if_ready());

        debouncer.touch();
        assert!(!debouncer.take_if_ready());
        assert!(debouncer.sleep_duration() <= Duration::from_millis(DEBOUNCE_MS));

        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 10));
        assert!(debouncer.take_if_ready());
        assert!(!debouncer.take_if_ready());
    }

    #[test]
    fn test_reload_outcomes() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content = [\"a/*.html\"]\n");
        let handle = ConfigHandle::new();
        handle.init(&path).unwrap();

        assert_eq!(reload_once(&handle, false), ReloadOutcome::Unchanged);

        write_config(&dir, "content = []\n");
        assert_eq!(
            reload_once(&handle, false),
            ReloadOutcome::Reloaded { errors: 0, warnings: 1 }
        );

        write_config(&dir, "content = \"a/*.html\"\n");
        assert!(matches!(reload_once(&handle, false), ReloadOutcome::Failed(_)));
        assert!(handle.get().unwrap().content.is_empty());
    }

    #[test]
    fn test_reload_exports_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content = [\"a/*.html\"]\n");
        let handle = ConfigHandle::new();
        handle.init(&path).unwrap();

        write_config(&dir, "content = [\"b/*.html\"]\n");
        reload_once(&handle, true);
        let js = fs::read_to_string(dir.path().join(EXPORT_FILE)).unwrap();
        assert!(js.contains("b/*.html"));
    }

    #[test]
    fn test_startup_does_not_export_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content = [\"a/*.html\"]\nplugins = [\"not valid\"]\n");
        let config = ConfigDescriptor::load(&path).unwrap();

        assert_eq!(
            revalidate(&config, true, "loaded"),
            ReloadOutcome::Reloaded { errors: 1, warnings: 0 }
        );
        assert!(!dir.path().join(EXPORT_FILE).exists());
    }

    #[test]
    fn test_startup_exports_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "content = [\"a/*.html\"]\n");
        let config = ConfigDescriptor::load(&path).unwrap();

        assert_eq!(
            revalidate(&config, true, "loaded"),
            ReloadOutcome::Reloaded { errors: 0, warnings: 0 }
        );
        let js = fs::read_to_string(dir.path().join(EXPORT_FILE)).unwrap();
        assert!(js.contains("a/*.html"));
    }
}
