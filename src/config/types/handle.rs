//! Config handle with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic descriptor replacement.
//! Readers always see a complete descriptor: the previous one or the new
//! one, never a partially updated value.

use crate::config::ConfigDescriptor;
use crate::utils::hash;
use anyhow::{Context, Result};
use arc_swap::ArcSwapOption;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

/// Descriptor lifecycle. There is no `Modified` state: a reload builds a
/// fresh descriptor and swaps it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
}

/// Holds the current descriptor and the hash of the text it came from.
#[derive(Debug, Default)]
pub struct ConfigHandle {
    current: ArcSwapOption<ConfigDescriptor>,
    content_hash: AtomicU64,
}

/// Process-wide handle used by the CLI.
pub static CONFIG: LazyLock<ConfigHandle> = LazyLock::new(ConfigHandle::new);

/// Current descriptor of the process-wide handle.
#[inline]
pub fn cfg() -> Option<Arc<ConfigDescriptor>> {
    CONFIG.get()
}

impl ConfigHandle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn state(&self) -> LoadState {
        if self.current.load().is_some() {
            LoadState::Loaded
        } else {
            LoadState::Unloaded
        }
    }

    #[inline]
    pub fn get(&self) -> Option<Arc<ConfigDescriptor>> {
        self.current.load_full()
    }

    /// `Unloaded -> Loaded`: load `path` and install the result.
    pub fn init(&self, path: &Path) -> Result<Arc<ConfigDescriptor>> {
        if self.state() == LoadState::Loaded {
            crate::debug!("config"; "replacing loaded config with {}", path.display());
        }
        let content = read(path)?;
        let config = Arc::new(ConfigDescriptor::from_path_content(path, &content)?);
        self.install(Arc::clone(&config), &content);
        Ok(config)
    }

    /// Reload the descriptor if the file content changed.
    ///
    /// Returns `Ok(true)` if the descriptor was replaced, `Ok(false)` if the
    /// content is unchanged. On error the previous descriptor stays in place.
    pub fn reload(&self) -> Result<bool> {
        let Some(path) = self.config_path() else {
            anyhow::bail!("config handle is not loaded");
        };

        let content = read(&path)?;
        if hash::compute(content.as_bytes()) == self.content_hash.load(Ordering::Acquire) {
            return Ok(false);
        }

        let config = ConfigDescriptor::from_path_content(&path, &content)?;
        self.install(Arc::new(config), &content);
        Ok(true)
    }

    fn install(&self, config: Arc<ConfigDescriptor>, content: &str) {
        self.current.store(Some(config));
        self.content_hash
            .store(hash::compute(content.as_bytes()), Ordering::Release);
    }

    fn config_path(&self) -> Option<PathBuf> {
        self.current.load_full().map(|c| c.config_path.clone())
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = "content = [\"a/*.html\"]\n";

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("tailwind.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_unloaded_to_loaded() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);

        let handle = ConfigHandle::new();
        assert_eq!(handle.state(), LoadState::Unloaded);
        assert!(handle.get().is_none());

        let config = handle.init(&path).unwrap();
        assert_eq!(handle.state(), LoadState::Loaded);
        assert_eq!(config.content, vec!["a/*.html"]);
    }

    #[test]
    fn test_reload_unchanged_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);

        let handle = ConfigHandle::new();
        let first = handle.init(&path).unwrap();
        assert!(!handle.reload().unwrap());
        assert!(Arc::ptr_eq(&first, &handle.get().unwrap()));
    }

    #[test]
    fn test_reload_replaces_whole_descriptor() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);

        let handle = ConfigHandle::new();
        let old = handle.init(&path).unwrap();

        write_config(
            &dir,
            "content = [\"b/*.html\"]\nplugins = [\"flowbite/plugin\"]\n",
        );
        assert!(handle.reload().unwrap());

        let new = handle.get().unwrap();
        assert_eq!(new.content, vec!["b/*.html"]);
        assert_eq!(new.plugins.len(), 1);
        // Old readers keep their complete snapshot
        assert_eq!(old.content, vec!["a/*.html"]);
        assert!(old.plugins.is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);

        let handle = ConfigHandle::new();
        handle.init(&path).unwrap();

        write_config(&dir, "content = \"a/*.html\"\n");
        assert!(handle.reload().is_err());
        assert_eq!(handle.get().unwrap().content, vec!["a/*.html"]);
    }

    #[test]
    fn test_init_replaces_loaded() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);

        let handle = ConfigHandle::new();
        handle.init(&path).unwrap();

        let other = dir.path().join("other.json");
        fs::write(&other, r#"{ "content": ["b/*.html"] }"#).unwrap();
        handle.init(&other).unwrap();

        assert_eq!(handle.state(), LoadState::Loaded);
        assert_eq!(handle.get().unwrap().content, vec!["b/*.html"]);
    }

    #[test]
    fn test_reload_requires_init() {
        let handle = ConfigHandle::new();
        assert!(handle.reload().is_err());
    }
}
