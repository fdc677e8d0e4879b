//! `plugins` handles.
//!
//! A handle is an opaque module reference resolved by the external engine.
//! `validate()` only checks syntax; resolution happens in [`PluginHandle::locate`],
//! which nothing calls unless explicitly asked to.
//!
//! # Example
//!
//! ```toml
//! plugins = ["flowbite/plugin", "@tailwindcss/forms", "./plugins/brand.js"]
//! ```

use crate::config::{ConfigDescriptor, ConfigDiagnostics, ConfigError};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `name`, `@scope/name`, each optionally followed by `/sub/path`.
static MODULE_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*(?:/[A-Za-z0-9._~@+-]+)*$")
        .unwrap()
});

/// Maximum npm package name length.
const MAX_NAME_LEN: usize = 214;

/// Opaque reference to an external plugin module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginHandle(String);

impl PluginHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `./x.js`, `../x.js` or an absolute path.
    pub fn is_path(&self) -> bool {
        self.0.starts_with("./") || self.0.starts_with("../") || self.0.starts_with('/')
    }

    /// Package part of a module specifier: `@scope/name/sub` -> `@scope/name`.
    pub fn package_name(&self) -> Option<&str> {
        if self.is_path() {
            return None;
        }
        let segments = if self.0.starts_with('@') { 2 } else { 1 };
        let end = self
            .0
            .match_indices('/')
            .nth(segments - 1)
            .map_or(self.0.len(), |(i, _)| i);
        Some(&self.0[..end])
    }

    /// Check the handle is a well-formed module reference.
    ///
    /// Returns the reason when it is not.
    pub fn check_syntax(&self) -> Result<(), String> {
        let handle = self.0.as_str();

        if handle.trim().is_empty() {
            return Err("plugin handle is empty".into());
        }
        if handle.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(format!("`{handle}` contains whitespace"));
        }

        if self.is_path() {
            let rest = handle.trim_start_matches("../").trim_start_matches("./");
            if rest.is_empty() || rest.ends_with('/') {
                return Err(format!("`{handle}` does not name a file"));
            }
            return Ok(());
        }

        if !MODULE_SPECIFIER.is_match(handle) {
            return Err(format!("`{handle}` is not a valid module specifier"));
        }
        if handle.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(format!("`{handle}` escapes its package"));
        }
        if self.package_name().is_some_and(|name| name.len() > MAX_NAME_LEN) {
            return Err(format!("package name in `{handle}` is too long"));
        }
        Ok(())
    }

    /// Find the module on disk.
    ///
    /// Paths resolve against `root`; module specifiers search
    /// `node_modules/<package>` in `root` and each ancestor.
    pub fn locate(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        if self.is_path() {
            let path = root.join(&self.0);
            let candidates = [path.clone(), path.with_extension("js"), path.join("index.js")];
            return candidates
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| ConfigError::PluginResolution {
                    handle: self.0.clone(),
                    searched: path,
                });
        }

        let package = self.package_name().unwrap_or(&self.0);
        let subpath = self.0[package.len()..].trim_start_matches('/');
        root.ancestors()
            .map(|dir| dir.join("node_modules").join(package))
            .find(|dir| dir.is_dir())
            .map(|dir| if subpath.is_empty() { dir } else { dir.join(subpath) })
            .ok_or_else(|| ConfigError::PluginResolution {
                handle: self.0.clone(),
                searched: root.join("node_modules"),
            })
    }
}

impl fmt::Display for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginHandle {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

/// Validate plugin handles.
///
/// # Checks
/// - every handle is syntactically well formed (error: the engine cannot load it)
/// - a handle is listed at most once (hint: the plugin runs twice)
pub fn validate(plugins: &[PluginHandle], diag: &mut ConfigDiagnostics) {
    let field = ConfigDescriptor::FIELDS.plugins;
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();

    for (i, plugin) in plugins.iter().enumerate() {
        let path = field.index(i);

        if let Err(reason) = plugin.check_syntax() {
            diag.error_with_hint(
                path,
                reason,
                "use a package such as `flowbite/plugin` or a relative path such as `./plugins/brand.js`",
            );
            continue;
        }

        if let Some(first) = seen.get(plugin.as_str()) {
            diag.hint(
                path,
                format!(
                    "`{plugin}` is already registered at {}",
                    field.index(*first).as_str()
                ),
            );
        } else {
            seen.insert(plugin.as_str(), i);
        }
    }
}

/// Resolve every well-formed handle, collecting the ones that are not
/// installed together with their index in `plugins`.
pub fn locate_all(plugins: &[PluginHandle], root: &Path) -> Vec<(usize, ConfigError)> {
    plugins
        .iter()
        .enumerate()
        .filter(|(_, p)| p.check_syntax().is_ok())
        .filter_map(|(i, p)| p.locate(root).err().map(|e| (i, e)))
        .collect()
}
