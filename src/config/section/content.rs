//! `content` globs.
//!
//! # Example
//!
//! ```toml
//! content = [
//!     "./se/templates/**/*.html",
//!     "./se/static/**/*.js",
//!     "./node_modules/flowbite/**/*.js",
//! ]
//! ```
//!
//! Order and duplicates are kept as written. Overlapping globs are common
//! and harmless; exact duplicates only produce a hint.

use crate::config::{ConfigDescriptor, ConfigDiagnostics};
use crate::scan::Glob;
use rustc_hash::FxHashMap;

/// Validate content globs.
///
/// Only an empty sequence is a violation (a single warning, nothing else
/// checked). Any string is a legal entry for the engine, so blank entries,
/// globs the matcher cannot compile and exact duplicates are hints.
pub fn validate(content: &[String], diag: &mut ConfigDiagnostics) {
    let field = ConfigDescriptor::FIELDS.content;

    if content.is_empty() {
        diag.warn_with_hint(
            field.clone(),
            "no content globs: the engine will not scan any file and generates no utilities",
            "add at least one pattern, e.g. `./templates/**/*.html`",
        );
        return;
    }

    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, glob) in content.iter().enumerate() {
        let path = field.index(i);

        if glob.trim().is_empty() {
            diag.hint(path, "content glob is blank and matches nothing");
            continue;
        }

        if let Err(e) = Glob::new(glob) {
            diag.hint(path, e.to_string());
            continue;
        }

        if let Some(first) = seen.get(glob.as_str()) {
            diag.hint(path, format!("duplicate of {}", field.index(*first).as_str()));
        } else {
            seen.insert(glob.as_str(), i);
        }
    }
}
