//! Engine config module export.
//!
//! Renders the descriptor as the CommonJS module the style engine loads
//! (`tailwind.config.js`). Only `content`, `theme.extend` and `plugins` are
//! emitted; plugin handles become `require(...)` calls resolved by the
//! engine's runtime.

use crate::config::{ConfigDescriptor, TokenValue};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Default file name of the exported module.
pub const EXPORT_FILE: &str = "tailwind.config.js";

const INDENT: &str = "  ";

/// Render the engine config module.
pub fn render_js(config: &ConfigDescriptor) -> String {
    let mut out = String::new();
    out.push_str("/** @type {import('tailwindcss').Config} */\n");
    out.push_str("module.exports = {\n");

    push_list(&mut out, "content", config.content_globs().iter().map(|g| js_string(g)));

    out.push_str(INDENT);
    out.push_str("theme: {\n");
    out.push_str(&INDENT.repeat(2));
    if config.theme_extensions().is_empty() {
        out.push_str("extend: {},\n");
    } else {
        out.push_str("extend: {\n");
        for (category, tokens) in config.theme_extensions() {
            let _ = writeln!(out, "{}{}: {{", INDENT.repeat(3), js_key(category));
            for (name, value) in tokens {
                let _ = writeln!(
                    out,
                    "{}{}: {},",
                    INDENT.repeat(4),
                    js_key(name),
                    js_value(value)
                );
            }
            let _ = writeln!(out, "{}}},", INDENT.repeat(3));
        }
        out.push_str(&INDENT.repeat(2));
        out.push_str("},\n");
    }
    out.push_str(INDENT);
    out.push_str("},\n");

    push_list(
        &mut out,
        "plugins",
        config
            .plugins()
            .iter()
            .map(|p| format!("require({})", js_string(p.as_str()))),
    );

    out.push_str("}\n");
    out
}

/// Write the engine config module to `path`.
pub fn write_js(config: &ConfigDescriptor, path: &Path) -> Result<()> {
    fs::write(path, render_js(config))
        .with_context(|| format!("failed to write `{}`", path.display()))
}

fn push_list(out: &mut String, key: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        let _ = writeln!(out, "{INDENT}{key}: [],");
        return;
    }
    let _ = writeln!(out, "{INDENT}{key}: [");
    for item in items {
        let _ = writeln!(out, "{}{item},", INDENT.repeat(2));
    }
    let _ = writeln!(out, "{INDENT}],");
}

/// JS string literal. JSON string syntax is valid JS.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Object key: bare when it is an identifier, quoted otherwise.
fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_ident { key.to_string() } else { js_string(key) }
}

fn js_value(value: &TokenValue) -> String {
    match value {
        TokenValue::String(s) => js_string(s),
        TokenValue::Integer(n) => n.to_string(),
        TokenValue::Unsigned(n) => n.to_string(),
        TokenValue::Float(n) => n.to_string(),
    }
}
