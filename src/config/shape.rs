//! Shape check of the raw document.
//!
//! Runs before typed deserialization so that a wrong type or a missing
//! required field is reported with the exact field path
//! (`content`, `content[2]`, `theme.extend.maxWidth.8xl`, `plugins[0]`).
//! Unknown fields are not checked here; they are collected during
//! deserialization and reported as ignored.

use super::{ConfigError, FieldPath};
use serde_json::{Map, Value};

type ShapeResult = Result<(), ConfigError>;

/// Check the document has the descriptor's shape.
pub fn check(document: &Value) -> ShapeResult {
    let root = expect_table(document, &FieldPath::ROOT)?;

    match root.get("content") {
        Some(content) => check_string_seq(content, &FieldPath::new("content"))?,
        None => {
            return Err(ConfigError::malformed(
                FieldPath::new("content"),
                "missing required field",
            ));
        }
    }

    if let Some(theme) = root.get("theme") {
        check_theme(theme)?;
    }

    if let Some(plugins) = root.get("plugins") {
        check_string_seq(plugins, &FieldPath::new("plugins"))?;
    }

    Ok(())
}

fn check_theme(theme: &Value) -> ShapeResult {
    let path = FieldPath::new("theme");
    let theme = expect_table(theme, &path)?;

    let Some(extend) = theme.get("extend") else {
        return Ok(());
    };

    let path = path.key("extend");
    for (category, tokens) in expect_table(extend, &path)? {
        let path = path.key(category);
        for (name, value) in expect_table(tokens, &path)? {
            if !matches!(value, Value::String(_) | Value::Number(_)) {
                return Err(ConfigError::malformed(
                    path.key(name),
                    format!("expected a string or number literal, found {}", describe(value)),
                ));
            }
        }
    }

    Ok(())
}

fn check_string_seq(value: &Value, path: &FieldPath) -> ShapeResult {
    let Value::Array(items) = value else {
        return Err(ConfigError::malformed(
            path.clone(),
            format!("expected a sequence of strings, found {}", describe(value)),
        ));
    };

    for (i, item) in items.iter().enumerate() {
        if !item.is_string() {
            return Err(ConfigError::malformed(
                path.index(i),
                format!("expected a string, found {}", describe(item)),
            ));
        }
    }

    Ok(())
}

fn expect_table<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| {
        ConfigError::malformed(
            path.clone(),
            format!("expected a table, found {}", describe(value)),
        )
    })
}

/// Human name of a value's type, with an article.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(document: Value) -> String {
        check(&document)
            .unwrap_err()
            .field()
            .map(|f| f.as_str().to_string())
            .unwrap()
    }

    #[test]
    fn test_valid_document() {
        let document = json!({
            "content": ["a/*.html"],
            "theme": { "extend": { "maxWidth": { "8xl": "90rem" }, "zIndex": { "60": 60 } } },
            "plugins": ["flowbite/plugin"],
        });
        assert!(check(&document).is_ok());
    }

    #[test]
    fn test_content_as_single_string() {
        let document = json!({ "content": "a/*.html" });
        let err = check(&document).unwrap_err();
        assert_eq!(err.field().unwrap().as_str(), "content");
        assert!(err.to_string().contains("found a string"));
    }

    #[test]
    fn test_missing_content() {
        assert_eq!(field_of(json!({ "plugins": [] })), "content");
    }

    #[test]
    fn test_non_string_content_entry() {
        assert_eq!(field_of(json!({ "content": ["a", 1] })), "content[1]");
    }

    #[test]
    fn test_root_must_be_table() {
        assert_eq!(field_of(json!(["a/*.html"])), "<root>");
    }

    #[test]
    fn test_nested_token_rejected() {
        let document = json!({
            "content": ["a"],
            "theme": { "extend": { "colors": { "brand": { "500": "#123456" } } } },
        });
        assert_eq!(field_of(document), "theme.extend.colors.brand");
    }

    #[test]
    fn test_category_must_be_table() {
        let document = json!({
            "content": ["a"],
            "theme": { "extend": { "maxWidth": "90rem" } },
        });
        assert_eq!(field_of(document), "theme.extend.maxWidth");
    }

    #[test]
    fn test_plugins_must_be_strings() {
        assert_eq!(field_of(json!({ "content": [], "plugins": "x" })), "plugins");
        assert_eq!(
            field_of(json!({ "content": [], "plugins": ["x", null] })),
            "plugins[1]"
        );
    }

    #[test]
    fn test_theme_without_extend() {
        assert!(check(&json!({ "content": [], "theme": {} })).is_ok());
    }
}
