//! `[theme.extend]` design-token extensions.
//!
//! Extensions are merged additively on top of the engine's base theme.
//! This crate never redefines the base theme; keys directly under `[theme]`
//! other than `extend` are ignored.
//!
//! # Example
//!
//! ```toml
//! [theme.extend.maxWidth]
//! 8xl = "90rem"
//!
//! [theme.extend.zIndex]
//! 60 = 60
//! ```

use crate::config::ConfigDiagnostics;
use indexmap::IndexMap;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token name -> literal value, in declaration order.
pub type TokenMap = IndexMap<String, TokenValue>;

/// Token category -> tokens, in declaration order.
pub type ThemeExtensions = IndexMap<String, TokenMap>;

/// Token categories of the engine's theme schema.
pub const THEME_CATEGORIES: &[&str] = &[
    "accentColor", "animation", "aria", "aspectRatio", "backdropBlur", "backdropBrightness",
    "backdropContrast", "backdropGrayscale", "backdropHueRotate", "backdropInvert",
    "backdropOpacity", "backdropSaturate", "backdropSepia", "backgroundColor", "backgroundImage",
    "backgroundOpacity", "backgroundPosition", "backgroundSize", "blur", "borderColor",
    "borderOpacity", "borderRadius", "borderSpacing", "borderWidth", "boxShadow",
    "boxShadowColor", "brightness", "caretColor", "colors", "columns", "container", "content",
    "contrast", "cursor", "data", "divideColor", "divideOpacity", "divideWidth", "dropShadow",
    "fill", "flex", "flexBasis", "flexGrow", "flexShrink", "fontFamily", "fontSize",
    "fontWeight", "gap", "gradientColorStopPositions", "gradientColorStops", "grayscale",
    "gridAutoColumns", "gridAutoRows", "gridColumn", "gridColumnEnd", "gridColumnStart",
    "gridRow", "gridRowEnd", "gridRowStart", "gridTemplateColumns", "gridTemplateRows",
    "height", "hueRotate", "inset", "invert", "keyframes", "letterSpacing", "lineClamp",
    "lineHeight", "listStyleImage", "listStyleType", "margin", "maxHeight", "maxWidth",
    "minHeight", "minWidth", "objectPosition", "opacity", "order", "outlineColor",
    "outlineOffset", "outlineWidth", "padding", "placeholderColor", "placeholderOpacity",
    "ringColor", "ringOffsetColor", "ringOffsetWidth", "ringOpacity", "ringWidth", "rotate",
    "saturate", "scale", "screens", "scrollMargin", "scrollPadding", "sepia", "size", "skew",
    "space", "spacing", "stroke", "strokeWidth", "supports", "textColor",
    "textDecorationColor", "textDecorationThickness", "textIndent", "textOpacity",
    "textUnderlineOffset", "transformOrigin", "transitionDelay", "transitionDuration",
    "transitionProperty", "transitionTimingFunction", "translate", "width", "willChange",
    "zIndex",
];

/// Literal token value. Kept exactly as written: `"90rem"` stays `"90rem"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    String(String),
    Integer(i64),
    /// Integers above `i64::MAX` (JSON only; TOML integers are 64-bit signed).
    Unsigned(u64),
    Float(f64),
}

impl TokenValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// `[theme]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "theme")]
pub struct ThemeConfig {
    /// Additive token extensions, by category.
    pub extend: ThemeExtensions,
}

impl ThemeConfig {
    pub fn is_empty(&self) -> bool {
        self.extend.is_empty()
    }

    /// Validate theme extensions.
    ///
    /// Category recognition belongs to the engine, so every finding here is
    /// a hint and never a violation:
    /// - categories missing from the engine's theme schema (the engine
    ///   silently drops them), with a "did you mean" when one is close
    /// - categories declaring no tokens
    /// - blank token names and blank string values
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let extend = Self::FIELDS.extend;

        for (category, tokens) in &self.extend {
            let path = extend.key(category);

            if !THEME_CATEGORIES.contains(&category.as_str()) {
                let mut message =
                    format!("`{category}` is not a built-in theme category and may be ignored");
                if let Some(known) = suggest_category(category) {
                    message.push_str(&format!(", did you mean `{known}`?"));
                }
                diag.hint(path.clone(), message);
            }

            if tokens.is_empty() {
                diag.hint(path, format!("theme category `{category}` declares no tokens"));
                continue;
            }

            for (name, value) in tokens {
                if name.trim().is_empty() {
                    diag.hint(path.clone(), "token name is blank");
                } else if value.as_str().is_some_and(|s| s.trim().is_empty()) {
                    diag.hint(path.key(name), format!("token `{name}` has a blank value"));
                }
            }
        }
    }
}

/// Closest known category for a typo (Damerau-Levenshtein distance <= 2).
fn suggest_category(unknown: &str) -> Option<&'static str> {
    THEME_CATEGORIES
        .iter()
        .map(|known| (*known, strsim::damerau_levenshtein(unknown, known)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(known, _)| known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_literal_preserved() {
        let config = test_parse_config("[theme.extend.maxWidth]\n8xl = \"90rem\"");
        assert_eq!(
            config.theme.extend["maxWidth"].get("8xl"),
            Some(&TokenValue::String("90rem".into()))
        );
    }

    #[test]
    fn test_numeric_tokens() {
        let config = test_parse_config("[theme.extend.zIndex]\n60 = 60\n\n[theme.extend.opacity]\n15 = 0.15");
        assert_eq!(config.theme.extend["zIndex"].get("60"), Some(&TokenValue::Integer(60)));
        assert_eq!(config.theme.extend["opacity"].get("15"), Some(&TokenValue::Float(0.15)));
    }

    #[test]
    fn test_large_integer_not_rounded() {
        use crate::config::{ConfigDescriptor, ConfigFormat};

        let json = r#"{ "content": ["a/*.html"], "theme": { "extend": { "zIndex": { "max": 18446744073709551615 } } } }"#;
        let config = ConfigDescriptor::parse_str(json, ConfigFormat::Json).unwrap();
        assert_eq!(
            config.theme.extend["zIndex"].get("max"),
            Some(&TokenValue::Unsigned(u64::MAX))
        );

        let text = config.to_string(ConfigFormat::Json).unwrap();
        assert!(text.contains("18446744073709551615"));
        assert_eq!(ConfigDescriptor::parse_str(&text, ConfigFormat::Json).unwrap(), config);
    }

    #[test]
    fn test_declaration_order_kept() {
        let config = test_parse_config(
            "[theme.extend.spacing]\n128 = \"32rem\"\n18 = \"4.5rem\"\n144 = \"36rem\"",
        );
        let names: Vec<_> = config.theme.extend["spacing"].keys().cloned().collect();
        assert_eq!(names, vec!["128", "18", "144"]);
    }

    #[test]
    fn test_known_category_passes() {
        let config = test_parse_config("[theme.extend.maxWidth]\n8xl = \"90rem\"");
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_unknown_category_is_hint_with_suggestion() {
        let config = test_parse_config("[theme.extend.maxWidht]\n8xl = \"90rem\"");
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);

        assert!(diag.is_empty());
        assert_eq!(diag.hints().len(), 1);
        let (field, message) = &diag.hints()[0];
        assert_eq!(field.as_str(), "theme.extend.maxWidht");
        assert!(message.contains("did you mean `maxWidth`"));
    }

    #[test]
    fn test_custom_category_is_not_a_violation() {
        let config = test_parse_config("[theme.extend.sizing]\n8xl = \"90rem\"");
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);

        assert!(diag.is_empty());
        assert!(!diag.hints()[0].1.contains("did you mean"));
    }

    #[test]
    fn test_unrelated_category_has_no_suggestion() {
        let config = test_parse_config("[theme.extend.qqqq]\nx = \"1\"");
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);
        assert!(!diag.hints()[0].1.contains("did you mean"));
    }

    #[test]
    fn test_empty_category_and_blank_values() {
        let config = test_parse_config(
            "[theme.extend.spacing]\n\n[theme.extend.maxWidth]\n8xl = \" \"\n\"\" = \"1rem\"",
        );
        let mut diag = ConfigDiagnostics::new();
        config.theme.validate(&mut diag);

        assert!(diag.is_empty());
        let fields: Vec<_> = diag.hints().iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(
            fields,
            vec!["theme.extend.spacing", "theme.extend.maxWidth.8xl", "theme.extend.maxWidth"]
        );
    }
}
