//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field (e.g. `theme.extend.maxWidth`).
///
/// Static paths come from `#[derive(Config)]`:
///
/// ```ignore
/// #[derive(Config)]
/// #[config(section = "")]
/// pub struct ConfigDescriptor {
///     pub content: Vec<String>,
/// }
///
/// diag.hint(ConfigDescriptor::FIELDS.content.index(2), "duplicate of content[0]");
/// ```
///
/// Paths into sequences and maps are built at runtime with
/// [`FieldPath::index`] and [`FieldPath::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of the document root.
    pub const ROOT: Self = Self::new("<root>");

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Child path for a map key: `theme` + `extend` -> `theme.extend`.
    pub fn key(&self, key: &str) -> Self {
        if self.is_root() {
            Self(Cow::Owned(key.to_string()))
        } else {
            Self(Cow::Owned(format!("{}.{key}", self.0)))
        }
    }

    /// Child path for a sequence element: `content` + 2 -> `content[2]`.
    pub fn index(&self, index: usize) -> Self {
        Self(Cow::Owned(format!("{}[{index}]", self.0)))
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
