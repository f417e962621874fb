//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path of a config field, e.g. `site.origin` or `pages[2].path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path of a field inside the `index`-th element of an array section.
    pub fn indexed(section: &str, index: usize, field: &str) -> Self {
        Self(format!("{section}[{index}].{field}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
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
