//! Shared helpers.
//!
//! - [`html`]: escaping and template helpers
//! - [`mime`]: MIME lookup for preload hints
//! - [`path`]: route and file system path helpers

pub mod html;
pub mod mime;
pub mod path;

/// Format count with noun, handling pluralization.
///
/// - `plural_count(0, "page")` -> `"0 pages"`
/// - `plural_count(1, "page")` -> `"1 page"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
