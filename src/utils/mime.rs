//! MIME type detection utilities.
//!
//! Covers the document and font types that appear in the head.

use std::path::Path;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const LD_JSON: &str = "application/ld+json";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";
    pub const EOT: &str = "application/vnd.ms-fontobject";
}

/// Extension of a URL path, ignoring query string and fragment.
fn url_extension(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// MIME type for a font preload link.
///
/// Unknown or missing extensions fall back to `font/woff2`.
pub fn for_font(href: &str) -> &'static str {
    match url_extension(href).as_deref() {
        Some("woff") => types::WOFF,
        Some("ttf") => types::TTF,
        Some("otf") => types::OTF,
        Some("eot") => types::EOT,
        _ => types::WOFF2,
    }
}
