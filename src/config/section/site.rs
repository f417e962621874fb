//! `[site]` configuration.
//!
//! Brand and origin feed every derived head value. The defaults are the
//! literal values existing SEO snapshots were produced with.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Scheme and host, no trailing slash (e.g. "https://example.com").
    pub origin: String,
    /// Brand name appended to page titles.
    pub brand: String,
    /// Tagline used in the title of pages without one.
    pub tagline: String,
    /// Description of pages without one.
    pub description: String,
    /// Author meta; falls back to `brand`.
    pub author: Option<String>,
    /// Value of the `language` meta tag.
    pub language: String,
    /// `lang` attribute of the generated `<html>` shell.
    pub lang: String,
    /// Twitter handle for `twitter:site` / `twitter:creator`.
    pub twitter: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            origin: "https://marutisolutions.com".into(),
            brand: "Maruti Solutions".into(),
            tagline: "AI & Software Development Services".into(),
            description: "Maruti Solutions provides cutting-edge AI solutions, custom software \
                          development, and digital transformation services for businesses \
                          across India."
                .into(),
            author: None,
            language: "English".into(),
            lang: "en".into(),
            twitter: "@MarutiSolutions".into(),
        }
    }
}

impl SiteSectionConfig {
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or(&self.brand)
    }

    /// # Checks
    /// - `origin` parses as an http(s) URL with a host
    /// - `origin` has no path, query or trailing slash (paths are appended)
    /// - `brand` is not empty
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("site.origin");
        match url::Url::parse(&self.origin) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        field.clone(),
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        field.clone(),
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
                if self.origin.ends_with('/')
                    || parsed.path() != "/"
                    || parsed.query().is_some()
                {
                    diag.error_with_hint(
                        field,
                        "origin must not contain a path or trailing slash",
                        format!("use \"{}\"", parsed.origin().ascii_serialization()),
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    field,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }

        if self.brand.trim().is_empty() {
            diag.error(FieldPath::new("site.brand"), "brand must not be empty");
        }
    }
}
