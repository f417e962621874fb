//! `[[pages]]` configuration: one entry per route.
//!
//! ```toml
//! [[pages]]
//! path = "/services"
//! title = "Services"
//! keywords = ["AI solutions", "custom software"]
//! images = ["/assets/services/hero.webp"]
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::seo::FontPreload;
use crate::utils::path::{is_plain_route, normalize_route};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Route path, e.g. "/about".
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Overrides `seo.social_image`.
    pub social_image: Option<String>,
    /// Overrides `seo.social_type`.
    pub social_type: Option<String>,
    /// Overrides `defaults.structured_data`.
    pub structured_data: Option<serde_json::Value>,
    /// Added to `defaults.preload_fonts`.
    pub preload_fonts: Vec<FontPreload>,
    /// Added to `defaults.preload_images`.
    pub preload_images: Vec<String>,
    /// Images the page loads on demand (checked by `validate`).
    pub images: Vec<String>,
}

/// # Checks
/// - every `path` starts with `/`
/// - no `.` or `..` segments
/// - no two pages share a path after normalization
pub fn validate_pages(pages: &[PageConfig], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();

    for (i, page) in pages.iter().enumerate() {
        let field = FieldPath::indexed("pages", i, "path");

        if !page.path.starts_with('/') {
            diag.error_with_hint(
                field.clone(),
                format!("path '{}' must start with '/'", page.path),
                format!("use \"/{}\"", page.path.trim_start_matches('/')),
            );
            continue;
        }
        if !is_plain_route(&page.path) {
            diag.error_with_hint(
                field,
                format!("path '{}' contains '.' or '..' segments", page.path),
                "spell the route out without relative segments",
            );
            continue;
        }

        let route = normalize_route(&page.path);
        if !seen.insert(route.clone()) {
            diag.error(field, format!("duplicate page path '{route}'"));
        }
    }
}
