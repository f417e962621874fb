//! `[defaults]` configuration: metadata applied to every page.
//!
//! ```toml
//! [defaults]
//! preload_images = ["/assets/og-image.jpg", "/assets/logo.png"]
//!
//! [[defaults.preload_fonts]]
//! href = "/assets/fonts/inter-var.woff2"
//! type = "font/woff2"
//!
//! [defaults.structured_data]
//! "@context" = "https://schema.org"
//! "@type" = "Organization"
//! ```

use serde::{Deserialize, Serialize};

use crate::seo::{FontPreload, PageMetadata};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub preload_fonts: Vec<FontPreload>,
    pub preload_images: Vec<String>,
    /// Used by pages without their own structured data.
    pub structured_data: Option<serde_json::Value>,
}

impl DefaultsConfig {
    /// Site-wide values as page metadata, for `PageMetadata::merged_over`.
    pub fn to_metadata(&self) -> PageMetadata {
        PageMetadata {
            preload_fonts: self.preload_fonts.clone(),
            preload_images: self.preload_images.clone(),
            structured_data: self.structured_data.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use serde_json::json;

    #[test]
    fn test_empty_by_default() {
        let config = test_parse_config("");
        assert!(config.defaults.preload_fonts.is_empty());
        assert!(config.defaults.structured_data.is_none());
    }

    #[test]
    fn test_structured_data_table() {
        let config = test_parse_config(
            r#"
[defaults]
preload_images = ["/assets/logo.png"]

[[defaults.preload_fonts]]
href = "/assets/fonts/inter-var.woff2"
type = "font/woff2"

[defaults.structured_data]
"@context" = "https://schema.org"
"@type" = "Organization"
sameAs = ["https://twitter.com/MarutiSolutions"]
"#,
        );
        assert_eq!(config.defaults.preload_images, ["/assets/logo.png"]);
        assert_eq!(
            config.defaults.preload_fonts[0].mime_type.as_deref(),
            Some("font/woff2")
        );
        assert_eq!(
            config.defaults.structured_data,
            Some(json!({
                "@context": "https://schema.org",
                "@type": "Organization",
                "sameAs": ["https://twitter.com/MarutiSolutions"]
            }))
        );
    }
}
