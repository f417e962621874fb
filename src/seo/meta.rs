//! Page-level metadata: the input of head composition.

use serde::{Deserialize, Serialize};

/// Default social preview image (site-relative).
pub const DEFAULT_SOCIAL_IMAGE: &str = "/assets/og-image.jpg";

/// Default Open Graph object type.
pub const DEFAULT_SOCIAL_TYPE: &str = "website";

/// A font to preload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPreload {
    pub href: String,
    /// Explicit MIME type; derived from the extension when absent.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FontPreload {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            mime_type: None,
        }
    }

    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Descriptive fields of one page.
///
/// Empty strings are treated the same as missing values when the head is
/// composed, so `title: Some("")` yields the default title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub social_image: String,
    pub social_type: String,
    pub canonical_path: Option<String>,
    pub structured_data: Option<serde_json::Value>,
    pub preload_fonts: Vec<FontPreload>,
    pub preload_images: Vec<String>,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            keywords: Vec::new(),
            social_image: DEFAULT_SOCIAL_IMAGE.into(),
            social_type: DEFAULT_SOCIAL_TYPE.into(),
            canonical_path: None,
            structured_data: None,
            preload_fonts: Vec::new(),
            preload_images: Vec::new(),
        }
    }
}

impl PageMetadata {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_canonical(mut self, path: impl Into<String>) -> Self {
        self.canonical_path = Some(path.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_structured_data(mut self, data: serde_json::Value) -> Self {
        self.structured_data = Some(data);
        self
    }

    /// Non-empty title, if any.
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Non-empty description, if any.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Layer page-specific values over site-wide defaults.
    ///
    /// Preloads are concatenated (defaults first, duplicates by href dropped);
    /// structured data falls back to the defaults' value.
    pub fn merged_over(mut self, defaults: &PageMetadata) -> Self {
        let mut fonts = defaults.preload_fonts.clone();
        for font in self.preload_fonts {
            if !fonts.iter().any(|f| f.href == font.href) {
                fonts.push(font);
            }
        }
        self.preload_fonts = fonts;

        let mut images = defaults.preload_images.clone();
        for image in self.preload_images {
            if !images.contains(&image) {
                images.push(image);
            }
        }
        self.preload_images = images;

        if self.structured_data.is_none() {
            self.structured_data = defaults.structured_data.clone();
        }
        self
    }
}

#[inline]
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let meta = PageMetadata::default();
        assert_eq!(meta.social_image, "/assets/og-image.jpg");
        assert_eq!(meta.social_type, "website");
        assert!(meta.title().is_none());
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let meta = PageMetadata::default()
            .with_title("")
            .with_description("");
        assert!(meta.title().is_none());
        assert!(meta.description().is_none());
    }

    #[test]
    fn test_merged_over_preloads() {
        let defaults = PageMetadata {
            preload_fonts: vec![FontPreload::new("/fonts/inter.woff2")],
            preload_images: vec!["/assets/logo.png".into()],
            ..Default::default()
        };
        let page = PageMetadata {
            preload_fonts: vec![
                FontPreload::new("/fonts/inter.woff2"),
                FontPreload::new("/fonts/mono.woff2"),
            ],
            preload_images: vec!["/assets/hero.webp".into(), "/assets/logo.png".into()],
            ..Default::default()
        }
        .merged_over(&defaults);

        let fonts: Vec<_> = page.preload_fonts.iter().map(|f| f.href.as_str()).collect();
        assert_eq!(fonts, ["/fonts/inter.woff2", "/fonts/mono.woff2"]);
        assert_eq!(page.preload_images, ["/assets/logo.png", "/assets/hero.webp"]);
    }

    #[test]
    fn test_merged_over_structured_data() {
        let defaults = PageMetadata::default().with_structured_data(json!({"@type": "Organization"}));

        let inherited = PageMetadata::default().merged_over(&defaults);
        assert_eq!(inherited.structured_data, Some(json!({"@type": "Organization"})));

        let own = PageMetadata::default()
            .with_structured_data(json!({"@type": "FAQPage"}))
            .merged_over(&defaults);
        assert_eq!(own.structured_data, Some(json!({"@type": "FAQPage"})));
    }

    #[test]
    fn test_font_preload_type_field() {
        let font: FontPreload =
            serde_json::from_value(json!({"href": "/f.woff", "type": "font/woff"})).unwrap();
        assert_eq!(font.mime_type.as_deref(), Some("font/woff"));
    }
}
