//! `[seo]` configuration: the fixed tag block and social card defaults.

use serde::{Deserialize, Serialize};

use crate::seo::meta::{DEFAULT_SOCIAL_IMAGE, DEFAULT_SOCIAL_TYPE};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSectionConfig {
    /// Social preview image for pages that set none (site-relative).
    pub social_image: String,
    /// `og:type` for pages that set none.
    pub social_type: String,
    /// Indexing directive, emitted on every page.
    pub robots: String,
    pub revisit_after: String,
    pub viewport: String,
    pub twitter_card: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Alt text suffix of the social image on pages without a title.
    pub image_alt: String,
}

impl Default for SeoSectionConfig {
    fn default() -> Self {
        Self {
            social_image: DEFAULT_SOCIAL_IMAGE.into(),
            social_type: DEFAULT_SOCIAL_TYPE.into(),
            robots: "index, follow".into(),
            revisit_after: "7 days".into(),
            viewport: "width=device-width, initial-scale=1.0".into(),
            twitter_card: "summary_large_image".into(),
            image_width: 1200,
            image_height: 630,
            image_alt: "AI & Software Development".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.seo.robots, "index, follow");
        assert_eq!(config.seo.social_image, "/assets/og-image.jpg");
        assert_eq!(config.seo.image_width, 1200);
    }

    #[test]
    fn test_override() {
        let config = test_parse_config("[seo]\nsocial_type = \"article\"\nimage_height = 600");
        assert_eq!(config.seo.social_type, "article");
        assert_eq!(config.seo.image_height, 600);
        assert_eq!(config.seo.revisit_after, "7 days");
    }
}
