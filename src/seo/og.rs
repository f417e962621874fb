//! Open Graph and Twitter Card meta tags.
//!
//! Site-level values come from config; page-level values (title, url,
//! description, image) are resolved by the composer first.

use super::tag::HeadTag;
use crate::config::SiteConfig;

/// Page values already resolved against site defaults.
pub struct SocialPage<'p> {
    pub og_type: &'p str,
    pub url: &'p str,
    pub title: &'p str,
    pub description: &'p str,
    pub image: &'p str,
    /// Raw page title, used for the image alt text.
    pub raw_title: Option<&'p str>,
}

/// Site-level social card settings.
pub struct SocialDefaults<'a> {
    pub site_name: &'a str,
    pub twitter_card: &'a str,
    pub twitter_handle: &'a str,
    pub image_width: u32,
    pub image_height: u32,
    pub image_alt_fallback: &'a str,
}

impl<'a> SocialDefaults<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self {
            site_name: &config.site.brand,
            twitter_card: &config.seo.twitter_card,
            twitter_handle: &config.site.twitter,
            image_width: config.seo.image_width,
            image_height: config.seo.image_height,
            image_alt_fallback: &config.seo.image_alt,
        }
    }

    /// Open Graph tags, in output order.
    pub fn open_graph(&self, page: &SocialPage<'_>) -> [HeadTag; 8] {
        [
            HeadTag::property("og:type", page.og_type),
            HeadTag::property("og:url", page.url),
            HeadTag::property("og:title", page.title),
            HeadTag::property("og:description", page.description),
            HeadTag::property("og:image", page.image),
            HeadTag::property("og:image:width", self.image_width.to_string()),
            HeadTag::property("og:image:height", self.image_height.to_string()),
            HeadTag::property("og:site_name", self.site_name),
        ]
    }

    /// Twitter Card tags, in output order.
    pub fn twitter(&self, page: &SocialPage<'_>) -> [HeadTag; 7] {
        let alt = format!(
            "{} - {}",
            self.site_name,
            page.raw_title.unwrap_or(self.image_alt_fallback)
        );
        [
            HeadTag::name("twitter:card", self.twitter_card),
            HeadTag::name("twitter:site", self.twitter_handle),
            HeadTag::name("twitter:creator", self.twitter_handle),
            HeadTag::name("twitter:title", page.title),
            HeadTag::name("twitter:description", page.description),
            HeadTag::name("twitter:image", page.image),
            HeadTag::name("twitter:image:alt", alt),
        ]
    }
}
