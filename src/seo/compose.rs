//! Head composition: `PageMetadata` -> `HeadTags`.
//!
//! Pure and idempotent. Site constants (origin, brand, default copy) are
//! injected once through [`SiteConfig`] at construction.

use super::meta::PageMetadata;
use super::og::{SocialDefaults, SocialPage};
use super::tag::{HeadTag, HeadTags};
use crate::config::SiteConfig;
use crate::utils::mime;

/// Composes the document head for a page.
pub struct HeadComposer<'a> {
    config: &'a SiteConfig,
    social: SocialDefaults<'a>,
}

impl<'a> HeadComposer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            social: SocialDefaults::from_config(config),
        }
    }

    /// `"{title} | {brand}"`, or `"{brand} - {tagline}"` without a title.
    pub fn effective_title(&self, title: Option<&str>) -> String {
        let site = &self.config.site;
        match title.filter(|t| !t.is_empty()) {
            Some(title) => format!("{} | {}", title, site.brand),
            None => format!("{} - {}", site.brand, site.tagline),
        }
    }

    /// Page description, or the site default sentence.
    pub fn effective_description<'p>(&'p self, description: Option<&'p str>) -> &'p str {
        description
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.config.site.description)
    }

    /// `{origin}{path}`, or the bare origin without a path.
    pub fn canonical_url(&self, path: Option<&str>) -> String {
        let origin = &self.config.site.origin;
        match path {
            Some(path) => format!("{origin}{path}"),
            None => origin.clone(),
        }
    }

    /// Absolute URL of a site-relative resource.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.config.site.origin, path)
    }

    pub fn compose(&self, page: &PageMetadata) -> HeadTags {
        let site = &self.config.site;
        let seo = &self.config.seo;

        let title = self.effective_title(page.title());
        let description = self.effective_description(page.description());
        let canonical = self.canonical_url(page.canonical_path.as_deref());
        let image = self.absolute_url(&page.social_image);

        let mut tags = HeadTags::new();

        // Basic metadata
        tags.push(HeadTag::title(&title));
        tags.push(HeadTag::name("description", description));
        if !page.keywords.is_empty() {
            tags.push(HeadTag::name("keywords", page.keywords.join(", ")));
        }
        tags.push(HeadTag::link("canonical", &canonical));

        // Social previews
        let social = SocialPage {
            og_type: &page.social_type,
            url: &canonical,
            title: &title,
            description,
            image: &image,
            raw_title: page.title(),
        };
        self.social.open_graph(&social).into_iter().for_each(|t| tags.push(t));
        self.social.twitter(&social).into_iter().for_each(|t| tags.push(t));

        // Fixed block
        tags.push(HeadTag::name("robots", &seo.robots));
        tags.push(HeadTag::name("language", &site.language));
        tags.push(HeadTag::name("revisit-after", &seo.revisit_after));
        tags.push(HeadTag::name("author", site.author()));
        tags.push(HeadTag::name("viewport", &seo.viewport));
        tags.push(HeadTag::http_equiv("Content-Type", mime::types::HTML));

        // Preload hints
        for font in &page.preload_fonts {
            let mime_type = font
                .mime_type
                .as_deref()
                .unwrap_or_else(|| mime::for_font(&font.href));
            tags.push(
                HeadTag::link("preload", &font.href)
                    .attr("as", "font")
                    .attr("type", mime_type)
                    .attr("crossorigin", "anonymous"),
            );
        }
        for href in &page.preload_images {
            tags.push(HeadTag::link("preload", href).attr("as", "image"));
        }

        // Structured data
        if let Some(data) = &page.structured_data {
            tags.push(HeadTag::script(mime::types::LD_JSON, data.to_string()));
        }

        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::meta::FontPreload;
    use serde_json::json;

    fn content<'t>(tags: &'t HeadTags, key: &str) -> Option<&'t str> {
        tags.find(key).and_then(HeadTag::content)
    }

    #[test]
    fn test_default_title() {
        let config = SiteConfig::default();
        let composer = HeadComposer::new(&config);
        let tags = composer.compose(&PageMetadata::default());
        assert_eq!(
            content(&tags, "title"),
            Some("Maruti Solutions - AI & Software Development Services")
        );

        let empty = composer.compose(&PageMetadata::default().with_title(""));
        assert_eq!(content(&empty, "title"), content(&tags, "title"));
    }

    #[test]
    fn test_page_title() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default().with_title("Services"));
        assert_eq!(content(&tags, "title"), Some("Services | Maruti Solutions"));
        assert_eq!(
            content(&tags, "meta[property=og:title]"),
            Some("Services | Maruti Solutions")
        );
        assert_eq!(
            content(&tags, "meta[name=twitter:image:alt]"),
            Some("Maruti Solutions - Services")
        );
    }

    #[test]
    fn test_default_description() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default());
        assert_eq!(
            content(&tags, "meta[name=description]"),
            Some(
                "Maruti Solutions provides cutting-edge AI solutions, custom software development, \
                 and digital transformation services for businesses across India."
            )
        );
    }

    #[test]
    fn test_canonical_with_path() {
        let config = SiteConfig::default();
        let tags =
            HeadComposer::new(&config).compose(&PageMetadata::default().with_canonical("/services"));
        assert_eq!(
            tags.find("link[rel=canonical]"),
            Some(&HeadTag::link(
                "canonical",
                "https://marutisolutions.com/services"
            ))
        );
        assert_eq!(
            content(&tags, "meta[property=og:url]"),
            Some("https://marutisolutions.com/services")
        );
    }

    #[test]
    fn test_canonical_without_path() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default());
        assert_eq!(
            tags.find("link[rel=canonical]"),
            Some(&HeadTag::link("canonical", "https://marutisolutions.com"))
        );
    }

    #[test]
    fn test_social_image_absolute() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default());
        assert_eq!(
            content(&tags, "meta[property=og:image]"),
            Some("https://marutisolutions.com/assets/og-image.jpg")
        );
        assert_eq!(
            content(&tags, "meta[name=twitter:image]"),
            Some("https://marutisolutions.com/assets/og-image.jpg")
        );
    }

    #[test]
    fn test_keywords() {
        let config = SiteConfig::default();
        let composer = HeadComposer::new(&config);

        let none = composer.compose(&PageMetadata::default());
        assert!(none.find("meta[name=keywords]").is_none());

        let some = composer.compose(&PageMetadata::default().with_keywords(["a", "b"]));
        assert_eq!(content(&some, "meta[name=keywords]"), Some("a, b"));
    }

    #[test]
    fn test_fixed_block_always_present() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default());
        assert_eq!(content(&tags, "meta[name=robots]"), Some("index, follow"));
        assert_eq!(content(&tags, "meta[name=language]"), Some("English"));
        assert_eq!(content(&tags, "meta[name=revisit-after]"), Some("7 days"));
        assert_eq!(content(&tags, "meta[name=author]"), Some("Maruti Solutions"));
        assert_eq!(
            content(&tags, "meta[name=viewport]"),
            Some("width=device-width, initial-scale=1.0")
        );
        assert_eq!(
            content(&tags, "meta[http-equiv=Content-Type]"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(content(&tags, "meta[property=og:type]"), Some("website"));
        assert_eq!(
            content(&tags, "meta[name=twitter:card]"),
            Some("summary_large_image")
        );
    }

    #[test]
    fn test_robots_fixed_for_every_page() {
        let config = SiteConfig::default();
        let composer = HeadComposer::new(&config);
        for page in [
            PageMetadata::default(),
            PageMetadata::default().with_title("Admin Dashboard"),
        ] {
            let tags = composer.compose(&page);
            assert_eq!(content(&tags, "meta[name=robots]"), Some("index, follow"));
        }
    }

    #[test]
    fn test_preloads() {
        let config = SiteConfig::default();
        let page = PageMetadata {
            preload_fonts: vec![
                FontPreload::new("/assets/fonts/inter-var.woff2"),
                FontPreload::new("/assets/fonts/legacy.ttf").with_type("font/custom"),
            ],
            preload_images: vec!["/assets/og-image.jpg".into(), "/assets/logo.png".into()],
            ..Default::default()
        };
        let tags = HeadComposer::new(&config).compose(&page);

        let html: Vec<_> = tags
            .iter()
            .filter(|t| t.key().as_str().starts_with("link[rel=preload]"))
            .map(HeadTag::to_html)
            .collect();
        assert_eq!(
            html,
            [
                r#"<link rel="preload" href="/assets/fonts/inter-var.woff2" as="font" type="font/woff2" crossorigin="anonymous">"#,
                r#"<link rel="preload" href="/assets/fonts/legacy.ttf" as="font" type="font/custom" crossorigin="anonymous">"#,
                r#"<link rel="preload" href="/assets/og-image.jpg" as="image">"#,
                r#"<link rel="preload" href="/assets/logo.png" as="image">"#,
            ]
        );
    }

    #[test]
    fn test_structured_data_round_trip() {
        let data = json!({
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": [{
                "@type": "Question",
                "name": "Do you build AI products?",
                "acceptedAnswer": {"@type": "Answer", "text": "Yes </script> & more"}
            }]
        });
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config)
            .compose(&PageMetadata::default().with_structured_data(data.clone()));

        let body = content(&tags, "script[type=application/ld+json]").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, data);

        // Rendered text parses to the same value too.
        let html = tags.find("script[type=application/ld+json]").unwrap().to_html();
        let text = html
            .strip_prefix(r#"<script type="application/ld+json">"#)
            .and_then(|s| s.strip_suffix("</script>"))
            .unwrap();
        assert!(!text.contains("</script>"));
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_no_structured_data() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default());
        assert!(tags.find("script[type=application/ld+json]").is_none());
    }

    #[test]
    fn test_compose_is_idempotent() {
        let config = SiteConfig::default();
        let composer = HeadComposer::new(&config);
        let page = PageMetadata::default()
            .with_title("Blog")
            .with_keywords(["ai", "web"]);
        assert_eq!(composer.compose(&page), composer.compose(&page));
    }

    #[test]
    fn test_custom_site_constants() {
        let mut config = SiteConfig::default();
        config.site.origin = "https://example.com".into();
        config.site.brand = "Acme".into();
        config.site.tagline = "Widgets".into();

        let composer = HeadComposer::new(&config);
        let tags = composer.compose(&PageMetadata::default());
        assert_eq!(content(&tags, "title"), Some("Acme - Widgets"));
        assert_eq!(
            tags.find("link[rel=canonical]"),
            Some(&HeadTag::link("canonical", "https://example.com"))
        );
        assert_eq!(content(&tags, "meta[name=author]"), Some("Acme"));
    }
}
