//! Client-side navigation: one head mount per page change.

use super::route::{Resolved, Router};
use crate::config::SiteConfig;
use crate::debug;
use crate::seo::{HeadComposer, HeadDiff, HeadManager, HeadTags};

/// Owns the head for a session and remounts it on every navigation.
pub struct Navigator<'a> {
    router: &'a Router,
    composer: HeadComposer<'a>,
    head: HeadManager,
    current: Option<String>,
}

impl<'a> Navigator<'a> {
    pub fn new(config: &'a SiteConfig, router: &'a Router) -> Self {
        Self {
            router,
            composer: HeadComposer::new(config),
            head: HeadManager::new(),
            current: None,
        }
    }

    /// Compose the head for `path` without mounting it.
    pub fn head_for(&self, path: &str) -> HeadTags {
        self.composer.compose(self.router.resolve(path).metadata())
    }

    /// Head of an unmatched path, even when a page claims `/404`.
    pub fn fallback_head(&self) -> HeadTags {
        self.composer.compose(self.router.not_found())
    }

    /// Switch to `path`, replacing the whole head.
    pub fn navigate(&mut self, path: &str) -> HeadDiff {
        let resolved = self.router.resolve(path);
        if let Resolved::NotFound(_) = resolved {
            debug!("route"; "no page for {}, using defaults", path);
        }

        let diff = self.head.mount(self.composer.compose(resolved.metadata()));
        self.current = Some(path.to_string());
        diff
    }

    /// Path of the last navigation.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn head(&self) -> &HeadManager {
        &self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::seo::TagKey;

    const CONFIG: &str = r#"
[[pages]]
path = "/services"
title = "Services"
keywords = ["AI solutions"]

[pages.structured_data]
"@type" = "Service"

[[pages]]
path = "/about"
title = "About Us"
"#;

    fn canonical(nav: &Navigator<'_>) -> Option<String> {
        nav.head()
            .active()
            .find("link[rel=canonical]")
            .and_then(|tag| tag.href())
            .map(str::to_string)
    }

    #[test]
    fn test_navigation_replaces_head() {
        let config = test_parse_config(CONFIG);
        let router = Router::from_config(&config);
        let mut nav = Navigator::new(&config, &router);

        let first = nav.navigate("/services");
        assert!(first.removed.is_empty());
        assert_eq!(
            canonical(&nav).as_deref(),
            Some("https://marutisolutions.com/services")
        );

        let second = nav.navigate("/about");
        assert_eq!(
            canonical(&nav).as_deref(),
            Some("https://marutisolutions.com/about")
        );
        assert!(second.changed.contains(&TagKey::from("title")));
        assert!(second.removed.contains(&TagKey::from("meta[name=keywords]")));
        assert!(second.removed.contains(&TagKey::from("script[type=application/ld+json]")));

        let html = nav.head().render("", true);
        assert!(!html.contains("/services"));
        assert_eq!(nav.current(), Some("/about"));
    }

    #[test]
    fn test_same_page_twice_is_noop() {
        let config = test_parse_config(CONFIG);
        let router = Router::from_config(&config);
        let mut nav = Navigator::new(&config, &router);

        nav.navigate("/about");
        let before = nav.head().active().clone();
        assert!(nav.navigate("/about/").is_empty());
        assert_eq!(nav.head().active(), &before);
        assert_eq!(nav.head().mounts(), 2);
    }

    #[test]
    fn test_unknown_route_uses_site_title() {
        let config = test_parse_config(CONFIG);
        let router = Router::from_config(&config);
        let mut nav = Navigator::new(&config, &router);

        nav.navigate("/missing");
        let title = nav.head().active().find("title").unwrap();
        assert_eq!(
            title.content(),
            Some("Maruti Solutions - AI & Software Development Services")
        );
        assert_eq!(
            canonical(&nav).as_deref(),
            Some("https://marutisolutions.com")
        );
    }
}
