//! The single active head.
//!
//! Mounting a tag set replaces whatever the previous navigation left behind;
//! nothing accumulates across mounts.

use super::tag::{HeadTags, TagKey};

/// Changes produced by one mount, keyed by tag identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDiff {
    pub added: Vec<TagKey>,
    pub removed: Vec<TagKey>,
    pub changed: Vec<TagKey>,
}

impl HeadDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Owns the document head's current tag set.
#[derive(Debug, Default)]
pub struct HeadManager {
    active: HeadTags,
    mounts: u64,
}

impl HeadManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active set. Mounting an identical set is a no-op.
    pub fn mount(&mut self, next: HeadTags) -> HeadDiff {
        let diff = diff(&self.active, &next);
        if !diff.is_empty() {
            self.active = next;
        }
        self.mounts += 1;
        diff
    }

    /// Remove every tag.
    pub fn unmount(&mut self) -> HeadDiff {
        self.mount(HeadTags::new())
    }

    pub fn active(&self) -> &HeadTags {
        &self.active
    }

    /// Number of `mount` calls so far.
    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    pub fn render(&self, indent: &str, minify: bool) -> String {
        self.active.to_html(indent, minify)
    }
}

fn diff(prev: &HeadTags, next: &HeadTags) -> HeadDiff {
    let mut out = HeadDiff::default();

    for tag in next {
        let key = tag.key();
        match prev.get(&key) {
            None => out.added.push(key),
            Some(old) if old != tag => out.changed.push(key),
            Some(_) => {}
        }
    }
    out.removed = prev.keys().filter(|k| next.get(k).is_none()).collect();

    // Same identities and contents, but a different order still re-renders.
    if out.is_empty() && prev != next {
        out.changed = next.keys().collect();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::seo::{HeadComposer, HeadTag, PageMetadata};

    #[test]
    fn test_first_mount_adds_everything() {
        let config = SiteConfig::default();
        let tags = HeadComposer::new(&config).compose(&PageMetadata::default());
        let count = tags.len();

        let mut head = HeadManager::new();
        let diff = head.mount(tags);
        assert_eq!(diff.added.len(), count);
        assert!(diff.removed.is_empty());
        assert_eq!(head.active().len(), count);
    }

    #[test]
    fn test_mount_same_set_is_noop() {
        let config = SiteConfig::default();
        let composer = HeadComposer::new(&config);
        let page = PageMetadata::default().with_title("About");

        let mut head = HeadManager::new();
        head.mount(composer.compose(&page));
        let before = head.render("", false);

        let diff = head.mount(composer.compose(&page));
        assert!(diff.is_empty());
        assert_eq!(head.render("", false), before);
        assert_eq!(head.mounts(), 2);
    }

    #[test]
    fn test_new_page_supersedes_previous() {
        let config = SiteConfig::default();
        let composer = HeadComposer::new(&config);

        let services = PageMetadata::default()
            .with_title("Services")
            .with_canonical("/services")
            .with_keywords(["ai"]);
        let about = PageMetadata::default()
            .with_title("About")
            .with_canonical("/about");

        let mut head = HeadManager::new();
        head.mount(composer.compose(&services));
        let diff = head.mount(composer.compose(&about));

        assert!(diff.removed.iter().any(|k| k.as_str() == "meta[name=keywords]"));
        assert!(diff.changed.iter().any(|k| k.as_str() == "title"));

        let html = head.render("", true);
        assert!(!html.contains("/services"));
        assert!(!html.contains("keywords"));
        assert!(html.contains("https://marutisolutions.com/about"));
        assert_eq!(html.matches("<title>").count(), 1);
    }

    #[test]
    fn test_unmount_clears() {
        let mut head = HeadManager::new();
        head.mount([HeadTag::title("x")].into_iter().collect());
        let diff = head.unmount();
        assert_eq!(diff.removed.len(), 1);
        assert!(head.active().is_empty());
    }
}
