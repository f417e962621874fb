//! Declarative head-tag descriptors.
//!
//! A [`HeadTag`] describes one element of `<head>`. Each tag has an identity
//! ([`TagKey`]) used to deduplicate within a set and to diff sets across
//! navigations:
//!
//! | Tag                          | Identity                                   |
//! |------------------------------|--------------------------------------------|
//! | `<title>`                    | `title`                                    |
//! | `<meta name=..>`             | `meta[name=..]`                            |
//! | `<meta property=..>`         | `meta[property=..]`                        |
//! | `<meta http-equiv=..>`       | `meta[http-equiv=..]`                      |
//! | `<link rel=preload>`         | `link[rel=preload][as=..][href=..]`        |
//! | other `<link>`               | `link[rel=..]`                             |
//! | `<script type=..>`           | `script[type=..]`                          |

use std::fmt::{self, Write};

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::utils::html::{escape, escape_attr, escape_script_json};

/// Which attribute names a `<meta>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetaKey {
    Name(String),
    Property(String),
    HttpEquiv(String),
}

impl MetaKey {
    const fn attr(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Property(_) => "property",
            Self::HttpEquiv(_) => "http-equiv",
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::Name(v) | Self::Property(v) | Self::HttpEquiv(v) => v,
        }
    }
}

/// One element of the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum HeadTag {
    Title {
        text: String,
    },
    Meta {
        key: MetaKey,
        content: String,
    },
    Link {
        rel: String,
        href: String,
        /// Extra attributes in output order (`as`, `type`, `crossorigin`, ...).
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(String, String)>,
    },
    Script {
        #[serde(rename = "type")]
        mime: String,
        body: String,
    },
}

/// Identity of a head tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TagKey(String);

impl TagKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl HeadTag {
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title { text: text.into() }
    }

    pub fn name(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::Name(name.into()),
            content: content.into(),
        }
    }

    pub fn property(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::Property(property.into()),
            content: content.into(),
        }
    }

    pub fn http_equiv(header: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::HttpEquiv(header.into()),
            content: content.into(),
        }
    }

    pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            rel: rel.into(),
            href: href.into(),
            attrs: Vec::new(),
        }
    }

    /// Append an attribute to a `Link`; no-op for other tags.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Link { attrs, .. } = &mut self {
            attrs.push((name.into(), value.into()));
        }
        self
    }

    pub fn script(mime: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Script {
            mime: mime.into(),
            body: body.into(),
        }
    }

    /// Identity used for deduplication.
    pub fn key(&self) -> TagKey {
        let key = match self {
            Self::Title { .. } => "title".to_string(),
            Self::Meta { key, .. } => format!("meta[{}={}]", key.attr(), key.value()),
            Self::Link {
                rel, href, attrs, ..
            } if rel == "preload" => {
                let kind = attrs
                    .iter()
                    .find(|(name, _)| name == "as")
                    .map_or("", |(_, v)| v.as_str());
                format!("link[rel=preload][as={kind}][href={href}]")
            }
            Self::Link { rel, .. } => format!("link[rel={rel}]"),
            Self::Script { mime, .. } => format!("script[type={mime}]"),
        };
        TagKey(key)
    }

    /// Text content of a `<meta>` or `<title>`, or the body of a `<script>`.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Title { text } => Some(text),
            Self::Meta { content, .. } => Some(content),
            Self::Script { body, .. } => Some(body),
            Self::Link { .. } => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Link { href, .. } => Some(href),
            _ => None,
        }
    }

    /// Render as a single HTML element.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(64);
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = match self {
            Self::Title { text } => write!(out, "<title>{}</title>", escape(text)),
            Self::Meta { key, content } => write!(
                out,
                r#"<meta {}="{}" content="{}">"#,
                key.attr(),
                escape_attr(key.value()),
                escape_attr(content)
            ),
            Self::Link { rel, href, attrs } => {
                let _ = write!(
                    out,
                    r#"<link rel="{}" href="{}""#,
                    escape_attr(rel),
                    escape_attr(href)
                );
                for (name, value) in attrs {
                    let _ = write!(out, r#" {}="{}""#, name, escape_attr(value));
                }
                write!(out, ">")
            }
            Self::Script { mime, body } => write!(
                out,
                r#"<script type="{}">{}</script>"#,
                escape_attr(mime),
                escape_script_json(body)
            ),
        };
    }
}

// ============================================================================
// HeadTags
// ============================================================================

/// An ordered set of head tags, unique by [`TagKey`].
///
/// Pushing a tag whose identity is already present replaces the earlier tag
/// in place, so the last writer wins while output order stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeadTags {
    tags: Vec<HeadTag>,
    #[serde(skip)]
    index: FxHashMap<TagKey, usize>,
}

impl HeadTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: HeadTag) {
        let key = tag.key();
        match self.index.get(&key) {
            Some(&pos) => self.tags[pos] = tag,
            None => {
                self.index.insert(key, self.tags.len());
                self.tags.push(tag);
            }
        }
    }

    pub fn get(&self, key: &TagKey) -> Option<&HeadTag> {
        self.index.get(key).map(|&pos| &self.tags[pos])
    }

    /// Look up a tag by its identity string, e.g. `meta[name=description]`.
    pub fn find(&self, key: &str) -> Option<&HeadTag> {
        self.get(&TagKey::from(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = TagKey> + '_ {
        self.tags.iter().map(HeadTag::key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeadTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Render all tags, one per line with `indent` (or back to back when
    /// `minify` is set).
    pub fn to_html(&self, indent: &str, minify: bool) -> String {
        let mut out = String::with_capacity(self.tags.len() * 80);
        for tag in &self.tags {
            if !minify {
                out.push_str(indent);
            }
            tag.write_html(&mut out);
            if !minify {
                out.push('\n');
            }
        }
        out
    }
}

impl FromIterator<HeadTag> for HeadTags {
    fn from_iter<I: IntoIterator<Item = HeadTag>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.push(tag);
        }
        tags
    }
}

impl<'a> IntoIterator for &'a HeadTags {
    type Item = &'a HeadTag;
    type IntoIter = std::slice::Iter<'a, HeadTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
