//! What a loader displays: the request and its load state.

use thiserror::Error;

use crate::utils::html::escape_attr;

/// Alt text used when the request carries none.
pub const DEFAULT_ALT: &str = "Image";

/// Placeholder shown when neither the request nor `[lazy] placeholder`
/// names one.
pub const DEFAULT_PLACEHOLDER: &str = "/assets/placeholder.jpg";

/// Attributes the loader drives from its state.
const STATE_ATTRIBUTES: [&str; 2] = ["src", "class"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("invalid attribute name '{0}'")]
    InvalidName(String),
    #[error("attribute '{0}' is controlled by the loader")]
    Reserved(String),
}

/// HTML attribute name: non-empty, no whitespace, controls, quotes, `<`,
/// `>`, `/` or `=`.
fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !"\"'<>/=".contains(c))
}

/// Lifecycle of one loader instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Fetching,
    Loaded,
    Failed,
}

impl LoadState {
    /// State class appended to the host classes.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Idle | Self::Fetching => "loading",
            Self::Loaded => "loaded",
            Self::Failed => "failed",
        }
    }

    /// No further transitions happen from here.
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

/// One deferred image, fixed for the lifetime of its loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub target_url: String,
    /// `None` defers to the loader options, then [`DEFAULT_PLACEHOLDER`].
    pub placeholder_url: Option<String>,
    pub alt_text: Option<String>,
    pub class_name: String,
    /// Passed through in insertion order. A name matching `alt` or
    /// `loading` replaces that built-in attribute.
    pub extra_attributes: Vec<(String, String)>,
}

impl ImageRequest {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            placeholder_url: None,
            alt_text: None,
            class_name: String::new(),
            extra_attributes: Vec::new(),
        }
    }

    pub fn with_placeholder(mut self, url: impl Into<String>) -> Self {
        self.placeholder_url = Some(url.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    /// Add a passthrough attribute. A repeated name (ASCII case-insensitive)
    /// replaces the earlier value.
    pub fn with_attr(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, AttributeError> {
        let name = name.into();
        if !is_valid_attr_name(&name) {
            return Err(AttributeError::InvalidName(name));
        }
        if STATE_ATTRIBUTES.iter().any(|a| name.eq_ignore_ascii_case(a)) {
            return Err(AttributeError::Reserved(name));
        }

        let value = value.into();
        match self.attr_slot(&name) {
            Some(slot) => slot.1 = value,
            None => self.extra_attributes.push((name, value)),
        }
        Ok(self)
    }

    fn attr_slot(&mut self, name: &str) -> Option<&mut (String, String)> {
        self.extra_attributes
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Value of a passthrough attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.extra_attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn alt(&self) -> &str {
        self.alt_text.as_deref().unwrap_or(DEFAULT_ALT)
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder_url.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    /// Source shown in `state`: the target only once loaded.
    pub fn src(&self, state: LoadState) -> &str {
        match state {
            LoadState::Loaded => &self.target_url,
            _ => self.placeholder(),
        }
    }

    pub fn class(&self, state: LoadState) -> String {
        let host = self.class_name.trim();
        if host.is_empty() {
            state.class().to_string()
        } else {
            format!("{host} {}", state.class())
        }
    }

    /// Render the `<img>` element for `state`.
    pub fn render(&self, state: LoadState) -> String {
        let class = self.class(state);
        let builtin = [
            ("src", self.src(state)),
            ("alt", self.alt()),
            ("class", class.as_str()),
            ("loading", "lazy"),
        ];

        let mut html = String::from("<img");
        for (name, value) in builtin {
            let value = self.attr(name).unwrap_or(value);
            html.push_str(&format!(r#" {name}="{}""#, escape_attr(value)));
        }
        for (name, value) in &self.extra_attributes {
            if builtin.iter().any(|(b, _)| name.eq_ignore_ascii_case(b)) {
                continue;
            }
            html.push_str(&format!(r#" {name}="{}""#, escape_attr(value)));
        }
        html.push('>');
        html
    }
}
