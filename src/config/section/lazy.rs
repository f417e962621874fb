//! `[lazy]` configuration for deferred image loading.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::lazy::{DEFAULT_PLACEHOLDER, RootMargin};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    /// Image shown until the target image has loaded.
    pub placeholder: String,
    /// CSS margin shorthand around the viewport, e.g. "100px 0px".
    pub root_margin: String,
    /// Minimum visible fraction of the element that starts a fetch.
    pub threshold: f64,
    /// Extra decode attempts after the first failure.
    pub max_retries: u32,
    /// Delay between decode attempts.
    pub retry_delay_ms: u64,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.into(),
            root_margin: "100px 0px".into(),
            threshold: 0.01,
            max_retries: 2,
            retry_delay_ms: 250,
        }
    }
}

impl LazyConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(e) = self.root_margin.parse::<RootMargin>() {
            diag.error_with_hint(
                FieldPath::new("lazy.root_margin"),
                e.to_string(),
                "use 1 to 4 pixel lengths, e.g. \"100px 0px\"",
            );
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            diag.error(
                FieldPath::new("lazy.threshold"),
                format!("threshold {} must be between 0 and 1", self.threshold),
            );
        }

        if self.placeholder.is_empty() {
            diag.warn(
                FieldPath::new("lazy.placeholder"),
                "empty placeholder renders an <img> without a source",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.lazy.placeholder, "/assets/placeholder.jpg");
        assert_eq!(config.lazy.root_margin, "100px 0px");
        assert_eq!(config.lazy.threshold, 0.01);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let lazy = LazyConfig {
            root_margin: "10em".into(),
            threshold: 1.5,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        lazy.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }
}
