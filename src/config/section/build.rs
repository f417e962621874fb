//! `[build]` configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory for pre-rendered shells.
    pub output: PathBuf,
    /// Directory that site-absolute asset URLs resolve against.
    pub public: PathBuf,
    /// HTML template whose `</head>` receives the generated tags
    /// (e.g. the bundler's `index.html`). A built-in shell is used when unset.
    pub template: Option<PathBuf>,
    /// Render head tags without whitespace.
    pub minify: bool,
    /// Also write `404.html` with the not-found head.
    pub not_found: bool,
    /// Remove the output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            public: "public".into(),
            template: None,
            minify: false,
            not_found: true,
            clean: false,
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
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.public, PathBuf::from("public"));
        assert!(config.build.template.is_none());
        assert!(config.build.not_found);
    }

    #[test]
    fn test_custom() {
        let config = test_parse_config(
            "[build]\noutput = \"out\"\ntemplate = \"dist/index.html\"\nminify = true",
        );
        assert_eq!(config.build.output, PathBuf::from("out"));
        assert_eq!(config.build.template, Some(PathBuf::from("dist/index.html")));
        assert!(config.build.minify);
    }
}
