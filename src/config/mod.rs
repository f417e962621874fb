//! Site configuration management for `vitrine.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Config file lookup
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[site]`       | Origin, brand, tagline, default description      |
//! | `[seo]`        | Robots, social card and fixed tag defaults       |
//! | `[defaults]`   | Preload hints and structured data for all pages  |
//! | `[lazy]`       | Placeholder, margin, threshold, retries          |
//! | `[build]`      | Output and public directories, HTML template     |
//! | `[[pages]]`    | One entry per route                              |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildSectionConfig, DefaultsConfig, LazyConfig, PageConfig, SeoSectionConfig,
    SiteSectionConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing vitrine.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub seo: SeoSectionConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub lazy: LazyConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file; the project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cli.config, &cwd)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Output directory (absolute after `finalize`).
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Directory site-absolute asset URLs resolve against.
    pub fn public_dir(&self) -> &Path {
        &self.build.public
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Resolve the root, apply CLI overrides, then make paths absolute.
    fn finalize(&mut self, cli: &Cli) {
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if let Commands::Build { build_args } = &cli.command {
            self.apply_build_args(build_args);
        }

        self.normalize_paths();
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        self.build.clean = args.clean;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    fn normalize_paths(&mut self) {
        let root = normalize_path(&self.root);
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.build.public = normalize_path(&root.join(&self.build.public));
        if let Some(template) = self.build.template.take() {
            self.build.template = Some(normalize_path(&root.join(template)));
        }
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.lazy.validate(&mut diag);
        section::validate_pages(&self.pages, &mut diag);

        if self.pages.is_empty() {
            diag.warn(
                FieldPath::new("pages"),
                "no [[pages]] configured, only the fallback head is available",
            );
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML, panicking on unknown fields to catch typos.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
