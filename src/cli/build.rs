//! Static head pre-rendering.
//!
//! Build phases:
//! - **Init** - clean (with `--clean`) and create the output directory
//! - **Template** - read `[build] template` or use the built-in shell
//! - **Render** - one `index.html` per route, head injected before `</head>`
//! - **Fallback** - `404.html` with the site-wide defaults

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::{
    config::SiteConfig,
    log,
    logger::Progress,
    page::{Navigator, Router},
    seo::HeadTags,
    utils::{html::find_head_close, path::route_output_file, plural_count},
};

/// Indent for head tags in non-minified output.
const INDENT: &str = "    ";

/// Shell used when no template is configured. `{lang}` is replaced.
const DEFAULT_SHELL: &str = r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
</head>
<body>
    <div id="root"></div>
</body>
</html>
"#;

/// Files written by one build.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub pages: Vec<PathBuf>,
    pub not_found: Option<PathBuf>,
}

/// Render every route into the output directory.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildSummary> {
    let output = config.output_dir();
    init_output(output, config.build.clean)?;

    let shell = load_shell(config)?;
    let router = Router::from_config(config);
    let mut navigator = Navigator::new(config, &router);
    let mut summary = BuildSummary::default();

    let progress = (!quiet && !router.is_empty()).then(|| Progress::new("build", router.len()));
    for route in router.routes() {
        navigator.navigate(&route.path);
        let html = inject_head(&shell, navigator.head().active(), config.build.minify)?;
        let Some(file) = route_output_file(output, &route.path) else {
            bail!("route {} does not map into {}", route.path, output.display());
        };
        write_file(&file, &html)?;
        summary.pages.push(file);
        if let Some(p) = &progress {
            p.inc();
        }
    }
    if let Some(p) = progress {
        p.finish();
    }

    if config.build.not_found {
        let head = navigator.fallback_head();
        let html = inject_head(&shell, &head, config.build.minify)?;
        let file = output.join("404.html");
        write_file(&file, &html)?;
        summary.not_found = Some(file);
    }

    if !quiet {
        log!(
            "build";
            "wrote {} to {}",
            plural_count(summary.pages.len(), "page"),
            output.display()
        );
    }
    Ok(summary)
}

fn init_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))
}

fn load_shell(config: &SiteConfig) -> Result<String> {
    match &config.build.template {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            if find_head_close(&content).is_none() {
                bail!("template {} has no </head>", path.display());
            }
            Ok(content)
        }
        None => Ok(DEFAULT_SHELL.replace("{lang}", &config.site.lang)),
    }
}

/// Insert rendered tags right before `</head>`.
fn inject_head(shell: &str, tags: &HeadTags, minify: bool) -> Result<String> {
    let Some(pos) = find_head_close(shell) else {
        bail!("html shell has no </head>");
    };

    let head = tags.to_html(INDENT, minify);
    let mut html = String::with_capacity(shell.len() + head.len());
    html.push_str(&shell[..pos]);
    html.push_str(&head);
    html.push_str(&shell[pos..]);
    Ok(html)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
