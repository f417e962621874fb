//! Image validation command.
//!
//! Every image the configuration references is mounted as a deferred
//! loader inside a fully visible viewport, so each one goes through the
//! same fetch/decode/retry path a page would use.

mod report;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;

use super::args::ValidateArgs;
use crate::config::SiteConfig;
use crate::lazy::{
    FsImageSource, ImageRequest, ImageSource, LazyImage, LoadState, LoaderOptions, Rect, Viewport,
};
use crate::utils::{path::is_external_link, plural_count};
use crate::{debug, log};

use report::ValidationReport;

/// One image URL and the config fields that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageRef {
    url: String,
    sources: Vec<String>,
}

/// Validate every configured image.
pub fn validate_images(config: &SiteConfig, args: &ValidateArgs) -> Result<()> {
    let refs = collect_image_refs(config);
    if refs.is_empty() {
        log!("validate"; "no images configured");
        return Ok(());
    }

    log!("validate"; "checking {}", plural_count(refs.len(), "image"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let source = Arc::new(FsImageSource::new(config.public_dir()));
    let options = LoaderOptions::from_config(&config.lazy);
    let report = runtime.block_on(check_images(&refs, options, source));

    report.print();
    log!("validate"; "{}", report);
    if report.skipped > 0 {
        log!("validate"; "skipped {}", plural_count(report.skipped, "remote image"));
    }

    if report.is_ok() || args.warn_only {
        return Ok(());
    }
    bail!(
        "validation failed: {}",
        plural_count(report.error_count(), "failed image")
    )
}

/// Gather image URLs in config order, merging repeated URLs.
fn collect_image_refs(config: &SiteConfig) -> Vec<ImageRef> {
    let mut refs: Vec<ImageRef> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    let mut add = |source: String, url: &str| {
        if url.is_empty() {
            return;
        }
        match index.get(url) {
            Some(&i) => {
                if !refs[i].sources.contains(&source) {
                    refs[i].sources.push(source);
                }
            }
            None => {
                index.insert(url.to_string(), refs.len());
                refs.push(ImageRef {
                    url: url.to_string(),
                    sources: vec![source],
                });
            }
        }
    };

    add("lazy.placeholder".into(), &config.lazy.placeholder);
    add("seo.social_image".into(), &config.seo.social_image);
    for url in &config.defaults.preload_images {
        add("defaults.preload_images".into(), url);
    }

    for page in &config.pages {
        let prefix = format!("pages[{}]", page.path);
        if let Some(url) = &page.social_image {
            add(format!("{prefix}.social_image"), url);
        }
        for url in &page.preload_images {
            add(format!("{prefix}.preload_images"), url);
        }
        for url in &page.images {
            add(format!("{prefix}.images"), url);
        }
    }

    refs
}

async fn check_images<S: ImageSource>(
    refs: &[ImageRef],
    options: LoaderOptions,
    source: Arc<S>,
) -> ValidationReport {
    let viewport = Viewport::new(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let visible = Rect::new(0.0, 0.0, 1.0, 1.0);
    let mut report = ValidationReport::default();

    let mut mounted = Vec::with_capacity(refs.len());
    for image in refs {
        if is_external_link(&image.url) {
            debug!("validate"; "skipping remote image {}", image.url);
            report.skipped += 1;
            continue;
        }
        let loader = LazyImage::new(ImageRequest::new(image.url.as_str()))
            .with_options(options.clone())
            .mount(&viewport, visible, Arc::clone(&source));
        mounted.push((image, loader));
    }

    for (image, mut loader) in mounted {
        match loader.settled().await {
            LoadState::Loaded => report.checked += 1,
            _ => {
                let reason = loader.error().unwrap_or_default();
                for field in &image.sources {
                    report.add_image(field.clone(), image.url.clone(), reason.clone());
                }
            }
        }
    }

    report
}
