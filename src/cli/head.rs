//! `vitrine head <route>`: print one route's document head.

use anyhow::{Context, Result};

use super::args::HeadArgs;
use crate::config::SiteConfig;
use crate::debug;
use crate::page::{Navigator, Router};

/// Render the head for `args.route` as HTML or JSON descriptors.
pub fn render_head(config: &SiteConfig, args: &HeadArgs) -> Result<String> {
    let router = Router::from_config(config);
    if router.resolve(&args.route).is_not_found() {
        debug!("head"; "{} is not a configured page, using defaults", args.route);
    }

    let tags = Navigator::new(config, &router).head_for(&args.route);
    if !args.json {
        return Ok(tags.to_html("", config.build.minify));
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&tags)
    } else {
        serde_json::to_string(&tags)
    };
    json.context("Failed to serialize head tags")
}

pub fn print_head(config: &SiteConfig, args: &HeadArgs) -> Result<()> {
    let output = render_head(config, args)?;
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}
