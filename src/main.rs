//! Vitrine - crawler-visible document heads and deferred image loading for
//! a single-page marketing site.

#![allow(dead_code)]

mod cli;
mod config;
mod lazy;
mod logger;
mod page;
mod seo;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config, false).map(|_| ()),
        Commands::Head { args } => cli::head::print_head(&config, args),
        Commands::Validate { args } => cli::validate::validate_images(&config, args),
    }
}
