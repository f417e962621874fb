//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Vitrine: crawler-visible document heads and deferred images for a
/// single-page site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: vitrine.toml)
    #[arg(short = 'C', long, global = true, default_value = "vitrine.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pre-render one HTML shell per route
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the document head for a single route
    #[command(visible_alias = "h")]
    Head {
        #[command(flatten)]
        args: HeadArgs,
    },

    /// Load every configured image through the deferred loader
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Minify the generated head
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Head command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct HeadArgs {
    /// Route path, e.g. `/services`
    pub route: String,

    /// Print tag descriptors as JSON instead of HTML
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Treat validation failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["vitrine", "build", "-o", "out", "-m"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.output, Some(PathBuf::from("out")));
        assert_eq!(build_args.minify, Some(true));
        assert!(!build_args.clean);
    }

    #[test]
    fn test_parse_minify_false() {
        let cli = Cli::parse_from(["vitrine", "build", "--minify", "false"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.minify, Some(false));
    }

    #[test]
    fn test_parse_head_with_globals() {
        let cli = Cli::parse_from([
            "vitrine", "head", "/about", "--json", "--pretty", "-C", "site.toml", "-v",
        ]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(cli.verbose);
        let Commands::Head { args } = cli.command else {
            panic!("expected head");
        };
        assert_eq!(args.route, "/about");
        assert!(args.json && args.pretty);
    }

    #[test]
    fn test_pretty_requires_json() {
        assert!(Cli::try_parse_from(["vitrine", "head", "/", "--pretty"]).is_err());
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from(["vitrine", "v", "-w"]);
        assert!(matches!(
            cli.command,
            Commands::Validate {
                args: ValidateArgs { warn_only: true }
            }
        ));
    }
}
