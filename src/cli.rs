//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// folio collection and feed builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the Build command
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// enable json feed generation
    #[arg(long = "json-feed", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub json_feed: Option<bool>,

    /// enable rss feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful for CI/CD deployments where the production URL differs from local development.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build feeds and archive data for every collection
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print a collection's pages (feed order) or its grouping as JSON
    Query {
        /// Collection slug or title
        collection: String,

        /// Group pages by this attribute (e.g. `category`, `tags`)
        #[arg(short, long)]
        by: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["folio", "build", "--rss", "--json-feed", "false"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.rss, Some(true));
        assert_eq!(build_args.json_feed, Some(false));
        assert_eq!(build_args.output, None);
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::parse_from(["folio", "-C", "site.toml", "query", "blog", "--by", "tags"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        let Commands::Query { collection, by } = cli.command else {
            panic!("expected query");
        };
        assert_eq!(collection, "blog");
        assert_eq!(by.as_deref(), Some("tags"));
    }
}
