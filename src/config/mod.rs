//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section           | Purpose                                        |
//! |-------------------|------------------------------------------------|
//! | `[base]`          | Site metadata (title, author, url, defaults)   |
//! | `[build]`         | Content/output paths, feed outputs             |
//! | `[[collections]]` | Collections: source, ordering, pagination      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//!
//! [build]
//! content = "content"
//! output = "public"
//!
//! [[collections]]
//! title = "Blog"
//! content_type = "post"
//! content_path = "blog"
//! output_path = "blog"
//! items_per_page = 10
//! has_archive = true
//! ```

mod base;
mod build;
mod collection;
pub mod defaults;
mod error;

pub use base::BaseConfig;
pub use build::{BuildConfig, FeedOutputConfig};
pub use collection::CollectionConfig;
pub use error::ConfigError;

use crate::{
    cli::{Cli, Commands},
    generator::{FeedAuthor, FeedConfig},
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Declared collections
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Find a collection by slug or title.
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections
            .iter()
            .find(|c| c.slug() == name || c.title == name)
    }

    /// Global feed defaults handed to the feed synthesizer.
    pub fn feed_config(&self) -> FeedConfig {
        let base = &self.base;
        FeedConfig {
            title: base.title.clone(),
            description: base.description.clone(),
            home_page_url: base.url.clone().unwrap_or_default(),
            json_feed_path: self.build.feed.json_path.to_string_lossy().into_owned(),
            icon: base.icon.clone(),
            favicon: base.favicon.clone(),
            author: FeedAuthor {
                name: base.author.clone(),
                avatar: base.author_avatar.clone(),
                url: base.author_url.clone(),
            },
            default_image: base.default_image.clone(),
            default_banner_image: base.default_banner_image.clone(),
            time_format: base.time_format.clone(),
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Commands::Build { build_args } = &cli.command {
            Self::update_option(&mut self.build.output, build_args.output.as_ref());
            Self::update_option(&mut self.build.feed.json, build_args.json_feed.as_ref());
            Self::update_option(&mut self.build.feed.rss, build_args.rss.as_ref());
            if let Some(url) = &build_args.base_url {
                self.base.url = Some(url.clone());
            }
        }

        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.update_path_with_root(&root, cli);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before building
    pub fn validate(&self) -> Result<()> {
        if self.build.feed.any_enabled() && !self.collections.is_empty() {
            match &self.base.url {
                None => bail!(ConfigError::MissingBaseUrl),
                Some(url) if !url.starts_with("http") => bail!(ConfigError::InvalidBaseUrl),
                Some(_) => {}
            }
        }

        let mut slugs = HashSet::new();
        for collection in &self.collections {
            if collection.items_per_page == Some(0) {
                bail!(ConfigError::InvalidPageSize(collection.title.clone()));
            }
            if collection.includes.is_empty() {
                bail!(ConfigError::Validation(format!(
                    "collection `{}`: includes must have at least one pattern",
                    collection.title
                )));
            }
            let slug = collection.slug();
            if !slugs.insert(slug.clone()) {
                bail!(ConfigError::DuplicateCollection(slug));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(content: &str) -> SiteConfig {
        SiteConfig::from_str(content).unwrap()
    }

    const VALID: &str = r#"
        [base]
        title = "Site"
        url = "https://example.com"

        [[collections]]
        title = "Blog"
        items_per_page = 10
    "#;

    #[test]
    fn test_validate_ok() {
        assert!(parse(VALID).validate().is_ok());
    }

    #[test]
    fn test_validate_requires_url_for_feeds() {
        let config = parse(
            r#"
            [base]
            title = "Site"

            [[collections]]
            title = "Blog"
            "#,
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[base.url] is required"));
    }

    #[test]
    fn test_validate_url_not_needed_without_feeds() {
        let config = parse(
            r#"
            [base]
            title = "Site"

            [build.feed]
            json = false
            rss = false

            [[collections]]
            title = "Blog"
            "#,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = parse(VALID);
        config.base.url = Some("example.com".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = parse(VALID);
        config.collections[0].items_per_page = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("items_per_page"));
    }

    #[test]
    fn test_validate_rejects_duplicate_slugs() {
        let mut config = parse(VALID);
        config.collections.push(CollectionConfig::new("blog"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("`blog`"));
    }

    #[test]
    fn test_find_collection() {
        let config = parse(VALID);
        assert!(config.collection("blog").is_some());
        assert!(config.collection("Blog").is_some());
        assert!(config.collection("notes").is_none());
    }

    #[test]
    fn test_feed_config_from_base() {
        let config = parse(
            r#"
            [base]
            title = "Site"
            description = "Sub"
            url = "https://example.com"
            author = "Alice"
            author_url = "https://example.com/alice"
            default_image = "/default.png"
            "#,
        );
        let feed = config.feed_config();

        assert_eq!(feed.title, "Site");
        assert_eq!(feed.description, "Sub");
        assert_eq!(feed.home_page_url, "https://example.com");
        assert_eq!(feed.json_feed_path, "feed.json");
        assert_eq!(feed.author.name, "Alice");
        assert_eq!(feed.author.url.as_deref(), Some("https://example.com/alice"));
        assert_eq!(feed.author.avatar, None);
        assert_eq!(feed.default_image.as_deref(), Some("/default.png"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::from_path(&dir.path().join("folio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_update_with_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, VALID).unwrap();

        let cli = Cli::parse_from([
            "folio",
            "--root",
            dir.path().to_str().unwrap(),
            "build",
            "--rss",
            "false",
            "--base-url",
            "https://ci.example.com",
        ]);
        let mut config = SiteConfig::from_path(&path).unwrap();
        config.update_with_cli(&cli);

        assert!(config.build.output.is_absolute());
        assert!(config.build.output.ends_with("public"));
        assert!(config.build.content.ends_with("content"));
        assert!(!config.build.feed.rss);
        assert!(config.build.feed.json);
        assert_eq!(config.base.url.as_deref(), Some("https://ci.example.com"));
    }
}
