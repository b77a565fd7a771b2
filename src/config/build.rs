//! `[build]` section configuration.
//!
//! Content/output directories and which feed files get written.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
///
/// [build.feed]
/// json = true
/// rss = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory; collection `content_path`s are relative to it.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for feeds and archive data.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Write archive page data (`archive/<slug>.json`) for templates.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub archive: bool,

    /// Feed generation.
    #[serde(default)]
    pub feed: FeedOutputConfig,
}

/// `[build.feed]` section - which feed files each collection writes.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedOutputConfig {
    /// Write a JSON Feed document.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub json: bool,

    /// Write an RSS 2.0 document.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub rss: bool,

    /// File name of the JSON feed, relative to the collection output path.
    #[serde(default = "defaults::build::feed::json_path")]
    #[educe(Default = defaults::build::feed::json_path())]
    pub json_path: PathBuf,

    /// File name of the RSS feed, relative to the collection output path.
    #[serde(default = "defaults::build::feed::rss_path")]
    #[educe(Default = defaults::build::feed::rss_path())]
    pub rss_path: PathBuf,
}

impl FeedOutputConfig {
    pub const fn any_enabled(&self) -> bool {
        self.json || self.rss
    }
}
