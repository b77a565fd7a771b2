//! `[base]` section configuration.
//!
//! Site-wide metadata: feed title, author, icons and the global defaults
//! items fall back to.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// description = "A personal blog about Rust"
/// author = "Alice"
/// url = "https://myblog.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used as the feed title.
    pub title: String,

    /// Site subtitle, used as the feed description.
    #[serde(default)]
    pub description: String,

    /// Base URL for feed links and item guids.
    /// Required when any feed output is enabled.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Author name for the feed author object.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    #[serde(default)]
    pub author_avatar: Option<String>,

    #[serde(default)]
    pub author_url: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub favicon: Option<String>,

    /// Image used by items that don't carry their own.
    #[serde(default)]
    pub default_image: Option<String>,

    /// Banner image used by items that don't carry their own.
    #[serde(default)]
    pub default_banner_image: Option<String>,

    /// Extra `strftime` layout accepted for stored page timestamps
    /// (e.g. `"%d/%m/%Y %H:%M"`).
    #[serde(default)]
    pub time_format: Option<String>,
}
