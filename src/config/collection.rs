//! `[[collections]]` configuration.
//!
//! Each entry declares one collection: where its pages come from, how they
//! are ordered and paginated, and where its feeds and archive land.

use super::defaults;
use crate::utils::slug::slugify;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One `[[collections]]` entry in folio.toml.
///
/// # Example
/// ```toml
/// [[collections]]
/// title = "Blog"
/// content_type = "post"
/// content_path = "blog"
/// output_path = "blog"
/// items_per_page = 10
/// has_archive = true
/// subcollections = ["category", "tags"]
/// ```
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Collection title, copied onto archive pages.
    pub title: String,

    /// Archive slug. Defaults to the slugified title.
    #[serde(default)]
    pub slug: Option<String>,

    /// Content type every page in this collection shares.
    #[serde(default = "defaults::collection::content_type")]
    #[educe(Default = defaults::collection::content_type())]
    pub content_type: String,

    /// Directory (relative to `[build].content`) pages are discovered from.
    #[serde(default)]
    pub content_path: PathBuf,

    /// File name patterns processed inside `content_path`.
    #[serde(default = "defaults::collection::includes")]
    #[educe(Default = defaults::collection::includes())]
    pub includes: Vec<String>,

    /// URL path pages are published under; item urls are `{output_path}/{id}`.
    #[serde(default)]
    pub output_path: String,

    /// Routes the archive is rendered at; the first one is used.
    #[serde(default = "defaults::collection::routes")]
    #[educe(Default = defaults::collection::routes())]
    pub routes: Vec<String>,

    /// Template for archive pages.
    #[serde(default = "defaults::collection::archive_template")]
    #[educe(Default = defaults::collection::archive_template())]
    pub archive_template: String,

    /// Attribute pages are ordered by.
    #[serde(default = "defaults::collection::sort_by")]
    #[educe(Default = defaults::collection::sort_by())]
    pub sort_by: String,

    /// Newest/largest first.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub reverse: bool,

    /// Archive pagination size. Unset means a single archive page.
    #[serde(default)]
    pub items_per_page: Option<usize>,

    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub has_archive: bool,

    /// Allow discovered and explicitly added pages to be combined.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub merge: bool,

    /// Attributes to build subcollections for (e.g. `category`, `tags`).
    #[serde(default)]
    pub subcollections: Vec<String>,
}

impl CollectionConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Archive slug: explicit `slug`, else the slugified title.
    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.title))
    }

    /// First route, where archive pages are rendered.
    pub fn archive_route(&self) -> &str {
        self.routes.first().map_or("", String::as_str)
    }

    /// Configuration of the subcollection holding `value`.
    ///
    /// Ordering, templates, content type and output path are inherited.
    /// The value becomes the title and (slugified) the slug and route.
    pub fn subcollection(&self, value: &str) -> Self {
        let slug = slugify(value);
        Self {
            title: value.to_owned(),
            slug: Some(slug.clone()),
            routes: vec![slug],
            has_archive: true,
            merge: false,
            subcollections: Vec::new(),
            ..self.clone()
        }
    }
}
