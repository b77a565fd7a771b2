//! Shared feed model.
//!
//! Both schemas are rendered from one [`ItemValues`] record per page, so the
//! JSON and RSS outputs of a page always agree on its url and instants.

use crate::{
    page::Page,
    utils::{
        date::{DateError, Timestamp},
        slug::join_url,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Site-wide values the synthesizer needs, passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedConfig {
    pub title: String,
    pub description: String,
    /// Site url; also the RSS channel link and guid prefix.
    pub home_page_url: String,
    /// File name of the JSON feed inside a collection's output path.
    pub json_feed_path: String,
    pub icon: Option<String>,
    pub favicon: Option<String>,
    pub author: FeedAuthor,
    pub default_image: Option<String>,
    pub default_banner_image: Option<String>,
    /// Extra layout for stored timestamps.
    pub time_format: Option<String>,
}

impl FeedConfig {
    /// Absolute url of a collection's JSON feed.
    pub fn feed_url(&self, output_path: &str) -> String {
        join_url(&[&self.home_page_url, output_path, &self.json_feed_path])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Output schema an item was being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSchema {
    Json,
    Rss,
}

impl fmt::Display for FeedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Rss => "rss",
        })
    }
}

/// A page left out of one feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{schema} feed: page `{id}` skipped")]
pub struct ItemError {
    pub schema: FeedSchema,
    pub id: String,
    #[source]
    pub source: DateError,
}

/// A rendered feed plus the pages that could not be rendered into it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOutput<T> {
    pub feed: T,
    pub errors: Vec<ItemError>,
}

/// Per-page values common to both schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemValues<'a> {
    pub id: &'a str,
    /// `{output_path}/{id}`, relative to the site url.
    pub url: String,
    pub title: &'a str,
    pub content_html: &'a str,
    pub summary: &'a str,
    pub published: Timestamp,
    pub modified: Timestamp,
    pub image: Option<&'a str>,
    pub banner_image: Option<&'a str>,
    pub author: Option<&'a str>,
    pub external_url: Option<&'a str>,
}

impl<'a> ItemValues<'a> {
    /// Compute item values for `page`.
    ///
    /// Missing image and banner fall back to the site defaults. A missing
    /// modify timestamp falls back to the publish timestamp.
    pub fn from_page(page: &'a Page, output_path: &str, config: &'a FeedConfig) -> Result<Self, DateError> {
        let time_format = config.time_format.as_deref();
        let published = Timestamp::parse(&page.date_published, time_format)?;
        let modified = match &page.date_modified {
            Some(text) => Timestamp::parse(text, time_format)?,
            None => published,
        };

        Ok(Self {
            id: &page.id,
            url: join_url(&[output_path, &page.id]),
            title: &page.title,
            content_html: &page.content,
            summary: &page.summary,
            published,
            modified,
            image: page.image.as_deref().or(config.default_image.as_deref()),
            banner_image: page
                .banner_image
                .as_deref()
                .or(config.default_banner_image.as_deref()),
            author: page.author.as_deref(),
            external_url: page.external_url.as_deref(),
        })
    }
}

/// `None` for empty strings.
pub(crate) fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Render every page, collecting per-page failures instead of aborting.
pub(crate) fn render_items<'a, T>(
    pages: &'a [Page],
    output_path: &str,
    config: &'a FeedConfig,
    schema: FeedSchema,
    mut render: impl FnMut(ItemValues<'a>) -> T,
) -> (Vec<T>, Vec<ItemError>) {
    let mut items = Vec::with_capacity(pages.len());
    let mut errors = Vec::new();

    for page in pages {
        match ItemValues::from_page(page, output_path, config) {
            Ok(values) => items.push(render(values)),
            Err(source) => errors.push(ItemError {
                schema,
                id: page.id.clone(),
                source,
            }),
        }
    }

    (items, errors)
}
