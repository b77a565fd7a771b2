//! JSON Feed (version 1) generation.
//!
//! Optional values that are unset or empty are left out of the document
//! entirely; readers never see `null` or `""` for them. Required item keys
//! (`summary` included) are always written.

use super::feed::{FeedAuthor, FeedConfig, FeedOutput, FeedSchema, ItemValues, non_empty, render_items};
use crate::page::Page;
use serde::{Deserialize, Serialize};

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeed {
    pub version: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<FeedAuthor>,
    pub items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content_html: String,
    #[serde(default)]
    pub summary: String,
    pub date_published: String,
    pub date_modified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<ItemAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAuthor {
    pub name: String,
}

impl From<ItemValues<'_>> for JsonFeedItem {
    fn from(values: ItemValues<'_>) -> Self {
        Self {
            id: values.id.to_owned(),
            url: values.url,
            title: values.title.to_owned(),
            content_html: values.content_html.to_owned(),
            summary: values.summary.to_owned(),
            date_published: values.published.to_rfc3339(),
            date_modified: values.modified.to_rfc3339(),
            image: values.image.map(str::to_owned),
            banner_image: values.banner_image.map(str::to_owned),
            author: values.author.map(|name| ItemAuthor { name: name.to_owned() }),
            external_url: values.external_url.map(str::to_owned),
        }
    }
}

/// Build the JSON feed for pages already in feed order.
pub fn json_feed(pages: &[Page], output_path: &str, config: &FeedConfig) -> FeedOutput<JsonFeed> {
    let (items, errors) = render_items(pages, output_path, config, FeedSchema::Json, JsonFeedItem::from);
    let owned = |s: &str| non_empty(s).map(str::to_owned);

    let author = non_empty(&config.author.name).map(|_| config.author.clone());
    let feed_url = non_empty(&config.home_page_url).map(|_| config.feed_url(output_path));

    let feed = JsonFeed {
        version: JSON_FEED_VERSION.to_owned(),
        title: config.title.clone(),
        home_page_url: owned(&config.home_page_url),
        feed_url,
        description: owned(&config.description),
        icon: config.icon.as_deref().and_then(owned),
        favicon: config.favicon.as_deref().and_then(owned),
        author,
        items,
    };

    FeedOutput { feed, errors }
}
