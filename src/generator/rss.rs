//! RSS 2.0 feed generation.
//!
//! One `<item>` per page, in feed order. Item bodies are written as CDATA.

use super::feed::{FeedConfig, FeedOutput, FeedSchema, ItemValues, non_empty, render_items};
use crate::{page::Page, utils::slug::join_url};
use anyhow::{Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate};

const GENERATOR: &str = concat!("folio ", env!("CARGO_PKG_VERSION"));

/// Build the RSS document for pages already in feed order.
///
/// Fails only when the channel itself is invalid (e.g. no site url);
/// per-page failures are reported in [`FeedOutput::errors`].
pub fn rss_feed(pages: &[Page], output_path: &str, config: &FeedConfig) -> Result<FeedOutput<String>> {
    let (items, errors) = render_items(pages, output_path, config, FeedSchema::Rss, |values| {
        values_to_rss_item(&values, &config.home_page_url)
    });

    let channel = ChannelBuilder::default()
        .title(&config.title)
        .link(&config.home_page_url)
        .description(&config.description)
        .generator(GENERATOR.to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;

    Ok(FeedOutput {
        feed: channel.to_string(),
        errors,
    })
}

/// Convert item values into an rss item.
///
/// The guid is the absolute page url and doubles as the item link.
fn values_to_rss_item(values: &ItemValues<'_>, site_url: &str) -> Item {
    let link = join_url(&[site_url, &values.url]);
    let description = non_empty(values.content_html)
        .or(non_empty(values.summary))
        .map(str::to_owned);

    ItemBuilder::default()
        .title(Some(values.title.to_owned()))
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(description)
        .pub_date(Some(values.published.to_rfc822()))
        .build()
}
