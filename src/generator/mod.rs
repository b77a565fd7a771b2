//! Feed synthesis.
//!
//! Maps a collection's pages, in feed order, to a JSON Feed document and an
//! RSS 2.0 document. Both are rendered from the same snapshot.

mod feed;
mod json;
mod rss;

pub use feed::{FeedAuthor, FeedConfig, FeedOutput, FeedSchema, ItemError, ItemValues};
pub use json::{ItemAuthor, JSON_FEED_VERSION, JsonFeed, JsonFeedItem, json_feed};
pub use self::rss::rss_feed;

use crate::{collection::Collection, utils::date::DateError};
use anyhow::Result;

/// Feeds requested for a collection. Disabled schemas stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feeds {
    pub json: Option<FeedOutput<JsonFeed>>,
    pub rss: Option<FeedOutput<String>>,
}

impl Feeds {
    /// Item errors of both schemas.
    pub fn errors(&self) -> impl Iterator<Item = &ItemError> {
        let json = self.json.iter().flat_map(|o| &o.errors);
        let rss = self.rss.iter().flat_map(|o| &o.errors);
        json.chain(rss)
    }
}

/// Synthesize the enabled feeds of `collection` in parallel.
///
/// A page whose date sort key does not parse is left out of both feeds and
/// reported once per enabled schema. Structural errors (missing sort key,
/// ambiguous page set) abort.
pub fn build_feeds(collection: &Collection, config: &FeedConfig, json: bool, rss: bool) -> Result<Feeds> {
    if !json && !rss {
        return Ok(Feeds::default());
    }

    let (pages, rejected) = collection.feed_pages()?;
    let output_path = collection.config().output_path.as_str();

    let (json, rss) = rayon::join(
        || json.then(|| with_rejected(json_feed(&pages, output_path, config), FeedSchema::Json, &rejected)),
        || {
            rss.then(|| rss_feed(&pages, output_path, config))
                .transpose()
                .map(|output| output.map(|o| with_rejected(o, FeedSchema::Rss, &rejected)))
        },
    );

    Ok(Feeds { json, rss: rss? })
}

/// Prepend pages rejected before rendering to a feed's item errors.
fn with_rejected<T>(mut output: FeedOutput<T>, schema: FeedSchema, rejected: &[(String, DateError)]) -> FeedOutput<T> {
    let errors = rejected.iter().map(|(id, source)| ItemError {
        schema,
        id: id.clone(),
        source: source.clone(),
    });
    output.errors.splice(0..0, errors);
    output
}
