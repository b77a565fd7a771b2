//! `folio query`: inspect a collection without writing anything.

use crate::{build::load_collection, config::SiteConfig, page::PageSource};
use anyhow::{Result, anyhow};
use serde_json::Value;

/// A collection's pages in feed order, or grouped by `by`, as JSON.
pub fn query_collection(
    config: &SiteConfig,
    source: &dyn PageSource,
    name: &str,
    by: Option<&str>,
) -> Result<Value> {
    let collection = config
        .collection(name)
        .ok_or_else(|| anyhow!("unknown collection `{name}`"))?;
    let loaded = load_collection(collection, config, source)?;

    let value = match by {
        Some(attribute) => serde_json::to_value(loaded.group_by(attribute)?)?,
        None => serde_json::to_value(loaded.sorted_pages()?)?,
    };
    Ok(value)
}
