//! Archive pages: one synthetic page per pagination chunk.
//!
//! Archive pages are plain values handed to the template layer; they are
//! rebuilt on every request and never written back into a collection.

use super::{
    CollectionError,
    paginate::{Chunk, paginate},
};
use crate::{config::CollectionConfig, page::Page};
use serde::Serialize;

/// Aggregate page wrapping one chunk of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchivePage {
    /// Collection title.
    pub title: String,

    /// Bare collection slug for the first chunk, `{slug}-{index}` after.
    pub slug: String,

    /// 0-based chunk position.
    pub page_index: usize,

    /// Total number of archive pages in this archive.
    pub page_count: usize,

    pub template: String,

    /// Route the archive is rendered at.
    pub route: String,

    /// Marker for sitemap/search tooling. Always set on archives.
    pub no_index: bool,

    /// Wrapped pages, in archive order.
    pub pages: Vec<Page>,
}

impl ArchivePage {
    pub fn ids(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Chunk sorted pages for an archive.
///
/// Without `items_per_page` the whole sequence is one chunk, even when empty.
pub fn archive_chunks(
    sorted: Vec<Page>,
    items_per_page: Option<usize>,
) -> Result<Vec<Chunk<Page>>, CollectionError> {
    match items_per_page {
        Some(size) => paginate(&sorted, size),
        None => Ok(vec![Chunk {
            index: 0,
            items: sorted,
        }]),
    }
}

/// Wrap each chunk into an [`ArchivePage`].
pub fn build_archive(config: &CollectionConfig, chunks: Vec<Chunk<Page>>) -> Vec<ArchivePage> {
    let slug = config.slug();
    let page_count = chunks.len();

    chunks
        .into_iter()
        .map(|chunk| ArchivePage {
            title: config.title.clone(),
            slug: archive_slug(&slug, chunk.index),
            page_index: chunk.index,
            page_count,
            template: config.archive_template.clone(),
            route: config.archive_route().to_owned(),
            no_index: true,
            pages: chunk.items,
        })
        .collect()
}

fn archive_slug(slug: &str, index: usize) -> String {
    if index == 0 {
        slug.to_owned()
    } else {
        format!("{slug}-{index}")
    }
}
