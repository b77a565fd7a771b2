//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     └── par_iter over [[collections]]
//!             │
//!             ├── load_collection() ──► discover pages from content/<content_path>
//!             │
//!             ├── write_feeds() ──────► rayon::join(json_feed, rss_feed)
//!             │                         <output>/<output_path>/<json_path>, <rss_path>
//!             │
//!             └── write_archives() ───► <output>/<output_path>/archive/<slug>.json
//!                                       <output>/<output_path>/archive/<attribute>/<slug>.json
//! ```
//!
//! Pages dropped from a feed are logged and counted; they do not fail the build.

use crate::{
    collection::{ArchivePage, Collection},
    config::{CollectionConfig, SiteConfig},
    generator::{FeedConfig, build_feeds},
    log,
    page::PageSource,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs,
    ops::Add,
    path::{Path, PathBuf},
};

/// Totals for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub collections: usize,
    pub pages: usize,
    pub files: usize,
    /// Pages left out of a feed.
    pub skipped: usize,
}

impl Add for BuildReport {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            collections: self.collections + other.collections,
            pages: self.pages + other.pages,
            files: self.files + other.files,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// Build feeds and archive data for every configured collection.
pub fn build_site(config: &SiteConfig, source: &(dyn PageSource + Sync)) -> Result<BuildReport> {
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;

    let feed_config = config.feed_config();

    let report = config
        .collections
        .par_iter()
        .map(|collection| {
            build_collection(collection, config, &feed_config, source)
                .with_context(|| format!("collection `{}`", collection.title))
        })
        .try_reduce(BuildReport::default, |a, b| Ok(a + b))?;

    log!(
        "build";
        "{} collections, {} pages, {} files written to {}",
        report.collections,
        report.pages,
        report.files,
        output.display()
    );
    if report.skipped > 0 {
        log!("error"; "{} feed items skipped", report.skipped);
    }

    Ok(report)
}

/// Create a collection and fill it from the content directory.
pub fn load_collection(
    collection: &CollectionConfig,
    config: &SiteConfig,
    source: &dyn PageSource,
) -> Result<Collection> {
    let mut loaded = Collection::new(collection.clone())?.with_time_format(config.base.time_format.clone());
    loaded.discover(source, &config.build.content)?;
    Ok(loaded)
}

fn build_collection(
    collection: &CollectionConfig,
    config: &SiteConfig,
    feed_config: &FeedConfig,
    source: &dyn PageSource,
) -> Result<BuildReport> {
    let loaded = load_collection(collection, config, source)?;
    let pages = loaded.len()?;
    log!("discover"; "{}: {} pages", collection.title, pages);

    let dir = config.build.output.join(&collection.output_path);
    let mut report = BuildReport {
        collections: 1,
        pages,
        ..BuildReport::default()
    };

    report = report + write_feeds(&loaded, config, feed_config, &dir)?;
    if config.build.archive {
        report.files += write_archives(&loaded, &dir)?;
    }

    Ok(report)
}

/// Write the enabled feeds of one collection and log skipped items.
fn write_feeds(
    collection: &Collection,
    config: &SiteConfig,
    feed_config: &FeedConfig,
    dir: &Path,
) -> Result<BuildReport> {
    let enabled = &config.build.feed;
    let feeds = build_feeds(collection, feed_config, enabled.json, enabled.rss)?;
    let mut report = BuildReport::default();

    for error in feeds.errors() {
        log!("error"; "{}: {:#}", collection.title(), anyhow::Error::from(error.clone()));
        report.skipped += 1;
    }

    if let Some(json) = &feeds.json {
        let path = dir.join(&enabled.json_path);
        write_json(&path, &json.feed)?;
        log!("feed"; "{}", path.display());
        report.files += 1;
    }
    if let Some(rss) = &feeds.rss {
        let path = dir.join(&enabled.rss_path);
        write_file(&path, rss.feed.as_bytes())?;
        log!("feed"; "{}", path.display());
        report.files += 1;
    }

    Ok(report)
}

/// Write archive data for a collection and each of its subcollections.
///
/// Archives hold the same pages as the feeds: pages whose date sort key
/// does not parse are logged and left out. Returns the number of files written.
fn write_archives(collection: &Collection, dir: &Path) -> Result<usize> {
    let archive_dir = dir.join("archive");
    let (sorted, rejected) = collection.feed_pages()?;
    for (id, err) in &rejected {
        log!("error"; "{}: page `{}` left out of the archive: {}", collection.title(), id, err);
    }
    let mut written = write_archive_pages(&collection.archive_of(sorted)?, &archive_dir)?;

    for attribute in &collection.config().subcollections {
        let subcollections = collection.subcollection(attribute)?;
        let attribute_dir = archive_dir.join(attribute);
        for sub in subcollections.values() {
            let (sorted, _) = sub.feed_pages()?;
            written += write_archive_pages(&sub.archive_of(sorted)?, &attribute_dir)?;
        }
        log!("archive"; "{}: {} {} subcollections", collection.title(), subcollections.len(), attribute);
    }

    if written > 0 {
        log!("archive"; "{}: {} archive pages", collection.title(), written);
    }
    Ok(written)
}

fn write_archive_pages(archive: &[ArchivePage], dir: &Path) -> Result<usize> {
    for page in archive {
        write_json(&archive_path(dir, page), page)?;
    }
    Ok(archive.len())
}

fn archive_path(dir: &Path, page: &ArchivePage) -> PathBuf {
    dir.join(format!("{}.json", page.slug))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
