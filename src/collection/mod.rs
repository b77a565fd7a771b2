//! Content collections.
//!
//! A [`Collection`] owns the pages of one content type and derives ordered,
//! paginated and grouped views from them.
//!
//! # Architecture
//!
//! ```text
//! explicit pages (add) ──┐
//!                        ├──► pages() snapshot ──► sort_pages() ──► archive_chunks()
//! discovered pages ──────┘          │                    │                 │
//!                                   ▼                    ▼                 ▼
//!                             group_pages()         feed order       build_archive()
//!                          (categories, tags,                        ArchivePage[]
//!                           subcollections)
//! ```
//!
//! # Snapshots
//!
//! `pages()` resolves the page set once and hands out `Arc<[Page]>`
//! snapshots. `add()`/`discover()` drop the cached snapshot; callers already
//! holding one keep a consistent view.

mod archive;
mod error;
mod paginate;
mod sort;

pub use archive::{ArchivePage, archive_chunks, build_archive};
pub use error::CollectionError;
pub use paginate::{Chunk, paginate};
pub use sort::{group_pages, sort_pages, split_unparsable};

use crate::{
    config::CollectionConfig,
    page::{Page, PageSource},
    utils::{date::DateError, slug::slugify},
};
use anyhow::Result;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::Path,
    sync::{Arc, OnceLock},
};

/// Grouping of pages by attribute value.
pub type Groups = BTreeMap<String, Vec<Page>>;

/// A titled set of pages sharing a content type.
#[derive(Debug, Clone)]
pub struct Collection {
    config: CollectionConfig,
    /// Extra `strftime` layout for stored timestamps.
    time_format: Option<String>,
    /// Pages inserted through `add`.
    explicit: Vec<Page>,
    /// Pages produced by the last `discover`.
    discovered: Vec<Page>,
    snapshot: OnceLock<Arc<[Page]>>,
}

impl Collection {
    pub fn new(config: CollectionConfig) -> Result<Self, CollectionError> {
        if config.items_per_page == Some(0) {
            return Err(CollectionError::Configuration(format!(
                "collection `{}`: items_per_page must be at least 1",
                config.title
            )));
        }

        Ok(Self {
            config,
            time_format: None,
            explicit: Vec::new(),
            discovered: Vec::new(),
            snapshot: OnceLock::new(),
        })
    }

    /// Create a collection and `add` the given pages.
    pub fn with_pages(
        config: CollectionConfig,
        pages: impl IntoIterator<Item = Page>,
    ) -> Result<Self, CollectionError> {
        let mut collection = Self::new(config)?;
        collection.add(pages)?;
        Ok(collection)
    }

    pub fn with_time_format(mut self, time_format: Option<String>) -> Self {
        self.time_format = time_format;
        self
    }

    pub const fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn slug(&self) -> String {
        self.config.slug()
    }

    pub fn time_format(&self) -> Option<&str> {
        self.time_format.as_deref()
    }

    // ========================================================================
    // Assembly
    // ========================================================================

    /// Insert pages of this collection's content type.
    ///
    /// Pages declaring another type are skipped; pages declaring none adopt
    /// this collection's type. A page whose id is already present fails the
    /// whole call with [`CollectionError::DuplicateIdentity`] and nothing is
    /// inserted. Returns the number of pages accepted.
    pub fn add(&mut self, pages: impl IntoIterator<Item = Page>) -> Result<usize, CollectionError> {
        let accepted = self.accept(pages);

        let mut seen: HashSet<&str> = self
            .explicit
            .iter()
            .chain(&self.discovered)
            .map(|p| p.id.as_str())
            .collect();
        for page in &accepted {
            if !seen.insert(&page.id) {
                return Err(CollectionError::DuplicateIdentity(page.id.clone()));
            }
        }

        let count = accepted.len();
        if count > 0 {
            self.explicit.extend(accepted);
            self.invalidate();
        }
        Ok(count)
    }

    /// Replace the discovered page set with pages from `source`.
    ///
    /// Pages are looked up under `content_root/<content_path>` using the
    /// collection's include patterns and filtered like [`Collection::add`].
    pub fn discover(&mut self, source: &dyn PageSource, content_root: &Path) -> Result<usize> {
        let root = content_root.join(&self.config.content_path);
        let pages = source.discover(&root, &self.config.includes)?;

        self.discovered = self.accept(pages);
        self.invalidate();
        Ok(self.discovered.len())
    }

    /// Keep pages of this content type, stamping undeclared ones.
    fn accept(&self, pages: impl IntoIterator<Item = Page>) -> Vec<Page> {
        let content_type = &self.config.content_type;
        pages
            .into_iter()
            .filter_map(|mut page| match &page.kind {
                Some(kind) if kind != content_type => None,
                Some(_) => Some(page),
                None => {
                    page.kind = Some(content_type.clone());
                    Some(page)
                }
            })
            .collect()
    }

    fn invalidate(&mut self) {
        self.snapshot = OnceLock::new();
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Current page set in source order.
    ///
    /// Resolved on first access from whichever source is populated. Both
    /// populated without `merge` is a configuration error.
    pub fn pages(&self) -> Result<Arc<[Page]>, CollectionError> {
        if let Some(pages) = self.snapshot.get() {
            return Ok(Arc::clone(pages));
        }

        let resolved = self.resolve()?;
        Ok(Arc::clone(self.snapshot.get_or_init(|| resolved)))
    }

    fn resolve(&self) -> Result<Arc<[Page]>, CollectionError> {
        let pages: Vec<Page> = match (self.discovered.is_empty(), self.explicit.is_empty()) {
            (false, false) if !self.config.merge => {
                return Err(CollectionError::Configuration(format!(
                    "collection `{}` has both discovered and explicitly added pages; set `merge = true` to combine them",
                    self.config.title
                )));
            }
            _ => self.discovered.iter().chain(&self.explicit).cloned().collect(),
        };

        let mut seen = HashSet::with_capacity(pages.len());
        if let Some(dup) = pages.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(CollectionError::DuplicateIdentity(dup.id.clone()));
        }

        Ok(pages.into())
    }

    pub fn len(&self) -> Result<usize, CollectionError> {
        Ok(self.pages()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CollectionError> {
        Ok(self.pages()?.is_empty())
    }

    /// Pages in configured order (`sort_by`, `reverse`).
    pub fn sorted_pages(&self) -> Result<Vec<Page>, CollectionError> {
        let pages = self.pages()?;
        sort_pages(
            &pages,
            &self.config.sort_by,
            self.config.reverse,
            self.time_format(),
        )
    }

    /// Pages in feed order, plus pages left out because their date sort
    /// key does not parse.
    pub fn feed_pages(&self) -> Result<(Vec<Page>, Vec<(String, DateError)>), CollectionError> {
        let pages = self.pages()?;
        let (kept, rejected) = split_unparsable(&pages, &self.config.sort_by, self.time_format());
        let sorted = sort_pages(&kept, &self.config.sort_by, self.config.reverse, self.time_format())?;
        Ok((sorted, rejected))
    }

    /// Archive pages over the sorted page set. Empty unless `has_archive`.
    pub fn archive(&self) -> Result<Vec<ArchivePage>, CollectionError> {
        if !self.config.has_archive {
            return Ok(Vec::new());
        }

        self.archive_of(self.sorted_pages()?)
    }

    /// Archive pages over pages the caller already ordered, e.g. the first
    /// half of [`Collection::feed_pages`]. Empty unless `has_archive`.
    pub fn archive_of(&self, sorted: Vec<Page>) -> Result<Vec<ArchivePage>, CollectionError> {
        if !self.config.has_archive {
            return Ok(Vec::new());
        }

        let chunks = archive_chunks(sorted, self.config.items_per_page)?;
        Ok(build_archive(&self.config, chunks))
    }

    /// Pages grouped by `attribute`, each group in source order.
    pub fn group_by(&self, attribute: &str) -> Result<Groups, CollectionError> {
        Ok(group_pages(&self.pages()?, attribute))
    }

    pub fn categories(&self) -> Result<Groups, CollectionError> {
        self.group_by("category")
    }

    pub fn tags(&self) -> Result<Groups, CollectionError> {
        self.group_by("tags")
    }

    /// One collection per value of `attribute`, inheriting this
    /// collection's ordering, templates and content type.
    ///
    /// Values whose slug is empty, or shared with another value, are a
    /// [`CollectionError::Configuration`] error: their archives would collide.
    pub fn subcollection(&self, attribute: &str) -> Result<BTreeMap<String, Collection>, CollectionError> {
        let groups = self.group_by(attribute)?;

        let mut slugs: HashMap<String, &str> = HashMap::with_capacity(groups.len());
        for value in groups.keys() {
            let slug = slugify(value);
            if slug.is_empty() {
                return Err(CollectionError::Configuration(format!(
                    "`{attribute}` value `{value}` has no usable slug"
                )));
            }
            if let Some(other) = slugs.insert(slug.clone(), value) {
                return Err(CollectionError::Configuration(format!(
                    "`{attribute}` values `{other}` and `{value}` share the slug `{slug}`"
                )));
            }
        }

        groups
            .into_iter()
            .map(|(value, pages)| {
                let config = self.config.subcollection(&value);
                let collection = Collection::with_pages(config, pages)?
                    .with_time_format(self.time_format.clone());
                Ok((value, collection))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    fn config(title: &str) -> CollectionConfig {
        let mut config = CollectionConfig::new(title);
        config.content_type = "post".into();
        config
    }

    fn post(id: &str, date: &str) -> Page {
        Page::new(id, format!("Title {id}"), date).with_kind("post")
    }

    fn ids(pages: &[Page]) -> Vec<&str> {
        pages.iter().map(|p| p.id.as_str()).collect()
    }

    /// In-memory source returning a fixed page list.
    struct FixedSource(Mutex<Vec<Page>>);

    impl FixedSource {
        fn new(pages: Vec<Page>) -> Self {
            Self(Mutex::new(pages))
        }

        fn replace(&self, pages: Vec<Page>) {
            *self.0.lock().unwrap() = pages;
        }
    }

    impl PageSource for FixedSource {
        fn discover(&self, _root: &Path, _includes: &[String]) -> Result<Vec<Page>> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    struct FailingSource;

    impl PageSource for FailingSource {
        fn discover(&self, root: &Path, _includes: &[String]) -> Result<Vec<Page>> {
            Err(anyhow!("cannot read {}", root.display()))
        }
    }

    // ========================================================================
    // Assembly Tests
    // ========================================================================

    #[test]
    fn test_new_rejects_zero_page_size() {
        let mut cfg = config("Blog");
        cfg.items_per_page = Some(0);
        assert!(matches!(
            Collection::new(cfg),
            Err(CollectionError::Configuration(_))
        ));
    }

    #[test]
    fn test_add_drops_mismatched_type() {
        let mut collection = Collection::with_pages(config("Blog"), vec![post("a", "2024-01-01")]).unwrap();
        assert_eq!(collection.len().unwrap(), 1);

        let note = Page::new("n", "Note", "2024-01-02").with_kind("note");
        assert_eq!(collection.add(vec![note]).unwrap(), 0);
        assert_eq!(collection.len().unwrap(), 1);
    }

    #[test]
    fn test_add_stamps_undeclared_type() {
        let collection =
            Collection::with_pages(config("Blog"), vec![Page::new("a", "A", "2024-01-01")]).unwrap();
        let pages = collection.pages().unwrap();
        assert_eq!(pages[0].kind.as_deref(), Some("post"));
    }

    #[test]
    fn test_add_duplicate_id_is_error() {
        let mut collection = Collection::with_pages(config("Blog"), vec![post("a", "2024-01-01")]).unwrap();

        let err = collection
            .add(vec![post("b", "2024-01-02"), post("a", "2024-01-03")])
            .unwrap_err();
        assert_eq!(err, CollectionError::DuplicateIdentity("a".into()));
        // Nothing from the failed call was inserted.
        assert_eq!(ids(&collection.pages().unwrap()), vec!["a"]);
    }

    #[test]
    fn test_add_duplicate_within_batch() {
        let err = Collection::with_pages(
            config("Blog"),
            vec![post("a", "2024-01-01"), post("a", "2024-01-02")],
        )
        .unwrap_err();
        assert_eq!(err, CollectionError::DuplicateIdentity("a".into()));
    }

    #[test]
    fn test_discover_filters_by_type() {
        let source = FixedSource::new(vec![
            post("a", "2024-01-01"),
            Page::new("n", "Note", "2024-01-01").with_kind("note"),
            Page::new("u", "Untyped", "2024-01-01"),
        ]);
        let mut collection = Collection::new(config("Blog")).unwrap();

        let count = collection.discover(&source, Path::new("content")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(ids(&collection.pages().unwrap()), vec!["a", "u"]);
    }

    #[test]
    fn test_discover_propagates_source_error() {
        let mut collection = Collection::new(config("Blog")).unwrap();
        assert!(collection.discover(&FailingSource, Path::new("content")).is_err());
    }

    #[test]
    fn test_mixed_sources_without_merge() {
        let source = FixedSource::new(vec![post("a", "2024-01-01")]);
        let mut collection = Collection::new(config("Blog")).unwrap();
        collection.discover(&source, Path::new("content")).unwrap();
        collection.add(vec![post("b", "2024-01-02")]).unwrap();

        assert!(matches!(
            collection.pages(),
            Err(CollectionError::Configuration(_))
        ));
    }

    #[test]
    fn test_mixed_sources_with_merge() {
        let mut cfg = config("Blog");
        cfg.merge = true;
        let source = FixedSource::new(vec![post("a", "2024-01-01")]);
        let mut collection = Collection::new(cfg).unwrap();
        collection.discover(&source, Path::new("content")).unwrap();
        collection.add(vec![post("b", "2024-01-02")]).unwrap();

        assert_eq!(ids(&collection.pages().unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_discovered_duplicates_surface_on_read() {
        let source = FixedSource::new(vec![post("a", "2024-01-01"), post("a", "2024-01-02")]);
        let mut collection = Collection::new(config("Blog")).unwrap();
        collection.discover(&source, Path::new("content")).unwrap();

        assert_eq!(
            collection.pages().unwrap_err(),
            CollectionError::DuplicateIdentity("a".into())
        );
    }

    #[test]
    fn test_snapshot_is_unaffected_by_rediscovery() {
        let source = FixedSource::new(vec![post("a", "2024-01-01")]);
        let mut collection = Collection::new(config("Blog")).unwrap();
        collection.discover(&source, Path::new("content")).unwrap();

        let before = collection.pages().unwrap();
        source.replace(vec![post("x", "2024-01-01"), post("y", "2024-01-02")]);
        collection.discover(&source, Path::new("content")).unwrap();

        assert_eq!(ids(&before), vec!["a"]);
        assert_eq!(ids(&collection.pages().unwrap()), vec!["x", "y"]);
    }

    #[test]
    fn test_reads_do_not_mutate() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![post("b", "2024-01-02"), post("a", "2024-01-01")],
        )
        .unwrap();

        let _ = collection.sorted_pages().unwrap();
        let _ = collection.categories().unwrap();
        assert_eq!(ids(&collection.pages().unwrap()), vec!["b", "a"]);
    }

    // ========================================================================
    // View Tests
    // ========================================================================

    #[test]
    fn test_sorted_pages_newest_first_by_default() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![
                post("old", "2023-01-01"),
                post("new", "2024-01-01"),
                post("mid", "2023-06-01"),
            ],
        )
        .unwrap();

        assert_eq!(ids(&collection.sorted_pages().unwrap()), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_feed_pages_leave_out_bad_dates() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![
                post("old", "2023-01-01"),
                post("bad", "whenever"),
                post("new", "2024-01-01"),
            ],
        )
        .unwrap();

        let (pages, rejected) = collection.feed_pages().unwrap();
        assert_eq!(ids(&pages), vec!["new", "old"]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, "bad");
        // Plain sorting still reports the bad page.
        assert!(matches!(
            collection.sorted_pages(),
            Err(CollectionError::TimestampParse { .. })
        ));
    }

    #[test]
    fn test_feed_pages_missing_sort_attribute() {
        let mut cfg = config("Blog");
        cfg.sort_by = "series".into();
        let collection = Collection::with_pages(cfg, vec![post("a", "2024-01-01")]).unwrap();

        assert!(matches!(
            collection.feed_pages(),
            Err(CollectionError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_archive_disabled_is_empty() {
        let collection = Collection::with_pages(config("Blog"), vec![post("a", "2024-01-01")]).unwrap();
        assert!(collection.archive().unwrap().is_empty());
    }

    #[test]
    fn test_archive_twenty_five_pages() {
        let mut cfg = config("Base");
        cfg.has_archive = true;
        cfg.items_per_page = Some(10);
        let pages = (0..25).map(|i| post(&format!("p{i:02}"), &format!("2024-01-{:02}", i + 1)));
        let collection = Collection::with_pages(cfg, pages).unwrap();

        let archive = collection.archive().unwrap();
        let sizes: Vec<_> = archive.iter().map(|a| a.pages.len()).collect();
        let slugs: Vec<_> = archive.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(slugs, vec!["base", "base-1", "base-2"]);
        // Newest first: p24 leads the first archive page.
        assert_eq!(archive[0].pages[0].id, "p24");
    }

    #[test]
    fn test_archive_is_idempotent() {
        let mut cfg = config("Blog");
        cfg.has_archive = true;
        cfg.items_per_page = Some(2);
        let collection = Collection::with_pages(
            cfg,
            vec![
                post("a", "2024-01-01"),
                post("b", "2024-01-01"),
                post("c", "2024-01-02"),
            ],
        )
        .unwrap();

        let first = collection.archive().unwrap();
        let second = collection.archive().unwrap();
        assert_eq!(first, second);

        let summary = |archive: &[ArchivePage]| {
            archive
                .iter()
                .map(|a| (a.slug.clone(), a.page_index, a.ids().join(",")))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            summary(&first),
            vec![
                ("blog".to_string(), 0, "c,a".to_string()),
                ("blog-1".to_string(), 1, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_archive_of_feed_pages() {
        let mut cfg = config("Blog");
        cfg.has_archive = true;
        let collection = Collection::with_pages(
            cfg,
            vec![post("a", "2024-01-01"), post("bad", "soon"), post("b", "2024-01-02")],
        )
        .unwrap();

        assert!(collection.archive().is_err());

        let (pages, _) = collection.feed_pages().unwrap();
        let archive = collection.archive_of(pages).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].ids(), vec!["b", "a"]);
    }

    #[test]
    fn test_archive_missing_sort_attribute() {
        let mut cfg = config("Blog");
        cfg.has_archive = true;
        cfg.sort_by = "series".into();
        let collection = Collection::with_pages(cfg, vec![post("a", "2024-01-01")]).unwrap();

        assert!(matches!(
            collection.archive(),
            Err(CollectionError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_categories_in_original_order() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![
                post("a", "2024-01-02").with_extra("category", "news"),
                post("b", "2024-01-01").with_extra("category", "news"),
            ],
        )
        .unwrap();

        let categories = collection.categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(ids(&categories["news"]), vec!["a", "b"]);
    }

    #[test]
    fn test_tags() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![
                post("a", "2024-01-01").with_extra("tags", vec!["rust"]),
                post("b", "2024-01-02").with_extra("tags", vec!["rust", "web"]),
                post("c", "2024-01-03"),
            ],
        )
        .unwrap();

        let tags = collection.tags().unwrap();
        assert_eq!(ids(&tags["rust"]), vec!["a", "b"]);
        assert_eq!(ids(&tags["web"]), vec!["b"]);
        assert_eq!(collection.len().unwrap(), 3);
    }

    #[test]
    fn test_subcollection_inherits_configuration() {
        let mut cfg = config("Blog");
        cfg.reverse = false;
        cfg.sort_by = "title".into();
        cfg.items_per_page = Some(1);
        let collection = Collection::with_pages(
            cfg,
            vec![
                post("b", "2024-01-02").with_extra("category", "Tech News"),
                post("a", "2024-01-01").with_extra("category", "Tech News"),
                post("x", "2024-01-03").with_extra("category", "misc"),
            ],
        )
        .unwrap();

        let subs = collection.subcollection("category").unwrap();
        assert_eq!(subs.keys().collect::<Vec<_>>(), vec!["Tech News", "misc"]);

        let tech = &subs["Tech News"];
        assert_eq!(tech.title(), "Tech News");
        assert_eq!(tech.slug(), "tech-news");
        assert_eq!(tech.config().content_type, "post");
        assert!(!tech.config().reverse);
        assert_eq!(ids(&tech.sorted_pages().unwrap()), vec!["a", "b"]);

        let archive = tech.archive().unwrap();
        let slugs: Vec<_> = archive.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["tech-news", "tech-news-1"]);
        assert_eq!(archive[0].route, "tech-news");
    }

    #[test]
    fn test_subcollection_rejects_colliding_slugs() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![
                post("a", "2024-01-01").with_extra("tags", vec!["Rust"]),
                post("b", "2024-01-02").with_extra("tags", vec!["rust"]),
            ],
        )
        .unwrap();

        let err = collection.subcollection("tags").unwrap_err();
        assert_eq!(
            err,
            CollectionError::Configuration(
                "`tags` values `Rust` and `rust` share the slug `rust`".into()
            )
        );
    }

    #[test]
    fn test_subcollection_rejects_empty_slug() {
        let collection = Collection::with_pages(
            config("Blog"),
            vec![post("a", "2024-01-01").with_extra("tags", vec!["!!!"])],
        )
        .unwrap();

        assert!(matches!(
            collection.subcollection("tags"),
            Err(CollectionError::Configuration(msg)) if msg.contains("`!!!`")
        ));
    }
}
