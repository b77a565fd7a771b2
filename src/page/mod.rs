//! Content page model.
//!
//! A [`Page`] is produced by a [`PageSource`] and is read-only from the
//! collection's point of view. Known fields have typed accessors; anything
//! else lives in [`Page::extra`] and is reachable by name through
//! [`Page::attribute`].
//!
//! # Page file (TOML)
//!
//! ```toml
//! id = "hello-world"
//! kind = "post"
//! title = "Hello World"
//! date_published = "2023-01-05T10:00:00+00:00"
//! content = "<p>Hello</p>"
//! summary = "First post"
//! category = "news"
//! tags = ["rust", "web"]
//! ```

mod source;

pub use source::{PageSource, TomlPageSource};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes compared as instants rather than text when sorting.
pub const DATE_ATTRIBUTES: &[&str] = &["date_published", "date_modified"];

/// Value of an extra attribute: a single value (`category = "news"`)
/// or several (`tags = ["a", "b"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attr {
    Text(String),
    List(Vec<String>),
}

impl Attr {
    pub fn view(&self) -> AttrRef<'_> {
        match self {
            Self::Text(s) => AttrRef::Text(s),
            Self::List(values) => AttrRef::List(values),
        }
    }
}

impl From<&str> for Attr {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<&str>> for Attr {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_owned).collect())
    }
}

/// Borrowed view of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AttrRef<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl<'a> AttrRef<'a> {
    /// Every value held, one for text, each element for lists.
    pub fn values(self) -> Vec<&'a str> {
        match self {
            Self::Text(s) => vec![s],
            Self::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// A single content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identity within a collection, also the last URL segment.
    #[serde(default)]
    pub id: String,

    /// Content type, matched against the collection's declared type.
    /// Undeclared pages adopt the type of the collection they join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub title: String,

    /// Stored publish timestamp, parsed on demand.
    pub date_published: String,

    /// Stored modify timestamp. Falls back to `date_published`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,

    /// Rendered body markup.
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    /// Everything else: `category`, `tags`, user-defined fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Attr>,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date_published: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            title: title.into(),
            date_published: date_published.into(),
            date_modified: None,
            content: String::new(),
            summary: String::new(),
            image: None,
            banner_image: None,
            author: None,
            external_url: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Attr>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Stored modify timestamp, or the publish timestamp if never modified.
    pub fn modified(&self) -> &str {
        self.date_modified.as_deref().unwrap_or(&self.date_published)
    }

    /// Look up an attribute by name.
    ///
    /// Returns `None` when the page doesn't carry it, so callers decide
    /// whether absence is an error (sorting) or an omission (grouping).
    pub fn attribute(&self, name: &str) -> Option<AttrRef<'_>> {
        let text = AttrRef::Text;
        match name {
            "id" | "slug" => Some(text(&self.id)),
            "kind" | "content_type" => self.kind.as_deref().map(text),
            "title" => Some(text(&self.title)),
            "date_published" | "date" => Some(text(&self.date_published)),
            "date_modified" => Some(text(self.modified())),
            "content" => Some(text(&self.content)),
            "summary" => Some(text(&self.summary)),
            "image" => self.image.as_deref().map(text),
            "banner_image" => self.banner_image.as_deref().map(text),
            "author" => self.author.as_deref().map(text),
            "external_url" => self.external_url.as_deref().map(text),
            other => self.extra.get(other).map(Attr::view),
        }
    }
}

/// Normalize attribute aliases so date keys are recognized by one name.
pub fn canonical_attribute(name: &str) -> &str {
    match name {
        "date" => "date_published",
        "slug" => "id",
        "content_type" => "kind",
        other => other,
    }
}
