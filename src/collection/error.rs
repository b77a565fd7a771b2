//! Collection error types.

use crate::utils::date::DateError;
use thiserror::Error;

/// Structural errors raised while assembling, ordering or paginating a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Sort key absent on a page.
    #[error("page `{id}` has no attribute `{attribute}`")]
    MissingAttribute { id: String, attribute: String },

    /// Ambiguous page source or invalid pagination size.
    #[error("collection configuration error: {0}")]
    Configuration(String),

    /// Stored timestamp can't be parsed.
    #[error("page `{id}`: {source}")]
    TimestampParse {
        id: String,
        #[source]
        source: DateError,
    },

    /// Two pages in one collection share an id.
    #[error("duplicate page id `{0}`")]
    DuplicateIdentity(String),
}
