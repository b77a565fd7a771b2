//! Folio - content collections and feed synthesis.
//!
//! Pages are grouped into [`collection::Collection`]s, ordered, paginated
//! into archive pages, and syndicated as JSON Feed and RSS 2.0 documents.

pub mod build;
pub mod cli;
pub mod collection;
pub mod config;
pub mod generator;
pub mod logger;
pub mod page;
pub mod query;
pub mod utils;
