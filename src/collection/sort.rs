//! Ordering and grouping of pages by attribute.
//!
//! Both operations preserve input order where they can: sorting is stable
//! in either direction, and grouping keeps each group in input order.

use super::CollectionError;
use crate::{
    page::{AttrRef, DATE_ATTRIBUTES, Page, canonical_attribute},
    utils::date::{DateError, Timestamp},
};
use std::collections::{BTreeMap, BTreeSet};

/// Comparable form of a page attribute.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Instant(Timestamp),
    Value(AttrRef<'a>),
}

/// Resolve the sort key of one page.
fn sort_key<'a>(
    page: &'a Page,
    attribute: &str,
    time_format: Option<&str>,
) -> Result<SortKey<'a>, CollectionError> {
    let value = page
        .attribute(attribute)
        .ok_or_else(|| CollectionError::MissingAttribute {
            id: page.id.clone(),
            attribute: attribute.to_owned(),
        })?;

    match value {
        AttrRef::Text(text) if DATE_ATTRIBUTES.contains(&attribute) => Timestamp::parse(text, time_format)
            .map(SortKey::Instant)
            .map_err(|source| CollectionError::TimestampParse {
                id: page.id.clone(),
                source,
            }),
        value => Ok(SortKey::Value(value)),
    }
}

/// Order pages by `attribute`.
///
/// Date attributes compare as instants, everything else by value. Pages with
/// equal keys keep their input order, also when `reverse` is set.
pub fn sort_pages(
    pages: &[Page],
    attribute: &str,
    reverse: bool,
    time_format: Option<&str>,
) -> Result<Vec<Page>, CollectionError> {
    let attribute = canonical_attribute(attribute);
    let keys = pages
        .iter()
        .map(|page| sort_key(page, attribute, time_format))
        .collect::<Result<Vec<_>, _>>()?;

    let mut order: Vec<usize> = (0..pages.len()).collect();
    // `sort_by` is stable; reversing the comparator keeps ties in input order.
    order.sort_by(|&a, &b| {
        let ord = keys[a].cmp(&keys[b]);
        if reverse { ord.reverse() } else { ord }
    });

    Ok(order.into_iter().map(|i| pages[i].clone()).collect())
}

/// Split off pages whose date-valued `attribute` does not parse.
///
/// Returns the remaining pages in input order and the rejected page ids.
/// Non-date attributes reject nothing; absent values are left for
/// [`sort_pages`] to report.
pub fn split_unparsable(
    pages: &[Page],
    attribute: &str,
    time_format: Option<&str>,
) -> (Vec<Page>, Vec<(String, DateError)>) {
    let attribute = canonical_attribute(attribute);
    if !DATE_ATTRIBUTES.contains(&attribute) {
        return (pages.to_vec(), Vec::new());
    }

    let mut kept = Vec::with_capacity(pages.len());
    let mut rejected = Vec::new();
    for page in pages {
        match page.attribute(attribute) {
            Some(AttrRef::Text(text)) => match Timestamp::parse(text, time_format) {
                Ok(_) => kept.push(page.clone()),
                Err(err) => rejected.push((page.id.clone(), err)),
            },
            _ => kept.push(page.clone()),
        }
    }

    (kept, rejected)
}

/// Group pages by every value they hold for `attribute`.
///
/// Pages without the attribute are left out of every group. A page holding
/// several values (tags) appears once in each of their groups.
pub fn group_pages(pages: &[Page], attribute: &str) -> BTreeMap<String, Vec<Page>> {
    let attribute = canonical_attribute(attribute);
    let mut groups: BTreeMap<String, Vec<Page>> = BTreeMap::new();

    for page in pages {
        let Some(value) = page.attribute(attribute) else {
            continue;
        };
        let values: BTreeSet<&str> = value.values().into_iter().collect();
        for value in values {
            groups.entry(value.to_owned()).or_default().push(page.clone());
        }
    }

    groups
}
