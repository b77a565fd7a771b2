//! Fixed-size chunking of an ordered sequence.

use super::CollectionError;

/// One page of pagination: `items[index * size ..]`, at most `size` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<T> {
    /// 0-based position among all chunks.
    pub index: usize,
    pub items: Vec<T>,
}

/// Split `items` into `ceil(len / size)` chunks.
///
/// Every chunk holds `size` items except the last, which holds the
/// remainder; it is never padded.
pub fn paginate<T: Clone>(items: &[T], size: usize) -> Result<Vec<Chunk<T>>, CollectionError> {
    if size == 0 {
        return Err(CollectionError::Configuration(
            "pagination size must be at least 1".into(),
        ));
    }

    Ok(items
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| Chunk {
            index,
            items: chunk.to_vec(),
        })
        .collect())
}
