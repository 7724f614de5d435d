//! Splitting a seed range across workers.

use crate::config::SearchRange;
use crate::error::{SearchError, SearchResult};

/// Splits `range` into `min(parts, range.len())` contiguous sub-ranges.
///
/// Sub-ranges are ordered, disjoint and gap-free, and their union is
/// exactly `range`. Sizes differ by at most one: the first
/// `len % parts` sub-ranges get the extra seed.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] if `parts` is zero.
pub fn partition(range: SearchRange, parts: usize) -> SearchResult<Vec<SearchRange>> {
    if parts == 0 {
        return Err(SearchError::InvalidConfig("cannot partition into zero workers".into()));
    }

    let len = range.len();
    let parts = (parts as u128).min(len);
    let base = len / parts;
    let extra = len % parts;

    let mut out = Vec::with_capacity(parts as usize);
    let mut next = u128::from(range.start());
    for i in 0..parts {
        let size = base + u128::from(i < extra);
        let start = next as u64;
        let end = (next + size - 1) as u64;
        out.push(SearchRange::new(start, end)?);
        next += size;
    }
    Ok(out)
}
