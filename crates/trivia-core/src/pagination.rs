//! Fixed-size, 1-indexed paging over ordered collections

use serde::Serialize;

/// Default number of questions per page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// One page cut from a larger collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the full collection the page was cut from
    pub total: usize,
}

/// Slice `items` into page `page` of `page_size` entries.
///
/// Pages start at 1. A page before the first or past the end is empty,
/// never an error.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: usize) -> Page<T> {
    let total = items.len();

    let start = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(page_size));

    let items = match start {
        Some(start) if start < total => items
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect(),
        _ => Vec::new(),
    };

    Page { items, total }
}

/// Parse a `page` query value; absent or non-numeric means page 1
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(1)
}
