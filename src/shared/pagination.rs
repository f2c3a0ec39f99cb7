//! Count-based page arithmetic for listings that page over a pre-counted
//! result set (the public category listing), as opposed to the content
//! query pipeline which derives its page math from its own filtered count.

use thiserror::Error;

/// Computed page descriptor. `first_index`/`last_index` are 0-based row
/// offsets into the full result set (`first_index` is the SQL OFFSET).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
    pub first_index: i64,
    pub last_index: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be greater than 0")]
    InvalidPage,
    #[error("requested page is greater than the last page")]
    PageOutOfRange,
}

/// Converts `(total_count, page, per_page)` into a [`Page`].
///
/// `per_page <= 0` falls back to 10. A zero-row set requested at page 1 is
/// a valid degenerate single page, not an out-of-range error. The last
/// index is clamped to `total_count`; the first index is derived from the
/// unclamped value, so a partial final page keeps its natural start.
pub fn apply(total_count: i64, page: i64, per_page: i64) -> Result<Page, PaginationError> {
    let per_page = if per_page <= 0 { 10 } else { per_page };

    if page <= 0 {
        return Err(PaginationError::InvalidPage);
    }

    let page_count = (total_count + per_page - 1) / per_page;

    if total_count == 0 && page == 1 {
        return Ok(Page {
            page,
            per_page: 0,
            page_count: 1,
            total_count: 0,
            first_index: 0,
            last_index: 0,
        });
    }

    if page > page_count {
        return Err(PaginationError::PageOutOfRange);
    }

    let unclamped_last = page * per_page;
    let first_index = unclamped_last - per_page;
    let last_index = unclamped_last.min(total_count);

    Ok(Page {
        page,
        per_page,
        page_count,
        total_count,
        first_index,
        last_index,
    })
}
