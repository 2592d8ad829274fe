//! # Pagination
//!
//! 1-based page metadata for list endpoints. Inputs from query strings are
//! sanitized rather than rejected: a page below 1 becomes 1 and a
//! non-positive page size becomes [`DEFAULT_PAGE_SIZE`]. When the total is
//! known the page is clamped to the last page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Offset used when the caller supplies a negative one.
pub const DEFAULT_OFFSET: i64 = 0;

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    /// Page number, 1-based.
    pub page: i64,
    pub page_size: i64,
    /// Total number of items across all pages.
    pub total: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Page {
    /// Number of items to skip to reach this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Normalize a requested page number and size.
pub fn sanitize(page: i64, page_size: i64) -> (i64, i64) {
    let page = page.max(1);
    let page_size = if page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    (page, page_size)
}

/// Build page metadata for `total` items.
///
/// With no items there are zero pages, the page is whatever was asked for
/// (sanitized) and neither neighbour exists.
pub fn compute(total: i64, page: i64, page_size: i64) -> Page {
    let (mut page, page_size) = sanitize(page, page_size);

    let total_pages = if total > 0 {
        total / page_size + i64::from(total % page_size != 0)
    } else {
        0
    };
    if total_pages > 0 && page > total_pages {
        page = total_pages;
    }

    Page {
        page,
        page_size,
        total,
        total_pages,
        has_prev: total_pages > 0 && page > 1,
        has_next: total_pages > 0 && page < total_pages,
    }
}

/// Build page metadata from `limit` / `offset` query parameters.
pub fn calculate_page(limit: i64, offset: i64, total: i64) -> Page {
    let page_size = if limit <= 0 { DEFAULT_PAGE_SIZE } else { limit };
    let offset = if offset < 0 { DEFAULT_OFFSET } else { offset };
    compute(total, offset / page_size + 1, page_size)
}

/// A page of results and its metadata.
///
/// ```
/// use dscm_models::page::PageResponse;
///
/// let r = PageResponse::new(vec!["a", "b"], 2, 1, 20);
/// let json = serde_json::to_value(&r).unwrap();
/// assert_eq!(json["page"]["total_pages"], 1);
/// assert_eq!(json["data"][1], "b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub page: Page,
}

impl<T> PageResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        Self {
            data,
            page: compute(total, page, page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_bounds() {
        assert_eq!(sanitize(0, 0), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(sanitize(-4, -1), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(sanitize(3, 50), (3, 50));
    }

    #[test]
    fn empty_result_has_no_pages() {
        let p = compute(0, 3, 10);
        assert_eq!(p.page, 3);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_prev && !p.has_next);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let p = compute(45, 2, 20);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_prev && p.has_next);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn page_past_end_is_clamped() {
        let p = compute(45, 9, 20);
        assert_eq!(p.page, 3);
        assert!(p.has_prev);
        assert!(!p.has_next);
    }

    #[test]
    fn limit_offset_maps_to_page() {
        assert_eq!(calculate_page(10, 25, 100).page, 3);
        assert_eq!(calculate_page(0, 0, 100).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(calculate_page(10, -5, 100).page, 1);
    }

    #[test]
    fn response_json_shape() {
        let r = PageResponse::new(vec![1, 2], 2, 1, 0);
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({
                "data": [1, 2],
                "page": {
                    "page": 1,
                    "page_size": 20,
                    "total": 2,
                    "total_pages": 1,
                    "has_prev": false,
                    "has_next": false
                }
            })
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn computed_page_is_in_range(
                total in 0i64..1_000_000,
                page in -10i64..10_000,
                size in -5i64..500,
            ) {
                let p = compute(total, page, size);
                prop_assert!(p.page >= 1);
                prop_assert!(p.page_size >= 1);
                if p.total_pages > 0 {
                    prop_assert!(p.page <= p.total_pages);
                    prop_assert!(p.offset() < total);
                    prop_assert!(p.total_pages * p.page_size >= total);
                }
                prop_assert_eq!(p.has_prev, p.total_pages > 0 && p.page > 1);
            }
        }
    }
}
