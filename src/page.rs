//! Page result type and pagination arithmetic
//!
//! A [`Page`] is the materialized slice of a query: the items for one page
//! plus the metadata a caller needs to render pagination chrome. Page
//! numbers are 1-indexed throughout.

use serde::{Deserialize, Serialize};

use crate::window::{page_controls, PageControl};

/// One page of query results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in ranked order.
    pub items: Vec<T>,
    /// Current page number (1-indexed). Echoes the request even when the
    /// page lies beyond `total_pages`.
    pub page: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Number of items that survived filtering, across all pages.
    pub total_items: usize,
    /// Total number of pages; zero when no items matched.
    pub total_pages: usize,
    /// Whether pages exist after this one.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Returns true when this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Windowed pagination controls for this page.
    pub fn controls(&self) -> Vec<PageControl> {
        page_controls(self.page, self.total_pages)
    }

    /// 1-indexed inclusive range of the items shown, for "showing X-Y of Z"
    /// labels. `None` when the page is empty.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}

/// Number of pages needed to hold `total_items` at `page_size` per page.
///
/// Zero items means zero pages. `page_size` must be nonzero; callers
/// validate that before arithmetic reaches this point.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    (total_items + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<u32>, page: usize, page_size: usize, total_items: usize) -> Page<u32> {
        let total_pages = page_count(total_items, page_size);
        Page {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_more: page < total_pages,
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(250, 100), 3);
        assert_eq!(page_count(200, 100), 2);
        assert_eq!(page_count(1, 100), 1);
    }

    #[test]
    fn page_count_of_nothing_is_zero() {
        assert_eq!(page_count(0, 10), 0);
    }

    #[test]
    fn item_range_on_middle_page() {
        let page = page_of(vec![4, 5, 6], 2, 3, 8);
        assert_eq!(page.item_range(), Some((4, 6)));
        assert!(page.has_more);
    }

    #[test]
    fn item_range_on_short_last_page() {
        let page = page_of(vec![7, 8], 3, 3, 8);
        assert_eq!(page.item_range(), Some((7, 8)));
        assert!(!page.has_more);
    }

    #[test]
    fn item_range_absent_for_empty_page() {
        let page = page_of(vec![], 5, 3, 8);
        assert_eq!(page.item_range(), None);
        assert!(!page.has_more);
    }

    #[test]
    fn serializes_with_metadata() {
        let page = page_of(vec![1, 2], 1, 2, 5);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total_pages"], 3);
        assert_eq!(json["has_more"], true);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }
}
