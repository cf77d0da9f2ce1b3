//! Windowed pagination controls
//!
//! Builds the compact control sequence a list UI renders under a page:
//! always the first and last page, the neighborhood around the current
//! page, and ellipsis markers where two or more pages are omitted. A gap
//! of exactly one page is shown as that page number, so an ellipsis never
//! stands in for something shorter than itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One element of a pagination control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageControl {
    /// A navigable page number (1-indexed).
    Page(usize),
    /// A run of two or more omitted pages.
    Ellipsis,
}

impl fmt::Display for PageControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageControl::Page(n) => write!(f, "{n}"),
            PageControl::Ellipsis => write!(f, "..."),
        }
    }
}

/// Build the control strip for `current` within `total` pages.
///
/// `total == 0` yields an empty strip. A `current` beyond `total` still
/// produces a valid strip; only in-range neighbors are shown.
pub fn page_controls(current: usize, total: usize) -> Vec<PageControl> {
    if total == 0 {
        return Vec::new();
    }
    let shown = candidate_pages(current, total);

    let mut controls = Vec::with_capacity(shown.len() + 2);
    let mut prev: Option<usize> = None;
    for page in shown {
        match prev {
            // Exactly one page omitted: show it instead of an ellipsis.
            Some(p) if page == p + 2 => controls.push(PageControl::Page(p + 1)),
            Some(p) if page > p + 2 => controls.push(PageControl::Ellipsis),
            _ => {}
        }
        controls.push(PageControl::Page(page));
        prev = Some(page);
    }
    controls
}

/// Pages that must appear: endpoints plus the in-range neighborhood of
/// `current`, ascending and deduplicated.
fn candidate_pages(current: usize, total: usize) -> Vec<usize> {
    let mut pages = vec![1, total];
    let low = current.saturating_sub(1).max(1);
    let high = (current + 1).min(total);
    pages.extend(low..=high);
    pages.sort_unstable();
    pages.dedup();
    pages
}
