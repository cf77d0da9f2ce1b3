//! Pure query pipeline for paged collection views
//!
//! This module implements the deterministic core: no I/O, no clocks, no
//! shared state. One call, one page.
//!
//! # Architecture
//!
//! The pipeline transforms a borrowed collection into a [`Page`] through
//! composable, pure stages:
//!
//! ```text
//! collection (&T items)
//!        │
//!        ▼
//! ┌─────────────────────┐
//! │ CollectionView::query │ ← QueryParams (per-call state)
//! └─────────────────────┘
//!        │
//!        ├─→ decorate()         ← Pair items with input position
//!        ├─→ filter_decorated() ← Apply the view's predicate
//!        ├─→ rank_decorated()   ← Score once, sort desc, index tiebreak
//!        ├─→ slice_page()       ← Copy out the requested window
//!        └─→ assemble()         ← Pagination metadata
//!        │
//!        ▼
//! Page<T>
//! ```
//!
//! Filtering always runs before ranking, so scores are only computed for
//! items that survive the filter, and pagination counts reflect the
//! filtered set. Equal scores keep their input order on every run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, Result};
use crate::filter::{BoxedPredicate, FilterPredicate};
use crate::page::{page_count, Page};
use crate::rank::{rank_scored, BoxedRule, RankingRule, Scored};

/// Page size used when a caller or config does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Per-call query state: what the caller is looking at right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Free-form filter text; `None`, empty or whitespace-only disables
    /// filtering.
    #[serde(default)]
    pub filter_text: Option<String>,
    /// 1-indexed page number; zero clamps to one.
    pub page: usize,
    /// Items per page; must be nonzero.
    pub page_size: usize,
}

impl QueryParams {
    /// Parameters for the first page with no filter.
    pub fn first_page(page_size: usize) -> Self {
        Self {
            filter_text: None,
            page: 1,
            page_size,
        }
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_filter(mut self, text: impl Into<String>) -> Self {
        self.filter_text = Some(text.into());
        self
    }

    /// Trimmed filter text, `None` when filtering is disabled.
    fn effective_filter(&self) -> Option<&str> {
        let text = self.filter_text.as_deref()?.trim();
        (!text.is_empty()).then_some(text)
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

/// A configured way of looking at a collection.
///
/// The view holds the stable seams (ranking rule, filter predicate); the
/// per-call state arrives in [`QueryParams`]. Views never mutate during
/// queries and are cheap to share behind an `Arc`.
pub struct CollectionView<T> {
    name: String,
    rule: Option<BoxedRule<T>>,
    predicate: Option<BoxedPredicate<T>>,
}

impl<T> CollectionView<T> {
    /// An unranked, unfiltered view: input order, everything included.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: None,
            predicate: None,
        }
    }

    /// Attach a ranking rule; highest score first.
    pub fn with_rule(mut self, rule: impl RankingRule<T> + Send + Sync + 'static) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }

    /// Attach a filter predicate for free-form search.
    pub fn with_predicate(
        mut self,
        predicate: impl FilterPredicate<T> + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ranked(&self) -> bool {
        self.rule.is_some()
    }

    pub fn is_searchable(&self) -> bool {
        self.predicate.is_some()
    }

    /// Run one query against a borrowed collection.
    ///
    /// The collection is read in iteration order; that order defines the
    /// tiebreak for equal scores and the unranked presentation order.
    /// Only the items on the returned page are cloned.
    ///
    /// # Errors
    ///
    /// [`QueryError::ZeroPageSize`] when `params.page_size` is zero, and
    /// [`QueryError::NonFiniteScore`] when the view's rule returns NaN or
    /// an infinity. A page beyond the end is not an error: it comes back
    /// empty with `has_more == false`.
    pub fn query<'a, I>(&self, collection: I, params: &QueryParams) -> Result<Page<T>>
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if params.page_size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        let page = params.page.max(1);

        // Stage 1: Decorate with input position (pure)
        let decorated = decorate(collection);

        // Stage 2: Filter (pure)
        let filtered =
            filter_decorated(decorated, self.predicate.as_deref(), params.effective_filter());
        let total_items = filtered.len();

        // Stage 3: Rank (pure; scores memoized)
        let ranked = rank_decorated(filtered, self.rule.as_deref())?;

        // Stage 4: Slice the requested window (pure)
        let items = slice_page(&ranked, page, params.page_size);

        // Stage 5: Assemble metadata (pure)
        Ok(assemble(items, page, params.page_size, total_items))
    }
}

// Manual `Debug` because the seams are `Box<dyn ...>` trait objects.
impl<T> fmt::Debug for CollectionView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionView")
            .field("name", &self.name)
            .field("ranked", &self.rule.is_some())
            .field("searchable", &self.predicate.is_some())
            .finish()
    }
}

// ============================================================================
// STAGE 1: DECORATE
// ============================================================================

/// Pairs every item with its position in the input.
///
/// The position survives filtering and ranking as the deterministic
/// tiebreaker for equal scores.
fn decorate<'a, T: 'a>(collection: impl IntoIterator<Item = &'a T>) -> Vec<(usize, &'a T)> {
    collection.into_iter().enumerate().collect()
}

// ============================================================================
// STAGE 2: FILTER
// ============================================================================

/// Drops items the predicate rejects.
///
/// Pass-through when the view has no predicate or the call has no
/// effective filter text.
fn filter_decorated<'a, T>(
    items: Vec<(usize, &'a T)>,
    predicate: Option<&(dyn FilterPredicate<T> + Send + Sync)>,
    filter_text: Option<&str>,
) -> Vec<(usize, &'a T)> {
    match (predicate, filter_text) {
        (Some(predicate), Some(text)) => items
            .into_iter()
            .filter(|(_, item)| predicate.matches(item, text))
            .collect(),
        _ => items,
    }
}

// ============================================================================
// STAGE 3: RANK
// ============================================================================

/// Orders items by the view's rule. With no rule the input order stands.
fn rank_decorated<'a, T>(
    items: Vec<(usize, &'a T)>,
    rule: Option<&(dyn RankingRule<T> + Send + Sync)>,
) -> Result<Vec<Scored<'a, T>>> {
    match rule {
        Some(rule) => rank_scored(items, rule),
        None => Ok(items
            .into_iter()
            .map(|(index, item)| Scored {
                item,
                index,
                score: 0.0,
            })
            .collect()),
    }
}

// ============================================================================
// STAGE 4: SLICE
// ============================================================================

/// Copies out the requested page window.
///
/// A window past the end is simply empty; the caller still gets full
/// pagination metadata from the assemble stage.
fn slice_page<T: Clone>(ranked: &[Scored<'_, T>], page: usize, page_size: usize) -> Vec<T> {
    let start = (page - 1).saturating_mul(page_size);
    ranked
        .iter()
        .skip(start)
        .take(page_size)
        .map(|scored| scored.item.clone())
        .collect()
}

// ============================================================================
// STAGE 5: ASSEMBLE
// ============================================================================

/// Builds the page with its pagination metadata.
fn assemble<T>(items: Vec<T>, page: usize, page_size: usize, total_items: usize) -> Page<T> {
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
