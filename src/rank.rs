//! Ranking rules and the explicit stable rank-sort
//!
//! A ranking rule maps an item to an `f64` score; higher scores rank
//! first. Sorting decorates every item with its position in the input and
//! a score computed exactly once, then orders by score descending with the
//! original position as the final tiebreaker. Ties therefore keep
//! insertion order on every run, independent of any sort-stability
//! guarantee.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, Result};
use crate::record::{Engagement, Timestamped};

/// Scoring seam for ranked views.
///
/// `score` must return a finite value; NaN or an infinity fails the query
/// that invoked the rule instead of being compared.
pub trait RankingRule<T> {
    fn score(&self, item: &T) -> f64;
}

/// Boxed ranking rule, as held by a view.
pub type BoxedRule<T> = Box<dyn RankingRule<T> + Send + Sync>;

/// Any scoring closure is a ranking rule.
impl<T, F> RankingRule<T> for F
where
    F: Fn(&T) -> f64,
{
    fn score(&self, item: &T) -> f64 {
        self(item)
    }
}

/// An item decorated with its input position and memoized score.
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a, T> {
    pub item: &'a T,
    /// Zero-based position in the input collection; final tiebreaker.
    pub index: usize,
    /// Score computed once by the ranking rule.
    pub score: f64,
}

/// Score and sort decorated items.
///
/// The rule runs exactly once per item, up front; comparisons only read
/// the memoized scores. The first non-finite score aborts with
/// [`QueryError::NonFiniteScore`] carrying the item's input index.
pub fn rank_scored<'a, T>(
    items: impl IntoIterator<Item = (usize, &'a T)>,
    rule: &dyn RankingRule<T>,
) -> Result<Vec<Scored<'a, T>>> {
    let mut scored = Vec::new();
    for (index, item) in items {
        let score = rule.score(item);
        if !score.is_finite() {
            return Err(QueryError::NonFiniteScore { index });
        }
        scored.push(Scored { item, index, score });
    }
    // The index level makes the order total, so unstable sorting is safe.
    scored.sort_unstable_by(compare_scored);
    Ok(scored)
}

/// Two-level comparator: score descending, then input index ascending.
pub fn compare_scored<T>(a: &Scored<'_, T>, b: &Scored<'_, T>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Weighted sum of engagement counters.
///
/// The bundled feed view scores `likes * 2 + comments * 3`; the top view
/// weighs both counters at 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEngagement {
    pub likes_weight: f64,
    pub comments_weight: f64,
}

impl WeightedEngagement {
    pub fn new(likes_weight: f64, comments_weight: f64) -> Self {
        Self {
            likes_weight,
            comments_weight,
        }
    }

    /// Check that both weights are finite and non-negative.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            ("likes_weight", self.likes_weight),
            ("comments_weight", self.comments_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and >= 0, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for WeightedEngagement {
    fn default() -> Self {
        Self {
            likes_weight: 2.0,
            comments_weight: 3.0,
        }
    }
}

impl<T: Engagement> RankingRule<T> for WeightedEngagement {
    fn score(&self, item: &T) -> f64 {
        self.likes_weight * item.likes() as f64 + self.comments_weight * item.comments() as f64
    }
}

/// Newest-first ranking from creation timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recency;

impl<T: Timestamped> RankingRule<T> for Recency {
    fn score(&self, item: &T) -> f64 {
        item.created_at().timestamp_millis() as f64
    }
}
