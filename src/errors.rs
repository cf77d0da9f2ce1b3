//! Shared error types for query evaluation

use thiserror::Error;

/// Main error type for query operations
///
/// Everything here is a caller-side programming error. Out-of-range pages
/// and empty result sets are valid states and never surface as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Page size of zero cannot produce a page
    #[error("page size must be at least 1")]
    ZeroPageSize,

    /// A ranking rule produced NaN or an infinite score
    #[error("ranking rule returned a non-finite score for item at index {index}")]
    NonFiniteScore { index: usize },
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, QueryError>;
