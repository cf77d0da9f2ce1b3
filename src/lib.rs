// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod filter;
pub mod output;
pub mod page;
pub mod query;
pub mod rank;
pub mod record;
pub mod session;
pub mod store;
pub mod views;
pub mod window;

// Re-export commonly used types
pub use crate::errors::{QueryError, Result};
pub use crate::page::{page_count, Page};
pub use crate::query::{CollectionView, QueryParams, DEFAULT_PAGE_SIZE};
pub use crate::record::{Engagement, Record, Timestamped};
pub use crate::window::{page_controls, PageControl};

pub use crate::filter::{BoxedPredicate, FilterPredicate, SearchKey, SubstringFilter};
pub use crate::rank::{rank_scored, BoxedRule, RankingRule, Recency, Scored, WeightedEngagement};

pub use crate::config::{load_config, load_config_from, PaginaConfig, RankKind, ViewSpec};
pub use crate::session::{FetchOutcome, QueryTicket, ViewSession};
pub use crate::store::CollectionStore;
pub use crate::views::{build_view, catalog, resolve_view};

pub use crate::output::{create_writer, OutputFormat, PageWriter};
