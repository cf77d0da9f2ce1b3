//! Per-view session with last-request-wins fetching
//!
//! A session owns what a list screen owns: the store it reads, the view
//! it queries through, and the navigation state (current page, filter
//! text). Fetches are asynchronous and may resolve out of order; every
//! fetch carries a ticket stamped from a monotonic sequence, and only
//! the newest ticket may publish its page. Stale resolutions are
//! discarded, so the screen always ends up showing the answer to the
//! latest request.
//!
//! The pure pipeline stays synchronous underneath; this layer adds only
//! the snapshotting, the optional simulated latency, and the ticket
//! check.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::errors::Result;
use crate::page::Page;
use crate::query::{CollectionView, QueryParams};
use crate::store::CollectionStore;

/// Outcome of resolving one fetch ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// The ticket was still current; the page was published.
    Applied(Page<T>),
    /// A newer ticket was issued meanwhile; nothing was published.
    Superseded,
}

/// A fetch request frozen at issue time.
///
/// Later changes to the session's navigation state do not affect an
/// already-issued ticket; they issue new tickets with higher sequence
/// numbers instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    seq: u64,
    params: QueryParams,
}

impl QueryTicket {
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Navigation state a list screen holds between fetches.
#[derive(Debug, Clone)]
struct SessionState {
    page: usize,
    filter_text: Option<String>,
}

/// One screen's live connection to a collection.
pub struct ViewSession<T> {
    store: Arc<CollectionStore<T>>,
    view: Arc<CollectionView<T>>,
    page_size: usize,
    latency: Duration,
    state: Mutex<SessionState>,
    seq: AtomicU64,
    current: Mutex<Option<Page<T>>>,
}

impl<T: Clone> ViewSession<T> {
    pub fn new(
        store: Arc<CollectionStore<T>>,
        view: Arc<CollectionView<T>>,
        page_size: usize,
    ) -> Self {
        Self {
            store,
            view,
            page_size,
            latency: Duration::ZERO,
            state: Mutex::new(SessionState {
                page: 1,
                filter_text: None,
            }),
            seq: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Simulated fetch latency, for demos and tests. Zero by default.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Change the filter text. Navigation resets to page 1, matching
    /// what a search box does.
    pub fn set_filter(&self, text: impl Into<String>) -> QueryTicket {
        {
            let mut state = self.state.lock();
            state.filter_text = Some(text.into());
            state.page = 1;
        }
        self.issue()
    }

    /// Drop the filter text. Navigation resets to page 1.
    pub fn clear_filter(&self) -> QueryTicket {
        {
            let mut state = self.state.lock();
            state.filter_text = None;
            state.page = 1;
        }
        self.issue()
    }

    /// Navigate to a page, keeping the filter.
    pub fn goto_page(&self, page: usize) -> QueryTicket {
        self.state.lock().page = page.max(1);
        self.issue()
    }

    /// Re-issue the current navigation state, typically after a store
    /// mutation.
    pub fn refresh(&self) -> QueryTicket {
        self.issue()
    }

    /// Resolve a ticket: snapshot the store, wait out any simulated
    /// latency, run the pure query, then publish if still current.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::errors::QueryError`] from the pipeline; a
    /// failed resolve publishes nothing.
    pub async fn resolve(&self, ticket: QueryTicket) -> Result<FetchOutcome<T>> {
        let snapshot = self.store.snapshot();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let page = self.view.query(&snapshot, ticket.params())?;
        Ok(self.apply_if_current(ticket, page))
    }

    /// The most recently published page, if any fetch has completed.
    pub fn current_page(&self) -> Option<Page<T>> {
        self.current.lock().clone()
    }

    pub fn view(&self) -> &CollectionView<T> {
        &self.view
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Stamp a ticket from the navigation state under the lock.
    fn issue(&self) -> QueryTicket {
        let state = self.state.lock();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        QueryTicket {
            seq,
            params: QueryParams {
                filter_text: state.filter_text.clone(),
                page: state.page,
                page_size: self.page_size,
            },
        }
    }

    /// Publish `page` if `ticket` is still the newest issue. Currency is
    /// checked at publish time, so a ticket overtaken mid-flight loses.
    fn apply_if_current(&self, ticket: QueryTicket, page: Page<T>) -> FetchOutcome<T> {
        let mut current = self.current.lock();
        if ticket.seq != self.seq.load(Ordering::SeqCst) {
            log::debug!(
                "view {}: discarding superseded ticket {}",
                self.view.name(),
                ticket.seq
            );
            return FetchOutcome::Superseded;
        }
        *current = Some(page.clone());
        FetchOutcome::Applied(page)
    }
}
