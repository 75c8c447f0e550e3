//! Debounced search with incremental pagination.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::catalog::{DEFAULT_REGION, Listing, ListingSource};
use crate::tmdb::{CatalogItem, TmdbApi};

/// Coordinator tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Quiet period after the last query edit before a search is issued.
    pub debounce: Duration,
    /// Market for the now-playing listing.
    pub region: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            region: String::from(DEFAULT_REGION),
        }
    }
}

/// Whether a listing request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight.
    Idle,
    /// A page request is outstanding.
    Loading,
}

/// How a loaded page is merged into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First page of a new listing; replaces the list.
    Replace,
    /// Next page of the current listing; appended in order.
    Append,
}

/// Completion of background work, delivered to [`Coordinator::handle`].
#[derive(Debug)]
pub enum BrowseEvent {
    /// The debounce window for query edit `seq` elapsed.
    QuerySettled {
        /// Edit sequence number the timer was armed for.
        seq: u64,
    },
    /// A listing request finished.
    PageLoaded {
        /// Request generation the fetch was issued under.
        generation: u64,
        /// How the page merges into the list.
        mode: FetchMode,
        /// Outcome of the request.
        listing: Listing,
    },
}

/// Result of [`Coordinator::load_more`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    /// A request for `page` was issued.
    Requested {
        /// Page number requested.
        page: u32,
    },
    /// The current listing has no further pages.
    Exhausted,
    /// A request is already outstanding.
    Busy,
}

/// Owns the browse state: query text, accumulated items and paging.
///
/// Query edits are debounced; once the text settles the first page of the
/// matching listing (search, or now playing for blank text) replaces the
/// list. [`Coordinator::load_more`] appends the following pages of the same
/// listing.
///
/// Every replace bumps a request generation. Responses tagged with an older
/// generation are discarded, so a slow page from an abandoned query never
/// lands in the list of the current one.
#[derive(Debug)]
pub struct Coordinator<A> {
    api: Arc<A>,
    region: String,
    debouncer: Debouncer,
    events_tx: UnboundedSender<BrowseEvent>,
    events_rx: UnboundedReceiver<BrowseEvent>,
    query: String,
    source: ListingSource,
    items: Vec<CatalogItem>,
    page: u32,
    total_pages: u32,
    phase: Phase,
    started: bool,
    edit_seq: u64,
    generation: u64,
}

impl<A> Coordinator<A>
where
    A: TmdbApi + Sync + 'static,
{
    /// Creates an idle coordinator with empty query text and no items.
    pub fn new(api: Arc<A>, config: BrowseConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let source = ListingSource::for_query("", &config.region);
        Self {
            api,
            region: config.region,
            debouncer: Debouncer::new(config.debounce),
            events_tx,
            events_rx,
            query: String::new(),
            source,
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            phase: Phase::Idle,
            started: false,
            edit_seq: 0,
            generation: 0,
        }
    }

    /// Loads the first page for the current query text.
    ///
    /// Only the first call has an effect; returns whether a request was issued.
    /// A pending debounced edit is absorbed, since its text is the one loaded.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.debouncer.cancel();
        self.edit_seq = self.edit_seq.wrapping_add(1);
        self.source = ListingSource::for_query(&self.query, &self.region);
        self.begin_replace();
        true
    }

    /// Records new query text and restarts the debounce window.
    ///
    /// Setting the text it already holds is not an edit.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        if text == self.query {
            return;
        }
        self.query = text;
        self.edit_seq = self.edit_seq.wrapping_add(1);

        let seq = self.edit_seq;
        let tx = self.events_tx.clone();
        self.debouncer.schedule(async move {
            let _ = tx.send(BrowseEvent::QuerySettled { seq });
        });
        tracing::trace!(
            seq,
            delay = ?self.debouncer.delay(),
            "query edited, debounce restarted"
        );
    }

    /// Requests the next page of the current listing.
    pub fn load_more(&mut self) -> LoadMore {
        if self.phase == Phase::Loading {
            return LoadMore::Busy;
        }
        let next = self.page.saturating_add(1);
        if next > self.total_pages {
            tracing::debug!(
                page = self.page,
                total_pages = self.total_pages,
                "no more pages"
            );
            return LoadMore::Exhausted;
        }
        self.page = next;
        self.phase = Phase::Loading;
        self.spawn_fetch(next, FetchMode::Append);
        LoadMore::Requested { page: next }
    }

    /// Waits for the next completion of background work.
    ///
    /// Never resolves to `None` while the coordinator is alive, since it
    /// holds a sender itself.
    pub async fn next_event(&mut self) -> Option<BrowseEvent> {
        self.events_rx.recv().await
    }

    /// Applies a completion; returns whether visible state changed.
    pub fn handle(&mut self, event: BrowseEvent) -> bool {
        match event {
            BrowseEvent::QuerySettled { seq } => {
                if seq != self.edit_seq {
                    tracing::trace!(seq, current = self.edit_seq, "ignoring superseded edit");
                    return false;
                }
                self.source = ListingSource::for_query(&self.query, &self.region);
                self.started = true;
                self.begin_replace();
                true
            }
            BrowseEvent::PageLoaded {
                generation,
                mode,
                listing,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        ?mode,
                        "discarding stale listing response"
                    );
                    return false;
                }
                let page = listing.into_page();
                match mode {
                    FetchMode::Replace => self.items = page.results,
                    FetchMode::Append => self.items.extend(page.results),
                }
                self.total_pages = page.total_pages;
                self.phase = Phase::Idle;
                tracing::debug!(
                    page = self.page,
                    total_pages = self.total_pages,
                    items = self.items.len(),
                    "listing updated"
                );
                true
            }
        }
    }

    /// Waits for one event and applies it.
    pub async fn pump(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => self.handle(event),
            None => false,
        }
    }

    /// Query text as last set.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The listing the current items belong to.
    #[must_use]
    pub const fn source(&self) -> &ListingSource {
        &self.source
    }

    /// Returns `true` when the items come from the now-playing listing.
    #[must_use]
    pub const fn is_default_listing(&self) -> bool {
        self.source.is_default()
    }

    /// Accumulated items, in page order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Highest page requested for the current listing (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page count reported by the last response.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Current request phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while a query edit waits for its debounce window.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Returns `true` while a page request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Returns `true` if [`Coordinator::load_more`] would issue a request.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.phase == Phase::Idle && self.page < self.total_pages
    }

    fn begin_replace(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.page = 1;
        self.phase = Phase::Loading;
        self.spawn_fetch(1, FetchMode::Replace);
    }

    fn spawn_fetch(&self, page: u32, mode: FetchMode) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let source = self.source.clone();
        let generation = self.generation;
        tracing::debug!(?source, page, ?mode, generation, "issuing listing request");

        tokio::spawn(async move {
            let listing = source.fetch(api.as_ref(), page).await;
            let event = BrowseEvent::PageLoaded {
                generation,
                mode,
                listing,
            };
            if tx.send(event).is_err() {
                tracing::debug!("coordinator gone, dropping listing response");
            }
        });
    }
}
