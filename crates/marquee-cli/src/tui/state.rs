//! Browse TUI state management.

use anyhow::Result;
use marquee_api::catalog::DetailRecord;
use ratatui::widgets::TableState;

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// List navigation.
    Normal,
    /// Typing into the search box.
    Search,
}

/// Contents of the detail pane.
#[derive(Debug)]
pub enum DetailPane {
    /// No movie opened.
    Closed,
    /// Waiting for the composite record.
    Loading {
        /// Movie being fetched.
        movie_id: u64,
        /// Title from the listing, shown while loading.
        title: String,
    },
    /// Record fetched.
    Ready(Box<DetailRecord>),
    /// The detail fetch failed.
    NotFound {
        /// Movie that could not be loaded.
        movie_id: u64,
    },
}

/// A finished detail fetch, tagged with the request that issued it.
#[derive(Debug)]
pub struct DetailLoaded {
    /// Request number from [`BrowseState::open_detail`].
    pub request: u64,
    /// Movie that was fetched.
    pub movie_id: u64,
    /// Fetch outcome.
    pub result: Result<DetailRecord>,
}

/// State for the browse TUI.
///
/// The result list itself lives in the coordinator; this holds only what the
/// view owns: the search box text, the selection, and the detail pane.
#[derive(Debug)]
pub struct BrowseState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search box text.
    pub query: String,
    /// Table state for the result list (handles selection and scroll).
    pub table_state: TableState,
    /// Detail pane contents.
    pub detail: DetailPane,
    /// One-line status message for the footer.
    pub status: Option<String>,
    /// Number of the most recent detail request.
    detail_request: u64,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseState {
    /// Creates an empty state in normal mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Normal,
            query: String::new(),
            table_state: TableState::default(),
            detail: DetailPane::Closed,
            status: None,
            detail_request: 0,
        }
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Moves cursor up.
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current.saturating_sub(1)));
        }
    }

    /// Moves cursor down within `len` rows.
    pub fn move_down(&mut self, len: usize) {
        let next = self.cursor().saturating_add(1);
        if next < len {
            self.table_state.select(Some(next));
        }
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        let current = self.cursor();
        self.table_state
            .select(Some(current.saturating_sub(page_size)));
    }

    /// Scrolls down by a page within `len` rows.
    pub fn page_down(&mut self, len: usize, page_size: usize) {
        if len == 0 {
            return;
        }
        let max = len.saturating_sub(1);
        let current = self.cursor();
        self.table_state
            .select(Some(current.saturating_add(page_size).min(max)));
    }

    /// Keeps the selection valid after the list changed to `len` rows.
    pub fn sync_selection(&mut self, len: usize) {
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(idx) if idx < len => {}
            Some(_) => self.table_state.select(Some(len.saturating_sub(1))),
            None => self.table_state.select(Some(0)),
        }
    }

    /// Appends a character to the search box.
    pub fn query_push(&mut self, ch: char) {
        self.query.push(ch);
    }

    /// Removes the last character from the search box.
    pub fn query_pop(&mut self) {
        self.query.pop();
    }

    /// Returns `true` while the detail pane is shown.
    #[must_use]
    pub const fn is_detail_open(&self) -> bool {
        !matches!(self.detail, DetailPane::Closed)
    }

    /// Shows the detail pane in its loading state; returns the request number
    /// the fetch must be tagged with.
    pub fn open_detail(&mut self, movie_id: u64, title: impl Into<String>) -> u64 {
        self.detail_request = self.detail_request.wrapping_add(1);
        self.detail = DetailPane::Loading {
            movie_id,
            title: title.into(),
        };
        self.detail_request
    }

    /// Hides the detail pane; an in-flight fetch is left to finish.
    pub fn close_detail(&mut self) {
        self.detail = DetailPane::Closed;
    }

    /// Applies a finished fetch if it answers the pending request.
    ///
    /// Returns `false` for responses to closed or superseded requests.
    pub fn apply_detail(&mut self, loaded: DetailLoaded) -> bool {
        let pending = matches!(
            self.detail,
            DetailPane::Loading { movie_id, .. } if movie_id == loaded.movie_id
        );
        if !pending || loaded.request != self.detail_request {
            tracing::debug!(
                request = loaded.request,
                movie_id = loaded.movie_id,
                "discarding stale detail response"
            );
            return false;
        }

        self.detail = match loaded.result {
            Ok(record) => DetailPane::Ready(Box::new(record)),
            Err(err) => {
                tracing::warn!(
                    movie_id = loaded.movie_id,
                    error = %format!("{err:#}"),
                    "detail fetch failed"
                );
                DetailPane::NotFound {
                    movie_id: loaded.movie_id,
                }
            }
        };
        true
    }
}
