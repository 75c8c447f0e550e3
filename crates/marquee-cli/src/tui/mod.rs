//! Interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Terminal input, coordinator
//! completions and detail fetches are multiplexed on one task with
//! `tokio::select!`.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use marquee_api::browse::{BrowseConfig, Coordinator, LoadMore};
use marquee_api::catalog::{ImageResolver, fetch_detail, trailer_embed_url};
use marquee_api::tmdb::TmdbApi;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedSender};

use self::state::{BrowseState, DetailLoaded, DetailPane, InputMode};
use crate::display;

/// Runs the browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A>(api: Arc<A>, config: BrowseConfig, images: ImageResolver) -> Result<()>
where
    A: TmdbApi + Sync + 'static,
{
    let mut coordinator = Coordinator::new(Arc::clone(&api), config);
    coordinator.start();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut session = Session {
        api,
        images,
        coordinator,
        state: BrowseState::new(),
    };
    let result = session.run_event_loop(&mut terminal).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Everything the event loop mutates.
struct Session<A> {
    api: Arc<A>,
    images: ImageResolver,
    coordinator: Coordinator<A>,
    state: BrowseState,
}

impl<A> Session<A>
where
    A: TmdbApi + Sync + 'static,
{
    /// Main event loop.
    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let (detail_tx, mut detail_rx) = mpsc::unbounded_channel::<DetailLoaded>();
        let mut main_area_height: u16 = 0;

        loop {
            terminal
                .draw(|frame| {
                    main_area_height =
                        ui::draw(frame, &mut self.state, &self.coordinator, &self.images);
                })
                .context("failed to draw TUI")?;

            let page_size = usize::from(main_area_height.saturating_sub(4));

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key, page_size, &detail_tx) == Flow::Quit {
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("failed to read terminal event"),
                    None => return Ok(()),
                },
                Some(event) = self.coordinator.next_event() => {
                    if self.coordinator.handle(event) {
                        self.state.sync_selection(self.coordinator.items().len());
                    }
                }
                Some(loaded) = detail_rx.recv() => {
                    self.state.apply_detail(loaded);
                }
            }
        }
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        page_size: usize,
        detail_tx: &UnboundedSender<DetailLoaded>,
    ) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }
        self.state.status = None;
        match self.state.input_mode {
            InputMode::Search => {
                self.handle_search_input(key.code);
                Flow::Continue
            }
            InputMode::Normal if self.state.is_detail_open() => self.handle_detail_input(key.code),
            InputMode::Normal => self.handle_list_input(key.code, page_size, detail_tx),
        }
    }

    /// Handles key input in the search box.
    fn handle_search_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => self.state.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.state.query_pop();
                self.coordinator.set_query(self.state.query.as_str());
            }
            KeyCode::Char(c) => {
                self.state.query_push(c);
                self.coordinator.set_query(self.state.query.as_str());
            }
            _ => {}
        }
    }

    /// Handles key input while the detail pane is open.
    fn handle_detail_input(&mut self, key: KeyCode) -> Flow {
        match key {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Esc => self.state.close_detail(),
            KeyCode::Char('t') => self.open_trailer(),
            KeyCode::Char('p') => self.open_poster(),
            _ => {}
        }
        Flow::Continue
    }

    /// Handles key input on the result list.
    fn handle_list_input(
        &mut self,
        key: KeyCode,
        page_size: usize,
        detail_tx: &UnboundedSender<DetailLoaded>,
    ) -> Flow {
        let len = self.coordinator.items().len();
        match key {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.state.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_down(len),
            KeyCode::PageUp => self.state.page_up(page_size),
            KeyCode::PageDown => self.state.page_down(len, page_size),
            KeyCode::Char('/') => self.state.input_mode = InputMode::Search,
            KeyCode::Char('m') => {
                if self.coordinator.load_more() == LoadMore::Exhausted {
                    self.state.status = Some(String::from("No more results"));
                }
            }
            KeyCode::Enter => self.open_detail(detail_tx),
            _ => {}
        }
        Flow::Continue
    }

    /// Opens the detail pane for the selected movie and starts its fetch.
    fn open_detail(&mut self, detail_tx: &UnboundedSender<DetailLoaded>) {
        let Some(item) = self.coordinator.items().get(self.state.cursor()) else {
            return;
        };
        let movie_id = item.id;
        let request = self.state.open_detail(movie_id, display::title(item));

        let api = Arc::clone(&self.api);
        let tx = detail_tx.clone();
        tokio::spawn(async move {
            let result = fetch_detail(api.as_ref(), movie_id).await;
            let _ = tx.send(DetailLoaded {
                request,
                movie_id,
                result,
            });
        });
    }

    /// Opens the trailer embed in the system browser; inert without a trailer.
    fn open_trailer(&self) {
        let DetailPane::Ready(record) = &self.state.detail else {
            return;
        };
        let Some(video) = record.trailer() else {
            return;
        };
        match trailer_embed_url(video) {
            Ok(url) => {
                let _ = open::that(url.as_str());
            }
            Err(err) => tracing::warn!(error = %format!("{err:#}"), "invalid trailer URL"),
        }
    }

    /// Opens the backdrop (or poster) image in the system browser.
    fn open_poster(&self) {
        if let DetailPane::Ready(record) = &self.state.detail {
            let _ = open::that(self.images.backdrop_url(record.summary()));
        }
    }
}
