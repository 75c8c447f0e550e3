//! TUI rendering logic for the movie browser.

use marquee_api::browse::Coordinator;
use marquee_api::catalog::{DetailRecord, ImageResolver, ListingSource, trailer_embed_url};
use marquee_api::tmdb::{CatalogItem, TmdbApi};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::state::{BrowseState, DetailPane, InputMode};
use crate::display;

/// Characters of review text shown per review.
const REVIEW_EXCERPT_CHARS: usize = 240;

/// Draws the browser UI. Returns the list area height for page size calculation.
#[allow(clippy::indexing_slicing)]
pub fn draw<A>(
    frame: &mut Frame,
    state: &mut BrowseState,
    coordinator: &Coordinator<A>,
    images: &ImageResolver,
) -> u16
where
    A: TmdbApi + Sync + 'static,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box + listing info
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state, coordinator);

    let main_area = chunks[1];
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_area);

    draw_movie_list(frame, pane_chunks[0], state, coordinator);
    match &state.detail {
        DetailPane::Closed => {
            let selected = coordinator.items().get(state.cursor());
            draw_preview(frame, pane_chunks[1], selected, images);
        }
        pane => draw_detail(frame, pane_chunks[1], pane, images),
    }

    draw_footer(frame, chunks[2], state);

    main_area.height
}

/// Draws the search box and the listing summary.
#[allow(clippy::indexing_slicing)]
fn draw_header<A>(frame: &mut Frame, area: Rect, state: &BrowseState, coordinator: &Coordinator<A>)
where
    A: TmdbApi + Sync + 'static,
{
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.query.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let title = match coordinator.source() {
        ListingSource::NowPlaying { region } => format!(" Now Playing ({region}) "),
        ListingSource::Search(query) => format!(" Results: {query} "),
    };
    let mut info = format!(
        "{} movies  page {}/{}",
        coordinator.items().len(),
        coordinator.page(),
        coordinator.total_pages(),
    );
    if coordinator.is_settling() {
        info.push_str("  typing...");
    } else if coordinator.is_loading() {
        info.push_str("  loading...");
    }
    let summary = Paragraph::new(info).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(summary, header_chunks[1]);
}

/// Draws the result list (left).
fn draw_movie_list<A>(
    frame: &mut Frame,
    area: Rect,
    state: &mut BrowseState,
    coordinator: &Coordinator<A>,
) where
    A: TmdbApi + Sync + 'static,
{
    let border_style = if state.is_detail_open() {
        Style::default()
    } else {
        Style::default().fg(Color::Cyan)
    };

    let items = coordinator.items();
    if items.is_empty() && !coordinator.is_loading() {
        let empty = Paragraph::new("No movies found").block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Movies ")
                .border_style(border_style),
        );
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Title", "Year", "Rating", "Lang"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = items
        .iter()
        .map(|m| {
            Row::new(vec![
                String::from(display::title(m)),
                display::release_year(m.release_date.as_deref()),
                display::rating(m.vote_average),
                display::language(m.original_language.as_deref()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(5),
    ];

    let more = if coordinator.can_load_more() {
        " Movies (m: load more) "
    } else {
        " Movies "
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(more)
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws the card-style preview of the highlighted movie (right).
fn draw_preview(
    frame: &mut Frame,
    area: Rect,
    selected: Option<&CatalogItem>,
    images: &ImageResolver,
) {
    let lines = selected.map_or_else(Vec::new, |m| {
        vec![
            Line::from(Span::styled(
                String::from(display::title(m)),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{}  \u{2605} {}  {}",
                display::release_year(m.release_date.as_deref()),
                display::rating(m.vote_average),
                display::language(m.original_language.as_deref()),
            )),
            Line::from(""),
            Line::from(String::from(display::overview(m))),
            Line::from(""),
            Line::from(format!("Poster: {}", images.poster_url(m))),
        ]
    });

    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Preview "));
    frame.render_widget(preview, area);
}

/// Draws the detail pane (right).
fn draw_detail(frame: &mut Frame, area: Rect, pane: &DetailPane, images: &ImageResolver) {
    let (title, lines) = match pane {
        DetailPane::Loading { title, .. } => {
            (format!(" {title} "), vec![Line::from("Loading details...")])
        }
        DetailPane::NotFound { movie_id } => (
            String::from(" Details "),
            vec![Line::from(Span::styled(
                format!("movie {movie_id} not found"),
                Style::default().fg(Color::Red),
            ))],
        ),
        DetailPane::Ready(record) => (
            format!(" {} ", display::title(record.summary())),
            detail_lines(record, images),
        ),
        DetailPane::Closed => (String::from(" Details "), Vec::new()),
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(detail, area);
}

/// Builds the lines of a fetched detail record.
fn detail_lines(record: &DetailRecord, images: &ImageResolver) -> Vec<Line<'static>> {
    let details = record.details();
    let summary = record.summary();
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(Span::styled(
            String::from(tagline),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(format!(
        "{}  {}  \u{2605} {}  {}",
        display::release_date(summary.release_date.as_deref()),
        display::runtime(details.runtime),
        display::rating(summary.vote_average),
        display::language(summary.original_language.as_deref()),
    )));
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(Line::from(genres.join(", ")));
    }
    lines.push(Line::from(format!(
        "Budget {}  Revenue {}",
        display::usd(details.budget),
        display::usd(details.revenue),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(String::from(display::overview(summary))));
    lines.push(Line::from(""));

    let trailer = record
        .trailer()
        .and_then(|video| trailer_embed_url(video).ok())
        .map_or_else(|| String::from("none"), String::from);
    lines.push(Line::from(format!("Trailer: {trailer}")));
    lines.push(Line::from(format!("Backdrop: {}", images.backdrop_url(summary))));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Cast", heading)));
    for member in record.credits().cast.iter().take(display::CAST_LIMIT) {
        lines.push(Line::from(format!("  {} as {}", member.name, member.character)));
    }

    if !record.reviews().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Reviews", heading)));
        for review in record.reviews().iter().take(display::REVIEW_LIMIT) {
            lines.push(Line::from(format!(
                "  {} ({})",
                review.author,
                display::review_date(&review.created_at)
            )));
            let excerpt: String = review.content.chars().take(REVIEW_EXCERPT_CHARS).collect();
            lines.push(Line::from(format!("    {excerpt}")));
        }
    }

    if !record.similar().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Similar", heading)));
        for movie in record.similar().iter().take(display::SIMILAR_LIMIT) {
            lines.push(Line::from(format!(
                "  {} ({})",
                display::title(movie),
                display::release_year(movie.release_date.as_deref())
            )));
        }
    }

    lines
}

/// Draws the footer with key hints or the status message.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowseState) {
    let help_text = if let Some(status) = &state.status {
        Line::from(status.as_str())
    } else if state.input_mode == InputMode::Search {
        Line::from("Type to search | Enter/Esc: back to list")
    } else if state.is_detail_open() {
        Line::from("t: play trailer  p: open poster  Esc: close  q: quit")
    } else {
        Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: move  PgUp/PgDn: page  /: search  m: load more  Enter: details  q: quit",
        )])
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
