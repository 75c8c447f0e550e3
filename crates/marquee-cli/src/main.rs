//! marquee - movie discovery CLI backed by TMDB.

/// Application configuration (TOML).
mod config;
/// Text formatting for movie output.
mod display;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marquee_api::browse::BrowseConfig;
use marquee_api::catalog::{
    DetailRecord, ImageResolver, fetch_detail, list_default, search, trailer_embed_url,
};
use marquee_api::tmdb::{ResultPage, TmdbClient};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbSettings, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Config directory (default: `$MARQUEE_CONFIG_DIR`, then `$XDG_CONFIG_HOME/marquee`).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies by title.
    Search(SearchArgs),
    /// List movies now playing in the configured region.
    NowPlaying(NowPlayingArgs),
    /// Show details, cast, reviews and similar titles for a movie.
    Details(DetailsArgs),
    /// Browse movies interactively via TUI.
    Browse,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Inception").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    page: u32,
}

/// Arguments for the `now-playing` subcommand.
#[derive(clap::Args)]
struct NowPlayingArgs {
    /// Result page (1-based).
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    page: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Open the trailer in the system browser.
    #[arg(long)]
    open_trailer: bool,
}

/// Loads the config file and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok(config.with_env())
}

/// Builds a `TmdbClient` from the resolved settings.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(settings: &TmdbSettings) -> Result<TmdbClient> {
    let mut base = settings.base_url.clone();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base_url = Url::parse(&base).with_context(|| format!("invalid TMDB base URL: {base}"))?;

    TmdbClient::builder()
        .base_url(base_url)
        .credentials(settings.credentials())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Logs one listing page as a table.
fn log_listing(page: &ResultPage) {
    if page.results.is_empty() {
        tracing::info!("No movies found");
        return;
    }

    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
    tracing::info!("ID\tYear\tRating\tLang\tTitle");
    for movie in &page.results {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            movie.id,
            display::release_year(movie.release_date.as_deref()),
            display::rating(movie.vote_average),
            display::language(movie.original_language.as_deref()),
            display::title(movie),
        );
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if configuration or client construction fails. Request
/// failures are reported as an empty result.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;

    let page = search(&client, &args.query, args.page).await.into_page();
    log_listing(&page);
    Ok(())
}

/// Runs the `now-playing` subcommand.
///
/// # Errors
///
/// Returns an error if configuration or client construction fails. Request
/// failures are reported as an empty result.
#[instrument(skip_all)]
async fn run_now_playing(args: &NowPlayingArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;

    tracing::info!("Now playing ({})", config.tmdb.region);
    let page = list_default(&client, args.page, &config.tmdb.region)
        .await
        .into_page();
    log_listing(&page);
    Ok(())
}

/// Logs a composite movie record.
fn log_detail(record: &DetailRecord, images: &ImageResolver) {
    let details = record.details();
    let summary = record.summary();

    tracing::info!(
        "{} ({})",
        display::title(summary),
        display::release_year(summary.release_date.as_deref())
    );
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("\"{tagline}\"");
    }
    tracing::info!(
        "Released: {}  Runtime: {}  Rating: {}  Language: {}",
        display::release_date(summary.release_date.as_deref()),
        display::runtime(details.runtime),
        display::rating(summary.vote_average),
        display::language(summary.original_language.as_deref()),
    );
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        tracing::info!("Genres: {}", genres.join(", "));
    }
    tracing::info!(
        "Budget: {}  Revenue: {}",
        display::usd(details.budget),
        display::usd(details.revenue)
    );
    tracing::info!("{}", display::overview(summary));
    tracing::info!("Poster: {}", images.poster_url(summary));
    tracing::info!("Backdrop: {}", images.backdrop_url(summary));

    match record.trailer().map(trailer_embed_url).transpose() {
        Ok(Some(url)) => tracing::info!("Trailer: {url}"),
        Ok(None) => tracing::info!("Trailer: none"),
        Err(err) => tracing::warn!(error = %format!("{err:#}"), "invalid trailer URL"),
    }

    tracing::info!("Cast:");
    for member in record.credits().cast.iter().take(display::CAST_LIMIT) {
        tracing::info!(
            "  {} as {}  {}",
            member.name,
            member.character,
            images.profile_url(member)
        );
    }

    tracing::info!("Reviews:");
    for review in record.reviews().iter().take(display::REVIEW_LIMIT) {
        tracing::info!(
            "  {} ({})",
            review.author,
            display::review_date(&review.created_at)
        );
    }

    tracing::info!("Similar:");
    for movie in record.similar().iter().take(display::SIMILAR_LIMIT) {
        tracing::info!(
            "  {}\t{} ({})",
            movie.id,
            display::title(movie),
            display::release_year(movie.release_date.as_deref())
        );
    }
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if configuration fails or any of the five detail
/// requests fails (reported as "movie <ID> not found").
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;
    let images = ImageResolver::new(config.tmdb.image_base_url.as_str());

    let record = fetch_detail(&client, args.id)
        .await
        .with_context(|| format!("movie {} not found", args.id))?;
    log_detail(&record, &images);

    if args.open_trailer {
        match record.trailer() {
            Some(video) => {
                let url = trailer_embed_url(video)?;
                open::that(url.as_str()).with_context(|| format!("failed to open trailer {url}"))?;
            }
            None => tracing::info!("No trailer available"),
        }
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if configuration, client construction or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;
    let images = ImageResolver::new(config.tmdb.image_base_url.as_str());
    let browse_config = BrowseConfig {
        debounce: config.browse.debounce(),
        region: config.tmdb.region.clone(),
    };

    tui::run_browser(Arc::new(client), browse_config, images)
        .await
        .context("movie browser TUI failed")
}

/// Initializes tracing with `RUST_LOG`, falling back to `default_filter`.
fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    #[cfg(not(feature = "otel"))]
    {
        fmt().with_env_filter(env_filter).with_target(false).init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the TUI's alternate screen.
    let default_filter = match cli.command {
        Commands::Browse => "off",
        _ => "info",
    };
    init_tracing(default_filter);

    match cli.command {
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::NowPlaying(args) => run_now_playing(&args, cli.dir.as_ref()).await,
        Commands::Details(args) => run_details(&args, cli.dir.as_ref()).await,
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
    }
}
