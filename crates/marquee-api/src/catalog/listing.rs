//! Listing requests (`search`, `list_default`) and their outcome type.

use anyhow::{Result, anyhow};
use tracing::instrument;

use crate::tmdb::{ResultPage, TmdbApi};

/// Market used for the now-playing listing when none is configured.
pub const DEFAULT_REGION: &str = "US";

/// Outcome of a listing request.
///
/// Callers that only care about what to display use [`Listing::into_page`],
/// which logs the failure and substitutes [`ResultPage::empty`].
#[derive(Debug)]
pub enum Listing {
    /// The server answered with a page (possibly with no results).
    Loaded(ResultPage),
    /// Transport, HTTP status or decoding failure.
    Failed(anyhow::Error),
}

impl Listing {
    fn from_result(result: Result<ResultPage>) -> Self {
        match result {
            Ok(page) => Self::Loaded(page),
            Err(err) => Self::Failed(err),
        }
    }

    /// Returns `true` if the request failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Collapses the outcome into a page; failures become an empty page.
    #[must_use]
    pub fn into_page(self) -> ResultPage {
        match self {
            Self::Loaded(page) => page,
            Self::Failed(err) => {
                tracing::warn!(
                    error = %format!("{err:#}"),
                    "listing request failed, showing no results"
                );
                ResultPage::empty()
            }
        }
    }
}

/// Which listing a query maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// Text search for the given query.
    Search(String),
    /// The now-playing listing for a market.
    NowPlaying {
        /// ISO 3166-1 region code.
        region: String,
    },
}

impl ListingSource {
    /// Picks the listing for a query: blank text means the default listing.
    #[must_use]
    pub fn for_query(query: &str, region: &str) -> Self {
        if query.trim().is_empty() {
            Self::NowPlaying {
                region: String::from(region),
            }
        } else {
            Self::Search(String::from(query))
        }
    }

    /// Returns `true` for the default (now playing) listing.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::NowPlaying { .. })
    }

    /// Fetches one page of this listing.
    pub async fn fetch(&self, api: &(impl TmdbApi + Sync), page: u32) -> Listing {
        match self {
            Self::Search(query) => search(api, query, page).await,
            Self::NowPlaying { region } => list_default(api, page, region).await,
        }
    }
}

/// Searches movies by title.
///
/// A blank query is refused without a network call and reported as a
/// failed listing.
#[instrument(skip_all, fields(page))]
pub async fn search(api: &(impl TmdbApi + Sync), query: &str, page: u32) -> Listing {
    if query.trim().is_empty() {
        return Listing::Failed(anyhow!("search query is empty"));
    }
    Listing::from_result(api.search_movie(query, page).await)
}

/// Fetches the now-playing listing for `region`.
#[instrument(skip_all, fields(page, region))]
pub async fn list_default(api: &(impl TmdbApi + Sync), page: u32, region: &str) -> Listing {
    Listing::from_result(api.now_playing(page, region).await)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;
    use crate::testing::{Call, MockTmdbApi, page_of};

    #[test]
    fn test_for_query_blank_routes_to_default() {
        // Arrange & Act
        let empty = ListingSource::for_query("", "US");
        let spaces = ListingSource::for_query("   \t", "US");

        // Assert
        assert_eq!(
            empty,
            ListingSource::NowPlaying {
                region: String::from("US")
            }
        );
        assert!(spaces.is_default());
    }

    #[test]
    fn test_for_query_keeps_text_as_typed() {
        // Arrange & Act
        let source = ListingSource::for_query(" dune ", "US");

        // Assert
        assert_eq!(source, ListingSource::Search(String::from(" dune ")));
    }

    #[test]
    fn test_failed_listing_collapses_to_empty_page() {
        // Arrange
        let listing = Listing::Failed(anyhow!("connection refused"));

        // Act
        let page = listing.into_page();

        // Assert
        assert_eq!(page, ResultPage::empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_failed_listing_logs_warning() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            let _ = Listing::Failed(anyhow!("boom")).into_page();
        });

        // Assert
        handle.assert_finished();
    }

    #[tokio::test]
    async fn test_search_returns_loaded_page() {
        // Arrange
        let api = MockTmdbApi::new().with_page(Call::search("alien", 1), page_of(1, 2, &[1, 2]));

        // Act
        let listing = search(&api, "alien", 1).await;

        // Assert
        assert!(!listing.is_failed());
        assert_eq!(listing.into_page().results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        // Arrange
        let api = MockTmdbApi::new().with_page(Call::search("alien", 2), page_of(2, 3, &[7, 8]));

        // Act
        let first = search(&api, "alien", 2).await.into_page();
        let second = search(&api, "alien", 2).await.into_page();

        // Assert
        assert_eq!(first, second);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_search_transport_failure_is_swallowed() {
        // Arrange
        let api = MockTmdbApi::new().with_failure(Call::search("alien", 1));

        // Act
        let listing = search(&api, "alien", 1).await;

        // Assert
        assert!(listing.is_failed());
        assert_eq!(listing.into_page(), ResultPage::empty());
    }

    #[tokio::test]
    async fn test_search_blank_query_makes_no_request() {
        // Arrange
        let api = MockTmdbApi::new();

        // Act
        let listing = search(&api, "  ", 1).await;

        // Assert
        assert!(listing.is_failed());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_default_uses_region() {
        // Arrange
        let api = MockTmdbApi::new().with_page(Call::now_playing(1, "GB"), page_of(1, 1, &[5]));

        // Act
        let page = list_default(&api, 1, "GB").await.into_page();

        // Assert
        assert_eq!(page.results[0].id, 5);
        assert_eq!(api.calls(), vec![Call::now_playing(1, "GB")]);
    }

    #[tokio::test]
    async fn test_list_default_failure_is_swallowed() {
        // Arrange
        let api = MockTmdbApi::new().with_failure(Call::now_playing(1, DEFAULT_REGION));

        // Act
        let page = list_default(&api, 1, DEFAULT_REGION).await.into_page();

        // Assert
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
