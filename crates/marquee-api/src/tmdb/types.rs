//! TMDB API response types.

use serde::Deserialize;

// --- Listings ---

/// One page of a movie listing (`search/movie`, `movie/now_playing`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultPage {
    /// Current page number (1-based).
    #[serde(default = "first_page")]
    pub page: u32,
    /// Movies on this page, in server order.
    #[serde(default)]
    pub results: Vec<CatalogItem>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

impl ResultPage {
    /// The page reported when a listing request failed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

const fn first_page() -> u32 {
    1
}

/// A movie as it appears in listings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path (relative to the image host).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path (relative to the image host).
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, sometimes empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
}

// --- Movie Details ---

/// Response from `movie/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetails {
    /// Fields shared with listing entries.
    #[serde(flatten)]
    pub summary: CatalogItem,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Budget in US dollars.
    #[serde(default)]
    pub budget: u64,
    /// Revenue in US dollars.
    #[serde(default)]
    pub revenue: u64,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Official homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// A video attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// Classification (e.g., "Trailer", "Teaser", "Featurette").
    #[serde(rename = "type")]
    pub kind: String,
    /// Hosting site (e.g., "YouTube", "Vimeo").
    pub site: String,
    /// Site-specific video key.
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Response from `movie/{id}/credits` (cast only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credits {
    /// Cast in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// A single cast credit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Performer name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: String,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: u32,
}

/// A user review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Review {
    /// Review ID (hex string).
    pub id: String,
    /// Author display name.
    pub author: String,
    /// Review body.
    pub content: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Envelope used by `videos`, `reviews` and `similar` responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResultsEnvelope<T> {
    /// Entries.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}
