//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (search, now playing, details and its sub-resources).

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{Credentials, DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
pub use types::{CastMember, CatalogItem, Credits, Genre, MovieDetails, ResultPage, Review, Video};
