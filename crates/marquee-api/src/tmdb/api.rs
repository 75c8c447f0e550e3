//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{CatalogItem, Credits, MovieDetails, ResultPage, Review, Video};

/// TMDB API trait.
///
/// Abstracts the raw movie endpoints for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies by title (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, query: &str, page: u32) -> Result<ResultPage>;

    /// Lists movies currently in theatres for a region (`movie/now_playing`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn now_playing(&self, page: u32, region: &str) -> Result<ResultPage>;

    /// Fetches the primary movie record (`movie/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails>;

    /// Fetches the videos attached to a movie (`movie/{id}/videos`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>>;

    /// Fetches cast credits (`movie/{id}/credits`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64) -> Result<Credits>;

    /// Fetches the first page of user reviews (`movie/{id}/reviews`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_reviews(&self, movie_id: u64) -> Result<Vec<Review>>;

    /// Fetches the first page of similar movies (`movie/{id}/similar`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_similar(&self, movie_id: u64) -> Result<Vec<CatalogItem>>;
}
