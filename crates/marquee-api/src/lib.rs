//! API client library for marquee.
//!
//! Provides the TMDB client, the listing and detail operations built on it,
//! and the search/pagination coordinator that drives the browse view.

/// Search/pagination coordination.
pub mod browse;

/// Listing, detail aggregation, and asset URL helpers.
pub mod catalog;

/// TMDB API client.
pub mod tmdb;

#[cfg(test)]
mod testing;
