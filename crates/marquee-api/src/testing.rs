//! In-memory `TmdbApi` double shared by the unit tests.
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, bail};

use crate::tmdb::{CatalogItem, Credits, MovieDetails, ResultPage, Review, TmdbApi, Video};

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Call {
    Search(String, u32),
    NowPlaying(u32, String),
    Details(u64),
    Videos(u64),
    Credits(u64),
    Reviews(u64),
    Similar(u64),
}

impl Call {
    pub(crate) fn search(query: &str, page: u32) -> Self {
        Self::Search(String::from(query), page)
    }

    pub(crate) fn now_playing(page: u32, region: &str) -> Self {
        Self::NowPlaying(page, String::from(region))
    }
}

/// Canned detail responses, loaded from the fixtures.
#[derive(Debug, Clone)]
struct DetailParts {
    details: MovieDetails,
    videos: Vec<Video>,
    credits: Credits,
    reviews: Vec<Review>,
    similar: Vec<CatalogItem>,
}

/// Mock API that serves registered pages, failures and delays.
#[derive(Debug, Default)]
pub(crate) struct MockTmdbApi {
    pages: HashMap<Call, ResultPage>,
    failures: HashSet<Call>,
    delays: HashMap<Call, Duration>,
    detail: Option<DetailParts>,
    calls: Mutex<Vec<Call>>,
}

/// Builds a page of placeholder movies with the given IDs.
pub(crate) fn page_of(page: u32, total_pages: u32, ids: &[u64]) -> ResultPage {
    ResultPage {
        page,
        results: ids
            .iter()
            .map(|&id| CatalogItem {
                id,
                title: format!("Movie {id}"),
                overview: None,
                poster_path: None,
                backdrop_path: None,
                release_date: None,
                vote_average: Some(7.0),
                original_language: Some(String::from("en")),
            })
            .collect(),
        total_pages,
        total_results: total_pages.saturating_mul(20),
    }
}

/// Returns the IDs of a list of items, for compact assertions.
pub(crate) fn ids(items: &[CatalogItem]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

impl MockTmdbApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, call: Call, page: ResultPage) -> Self {
        self.pages.insert(call, page);
        self
    }

    pub(crate) fn with_failure(mut self, call: Call) -> Self {
        self.failures.insert(call);
        self
    }

    pub(crate) fn with_delay(mut self, call: Call, delay: Duration) -> Self {
        self.delays.insert(call, delay);
        self
    }

    pub(crate) fn with_detail_fixtures(mut self) -> Self {
        let details = include_str!("../../../fixtures/tmdb/movie_details_27205.json");
        let videos = include_str!("../../../fixtures/tmdb/movie_videos_27205.json");
        let credits = include_str!("../../../fixtures/tmdb/movie_credits_27205.json");
        let reviews = include_str!("../../../fixtures/tmdb/movie_reviews_27205.json");
        let similar = include_str!("../../../fixtures/tmdb/movie_similar_27205.json");

        self.detail = Some(DetailParts {
            details: serde_json::from_str(details).unwrap(),
            videos: results_of(videos),
            credits: serde_json::from_str(credits).unwrap(),
            reviews: results_of(reviews),
            similar: results_of(similar),
        });
        self
    }

    /// All calls received so far, in order.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Records the call, waits for any configured delay, then checks failures.
    async fn enter(&self, call: &Call) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if let Some(delay) = self.delays.get(call) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.contains(call) {
            bail!("simulated transport failure: {call:?}");
        }
        Ok(())
    }

    async fn listing(&self, call: Call) -> Result<ResultPage> {
        self.enter(&call).await?;
        match self.pages.get(&call) {
            Some(page) => Ok(page.clone()),
            None => bail!("no page registered for {call:?}"),
        }
    }

    async fn detail_part<T>(&self, call: Call, pick: impl FnOnce(&DetailParts) -> T) -> Result<T> {
        self.enter(&call).await?;
        match &self.detail {
            Some(parts) => Ok(pick(parts)),
            None => bail!("no detail fixtures registered for {call:?}"),
        }
    }
}

fn results_of<T: serde::de::DeserializeOwned>(json: &str) -> Vec<T> {
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    serde_json::from_value(value["results"].clone()).unwrap()
}

impl TmdbApi for MockTmdbApi {
    async fn search_movie(&self, query: &str, page: u32) -> Result<ResultPage> {
        self.listing(Call::search(query, page)).await
    }

    async fn now_playing(&self, page: u32, region: &str) -> Result<ResultPage> {
        self.listing(Call::now_playing(page, region)).await
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        self.detail_part(Call::Details(movie_id), |p| p.details.clone())
            .await
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>> {
        self.detail_part(Call::Videos(movie_id), |p| p.videos.clone())
            .await
    }

    async fn movie_credits(&self, movie_id: u64) -> Result<Credits> {
        self.detail_part(Call::Credits(movie_id), |p| p.credits.clone())
            .await
    }

    async fn movie_reviews(&self, movie_id: u64) -> Result<Vec<Review>> {
        self.detail_part(Call::Reviews(movie_id), |p| p.reviews.clone())
            .await
    }

    async fn movie_similar(&self, movie_id: u64) -> Result<Vec<CatalogItem>> {
        self.detail_part(Call::Similar(movie_id), |p| p.similar.clone())
            .await
    }
}
