//! Detail aggregation: five concurrent requests merged into one record.

use anyhow::{Context, Result};
use tracing::instrument;

use crate::tmdb::{CatalogItem, Credits, MovieDetails, Review, TmdbApi, Video};

/// Video classification that counts as a trailer.
pub const TRAILER_KIND: &str = "Trailer";

/// Hosting site whose trailers can be embedded.
pub const TRAILER_SITE: &str = "YouTube";

/// Composite movie record.
///
/// Built once by [`fetch_detail`] and read-only afterwards. The primary
/// response and the four sub-resources live in disjoint fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    details: MovieDetails,
    videos: Vec<Video>,
    credits: Credits,
    reviews: Vec<Review>,
    similar: Vec<CatalogItem>,
}

impl DetailRecord {
    /// Primary `movie/{id}` response.
    #[must_use]
    pub const fn details(&self) -> &MovieDetails {
        &self.details
    }

    /// Listing-shaped fields of the primary response.
    #[must_use]
    pub const fn summary(&self) -> &CatalogItem {
        &self.details.summary
    }

    /// Videos in API order.
    #[must_use]
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Cast credits.
    #[must_use]
    pub const fn credits(&self) -> &Credits {
        &self.credits
    }

    /// First page of reviews.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// First page of similar movies.
    #[must_use]
    pub fn similar(&self) -> &[CatalogItem] {
        &self.similar
    }

    /// The trailer to play, if any. See [`select_trailer`].
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        select_trailer(&self.videos)
    }
}

/// Picks the first YouTube trailer, in the order the API returned them.
#[must_use]
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|video| video.kind == TRAILER_KIND && video.site == TRAILER_SITE)
}

/// Fetches details, videos, credits, reviews and similar titles concurrently.
///
/// # Errors
///
/// Returns the first error among the five requests; no partial record is
/// produced.
#[instrument(skip(api))]
pub async fn fetch_detail(api: &(impl TmdbApi + Sync), movie_id: u64) -> Result<DetailRecord> {
    let (details, videos, credits, reviews, similar) = tokio::try_join!(
        async {
            api.movie_details(movie_id)
                .await
                .with_context(|| format!("failed to fetch details for movie {movie_id}"))
        },
        async {
            api.movie_videos(movie_id)
                .await
                .with_context(|| format!("failed to fetch videos for movie {movie_id}"))
        },
        async {
            api.movie_credits(movie_id)
                .await
                .with_context(|| format!("failed to fetch credits for movie {movie_id}"))
        },
        async {
            api.movie_reviews(movie_id)
                .await
                .with_context(|| format!("failed to fetch reviews for movie {movie_id}"))
        },
        async {
            api.movie_similar(movie_id)
                .await
                .with_context(|| format!("failed to fetch similar movies for movie {movie_id}"))
        },
    )?;

    tracing::debug!(
        movie_id,
        videos = videos.len(),
        cast = credits.cast.len(),
        reviews = reviews.len(),
        similar = similar.len(),
        "detail record assembled"
    );

    Ok(DetailRecord {
        details,
        videos,
        credits,
        reviews,
        similar,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::testing::{Call, MockTmdbApi};

    fn video(kind: &str, site: &str, key: &str) -> Video {
        Video {
            kind: String::from(kind),
            site: String::from(site),
            key: String::from(key),
            name: String::new(),
        }
    }

    #[test]
    fn test_select_trailer_first_match_in_order() {
        // Arrange
        let videos = vec![
            video("Featurette", "YouTube", "a"),
            video("Trailer", "Vimeo", "b"),
            video("Trailer", "YouTube", "c"),
            video("Trailer", "YouTube", "d"),
        ];

        // Act
        let trailer = select_trailer(&videos);

        // Assert
        assert_eq!(trailer.map(|v| v.key.as_str()), Some("c"));
    }

    #[test]
    fn test_select_trailer_none() {
        // Arrange
        let videos = vec![
            video("Teaser", "YouTube", "a"),
            video("Trailer", "Vimeo", "b"),
        ];

        // Act & Assert
        assert!(select_trailer(&videos).is_none());
        assert!(select_trailer(&[]).is_none());
    }

    #[tokio::test]
    async fn test_fetch_detail_merges_all_parts() {
        // Arrange
        let api = MockTmdbApi::new().with_detail_fixtures();

        // Act
        let record = fetch_detail(&api, 27_205).await.unwrap();

        // Assert
        assert_eq!(record.summary().title, "Inception");
        assert_eq!(record.details().runtime, Some(148));
        assert_eq!(record.videos().len(), 3);
        assert_eq!(record.credits().cast.len(), 2);
        assert_eq!(record.reviews().len(), 2);
        assert_eq!(record.similar().len(), 2);
        assert_eq!(api.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_fetch_detail_uses_videos_sub_resource_for_trailer() {
        // Arrange
        let api = MockTmdbApi::new().with_detail_fixtures();

        // Act
        let record = fetch_detail(&api, 27_205).await.unwrap();

        // Assert: the appended videos on the primary response are ignored
        assert_eq!(
            record.trailer().map(|v| v.key.as_str()),
            Some("YoHD9XEInc0")
        );
    }

    #[tokio::test]
    async fn test_fetch_detail_fails_when_any_part_fails() {
        for failing in [
            Call::Details(27_205),
            Call::Videos(27_205),
            Call::Credits(27_205),
            Call::Reviews(27_205),
            Call::Similar(27_205),
        ] {
            // Arrange
            let api = MockTmdbApi::new()
                .with_detail_fixtures()
                .with_failure(failing.clone());

            // Act
            let result = fetch_detail(&api, 27_205).await;

            // Assert
            assert!(result.is_err(), "expected failure for {failing:?}");
        }
    }

    #[tokio::test]
    async fn test_fetch_detail_error_names_the_failing_part() {
        // Arrange
        let api = MockTmdbApi::new()
            .with_detail_fixtures()
            .with_failure(Call::Reviews(27_205));

        // Act
        let message = fetch_detail(&api, 27_205).await.unwrap_err().to_string();

        // Assert
        assert!(message.contains("failed to fetch reviews for movie 27205"));
    }
}
