//! Image and trailer URL construction.

use anyhow::{Context, Result, anyhow};
use url::Url;

use crate::tmdb::{CastMember, CatalogItem, Video};

/// Default TMDB image host and size.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Shown when a movie has neither poster nor backdrop.
pub const POSTER_PLACEHOLDER_URL: &str =
    "https://images.unsplash.com/photo-1598899134739-24c46f58b8c0?w=500";

/// Shown when a cast member has no profile picture.
pub const CAST_PLACEHOLDER_URL: &str = "https://via.placeholder.com/150";

/// Embed endpoint of the trailer host.
const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// Resolves TMDB image paths against the configured image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    base: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageResolver {
    /// Creates a resolver for `base` (trailing slashes are ignored).
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: String::from(base.trim_end_matches('/')),
        }
    }

    /// Joins an image path (e.g. `/abc.jpg`) onto the image host.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base)
        } else {
            format!("{}/{path}", self.base)
        }
    }

    fn resolve_opt(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.resolve(p))
    }

    /// Poster URL, or the placeholder.
    #[must_use]
    pub fn poster_url(&self, item: &CatalogItem) -> String {
        self.resolve_opt(item.poster_path.as_deref())
            .unwrap_or_else(|| String::from(POSTER_PLACEHOLDER_URL))
    }

    /// Backdrop URL, falling back to the poster and then the placeholder.
    #[must_use]
    pub fn backdrop_url(&self, item: &CatalogItem) -> String {
        self.resolve_opt(item.backdrop_path.as_deref())
            .unwrap_or_else(|| self.poster_url(item))
    }

    /// Cast profile URL, or the cast placeholder.
    #[must_use]
    pub fn profile_url(&self, member: &CastMember) -> String {
        self.resolve_opt(member.profile_path.as_deref())
            .unwrap_or_else(|| String::from(CAST_PLACEHOLDER_URL))
    }
}

/// Builds the autoplaying, minimally branded embed URL for a trailer.
///
/// # Errors
///
/// Returns an error if the embed base URL cannot be extended with the key.
pub fn trailer_embed_url(video: &Video) -> Result<Url> {
    let mut url = Url::parse(EMBED_BASE_URL).context("invalid embed base URL")?;
    url.path_segments_mut()
        .map_err(|()| anyhow!("embed base URL cannot have path segments"))?
        .push(&video.key);
    url.query_pairs_mut()
        .append_pair("autoplay", "1")
        .append_pair("modestbranding", "1")
        .append_pair("rel", "0");
    Ok(url)
}
