//! Catalog operations built on the raw TMDB endpoints.
//!
//! Listing calls (`search`, `list_default`) never fail from the caller's
//! point of view: errors are carried in [`Listing::Failed`] and collapse to
//! an empty page. The detail fetch is the opposite: one failing sub-request
//! fails the whole record.

mod assets;
mod detail;
mod listing;

pub use assets::{
    CAST_PLACEHOLDER_URL, DEFAULT_IMAGE_BASE_URL, ImageResolver, POSTER_PLACEHOLDER_URL,
    trailer_embed_url,
};
pub use detail::{DetailRecord, TRAILER_KIND, TRAILER_SITE, fetch_detail, select_trailer};
pub use listing::{DEFAULT_REGION, Listing, ListingSource, list_default, search};
