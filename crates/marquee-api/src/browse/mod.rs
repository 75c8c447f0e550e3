//! Search/pagination coordination for the browse view.
//!
//! The [`Coordinator`] owns the query text, the accumulated result list and
//! the paging counters. Timers and requests run as tokio tasks and report
//! back as [`BrowseEvent`]s, which the owner feeds to
//! [`Coordinator::handle`]; state is never shared across tasks.

mod coordinator;
mod debounce;

pub use coordinator::{BrowseConfig, BrowseEvent, Coordinator, FetchMode, LoadMore, Phase};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
