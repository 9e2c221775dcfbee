pub mod aggregate;
pub mod dedupe;
pub mod error;
pub mod filter;
pub mod news;
pub mod pagination;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{fetch_categories, AggregateBatch, Aggregator, Category};
pub use dedupe::{dedupe_by_id, dedupe_by_key};
pub use error::FetchError;
pub use filter::{apply_filters, sort_items, FilterState, SortKey};
pub use news::{NewsFeed, NewsPages, ALL_SOURCES};
pub use pagination::{
    FetchSummary, FetchedPage, ListingPages, LoadOutcome, PageSnapshot, PageSource, Paginator,
    SearchPages,
};
pub use search::{SearchController, SearchSnapshot, SearchStatus};
