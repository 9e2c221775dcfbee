//! Multi-category aggregation.
//!
//! Every configured category is fetched concurrently, then the results are
//! concatenated in category order and de-duplicated by id. A failing category
//! only removes its own items; the aggregate fails when all of them fail.

use crate::dedupe::dedupe_by_id;
use crate::error::FetchError;
use crate::filter::{apply_filters, FilterState};
use crate::pagination::{FetchSummary, FetchedPage, LoadOutcome, PageSnapshot, PageSource, Paginator};
use async_trait::async_trait;
use catalog_config::{CategoryConfig, ListsConfig};
use catalog_models::{CatalogItem, Listing};
use catalog_sources::CatalogApi;
use futures::future::join_all;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub listing: Listing,
    pub limit: u32,
}

impl Category {
    pub fn new(listing: Listing, limit: u32) -> Self {
        Self { listing, limit }
    }
}

impl From<&CategoryConfig> for Category {
    fn from(config: &CategoryConfig) -> Self {
        Self::new(config.listing, config.limit)
    }
}

/// Merged result of one fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateBatch {
    pub items: Vec<CatalogItem>,
    pub has_more: bool,
    /// Categories that failed and contributed nothing
    pub failed: Vec<Listing>,
}

/// Fetch `page` of every category concurrently and merge the results.
pub async fn fetch_categories(
    api: &dyn CatalogApi,
    categories: &[Category],
    page: u32,
) -> Result<AggregateBatch, FetchError> {
    let requests = categories
        .iter()
        .map(|category| api.listing(category.listing, page, category.limit));
    let responses = join_all(requests).await;

    let mut merged = Vec::new();
    let mut has_more = false;
    let mut failed = Vec::new();
    let mut failures = Vec::new();

    for (category, response) in categories.iter().zip(responses) {
        match response {
            Ok(listing) => {
                debug!("{} page {}: {} items", category.listing, page, listing.results.len());
                has_more |= listing.has_more(category.limit);
                merged.extend(listing.results);
            }
            Err(e) => {
                warn!("Category {} failed, continuing without it: {}", category.listing, e);
                failed.push(category.listing);
                failures.push(format!("{}: {}", category.listing, e));
            }
        }
    }

    if !categories.is_empty() && failed.len() == categories.len() {
        return Err(FetchError::AggregateUnavailable {
            attempted: categories.len(),
            failures,
        });
    }

    let items = dedupe_by_id(merged);
    info!(
        "Aggregated page {}: {} unique items from {} categories ({} failed)",
        page,
        items.len(),
        categories.len(),
        failed.len()
    );
    Ok(AggregateBatch { items, has_more, failed })
}

/// Page source over the whole fan-out
struct FanOut {
    api: Arc<dyn CatalogApi>,
    categories: Vec<Category>,
    last_failed: Mutex<Vec<Listing>>,
}

#[async_trait]
impl PageSource<CatalogItem> for FanOut {
    async fn fetch_page(&self, page: u32, _limit: u32) -> Result<FetchedPage<CatalogItem>, FetchError> {
        let batch = fetch_categories(self.api.as_ref(), &self.categories, page).await?;
        *self.last_failed.lock().unwrap_or_else(PoisonError::into_inner) = batch.failed;
        Ok(FetchedPage {
            items: batch.items,
            has_more: batch.has_more,
        })
    }

    fn describe(&self) -> String {
        format!("aggregate of {} categories", self.categories.len())
    }
}

fn item_id(item: &CatalogItem) -> u64 {
    item.id
}

/// Accumulated, de-duplicated list across categories, with client-side presentation
pub struct Aggregator {
    fan_out: Arc<FanOut>,
    pages: Paginator<CatalogItem>,
}

impl Aggregator {
    pub fn new(api: Arc<dyn CatalogApi>, categories: Vec<Category>) -> Self {
        let page_size = categories.iter().map(|c| c.limit).sum();
        let fan_out = Arc::new(FanOut {
            api,
            categories,
            last_failed: Mutex::new(Vec::new()),
        });
        let pages = Paginator::<CatalogItem>::new(fan_out.clone(), page_size).with_dedupe(item_id);
        Self { fan_out, pages }
    }

    pub fn from_config(api: Arc<dyn CatalogApi>, lists: &ListsConfig) -> Self {
        Self::new(api, lists.categories.iter().map(Category::from).collect())
    }

    pub fn categories(&self) -> &[Category] {
        &self.fan_out.categories
    }

    /// Fetch `page` of every category; replace the list, or append and re-dedupe.
    ///
    /// When every category fails the accumulated list is left untouched.
    pub async fn fetch_aggregate(&self, page: u32, append: bool) -> Result<FetchSummary, FetchError> {
        self.pages.fetch(page, append).await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.pages.refresh().await
    }

    pub async fn load_more(&self) -> LoadOutcome {
        self.pages.load_more().await
    }

    pub fn items(&self) -> Vec<CatalogItem> {
        self.pages.items()
    }

    pub fn has_more(&self) -> bool {
        self.pages.has_more()
    }

    pub fn snapshot(&self) -> PageSnapshot<CatalogItem> {
        self.pages.snapshot()
    }

    /// Categories missing from the most recent successful fetch
    pub fn failed_categories(&self) -> Vec<Listing> {
        self.fan_out
            .last_failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The accumulated list filtered and sorted for display
    pub fn presented(&self, state: &FilterState) -> Vec<CatalogItem> {
        apply_filters(&self.items(), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SortKey;
    use crate::testing::{ids, item, items, FakeCatalog};
    use catalog_models::ListingPage;

    fn default_categories() -> Vec<Category> {
        vec![
            Category::new(Listing::Top, 3),
            Category::new(Listing::Movies, 3),
            Category::new(Listing::CurrentSeason, 3),
        ]
    }

    #[tokio::test]
    async fn test_merge_in_category_order_first_wins() {
        let mut top_copy = item(2);
        top_copy.title = "From top".to_string();
        let mut movie_copy = item(2);
        movie_copy.title = "From movies".to_string();

        let api = FakeCatalog::new()
            .with_listing(Listing::Top, 1, vec![item(1), top_copy])
            .with_listing(Listing::Movies, 1, vec![movie_copy, item(3)])
            .with_listing(Listing::CurrentSeason, 1, items([4, 1]));

        let batch = fetch_categories(&api, &default_categories(), 1).await.unwrap();
        assert_eq!(ids(&batch.items), vec![1, 2, 3, 4]);
        assert_eq!(batch.items[1].title, "From top");
        assert!(batch.failed.is_empty());
        assert!(!batch.has_more);
    }

    #[tokio::test]
    async fn test_partial_failure_is_tolerated() {
        let api = FakeCatalog::new()
            .with_listing(Listing::Top, 1, items([1, 2]))
            .with_listing(Listing::CurrentSeason, 1, items([3]));
        api.fail("movies#1");

        let batch = fetch_categories(&api, &default_categories(), 1).await.unwrap();
        assert_eq!(ids(&batch.items), vec![1, 2, 3]);
        assert_eq!(batch.failed, vec![Listing::Movies]);
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_all_failed_is_distinct_from_empty() {
        let api = FakeCatalog::new();
        for key in ["top#1", "movies#1", "current-season#1"] {
            api.fail(key);
        }
        let err = fetch_categories(&api, &default_categories(), 1).await.unwrap_err();
        assert!(err.is_aggregate_unavailable());

        let empty = FakeCatalog::new();
        let batch = fetch_categories(&empty, &default_categories(), 1).await.unwrap();
        assert!(batch.items.is_empty());
    }

    #[tokio::test]
    async fn test_has_more_when_any_category_has_more() {
        let api = FakeCatalog::new()
            .with_listing(Listing::Top, 1, items([1, 2, 3]))
            .with_listing_page(
                Listing::Movies,
                ListingPage {
                    results: items([4, 5, 6]),
                    page: 1,
                    total_pages: Some(1),
                    total_results: None,
                },
            );
        let batch = fetch_categories(&api, &default_categories(), 1).await.unwrap();
        assert!(batch.has_more);
    }

    #[tokio::test]
    async fn test_append_re_dedupes_across_pages() {
        let api = Arc::new(
            FakeCatalog::new()
                .with_listing(Listing::Top, 1, items([1, 2, 3]))
                .with_listing(Listing::Top, 2, items([3, 4]))
                .with_listing(Listing::Movies, 2, items([1, 5])),
        );
        let aggregator = Aggregator::new(api, default_categories());

        aggregator.fetch_aggregate(1, false).await.unwrap();
        let summary = aggregator.fetch_aggregate(2, true).await.unwrap();

        assert_eq!(ids(&aggregator.items()), vec![1, 2, 3, 4, 5]);
        assert_eq!(summary.added, 2);
    }

    #[tokio::test]
    async fn test_all_failed_keeps_accumulated_list() {
        let api = Arc::new(FakeCatalog::new().with_listing(Listing::Top, 1, items([1, 2])));
        let aggregator = Aggregator::new(api.clone(), default_categories());
        aggregator.refresh().await;

        for key in ["top#2", "movies#2", "current-season#2"] {
            api.fail(key);
        }
        let err = aggregator.fetch_aggregate(2, true).await.unwrap_err();
        assert!(err.is_aggregate_unavailable());
        assert_eq!(ids(&aggregator.items()), vec![1, 2]);
        assert!(aggregator.snapshot().last_error.is_some());
    }

    #[tokio::test]
    async fn test_presented_view_filters_and_sorts() {
        let mut a = item(1);
        a.popularity = Some(5.0);
        let mut b = item(2);
        b.popularity = Some(9.0);
        let c = item(3);
        let api = Arc::new(FakeCatalog::new().with_listing(Listing::Top, 1, vec![a, b, c]));
        let aggregator = Aggregator::new(api.clone(), default_categories());
        api.fail("movies#1");
        aggregator.refresh().await;

        assert_eq!(ids(&aggregator.presented(&FilterState::default())), vec![2, 1, 3]);
        assert_eq!(aggregator.failed_categories(), vec![Listing::Movies]);

        let by_title = FilterState {
            sort_key: SortKey::Title,
            ..FilterState::default()
        };
        assert_eq!(ids(&aggregator.presented(&by_title)), vec![1, 2, 3]);
        // presentation never touches the accumulated order
        assert_eq!(ids(&aggregator.items()), vec![1, 2, 3]);
    }
}
