//! In-memory catalog used by the controller tests.

use async_trait::async_trait;
use catalog_models::{
    CatalogItem, ContentType, Genre, ImageSet, ItemDetails, Listing, ListingPage, NewsArticle,
    NewsPage, Person, VideoList,
};
use catalog_sources::{CatalogApi, CatalogError, SearchParams};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn item(id: u64) -> CatalogItem {
    CatalogItem::new(id, format!("Item {}", id))
}

pub(crate) fn items(ids: impl IntoIterator<Item = u64>) -> Vec<CatalogItem> {
    ids.into_iter().map(item).collect()
}

pub(crate) fn ids(items: &[CatalogItem]) -> Vec<u64> {
    items.iter().map(|i| i.id).collect()
}

pub(crate) fn article(id: &str, source: &str) -> NewsArticle {
    NewsArticle {
        id: id.to_string(),
        title: format!("Article {}", id),
        link: format!("https://news.example/{}", id),
        source: source.to_string(),
        ..NewsArticle::default()
    }
}

fn unavailable(endpoint: &str) -> CatalogError {
    CatalogError::Status {
        endpoint: endpoint.to_string(),
        status: 503,
        body: "unavailable".to_string(),
    }
}

/// Canned responses keyed by endpoint. Every call is recorded; unknown keys answer 503.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    listing_pages: HashMap<(Listing, u32), ListingPage<CatalogItem>>,
    search_results: HashMap<String, (Vec<CatalogItem>, Duration)>,
    news_pages: HashMap<u32, NewsPage>,
    failing: Mutex<HashSet<String>>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_listing(mut self, listing: Listing, page: u32, results: Vec<CatalogItem>) -> Self {
        self.listing_pages.insert(
            (listing, page),
            ListingPage {
                results,
                page,
                total_pages: None,
                total_results: None,
            },
        );
        self
    }

    pub(crate) fn with_listing_page(mut self, listing: Listing, page: ListingPage<CatalogItem>) -> Self {
        self.listing_pages.insert((listing, page.page), page);
        self
    }

    pub(crate) fn with_search(mut self, query: &str, results: Vec<CatalogItem>, delay: Duration) -> Self {
        self.search_results.insert(query.to_string(), (results, delay));
        self
    }

    pub(crate) fn with_news(mut self, page: u32, articles: Vec<NewsArticle>) -> Self {
        self.news_pages.insert(
            page,
            NewsPage {
                total: articles.len() as u64,
                articles,
                page,
                source: "all".to_string(),
            },
        );
        self
    }

    /// Delay applied to listing and news calls
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make calls to `key` fail; keys look like `top#2`, `search:naruto` or `news#1`
    pub(crate) fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub(crate) fn heal(&self, key: &str) {
        self.failing.lock().unwrap().remove(key);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, prefix: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, key: &str) -> Result<(), CatalogError> {
        self.calls.lock().unwrap().push(key.to_string());
        if self.failing.lock().unwrap().contains(key) {
            return Err(unavailable(key));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn listing(
        &self,
        listing: Listing,
        page: u32,
        _limit: u32,
    ) -> Result<ListingPage<CatalogItem>, CatalogError> {
        let key = format!("{}#{}", listing.path(), page);
        self.record(&key)?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self
            .listing_pages
            .get(&(listing, page))
            .cloned()
            .unwrap_or_else(|| ListingPage::empty(page)))
    }

    async fn search(&self, params: &SearchParams) -> Result<ListingPage<CatalogItem>, CatalogError> {
        let query = params.query.clone().unwrap_or_default();
        let key = format!("search:{}", query);
        self.record(&key)?;
        let (results, delay) = self
            .search_results
            .get(&query)
            .cloned()
            .unwrap_or_default();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let page = params.page.unwrap_or(1);
        Ok(ListingPage {
            results,
            page,
            total_pages: Some(page),
            total_results: None,
        })
    }

    async fn details(&self, id: u64, _content_type: ContentType) -> Result<ItemDetails, CatalogError> {
        Err(unavailable(&format!("details#{}", id)))
    }

    async fn videos(&self, id: u64, _content_type: ContentType) -> Result<VideoList, CatalogError> {
        Err(unavailable(&format!("videos#{}", id)))
    }

    async fn images(&self, id: u64, _content_type: ContentType) -> Result<ImageSet, CatalogError> {
        Err(unavailable(&format!("images#{}", id)))
    }

    async fn recommendations(
        &self,
        id: u64,
        _content_type: ContentType,
    ) -> Result<ListingPage<CatalogItem>, CatalogError> {
        Err(unavailable(&format!("recommendations#{}", id)))
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        Err(unavailable("genres"))
    }

    async fn person(&self, id: u64) -> Result<Person, CatalogError> {
        Err(unavailable(&format!("person#{}", id)))
    }

    async fn news(&self, page: u32, _limit: u32) -> Result<NewsPage, CatalogError> {
        let key = format!("news#{}", page);
        self.record(&key)?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.news_pages.get(&page).cloned().unwrap_or(NewsPage {
            page,
            ..NewsPage::default()
        }))
    }
}
