//! Paged news feed with a client-side source filter.

use crate::error::FetchError;
use crate::pagination::{FetchedPage, LoadOutcome, PageSnapshot, PageSource, Paginator};
use async_trait::async_trait;
use catalog_config::NewsConfig;
use catalog_models::NewsArticle;
use catalog_sources::CatalogApi;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Source selector that keeps every article
pub const ALL_SOURCES: &str = "all";

pub struct NewsPages {
    api: Arc<dyn CatalogApi>,
    source: Mutex<String>,
}

impl NewsPages {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            source: Mutex::new(ALL_SOURCES.to_string()),
        }
    }

    pub fn source(&self) -> String {
        self.source.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_source(&self, source: &str) {
        *self.source.lock().unwrap_or_else(PoisonError::into_inner) = source.to_string();
    }
}

#[async_trait]
impl PageSource<NewsArticle> for NewsPages {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage<NewsArticle>, FetchError> {
        let news = self.api.news(page, limit).await?;
        // Decided before filtering: a page full of other sources still means more pages
        let has_more = limit > 0 && news.articles.len() >= limit as usize;

        let source = self.source();
        let items = if source == ALL_SOURCES {
            news.articles
        } else {
            news.articles.into_iter().filter(|a| a.source == source).collect()
        };
        Ok(FetchedPage { items, has_more })
    }

    fn describe(&self) -> String {
        format!("news ({})", self.source())
    }
}

pub struct NewsFeed {
    source: Arc<NewsPages>,
    pages: Paginator<NewsArticle>,
}

impl NewsFeed {
    pub fn new(api: Arc<dyn CatalogApi>, page_size: u32) -> Self {
        let source = Arc::new(NewsPages::new(api));
        let pages = Paginator::<NewsArticle>::new(source.clone(), page_size);
        Self { source, pages }
    }

    pub fn from_config(api: Arc<dyn CatalogApi>, config: &NewsConfig) -> Self {
        Self::new(api, config.page_size)
    }

    pub fn selected_source(&self) -> String {
        self.source.source()
    }

    /// Switch the source filter and reload from the first page
    pub async fn select_source(&self, source: &str) -> LoadOutcome {
        let source = source.trim();
        let source = if source.is_empty() { ALL_SOURCES } else { source };
        info!("News source set to {}", source);
        self.source.set_source(source);
        self.pages.refresh().await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.pages.refresh().await
    }

    pub async fn load_more(&self) -> LoadOutcome {
        self.pages.load_more().await
    }

    pub fn articles(&self) -> Vec<NewsArticle> {
        self.pages.items()
    }

    pub fn has_more(&self) -> bool {
        self.pages.has_more()
    }

    pub fn snapshot(&self) -> PageSnapshot<NewsArticle> {
        self.pages.snapshot()
    }
}
