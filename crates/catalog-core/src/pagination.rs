//! Incremental page loading with a single-flight guard.
//!
//! A `Paginator` owns the accumulated list for one paged source. `load_more`
//! is ignored while a fetch is outstanding or once the source reports no more
//! pages. `reset` and `refresh` bump a generation counter so that a response
//! started before them is dropped instead of landing in the new list.

use crate::dedupe::dedupe_by_key;
use crate::error::FetchError;
use async_trait::async_trait;
use catalog_models::{CatalogItem, Listing};
use catalog_sources::{CatalogApi, SearchParams};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Items of one page plus whether another page should be requested
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage<T>, FetchError>;

    /// Short label used in log lines
    fn describe(&self) -> String;
}

/// Any paged listing endpoint, e.g. `top` or `network/213`
pub struct ListingPages {
    api: Arc<dyn CatalogApi>,
    listing: Listing,
}

impl ListingPages {
    pub fn new(api: Arc<dyn CatalogApi>, listing: Listing) -> Self {
        Self { api, listing }
    }
}

#[async_trait]
impl PageSource<CatalogItem> for ListingPages {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage<CatalogItem>, FetchError> {
        let listing = self.api.listing(self.listing, page, limit).await?;
        let has_more = listing.has_more(limit);
        Ok(FetchedPage {
            items: listing.results,
            has_more,
        })
    }

    fn describe(&self) -> String {
        self.listing.path()
    }
}

/// Pages of one fixed search query
pub struct SearchPages {
    api: Arc<dyn CatalogApi>,
    params: SearchParams,
}

impl SearchPages {
    pub fn new(api: Arc<dyn CatalogApi>, params: SearchParams) -> Self {
        Self { api, params }
    }
}

#[async_trait]
impl PageSource<CatalogItem> for SearchPages {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<FetchedPage<CatalogItem>, FetchError> {
        let params = self.params.clone().with_page(page).with_limit(limit);
        let listing = self.api.search(&params).await?;
        let has_more = listing.has_more(limit);
        Ok(FetchedPage {
            items: listing.results,
            has_more,
        })
    }

    fn describe(&self) -> String {
        format!("search '{}'", self.params.query.as_deref().unwrap_or_default())
    }
}

/// What a `load_more` or `refresh` call ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A fetch was already running, or there is nothing left to load
    Skipped,
    Loaded { added: usize, has_more: bool },
    Failed(String),
    /// The list was reset while this fetch was running; its items were dropped
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    pub page: u32,
    pub added: usize,
    pub total: usize,
    pub has_more: bool,
    pub stale: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_more: bool,
    pub in_flight: bool,
    pub last_error: Option<String>,
}

struct PageState<T> {
    items: Vec<T>,
    page: u32,
    loaded: bool,
    has_more: bool,
    in_flight: bool,
    generation: u64,
    last_error: Option<String>,
}

impl<T> PageState<T> {
    fn fresh(generation: u64) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            loaded: false,
            has_more: true,
            in_flight: false,
            generation,
            last_error: None,
        }
    }
}

pub struct Paginator<T> {
    source: Arc<dyn PageSource<T>>,
    page_size: u32,
    dedupe_key: Option<fn(&T) -> u64>,
    state: Mutex<PageState<T>>,
}

impl<T> Paginator<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn PageSource<T>>, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            dedupe_key: None,
            state: Mutex::new(PageState::fresh(0)),
        }
    }

    /// Re-run first-wins de-duplication over the whole list after every page
    pub fn with_dedupe(mut self, key: fn(&T) -> u64) -> Self {
        self.dedupe_key = Some(key);
        self
    }

    fn lock(&self) -> MutexGuard<'_, PageState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Back to page 1 with an empty list. Any fetch still running is invalidated.
    pub fn reset(&self) {
        let mut state = self.lock();
        let generation = state.generation + 1;
        *state = PageState::fresh(generation);
        debug!("{}: reset (generation {})", self.source.describe(), generation);
    }

    /// Reset, then load the first page
    pub async fn refresh(&self) -> LoadOutcome {
        self.reset();
        Self::outcome(self.fetch(1, false).await)
    }

    /// Append the next page, unless a fetch is running or the end was reached
    pub async fn load_more(&self) -> LoadOutcome {
        let (generation, page) = {
            let mut state = self.lock();
            if state.in_flight || !state.has_more {
                debug!(
                    "{}: load_more skipped (in_flight={}, has_more={})",
                    self.source.describe(),
                    state.in_flight,
                    state.has_more
                );
                return LoadOutcome::Skipped;
            }
            state.in_flight = true;
            let page = if state.loaded { state.page + 1 } else { 1 };
            (state.generation, page)
        };
        Self::outcome(self.run(generation, page, true).await)
    }

    /// Fetch `page` unconditionally, replacing or appending to the list.
    ///
    /// Supersedes a fetch that is already running. On failure the list is left as it was.
    pub async fn fetch(&self, page: u32, append: bool) -> Result<FetchSummary, FetchError> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.in_flight = true;
            state.generation
        };
        self.run(generation, page, append).await
    }

    async fn run(&self, generation: u64, page: u32, append: bool) -> Result<FetchSummary, FetchError> {
        let result = self.source.fetch_page(page, self.page_size).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!("{}: dropping stale page {}", self.source.describe(), page);
            return Ok(FetchSummary {
                page,
                added: 0,
                total: state.items.len(),
                has_more: state.has_more,
                stale: true,
            });
        }
        state.in_flight = false;

        match result {
            Ok(fetched) => {
                let before = if append { state.items.len() } else { 0 };
                let mut combined = if append { std::mem::take(&mut state.items) } else { Vec::new() };
                combined.extend(fetched.items);
                state.items = match self.dedupe_key {
                    Some(key) => dedupe_by_key(combined, key),
                    None => combined,
                };
                state.page = page;
                state.loaded = true;
                state.has_more = fetched.has_more;
                state.last_error = None;

                let added = state.items.len().saturating_sub(before);
                debug!(
                    "{}: page {} added {} items ({} total, has_more={})",
                    self.source.describe(),
                    page,
                    added,
                    state.items.len(),
                    state.has_more
                );
                Ok(FetchSummary {
                    page,
                    added,
                    total: state.items.len(),
                    has_more: state.has_more,
                    stale: false,
                })
            }
            Err(e) => {
                warn!("{}: failed to load page {}: {}", self.source.describe(), page, e);
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn outcome(result: Result<FetchSummary, FetchError>) -> LoadOutcome {
        match result {
            Ok(summary) if summary.stale => LoadOutcome::Stale,
            Ok(summary) => LoadOutcome::Loaded {
                added: summary.added,
                has_more: summary.has_more,
            },
            Err(e) => LoadOutcome::Failed(e.to_string()),
        }
    }

    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn snapshot(&self) -> PageSnapshot<T> {
        let state = self.lock();
        PageSnapshot {
            items: state.items.clone(),
            page: state.page,
            has_more: state.has_more,
            in_flight: state.in_flight,
            last_error: state.last_error.clone(),
        }
    }
}
