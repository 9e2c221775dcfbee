//! Debounced incremental search.
//!
//! Each keystroke re-arms a timer; only when the input has been quiet for the
//! debounce period is a single request issued for the latest query. Keystrokes
//! also bump a generation number, and a response is applied only while its
//! generation is current, so a slow answer to an older query can never
//! overwrite a newer one.
//!
//! The controller spawns tasks and must be used inside a tokio runtime.

use catalog_config::SearchConfig;
use catalog_models::{CatalogItem, ListingPage};
use catalog_sources::{CatalogApi, CatalogError, SearchParams};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    /// Waiting for the debounce period to pass
    Pending,
    InFlight,
    Settled,
    Error,
}

impl SearchStatus {
    /// Nothing further will happen until the next keystroke
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchStatus::Idle | SearchStatus::Settled | SearchStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSnapshot {
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<CatalogItem>,
    pub error: Option<String>,
}

struct SearchState {
    snapshot: SearchSnapshot,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    api: Arc<dyn CatalogApi>,
    debounce: Duration,
    limit: u32,
    state: Mutex<SearchState>,
    updates: watch::Sender<SearchSnapshot>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SearchState) {
        self.updates.send_replace(state.snapshot.clone());
    }

    /// Debounce expired for `generation`
    fn fire(self: Arc<Self>, generation: u64) {
        let query = {
            let mut state = self.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;

            let query = state.snapshot.query.trim().to_string();
            if query.is_empty() {
                state.snapshot.results.clear();
                state.snapshot.error = None;
                state.snapshot.status = SearchStatus::Idle;
                self.publish(&state);
                return;
            }
            state.snapshot.status = SearchStatus::InFlight;
            self.publish(&state);
            query
        };

        // Runs outside the timer task so a later keystroke cannot abort it
        tokio::spawn(async move {
            debug!("Searching for '{}' (generation {})", query, generation);
            let params = SearchParams::text(query, self.limit);
            let result = self.api.search(&params).await;
            self.apply(generation, result);
        });
    }

    fn apply(&self, generation: u64, result: Result<ListingPage<CatalogItem>, CatalogError>) {
        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                "Discarding search response for generation {} (now {})",
                generation, state.generation
            );
            return;
        }
        match result {
            Ok(page) => {
                debug!("Search '{}' returned {} items", state.snapshot.query, page.results.len());
                state.snapshot.results = page.results;
                state.snapshot.error = None;
                state.snapshot.status = SearchStatus::Settled;
            }
            Err(e) => {
                warn!("Search '{}' failed: {}", state.snapshot.query, e);
                state.snapshot.results.clear();
                state.snapshot.error = Some(e.to_string());
                state.snapshot.status = SearchStatus::Error;
            }
        }
        self.publish(&state);
    }
}

pub struct SearchController {
    inner: Arc<Inner>,
}

impl SearchController {
    pub fn new(api: Arc<dyn CatalogApi>, debounce: Duration, limit: u32) -> Self {
        let (updates, _) = watch::channel(SearchSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                api,
                debounce,
                limit,
                state: Mutex::new(SearchState {
                    snapshot: SearchSnapshot::default(),
                    generation: 0,
                    timer: None,
                }),
                updates,
            }),
        }
    }

    pub fn from_config(api: Arc<dyn CatalogApi>, config: &SearchConfig) -> Self {
        Self::new(api, Duration::from_millis(config.debounce_ms), config.limit)
    }

    /// Record a new query and restart the debounce timer.
    ///
    /// Input equal to the current query changes nothing.
    pub fn input(&self, text: &str) {
        let mut state = self.inner.lock();
        if state.snapshot.query == text {
            return;
        }
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation += 1;
        let generation = state.generation;
        state.snapshot.query = text.to_string();
        state.snapshot.status = SearchStatus::Pending;

        let inner = self.inner.clone();
        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            inner.fire(generation);
        }));
        self.inner.publish(&state);
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.inner.updates.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.inner.lock().snapshot.clone()
    }

    /// Wait until the current query reaches `Idle`, `Settled` or `Error`
    pub async fn settled(&self) -> SearchSnapshot {
        let mut updates = self.subscribe();
        loop {
            {
                let current = updates.borrow_and_update();
                if current.status.is_terminal() {
                    return current.clone();
                }
            }
            if updates.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        let mut state = self.inner.lock();
        state.generation += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests;
