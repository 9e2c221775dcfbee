pub mod browse;
pub mod config;
pub mod details;
pub mod genres;
pub mod lists;
pub mod news;
pub mod person;
pub mod progress;
pub mod search;

use crate::output::Output;
use catalog_config::Config;
use catalog_core::LoadOutcome;
use catalog_sources::CatalogApi;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use progress::Spinner;
use std::future::Future;
use std::sync::Arc;

/// What every catalog command needs
pub struct Context {
    pub config: Config,
    pub api: Arc<dyn CatalogApi>,
    pub output: Output,
}

impl Context {
    pub fn spinner(&self, msg: impl Into<String>) -> Spinner {
        Spinner::start(self.output.is_human() && !self.output.is_quiet(), msg)
    }
}

/// Turn the first-page outcome of a controller into an error when nothing loaded
pub fn first_page(outcome: LoadOutcome, what: &str) -> Result<()> {
    match outcome {
        LoadOutcome::Failed(reason) => Err(eyre!("Could not load {}: {}", what, reason)),
        _ => Ok(()),
    }
}

/// Call `load_more` until `pages` pages are loaded or the source runs out.
///
/// A failed page stops paging but keeps what was already loaded.
pub async fn load_extra_pages<F, Fut>(pages: u32, spinner: &Spinner, output: &Output, mut load_more: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = LoadOutcome>,
{
    for page in 2..=pages {
        spinner.set_message(format!("Loading page {}...", page));
        match load_more().await {
            LoadOutcome::Loaded { has_more: false, .. } => break,
            LoadOutcome::Loaded { .. } => {}
            LoadOutcome::Skipped | LoadOutcome::Stale => break,
            LoadOutcome::Failed(reason) => {
                output.warn(format!("Stopped at page {}: {}", page, reason));
                break;
            }
        }
    }
}
