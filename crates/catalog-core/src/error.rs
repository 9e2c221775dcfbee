use catalog_sources::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Every category of a fan-out failed; distinct from an empty result
    #[error("Aggregate unavailable: all {attempted} categories failed")]
    AggregateUnavailable {
        attempted: usize,
        failures: Vec<String>,
    },
}

impl FetchError {
    pub fn is_aggregate_unavailable(&self) -> bool {
        matches!(self, FetchError::AggregateUnavailable { .. })
    }
}
