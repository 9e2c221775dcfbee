use async_trait::async_trait;
use catalog_models::{
    CatalogItem, ContentType, Genre, ImageSet, ItemDetails, Listing, ListingPage, NewsPage,
    Person, VideoList,
};
use crate::error::CatalogError;
use crate::params::SearchParams;

/// The remote catalog service, as seen by the controllers.
///
/// Every call is a single GET; implementations do not retry.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // Paged listings
    async fn listing(
        &self,
        listing: Listing,
        page: u32,
        limit: u32,
    ) -> Result<ListingPage<CatalogItem>, CatalogError>;

    async fn search(&self, params: &SearchParams) -> Result<ListingPage<CatalogItem>, CatalogError>;

    // Detail endpoints
    async fn details(&self, id: u64, content_type: ContentType) -> Result<ItemDetails, CatalogError>;
    async fn videos(&self, id: u64, content_type: ContentType) -> Result<VideoList, CatalogError>;
    async fn images(&self, id: u64, content_type: ContentType) -> Result<ImageSet, CatalogError>;
    async fn recommendations(
        &self,
        id: u64,
        content_type: ContentType,
    ) -> Result<ListingPage<CatalogItem>, CatalogError>;

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError>;
    async fn person(&self, id: u64) -> Result<Person, CatalogError>;
    async fn news(&self, page: u32, limit: u32) -> Result<NewsPage, CatalogError>;
}
