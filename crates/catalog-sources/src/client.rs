use crate::decode;
use crate::error::CatalogError;
use crate::params::SearchParams;
use crate::traits::CatalogApi;
use async_trait::async_trait;
use catalog_config::Config;
use catalog_models::{
    CatalogItem, ContentType, Genre, ImageSet, ItemDetails, Listing, ListingPage, NewsPage,
    Person, VideoList,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// reqwest-backed client for the catalog service
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Arc<Client>,
    base_url: String,
    default_limit: u32,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, CatalogError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(CatalogError::Config("backend URL is empty".to_string()));
        }
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client: Arc::new(client),
            base_url,
            default_limit: 20,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let mut client = Self::new(
            config.backend_base(),
            Duration::from_secs(config.api.timeout_seconds),
            &config.api.user_agent,
        )?;
        client.default_limit = config.pagination.page_size;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a path below `/api`
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, CatalogError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Transport {
                endpoint: path.to_string(),
                source: e,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await.map_err(|e| CatalogError::Transport {
            endpoint: path.to_string(),
            source: e,
        })?;
        trace!("{} returned {} bytes", path, body.len());
        serde_json::from_str(&body).map_err(|e| CatalogError::decode(path, e.to_string()))
    }
}

fn content_type_query(content_type: ContentType) -> [(&'static str, String); 1] {
    [("content_type", content_type.as_str().to_string())]
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn listing(
        &self,
        listing: Listing,
        page: u32,
        limit: u32,
    ) -> Result<ListingPage<CatalogItem>, CatalogError> {
        let path = format!("anime/{}", listing.path());
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let value = self.get_json(&path, &query).await?;
        decode::decode_listing(&path, value, page)
    }

    async fn search(&self, params: &SearchParams) -> Result<ListingPage<CatalogItem>, CatalogError> {
        let path = "anime/search";
        let value = self.get_json(path, &params.to_query()).await?;
        decode::decode_listing(path, value, params.page.unwrap_or(1))
    }

    async fn details(&self, id: u64, content_type: ContentType) -> Result<ItemDetails, CatalogError> {
        let path = format!("anime/{}/details", id);
        let value = self.get_json(&path, &content_type_query(content_type)).await?;
        decode::decode_details(&path, value)
    }

    async fn videos(&self, id: u64, content_type: ContentType) -> Result<VideoList, CatalogError> {
        let path = format!("anime/{}/videos", id);
        let value = self.get_json(&path, &content_type_query(content_type)).await?;
        decode::decode_videos(&path, value)
    }

    async fn images(&self, id: u64, content_type: ContentType) -> Result<ImageSet, CatalogError> {
        let path = format!("anime/{}/images", id);
        let value = self.get_json(&path, &content_type_query(content_type)).await?;
        decode::decode_images(&path, value)
    }

    async fn recommendations(
        &self,
        id: u64,
        content_type: ContentType,
    ) -> Result<ListingPage<CatalogItem>, CatalogError> {
        let path = format!("anime/{}/recommendations", id);
        let value = self.get_json(&path, &content_type_query(content_type)).await?;
        decode::decode_listing(&path, value, 1)
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let path = "anime/genres";
        let value = self.get_json(path, &[]).await?;
        decode::decode_genres(path, value)
    }

    async fn person(&self, id: u64) -> Result<Person, CatalogError> {
        let path = format!("person/{}", id);
        let value = self.get_json(&path, &[]).await?;
        decode::decode_person(&path, value)
    }

    async fn news(&self, page: u32, limit: u32) -> Result<NewsPage, CatalogError> {
        let path = "news";
        let limit = if limit == 0 { self.default_limit } else { limit };
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let value = self.get_json(path, &query).await?;
        decode::decode_news(path, value, page)
    }
}
