use catalog_models::Listing;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable that overrides `api.backend_url`
pub const BACKEND_URL_ENV: &str = "ANIMEDEX_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

/// Categories fanned out by the lists screen, in merge order.
///
/// Order matters: on duplicate ids the item from the earlier category wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListsConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub listing: Listing,
    #[serde(default = "default_page_size")]
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Presentation settings handed to the output layer at construction time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PresentationConfig {
    #[serde(default)]
    pub right_to_left: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON logs on or off; unset means "JSON when stdout is not a terminal"
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("animedex/{}", env!("CARGO_PKG_VERSION"))
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_search_limit() -> u32 {
    50
}

fn default_page_size() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig { listing: Listing::Top, limit: 20 },
        CategoryConfig { listing: Listing::Movies, limit: 10 },
        CategoryConfig { listing: Listing::CurrentSeason, limit: 10 },
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            limit: default_search_limit(),
        }
    }
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            search: SearchConfig::default(),
            lists: ListsConfig::default(),
            pagination: PaginationConfig::default(),
            news: NewsConfig::default(),
            presentation: PresentationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the file if it exists, otherwise start from defaults; then apply the environment
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_backend_override(std::env::var(BACKEND_URL_ENV).ok());
        Ok(config)
    }

    pub fn apply_backend_override(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            debug!("Backend URL overridden to {}", url);
            self.api.backend_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.api.backend_url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("api.backend_url is required and cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!("api.backend_url must start with http:// or https://: {}", url));
        }
        if self.api.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("api.timeout_seconds must be greater than zero"));
        }
        if self.search.limit == 0 {
            return Err(anyhow::anyhow!("search.limit must be greater than zero"));
        }
        if self.pagination.page_size == 0 || self.news.page_size == 0 {
            return Err(anyhow::anyhow!("page_size must be greater than zero"));
        }
        if self.lists.categories.is_empty() {
            return Err(anyhow::anyhow!("lists.categories is required and cannot be empty"));
        }
        for category in &self.lists.categories {
            if category.limit == 0 {
                return Err(anyhow::anyhow!("Category '{}' has a zero limit", category.listing));
            }
        }
        Ok(())
    }

    /// Backend URL without a trailing slash
    pub fn backend_base(&self) -> &str {
        self.api.backend_url.trim().trim_end_matches('/')
    }
}
