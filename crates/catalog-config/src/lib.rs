pub mod config;
pub mod paths;

pub use config::{
    ApiConfig, CategoryConfig, Config, ListsConfig, LoggingConfig, NewsConfig, PaginationConfig,
    PresentationConfig, SearchConfig, BACKEND_URL_ENV,
};
pub use paths::{container_base_path, PathManager};
