pub mod client;
pub mod decode;
pub mod error;
pub mod params;
pub mod traits;
mod wire;

pub use client::HttpCatalogClient;
pub use error::CatalogError;
pub use params::SearchParams;
pub use traits::CatalogApi;
