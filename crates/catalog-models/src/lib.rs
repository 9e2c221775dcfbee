pub mod details;
pub mod genre;
pub mod item;
pub mod listing;
pub mod news;
pub mod page;
pub mod person;

pub use details::{CastMember, Image, ImageSet, ItemDetails, Video, VideoList};
pub use genre::Genre;
pub use item::{CatalogItem, ContentType, UNTITLED};
pub use listing::Listing;
pub use news::{ArticleAge, NewsArticle, NewsPage};
pub use page::ListingPage;
pub use person::Person;
