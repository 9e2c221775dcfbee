//! Response decoders.
//!
//! Two payload shapes coexist on the catalog service. The current one wraps items in
//! `results`, the legacy one in `data` (with `mal_id` ids and a `pagination` object).
//! The decoder is picked by which of those marker fields is present, and both produce
//! the same model types.

use crate::error::CatalogError;
use crate::wire::{
    CurrentDetails, CurrentGenreList, CurrentImageSet, CurrentListing, CurrentNewsPage,
    CurrentPerson, CurrentVideoList, LegacyDetails, LegacyGenreList, LegacyListing,
};
use catalog_models::{
    CatalogItem, Genre, ImageSet, ItemDetails, ListingPage, NewsPage, Person, VideoList,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Which payload family a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Current,
    Legacy,
}

pub fn detect_listing_shape(value: &Value) -> Option<Shape> {
    if value.get("results").is_some() {
        Some(Shape::Current)
    } else if value.get("data").is_some() {
        Some(Shape::Legacy)
    } else {
        None
    }
}

fn from_value<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, CatalogError> {
    serde_json::from_value(value).map_err(|e| CatalogError::decode(endpoint, e.to_string()))
}

pub fn decode_listing(
    endpoint: &str,
    value: Value,
    requested_page: u32,
) -> Result<ListingPage<CatalogItem>, CatalogError> {
    match detect_listing_shape(&value) {
        Some(Shape::Current) => {
            let listing: CurrentListing = from_value(endpoint, value)?;
            trace!("{}: decoded {} current-shape items", endpoint, listing.results.len());
            Ok(ListingPage {
                results: listing.results.into_iter().map(CatalogItem::from).collect(),
                page: listing.page.unwrap_or(requested_page),
                total_pages: listing.total_pages,
                total_results: listing.total_results,
            })
        }
        Some(Shape::Legacy) => {
            let listing: LegacyListing = from_value(endpoint, value)?;
            trace!("{}: decoded {} legacy-shape items", endpoint, listing.data.len());
            let (page, total_pages) = listing
                .pagination
                .as_ref()
                .map(|p| p.page_and_total(requested_page))
                .unwrap_or((requested_page, None));
            Ok(ListingPage {
                results: listing.data.into_iter().map(CatalogItem::from).collect(),
                page,
                total_pages,
                total_results: None,
            })
        }
        None => Err(CatalogError::decode(
            endpoint,
            "response has neither `results` nor `data`",
        )),
    }
}

pub fn decode_details(endpoint: &str, value: Value) -> Result<ItemDetails, CatalogError> {
    if value.get("data").is_some() {
        let legacy: LegacyDetails = from_value(endpoint, value)?;
        return Ok(ItemDetails {
            item: legacy.data.into(),
            ..ItemDetails::default()
        });
    }
    let details: CurrentDetails = from_value(endpoint, value)?;
    Ok(details.into())
}

pub fn decode_genres(endpoint: &str, value: Value) -> Result<Vec<Genre>, CatalogError> {
    if value.get("data").is_some() {
        let list: LegacyGenreList = from_value(endpoint, value)?;
        return Ok(list.data.into_iter().map(Genre::from).collect());
    }
    let list: CurrentGenreList = from_value(endpoint, value)?;
    Ok(list.genres.into_iter().map(Genre::from).collect())
}

pub fn decode_videos(endpoint: &str, value: Value) -> Result<VideoList, CatalogError> {
    let videos: CurrentVideoList = from_value(endpoint, value)?;
    Ok(videos.into())
}

pub fn decode_images(endpoint: &str, value: Value) -> Result<ImageSet, CatalogError> {
    let images: CurrentImageSet = from_value(endpoint, value)?;
    Ok(images.into())
}

pub fn decode_person(endpoint: &str, value: Value) -> Result<Person, CatalogError> {
    let person: CurrentPerson = from_value(endpoint, value)?;
    Ok(person.into())
}

pub fn decode_news(
    endpoint: &str,
    value: Value,
    requested_page: u32,
) -> Result<NewsPage, CatalogError> {
    let page: CurrentNewsPage = from_value(endpoint, value)?;
    Ok(page.into_page(requested_page))
}
