use crate::genre::Genre;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown when an item has neither a localized nor a primary title
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Tv,
    Movie,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Tv => "tv",
            ContentType::Movie => "movie",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tv" | "series" | "show" => Ok(ContentType::Tv),
            "movie" | "film" => Ok(ContentType::Movie),
            other => Err(format!("Unknown content type: {}", other)),
        }
    }
}

/// Canonical catalog entry, produced by both the current and the legacy API decoders.
///
/// `id` is only unique within one content source. Image paths are stored exactly as the
/// service returned them, which may be relative fragments or full URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>, // None on legacy items
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_localized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_localized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>, // 0-10 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>, // Opaque, compared by exact equality
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl CatalogItem {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Localized title, then primary title, then the placeholder
    pub fn display_title(&self) -> &str {
        non_empty(&self.title_localized)
            .or_else(|| Some(self.title.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or(UNTITLED)
    }

    /// Title used for alphabetical ordering (empty when nothing is known)
    pub fn sort_title(&self) -> &str {
        non_empty(&self.title_localized).unwrap_or(&self.title)
    }

    /// Release date for movies, first air date for series
    pub fn best_date(&self) -> Option<&str> {
        non_empty(&self.release_date).or_else(|| non_empty(&self.first_air_date))
    }

    /// Year derived from the first four characters of the best available date
    pub fn year(&self) -> Option<&str> {
        self.best_date().map(|date| match date.char_indices().nth(4) {
            Some((end, _)) => &date[..end],
            None => date,
        })
    }

    /// Legacy items carry no content type and behave like series
    pub fn effective_content_type(&self) -> ContentType {
        self.content_type.unwrap_or(ContentType::Tv)
    }

    pub fn has_genre(&self, genre_id: u64) -> bool {
        self.genres.iter().any(|g| g.id == genre_id)
    }

    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn popularity_or_zero(&self) -> f64 {
        self.popularity.unwrap_or(0.0)
    }
}
