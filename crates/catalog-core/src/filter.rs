//! Client-side filtering and sorting for aggregated lists.
//!
//! Filters are an AND of independent predicates, applied before a single-key stable
//! sort. Every `None` selector means "all" and narrows nothing.

use catalog_models::{CatalogItem, ContentType};
use feruca::Collator;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Items without any date sort as if released on this day
pub const MISSING_DATE: &str = "1900-01-01";

const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
    ReleaseDate,
    Title,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::Rating => "rating",
            SortKey::ReleaseDate => "release_date",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "popularity" => Ok(SortKey::Popularity),
            "rating" => Ok(SortKey::Rating),
            "release_date" | "date" => Ok(SortKey::ReleaseDate),
            "title" => Ok(SortKey::Title),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub content_type: Option<ContentType>,
    pub genre_id: Option<u64>,
    pub year: Option<String>,
    pub min_rating: Option<f64>,
    pub status: Option<String>,
    pub sort_key: SortKey,
}

/// `None` for the "all" selector (or an empty one)
fn selector(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value)
    }
}

impl FilterState {
    pub fn parse_content_type(value: &str) -> Result<Option<ContentType>, String> {
        selector(value).map(str::parse).transpose()
    }

    pub fn parse_genre(value: &str) -> Result<Option<u64>, String> {
        selector(value)
            .map(|v| v.parse::<u64>().map_err(|_| format!("Invalid genre id: {}", v)))
            .transpose()
    }

    pub fn parse_year(value: &str) -> Result<Option<String>, String> {
        match selector(value) {
            None => Ok(None),
            Some(v) if v.len() == 4 && v.chars().all(|c| c.is_ascii_digit()) => Ok(Some(v.to_string())),
            Some(v) => Err(format!("Year must have four digits: {}", v)),
        }
    }

    /// Accepts thresholds written as `8`, `8+` or `7.5+`
    pub fn parse_min_rating(value: &str) -> Result<Option<f64>, String> {
        match selector(value) {
            None => Ok(None),
            Some(v) => {
                let threshold: f64 = v
                    .trim_end_matches('+')
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid rating threshold: {}", v))?;
                if !(0.0..=10.0).contains(&threshold) {
                    return Err(format!("Rating threshold must be between 0 and 10: {}", v));
                }
                Ok(Some(threshold))
            }
        }
    }

    pub fn parse_status(value: &str) -> Option<String> {
        selector(value).map(str::to_string)
    }

    /// True when no predicate narrows the input
    pub fn is_unfiltered(&self) -> bool {
        self.content_type.is_none()
            && self.genre_id.is_none()
            && self.year.is_none()
            && self.min_rating.is_none()
            && self.status.as_deref().map_or(true, str::is_empty)
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(content_type) = self.content_type {
            if item.effective_content_type() != content_type {
                return false;
            }
        }
        if let Some(genre_id) = self.genre_id {
            if !item.has_genre(genre_id) {
                return false;
            }
        }
        if let Some(year) = self.year.as_deref() {
            if item.year() != Some(year) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if item.rating_or_zero() < min_rating {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            if item.status.as_deref() != Some(status) {
                return false;
            }
        }
        true
    }
}

/// Unicode collation (CLDR root), so accents and letter variants sort next to their base letter
fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

fn compare(a: &CatalogItem, b: &CatalogItem, key: SortKey, collator: &mut Collator) -> Ordering {
    match key {
        SortKey::Popularity => b.popularity_or_zero().total_cmp(&a.popularity_or_zero()),
        SortKey::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        SortKey::ReleaseDate => {
            let date_a = a.best_date().unwrap_or(MISSING_DATE);
            let date_b = b.best_date().unwrap_or(MISSING_DATE);
            date_b.cmp(date_a)
        }
        SortKey::Title => compare_titles(collator, a.sort_title(), b.sort_title()),
    }
}

/// Stable sort: items with equal keys keep their relative order
pub fn sort_items(items: &mut [CatalogItem], key: SortKey) {
    let mut collator = Collator::default();
    items.sort_by(|a, b| compare(a, b, key, &mut collator));
}

/// Filter then sort. Pure; the input is left untouched.
pub fn apply_filters(items: &[CatalogItem], state: &FilterState) -> Vec<CatalogItem> {
    let mut filtered: Vec<CatalogItem> = items.iter().filter(|item| state.matches(item)).cloned().collect();
    sort_items(&mut filtered, state.sort_key);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::Genre;

    fn item(id: u64) -> CatalogItem {
        CatalogItem::new(id, format!("Item {}", id))
    }

    fn ids(items: &[CatalogItem]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    fn sample() -> Vec<CatalogItem> {
        let mut a = item(1);
        a.content_type = Some(ContentType::Movie);
        a.rating = Some(8.4);
        a.popularity = Some(50.0);
        a.release_date = Some("2016-08-26".to_string());
        a.genres = vec![Genre::new(16, "Animation"), Genre::new(18, "Drama")];
        a.status = Some("Released".to_string());

        let mut b = item(2);
        b.content_type = Some(ContentType::Tv);
        b.rating = Some(9.0);
        b.popularity = Some(120.0);
        b.first_air_date = Some("2013-04-07".to_string());
        b.genres = vec![Genre::new(16, "Animation"), Genre::new(28, "Action")];
        b.status = Some("Ended".to_string());

        let mut c = item(3); // legacy item: no content type, no rating
        c.popularity = Some(80.0);
        c.release_date = Some("2016-01-10".to_string());
        c.status = Some("Returning Series".to_string());

        vec![a, b, c]
    }

    #[test]
    fn test_default_filters_only_sort() {
        let items = sample();
        let out = apply_filters(&items, &FilterState::default());
        assert_eq!(out.len(), items.len());
        assert_eq!(ids(&out), vec![2, 3, 1]);

        let mut sorted = items.clone();
        sort_items(&mut sorted, SortKey::Popularity);
        assert_eq!(out, sorted);
    }

    #[test]
    fn test_content_type_filter() {
        let state = FilterState {
            content_type: Some(ContentType::Movie),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &state)), vec![1]);

        // Legacy items count as series
        let state = FilterState {
            content_type: Some(ContentType::Tv),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &state)), vec![2, 3]);
    }

    #[test]
    fn test_conjunction() {
        let state = FilterState {
            genre_id: Some(16),
            year: Some("2016".to_string()),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &state)), vec![1]);

        let state = FilterState {
            genre_id: Some(16),
            min_rating: Some(8.5),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &state)), vec![2]);
    }

    #[test]
    fn test_missing_rating_counts_as_zero() {
        let state = FilterState {
            min_rating: Some(0.0),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&sample(), &state).len(), 3);

        let state = FilterState {
            min_rating: Some(0.1),
            ..FilterState::default()
        };
        assert!(!ids(&apply_filters(&sample(), &state)).contains(&3));
    }

    #[test]
    fn test_status_exact_match_and_empty_skips() {
        let state = FilterState {
            status: Some("Ended".to_string()),
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &state)), vec![2]);

        let state = FilterState {
            status: Some("ended".to_string()),
            ..FilterState::default()
        };
        assert!(apply_filters(&sample(), &state).is_empty());

        let state = FilterState {
            status: Some(String::new()),
            ..FilterState::default()
        };
        assert!(state.is_unfiltered());
        assert_eq!(apply_filters(&sample(), &state).len(), 3);
    }

    #[test]
    fn test_popularity_sort_with_missing() {
        let mut a = item(1);
        a.popularity = Some(5.0);
        let mut b = item(2);
        b.popularity = Some(9.0);
        let c = item(3);

        let out = apply_filters(&[a, b, c], &FilterState::default());
        assert_eq!(ids(&out), vec![2, 1, 3]);
    }

    #[test]
    fn test_release_date_sort_missing_last() {
        let mut state = FilterState::default();
        state.sort_key = SortKey::ReleaseDate;
        let mut items = sample();
        items.push(item(4));
        assert_eq!(ids(&apply_filters(&items, &state)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let mut a = item(1);
        a.title = "naruto".to_string();
        let mut b = item(2);
        b.title = "Bleach".to_string();
        let mut c = item(3);
        c.title = "zzz".to_string();
        c.title_localized = Some("Akira".to_string());
        let mut d = item(4);
        d.title = String::new();

        let state = FilterState {
            sort_key: SortKey::Title,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&[a, b, c, d], &state)), vec![4, 3, 2, 1]);
    }

    fn titled(id: u64, title: &str) -> CatalogItem {
        let mut it = item(id);
        it.title = title.to_string();
        it
    }

    #[test]
    fn test_title_sort_collates_accents() {
        let items = vec![titled(1, "Zeta"), titled(2, "Émile"), titled(3, "apple")];
        let state = FilterState {
            sort_key: SortKey::Title,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&items, &state)), vec![3, 2, 1]);
    }

    #[test]
    fn test_title_sort_arabic_alef_variants() {
        let mut a = item(1);
        a.title_localized = Some("أحمد".to_string());
        let mut b = item(2);
        b.title_localized = Some("ابن".to_string());
        let state = FilterState {
            sort_key: SortKey::Title,
            ..FilterState::default()
        };
        assert_eq!(ids(&apply_filters(&[a, b], &state)), vec![2, 1]);
    }

    #[test]
    fn test_title_sort_tie_breaks_on_raw_string() {
        let mut collator = Collator::default();
        assert_eq!(compare_titles(&mut collator, "Akira", "Akira"), Ordering::Equal);
        assert_ne!(compare_titles(&mut collator, "akira", "Akira"), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut items: Vec<CatalogItem> = (1..=6).map(item).collect();
        for (i, it) in items.iter_mut().enumerate() {
            it.rating = Some(if i % 2 == 0 { 7.0 } else { 8.0 });
        }
        let state = FilterState {
            sort_key: SortKey::Rating,
            ..FilterState::default()
        };
        let out = apply_filters(&items, &state);
        assert_eq!(ids(&out), vec![2, 4, 6, 1, 3, 5]);
        assert_eq!(apply_filters(&items, &state), out);
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(FilterState::parse_content_type("all").unwrap(), None);
        assert_eq!(FilterState::parse_content_type("movie").unwrap(), Some(ContentType::Movie));
        assert_eq!(FilterState::parse_genre("10749").unwrap(), Some(10749));
        assert!(FilterState::parse_genre("romance").is_err());
        assert_eq!(FilterState::parse_year("2023").unwrap(), Some("2023".to_string()));
        assert!(FilterState::parse_year("23").is_err());
        assert_eq!(FilterState::parse_min_rating("8+").unwrap(), Some(8.0));
        assert_eq!(FilterState::parse_min_rating("ALL").unwrap(), None);
        assert!(FilterState::parse_min_rating("11+").is_err());
        assert_eq!(FilterState::parse_status("Returning Series"), Some("Returning Series".to_string()));
        assert_eq!("release-date".parse::<SortKey>().unwrap(), SortKey::ReleaseDate);
    }
}
