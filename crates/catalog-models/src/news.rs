use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_localized: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_localized: Option<String>,
    pub link: String,
    #[serde(default)]
    pub published: String, // RFC 3339 or RFC 2822, as published by the feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewsPage {
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub source: String,
}

fn first_page() -> u32 {
    1
}

/// Coarse publication age used for "time ago" labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleAge {
    JustNow,
    Hours(i64),
    Yesterday,
    Days(i64),
}

impl NewsArticle {
    pub fn display_title(&self) -> &str {
        self.title_localized
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.title)
    }

    pub fn display_summary(&self) -> &str {
        self.summary_localized
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.summary)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published)
            .or_else(|_| DateTime::parse_from_rfc2822(&self.published))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn age(&self, now: DateTime<Utc>) -> Option<ArticleAge> {
        let published = self.published_at()?;
        let hours = (now - published).num_hours();
        Some(match hours {
            h if h < 1 => ArticleAge::JustNow,
            h if h < 24 => ArticleAge::Hours(h),
            h if h < 48 => ArticleAge::Yesterday,
            h => ArticleAge::Days(h / 24),
        })
    }
}
