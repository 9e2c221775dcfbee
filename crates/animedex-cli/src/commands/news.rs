use super::{first_page, load_extra_pages, Context};
use catalog_core::{NewsFeed, ALL_SOURCES};
use catalog_models::{ArticleAge, NewsArticle};
use chrono::{DateTime, Utc};
use clap::Args;
use color_eyre::Result;
use comfy_table::Cell;
use std::collections::BTreeSet;

#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Only show articles from this source (exact name), or "all"
    #[arg(long, default_value = ALL_SOURCES)]
    pub source: String,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

fn age_label(article: &NewsArticle, now: DateTime<Utc>) -> String {
    match article.age(now) {
        Some(ArticleAge::JustNow) => "just now".to_string(),
        Some(ArticleAge::Hours(1)) => "1 hour ago".to_string(),
        Some(ArticleAge::Hours(h)) => format!("{} hours ago", h),
        Some(ArticleAge::Yesterday) => "yesterday".to_string(),
        Some(ArticleAge::Days(d)) => format!("{} days ago", d),
        None => "-".to_string(),
    }
}

pub async fn run_news(args: NewsArgs, ctx: &Context) -> Result<()> {
    let feed = NewsFeed::from_config(ctx.api.clone(), &ctx.config.news);

    let spinner = ctx.spinner("Loading news...");
    let loaded = feed.select_source(&args.source).await;
    if let Err(e) = first_page(loaded, "news") {
        spinner.finish();
        return Err(e);
    }
    load_extra_pages(args.pages, &spinner, &ctx.output, || feed.load_more()).await;
    spinner.finish();

    let articles = feed.articles();
    if !ctx.output.is_human() {
        ctx.output.data(&articles);
        return Ok(());
    }
    if articles.is_empty() {
        ctx.output.info(format!("No articles from {}.", feed.selected_source()));
        return Ok(());
    }

    let now = Utc::now();
    let mut table = ctx.output.table(&["Published", "Source", "Title", "Link"]);
    for article in &articles {
        table.add_row(vec![
            Cell::new(age_label(article, now)),
            Cell::new(&article.source),
            Cell::new(article.display_title()),
            Cell::new(&article.link),
        ]);
    }
    ctx.output.print_table(table);

    if feed.selected_source() == ALL_SOURCES {
        let sources: BTreeSet<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        let sources: Vec<&str> = sources.into_iter().collect();
        ctx.output.info(format!("Sources: {}", sources.join(", ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_age_labels() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut article = NewsArticle::default();

        article.published = (now - Duration::minutes(20)).to_rfc3339();
        assert_eq!(age_label(&article, now), "just now");

        article.published = (now - Duration::hours(5)).to_rfc3339();
        assert_eq!(age_label(&article, now), "5 hours ago");

        article.published = (now - Duration::hours(30)).to_rfc3339();
        assert_eq!(age_label(&article, now), "yesterday");

        article.published = (now - Duration::days(4)).to_rfc3339();
        assert_eq!(age_label(&article, now), "4 days ago");

        article.published = "not a date".to_string();
        assert_eq!(age_label(&article, now), "-");
    }
}
