use super::{first_page, load_extra_pages, Context};
use catalog_core::{Aggregator, FilterState, SortKey};
use clap::Args;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ListsArgs {
    /// Content type: all, tv or movie
    #[arg(long = "type", default_value = "all")]
    pub content_type: String,

    /// Genre id, or "all"
    #[arg(long, default_value = "all")]
    pub genre: String,

    /// Four-digit release year, or "all"
    #[arg(long, default_value = "all")]
    pub year: String,

    /// Minimum rating such as 7 or 8+, or "all"
    #[arg(long, default_value = "all")]
    pub min_rating: String,

    /// Exact status such as "Ended" or "Returning Series"
    #[arg(long, default_value = "all")]
    pub status: String,

    /// popularity, rating, release-date or title
    #[arg(long, default_value = "popularity")]
    pub sort: String,

    /// Number of aggregate pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

impl ListsArgs {
    pub fn filter_state(&self) -> Result<FilterState> {
        Ok(FilterState {
            content_type: FilterState::parse_content_type(&self.content_type).map_err(|e| eyre!(e))?,
            genre_id: FilterState::parse_genre(&self.genre).map_err(|e| eyre!(e))?,
            year: FilterState::parse_year(&self.year).map_err(|e| eyre!(e))?,
            min_rating: FilterState::parse_min_rating(&self.min_rating).map_err(|e| eyre!(e))?,
            status: FilterState::parse_status(&self.status),
            sort_key: self.sort.parse::<SortKey>().map_err(|e| eyre!(e))?,
        })
    }
}

pub async fn run_lists(args: ListsArgs, ctx: &Context) -> Result<()> {
    let state = args.filter_state()?;
    debug!("Lists filter: {:?}", state);

    let aggregator = Aggregator::from_config(ctx.api.clone(), &ctx.config.lists);
    let categories: Vec<String> = aggregator.categories().iter().map(|c| c.listing.to_string()).collect();

    let spinner = ctx.spinner(format!("Fetching {}...", categories.join(", ")));
    let loaded = aggregator.refresh().await;
    if let Err(e) = first_page(loaded, "lists") {
        spinner.finish();
        return Err(e);
    }
    load_extra_pages(args.pages, &spinner, &ctx.output, || aggregator.load_more()).await;
    spinner.finish();

    let failed = aggregator.failed_categories();
    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(|l| l.to_string()).collect();
        ctx.output.warn(format!("Some categories are unavailable: {}", names.join(", ")));
    }

    let all = aggregator.items();
    let presented = aggregator.presented(&state);
    ctx.output.items(&presented);
    if !state.is_unfiltered() {
        ctx.output.info(format!("{} of {} items match the filters", presented.len(), all.len()));
    }
    if aggregator.has_more() {
        ctx.output.info(format!("More available; use --pages {}", args.pages + 1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::ContentType;

    fn args() -> ListsArgs {
        ListsArgs {
            content_type: "all".to_string(),
            genre: "all".to_string(),
            year: "all".to_string(),
            min_rating: "all".to_string(),
            status: "all".to_string(),
            sort: "popularity".to_string(),
            pages: 1,
        }
    }

    #[test]
    fn test_defaults_are_unfiltered() {
        let state = args().filter_state().unwrap();
        assert!(state.is_unfiltered());
        assert_eq!(state.sort_key, SortKey::Popularity);
    }

    #[test]
    fn test_flags_build_filter_state() {
        let mut args = args();
        args.content_type = "movie".to_string();
        args.min_rating = "8+".to_string();
        args.sort = "release-date".to_string();
        let state = args.filter_state().unwrap();
        assert_eq!(state.content_type, Some(ContentType::Movie));
        assert_eq!(state.min_rating, Some(8.0));
        assert_eq!(state.sort_key, SortKey::ReleaseDate);
    }

    #[test]
    fn test_bad_flag_is_rejected() {
        let mut args = args();
        args.year = "last year".to_string();
        assert!(args.filter_state().is_err());
    }
}
