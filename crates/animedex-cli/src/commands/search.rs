use super::{first_page, load_extra_pages, Context};
use catalog_core::{Paginator, SearchController, SearchPages, SearchStatus};
use catalog_models::CatalogItem;
use catalog_sources::SearchParams;
use clap::Args;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    /// Quiet period before the request is sent (defaults to search.debounce_ms)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Number of result pages to load once the query has settled
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

/// Every prefix of `query`, as if it were typed one character at a time
fn keystrokes(query: &str) -> impl Iterator<Item = &str> {
    query
        .char_indices()
        .map(|(i, c)| &query[..i + c.len_utf8()])
}

pub async fn run_search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let debounce = Duration::from_millis(args.debounce_ms.unwrap_or(ctx.config.search.debounce_ms));
    let controller = SearchController::new(ctx.api.clone(), debounce, ctx.config.search.limit);

    // The whole query arrives as one burst of keystrokes; only the last one is searched
    for typed in keystrokes(&args.query) {
        controller.input(typed);
    }
    debug!("Typed {} keystrokes, waiting {:?}", args.query.chars().count(), debounce);

    let spinner = ctx.spinner(format!("Searching for '{}'...", args.query.trim()));
    let snapshot = controller.settled().await;
    spinner.finish();

    match snapshot.status {
        SearchStatus::Error => Err(eyre!(
            "Search failed: {}",
            snapshot.error.unwrap_or_else(|| "unknown error".to_string())
        )),
        SearchStatus::Idle => {
            ctx.output.warn("Nothing to search for.");
            Ok(())
        }
        _ if args.pages > 1 => {
            let results = page_through(&snapshot.query, args.pages, ctx).await?;
            ctx.output.items(&results);
            Ok(())
        }
        _ => {
            ctx.output.items(&snapshot.results);
            Ok(())
        }
    }
}

/// Re-run the settled query as a paged search and collect up to `pages` pages
async fn page_through(query: &str, pages: u32, ctx: &Context) -> Result<Vec<CatalogItem>> {
    let limit = ctx.config.search.limit;
    let source = Arc::new(SearchPages::new(ctx.api.clone(), SearchParams::text(query, limit)));
    let paginator = Paginator::<CatalogItem>::new(source, limit);

    let spinner = ctx.spinner(format!("Loading results for '{}'...", query.trim()));
    let loaded = paginator.refresh().await;
    if let Err(e) = first_page(loaded, "search results") {
        spinner.finish();
        return Err(e);
    }
    load_extra_pages(pages, &spinner, &ctx.output, || paginator.load_more()).await;
    spinner.finish();
    Ok(paginator.items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct SearchCli {
        #[command(flatten)]
        args: SearchArgs,
    }

    #[test]
    fn test_pages_flag() {
        let cli = SearchCli::try_parse_from(["search", "bebop"]).unwrap();
        assert_eq!(cli.args.pages, 1);
        assert_eq!(cli.args.debounce_ms, None);

        let cli = SearchCli::try_parse_from(["search", "cowboy bebop", "--pages", "3"]).unwrap();
        assert_eq!(cli.args.query, "cowboy bebop");
        assert_eq!(cli.args.pages, 3);
    }

    #[test]
    fn test_keystrokes_are_prefixes() {
        let typed: Vec<&str> = keystrokes("ani").collect();
        assert_eq!(typed, vec!["a", "an", "ani"]);
    }

    #[test]
    fn test_keystrokes_respect_multibyte_chars() {
        let typed: Vec<&str> = keystrokes("ナルト").collect();
        assert_eq!(typed, vec!["ナ", "ナル", "ナルト"]);
    }
}
