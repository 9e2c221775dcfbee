use super::{first_page, load_extra_pages, Context};
use catalog_core::{ListingPages, Paginator};
use catalog_models::{CatalogItem, Listing};
use clap::{Args, ValueEnum};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BrowseTarget {
    Top,
    Season,
    Movies,
    Network,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Listing to page through
    #[arg(value_enum)]
    pub target: BrowseTarget,

    /// Network id, required for `network`
    #[arg(long)]
    pub id: Option<u64>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

impl BrowseArgs {
    pub fn listing(&self) -> Result<Listing> {
        match (self.target, self.id) {
            (BrowseTarget::Top, _) => Ok(Listing::Top),
            (BrowseTarget::Season, _) => Ok(Listing::CurrentSeason),
            (BrowseTarget::Movies, _) => Ok(Listing::Movies),
            (BrowseTarget::Network, Some(id)) => Ok(Listing::Network(id)),
            (BrowseTarget::Network, None) => Err(eyre!("browsing a network requires --id")),
        }
    }
}

pub async fn run_browse(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let listing = args.listing()?;
    let source = Arc::new(ListingPages::new(ctx.api.clone(), listing));
    let paginator = Paginator::<CatalogItem>::new(source, ctx.config.pagination.page_size);

    let spinner = ctx.spinner(format!("Loading {}...", listing));
    let loaded = paginator.refresh().await;
    if let Err(e) = first_page(loaded, &listing.to_string()) {
        spinner.finish();
        return Err(e);
    }
    load_extra_pages(args.pages, &spinner, &ctx.output, || paginator.load_more()).await;
    spinner.finish();

    let snapshot = paginator.snapshot();
    ctx.output.items(&snapshot.items);
    if snapshot.has_more {
        ctx.output.info(format!("Page {} loaded; more available with --pages {}", snapshot.page, snapshot.page + 1));
    } else {
        ctx.output.info(format!("End of {} after page {}", listing, snapshot.page));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_needs_id() {
        let args = BrowseArgs {
            target: BrowseTarget::Network,
            id: None,
            pages: 1,
        };
        assert!(args.listing().is_err());

        let args = BrowseArgs {
            id: Some(213),
            ..args
        };
        assert_eq!(args.listing().unwrap(), Listing::Network(213));
    }
}
