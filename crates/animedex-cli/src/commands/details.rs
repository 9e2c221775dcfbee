use super::Context;
use catalog_models::{ContentType, ImageSet, ItemDetails, ListingPage, CatalogItem, VideoList};
use catalog_sources::CatalogError;
use clap::Args;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// Catalog id
    pub id: u64,

    /// tv or movie
    #[arg(long = "type", default_value = "tv")]
    pub content_type: ContentType,

    /// Also list trailers and other videos
    #[arg(long)]
    pub videos: bool,

    /// Also list posters and backdrops
    #[arg(long)]
    pub images: bool,

    /// Also list recommended titles
    #[arg(long)]
    pub recommendations: bool,
}

async fn optional<T, F>(wanted: bool, request: F) -> Option<Result<T, CatalogError>>
where
    F: std::future::Future<Output = Result<T, CatalogError>>,
{
    if wanted {
        Some(request.await)
    } else {
        None
    }
}

pub async fn run_details(args: DetailsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api.as_ref();
    let (id, kind) = (args.id, args.content_type);

    let spinner = ctx.spinner(format!("Loading {} {}...", kind, id));
    let (details, videos, images, recommendations) = tokio::join!(
        api.details(id, kind),
        optional(args.videos, api.videos(id, kind)),
        optional(args.images, api.images(id, kind)),
        optional(args.recommendations, api.recommendations(id, kind)),
    );
    spinner.finish();

    let details = details.map_err(|e| {
        if e.is_not_found() {
            eyre!("No {} with id {}", kind, id)
        } else {
            eyre!("Could not load details: {}", e)
        }
    })?;

    // Extras are best-effort; a failure only drops that section
    let videos = extra(ctx, "videos", videos);
    let images = extra(ctx, "images", images);
    let recommendations = extra(ctx, "recommendations", recommendations);

    if !ctx.output.is_human() {
        ctx.output.data(&json!({
            "details": details,
            "videos": videos,
            "images": images,
            "recommendations": recommendations.map(|page| page.results),
        }));
        return Ok(());
    }

    print_details(ctx, &details);
    if let Some(videos) = videos {
        print_videos(ctx, &videos);
    }
    if let Some(images) = images {
        print_images(ctx, &images);
    }
    if let Some(page) = recommendations {
        ctx.output.info(format!("\n{}", "Recommended".bright_cyan().bold()));
        print_recommendations(ctx, &page);
    }
    Ok(())
}

fn extra<T>(ctx: &Context, what: &str, result: Option<Result<T, CatalogError>>) -> Option<T> {
    match result? {
        Ok(value) => Some(value),
        Err(e) => {
            ctx.output.warn(format!("Could not load {}: {}", what, e));
            None
        }
    }
}

fn print_details(ctx: &Context, details: &ItemDetails) {
    let item = &details.item;
    let mut table = ctx.output.table(&["Field", "Value"]);
    table.add_row(vec![Cell::new("Title"), Cell::new(item.display_title())]);
    if let Some(original) = item.original_title.as_deref().filter(|t| *t != item.display_title()) {
        table.add_row(vec![Cell::new("Original title"), Cell::new(original)]);
    }
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        table.add_row(vec![Cell::new("Tagline"), Cell::new(tagline)]);
    }
    table.add_row(vec![Cell::new("Type"), Cell::new(item.effective_content_type())]);
    if let Some(date) = item.best_date() {
        table.add_row(vec![Cell::new("Released"), Cell::new(date)]);
    }
    if let Some(rating) = item.rating {
        let votes = item.vote_count.map(|v| format!(" ({} votes)", v)).unwrap_or_default();
        table.add_row(vec![Cell::new("Rating"), Cell::new(format!("{:.1}{}", rating, votes))]);
    }
    if let Some(runtime) = details.runtime {
        table.add_row(vec![Cell::new("Runtime"), Cell::new(format!("{} min", runtime))]);
    }
    if let Some(episodes) = item.episode_count {
        table.add_row(vec![Cell::new("Episodes"), Cell::new(episodes)]);
    }
    if let Some(status) = item.status.as_deref() {
        table.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    }
    if !item.genres.is_empty() {
        let genres: Vec<&str> = item.genres.iter().map(|g| g.display_name()).collect();
        table.add_row(vec![Cell::new("Genres"), Cell::new(genres.join(", "))]);
    }
    if !details.networks.is_empty() {
        table.add_row(vec![Cell::new("Networks"), Cell::new(details.networks.join(", "))]);
    }
    if let Some(homepage) = details.homepage.as_deref().filter(|h| !h.is_empty()) {
        table.add_row(vec![Cell::new("Homepage"), Cell::new(homepage)]);
    }
    let overview = item
        .overview_localized
        .as_deref()
        .or(item.overview.as_deref())
        .filter(|o| !o.is_empty());
    if let Some(overview) = overview {
        table.add_row(vec![Cell::new("Overview"), Cell::new(overview)]);
    }
    ctx.output.print_table(table);

    if !details.cast.is_empty() {
        let mut cast = ctx.output.table(&["ID", "Name", "Character"]);
        for member in &details.cast {
            cast.add_row(vec![
                Cell::new(member.id),
                Cell::new(&member.name),
                Cell::new(member.character.as_deref().unwrap_or("-")),
            ]);
        }
        ctx.output.print_table(cast);
    }
}

fn print_videos(ctx: &Context, videos: &VideoList) {
    if videos.results.is_empty() {
        ctx.output.info("No videos.");
        return;
    }
    let mut table = ctx.output.table(&["Name", "Kind", "Site", "Key"]);
    // Trailers first, otherwise in service order
    let mut ordered: Vec<_> = videos.results.iter().collect();
    ordered.sort_by_key(|v| !v.is_trailer());
    for video in ordered {
        table.add_row(vec![
            Cell::new(&video.name),
            Cell::new(video.kind.as_deref().unwrap_or("-")),
            Cell::new(video.site.as_deref().unwrap_or("-")),
            Cell::new(&video.key),
        ]);
    }
    ctx.output.print_table(table);
}

fn print_images(ctx: &Context, images: &ImageSet) {
    let mut table = ctx.output.table(&["Kind", "Path", "Size"]);
    let rows = images
        .posters
        .iter()
        .map(|i| ("poster", i))
        .chain(images.backdrops.iter().map(|i| ("backdrop", i)));
    for (kind, image) in rows {
        let size = match (image.width, image.height) {
            (Some(w), Some(h)) => format!("{}x{}", w, h),
            _ => "-".to_string(),
        };
        table.add_row(vec![Cell::new(kind), Cell::new(&image.file_path), Cell::new(size)]);
    }
    ctx.output.print_table(table);
}

fn print_recommendations(ctx: &Context, page: &ListingPage<CatalogItem>) {
    ctx.output.items(&page.results);
}
