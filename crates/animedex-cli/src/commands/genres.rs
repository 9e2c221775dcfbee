use super::Context;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;

pub async fn run_genres(ctx: &Context) -> Result<()> {
    let spinner = ctx.spinner("Loading genres...");
    let genres = ctx.api.genres().await;
    spinner.finish();
    let mut genres = genres.map_err(|e| eyre!("Could not load genres: {}", e))?;
    genres.sort_by_key(|g| g.id);

    if !ctx.output.is_human() {
        ctx.output.data(&genres);
        return Ok(());
    }
    let mut table = ctx.output.table(&["ID", "Name"]);
    for genre in &genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(genre.display_name())]);
    }
    ctx.output.print_table(table);
    ctx.output.info("Filter lists by genre with `animedex lists --genre <ID>`");
    Ok(())
}
