use super::Context;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;

pub async fn run_person(id: u64, ctx: &Context) -> Result<()> {
    let spinner = ctx.spinner(format!("Loading person {}...", id));
    let person = ctx.api.person(id).await;
    spinner.finish();
    let person = person.map_err(|e| {
        if e.is_not_found() {
            eyre!("No person with id {}", id)
        } else {
            eyre!("Could not load person: {}", e)
        }
    })?;

    if !ctx.output.is_human() {
        ctx.output.data(&person);
        return Ok(());
    }

    let mut table = ctx.output.table(&["Field", "Value"]);
    table.add_row(vec![Cell::new("Name"), Cell::new(person.display_name())]);
    let fields = [
        ("Known for", &person.known_for_department),
        ("Born", &person.birthday),
        ("Birthplace", &person.place_of_birth),
        ("Biography", &person.biography),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
    }
    ctx.output.print_table(table);

    if !person.known_for.is_empty() {
        ctx.output.info(format!("\n{}", "Known for".bright_cyan().bold()));
        ctx.output.items(&person.known_for);
    }
    Ok(())
}
