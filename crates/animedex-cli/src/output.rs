use catalog_models::{CatalogItem, UNTITLED};
use clap::ValueEnum;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
    right_to_left: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool, right_to_left: bool) -> Self {
        Self {
            format,
            quiet,
            right_to_left,
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn message(&self, kind: &str, msg: &str) {
        self.print_json(&json!({ "type": kind, "message": msg }));
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            _ => self.message("success", msg.as_ref()),
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.message("error", msg.as_ref()),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.message("info", msg.as_ref()),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            _ => self.message("warning", msg.as_ref()),
        }
    }

    /// Serialize `data` for the JSON formats; a no-op in human mode
    pub fn data<T: Serialize>(&self, data: &T) {
        if self.is_human() {
            return;
        }
        match serde_json::to_value(data) {
            Ok(value) => self.print_json(&value),
            Err(e) => self.error(format!("Failed to serialize output: {}", e)),
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Table in the shared style; right-to-left layouts align every column right
    pub fn table(&self, header: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.apply_modifier(UTF8_ROUND_CORNERS);
        table.set_header(
            header
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
        table
    }

    pub fn print_table(&self, mut table: Table) {
        if self.quiet || !self.is_human() {
            return;
        }
        if self.right_to_left {
            for column in table.column_iter_mut() {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        println!("{}", table);
    }

    /// Human table of items, or the items themselves for JSON output
    pub fn items(&self, items: &[CatalogItem]) {
        if !self.is_human() {
            self.data(&items);
            return;
        }
        if items.is_empty() {
            self.info("No results.".bright_black().to_string());
            return;
        }
        let mut table = self.table(&["ID", "Title", "Type", "Year", "Rating", "Popularity", "Status"]);
        for item in items {
            table.add_row(item_row(item));
        }
        self.print_table(table);
    }
}

fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn item_row(item: &CatalogItem) -> Vec<Cell> {
    let title = item.display_title();
    let title_cell = if title == UNTITLED {
        Cell::new(title).fg(Color::DarkGrey)
    } else {
        Cell::new(title)
    };
    vec![
        Cell::new(item.id),
        title_cell,
        Cell::new(item.effective_content_type()),
        Cell::new(item.year().unwrap_or("-")),
        Cell::new(or_dash(item.rating.map(|r| format!("{:.1}", r)))),
        Cell::new(or_dash(item.popularity.map(|p| format!("{:.0}", p)))),
        Cell::new(item.status.as_deref().unwrap_or("-")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_row_placeholders() {
        let item = CatalogItem::new(42, "");
        let row = item_row(&item);
        assert_eq!(row.len(), 7);
        assert_eq!(row[1].content(), UNTITLED);
        assert_eq!(row[3].content(), "-");
        assert_eq!(row[4].content(), "-");
    }

    #[test]
    fn test_item_row_formats_numbers() {
        let mut item = CatalogItem::new(1, "Mushishi");
        item.rating = Some(8.66);
        item.popularity = Some(1234.4);
        item.first_air_date = Some("2005-10-23".to_string());
        let row = item_row(&item);
        assert_eq!(row[2].content(), "tv");
        assert_eq!(row[3].content(), "2005");
        assert_eq!(row[4].content(), "8.7");
        assert_eq!(row[5].content(), "1234");
    }
}
