use crate::output::Output;
use catalog_config::Config;
use clap::Subcommand;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use std::path::Path;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

pub fn run_config(cmd: ConfigCommands, config: &Config, config_file: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, config_file, output),
        ConfigCommands::Init { force } => init_config(config_file, force, output),
        ConfigCommands::Path => {
            if output.is_human() {
                println!("{}", config_file.display());
            } else {
                output.data(&serde_json::json!({ "path": config_file }));
            }
            Ok(())
        }
    }
}

fn init_config(config_file: &Path, force: bool, output: &Output) -> Result<()> {
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }
    Config::default()
        .save_to_file(&config_file.to_path_buf())
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn section(output: &Output, title: &str, rows: Vec<(&str, String)>) {
    let mut table = output.table(&[title, ""]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    output.print_table(table);
}

fn show_config(config: &Config, config_file: &Path, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.data(config);
        return Ok(());
    }
    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}; showing defaults. Run `animedex config init` to create one.",
            config_file.display()
        ));
    } else {
        output.info(format!("{} {}", "Config file:".bold(), config_file.display()));
    }

    section(
        output,
        "Catalog service",
        vec![
            ("Backend URL", config.backend_base().to_string()),
            ("Timeout", format!("{}s", config.api.timeout_seconds)),
            ("User agent", config.api.user_agent.clone()),
        ],
    );
    section(
        output,
        "Search",
        vec![
            ("Debounce", format!("{} ms", config.search.debounce_ms)),
            ("Limit", config.search.limit.to_string()),
        ],
    );
    section(
        output,
        "Lists",
        config
            .lists
            .categories
            .iter()
            .map(|c| ("Category", format!("{} (limit {})", c.listing, c.limit)))
            .collect(),
    );
    let yes_no = |flag: bool| if flag { "✓".green().to_string() } else { "✗".red().to_string() };
    section(
        output,
        "Paging and display",
        vec![
            ("Page size", config.pagination.page_size.to_string()),
            ("News page size", config.news.page_size.to_string()),
            ("Right to left", yes_no(config.presentation.right_to_left)),
        ],
    );
    section(
        output,
        "Logging",
        vec![
            ("Level", config.logging.level.clone()),
            (
                "JSON",
                config.logging.json.map(yes_no).unwrap_or_else(|| "auto".to_string()),
            ),
            (
                "File",
                config
                    .logging
                    .file
                    .as_ref()
                    .map(|f| f.display().to_string())
                    .unwrap_or_else(|| "stderr".to_string()),
            ),
        ],
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Json, true, false);

        init_config(&path, false, &output).unwrap();
        assert!(Config::load_from_file(&path).is_ok());
        assert!(init_config(&path, false, &output).is_err());
        assert!(init_config(&path, true, &output).is_ok());
    }
}
