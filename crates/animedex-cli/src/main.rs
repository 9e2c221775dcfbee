use catalog_config::{Config, PathManager};
use catalog_sources::HttpCatalogClient;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::browse::BrowseArgs;
use commands::config::ConfigCommands;
use commands::details::DetailsArgs;
use commands::lists::ListsArgs;
use commands::news::NewsArgs;
use commands::search::SearchArgs;
use commands::{browse, config, details, genres, lists, news, person, search, Context};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "animedex")]
#[command(about = "Animedex - browse, filter and search an anime catalog")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file (defaults to the standard log location)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// Catalog service base URL, overriding config and ANIMEDEX_BACKEND_URL
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    /// Directory holding config.toml and logs/
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the configured categories, then filter and sort client-side
    #[command(long_about = "Fetch every configured category concurrently, merge them without duplicates and present the result filtered and sorted. Categories that fail are skipped with a warning.")]
    Lists(ListsArgs),
    /// Page through a single listing
    Browse(BrowseArgs),
    /// Search the catalog
    #[command(long_about = "Search the catalog. The query goes through the debounced search controller, so only the final text is sent.")]
    Search(SearchArgs),
    /// Show one title in detail
    Details(DetailsArgs),
    /// List genres and their ids
    Genres,
    /// Show a person and the titles they are known for
    Person {
        /// Person id
        id: u64,
    },
    /// Read the news feed
    News(NewsArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = match &cli.config_dir {
        Some(dir) => PathManager::with_base(dir),
        None => PathManager::default(),
    };
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_backend_override(cli.backend_url.clone());

    let log_file = cli.log_file.clone().map(|path| path.unwrap_or_else(|| paths.log_file()));
    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_file.as_deref())
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet, config.presentation.right_to_left);

    let command = match cli.command {
        Commands::Config { cmd } => return config::run_config(cmd, &config, &config_file, &output),
        other => other,
    };

    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    let client = HttpCatalogClient::from_config(&config)?;
    tracing::debug!("Using catalog service at {}", client.base_url());

    let ctx = Context {
        config,
        api: Arc::new(client),
        output,
    };

    let started = Instant::now();
    let result = match command {
        Commands::Lists(args) => lists::run_lists(args, &ctx).await,
        Commands::Browse(args) => browse::run_browse(args, &ctx).await,
        Commands::Search(args) => search::run_search(args, &ctx).await,
        Commands::Details(args) => details::run_details(args, &ctx).await,
        Commands::Genres => genres::run_genres(&ctx).await,
        Commands::Person { id } => person::run_person(id, &ctx).await,
        Commands::News(args) => news::run_news(args, &ctx).await,
        Commands::Config { .. } => Ok(()),
    };
    tracing::debug!("Command finished in {:?}", started.elapsed());

    // color-eyre reports the error for humans; scripts get it on stdout as well
    if let (Err(e), false) = (&result, ctx.output.is_human()) {
        ctx.output.error(e.to_string());
    }
    result
}
