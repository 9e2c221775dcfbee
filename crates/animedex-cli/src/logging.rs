use anyhow::Result;
use catalog_config::LoggingConfig;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Level filter for the CLI flags.
///
/// `-q` shows errors only. Without `-v` the configured level applies unless
/// `RUST_LOG` is set. `-v` is debug with the HTTP connection pool quietened,
/// `-vv` and above is trace for everything.
fn build_filter(verbose_level: u8, quiet: bool, configured_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    let default = match verbose_level {
        0 => configured_level,
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn,reqwest::connect=info",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// JSON output is forced by config, then by `RUST_LOG_JSON`, else used when stdout is not a terminal
fn use_json(config: &LoggingConfig) -> bool {
    config.json.unwrap_or_else(|| {
        std::env::var("RUST_LOG_JSON")
            .map(|v| v == "true")
            .unwrap_or_else(|_| !io::stdout().is_terminal())
    })
}

pub fn init_logging(verbose_level: u8, quiet: bool, config: &LoggingConfig, log_file: Option<&Path>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet, &config.level);
    let json = use_json(config);
    let registry = Registry::default().with(filter);

    let Some(log_path) = log_file.or(config.file.as_deref()) else {
        if json {
            let layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stderr);
            registry.with(layer).init();
        } else {
            let layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stderr);
            registry.with(layer).init();
        }
        return Ok(());
    };

    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;
    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

    // "animedex.log" rotates as animedex.2026-10-19 and so on
    let log_prefix = log_filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(log_filename);
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

    if json {
        let layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(file_appender);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false)
            .with_writer(file_appender);
        registry.with(layer).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_flag_wins() {
        let config = LoggingConfig {
            json: Some(true),
            ..LoggingConfig::default()
        };
        assert!(use_json(&config));

        let config = LoggingConfig {
            json: Some(false),
            ..LoggingConfig::default()
        };
        assert!(!use_json(&config));
    }

    #[test]
    fn test_quiet_filter() {
        assert_eq!(build_filter(3, true, "info").to_string(), "error");
    }
}
