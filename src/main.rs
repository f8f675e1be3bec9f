use anyhow::{Context, Result};
use clap::{Arg, Command};
use file_handler::{AppConfig, FileHandler, SyncConfig, SyncReport};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("file-handler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stage files for a workflow step from a declarative action list")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML or JSON file mapping actions (mkdir, copy_req, copy_opt) to entries")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .get_matches();

    let config = create_app_config(&matches)?;

    // Load .env before the filter reads RUST_LOG
    let env_loaded = dotenvy::dotenv().is_ok();

    initialize_logging(&config.log_level)?;

    if !env_loaded {
        info!("No .env file found, using system environment variables");
    }

    run_application(config)
}

fn create_app_config(matches: &clap::ArgMatches) -> Result<AppConfig> {
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .context("Missing --config argument")?;

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| "info".to_string());

    Ok(AppConfig {
        config_path,
        log_level,
    })
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

fn run_application(config: AppConfig) -> Result<()> {
    info!("Loading actions from {}", config.config_path.display());

    let sync_config = SyncConfig::from_path(&config.config_path)
        .with_context(|| format!("Failed to load {}", config.config_path.display()))?;

    if sync_config.is_empty() {
        warn!("Configuration contains no actions");
    }

    let report = FileHandler::new(&sync_config)
        .sync()
        .context("File sync aborted")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &SyncReport) {
    info!("=== FILE SYNC REPORT ===");
    info!("Directories created: {}", report.directories_created);
    info!("Files copied: {}", report.files_copied);
    info!("Optional sources skipped: {}", report.skipped_files());
    info!("Total entries processed: {}", report.total_processed());
    for source in &report.skipped_sources {
        info!("  skipped {}", source.display());
    }
}
