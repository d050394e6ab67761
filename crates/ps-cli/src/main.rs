//! CLI entry point for the plist-scraper tool.
//!
//! This binary scans an Xcode project descriptor, collects every target's
//! property-list resources, and writes a cross-target comparison CSV.
//!
//! # Usage
//!
//! ```bash
//! # Compare all targets against the App target
//! plist-scraper App.xcodeproj --main App
//!
//! # Pick a build configuration for settings lookups and an output path
//! plist-scraper App.xcodeproj -m App -c Release -o comparison.csv
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use camino::Utf8PathBuf;
use clap::Parser;
use ps_core::ScrapeConfig;
use ps_scraper::Scraper;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Exports a CSV comparing property-list values across build targets.
///
/// Each row is one (document, key) pair; each target gets a column, and
/// non-default columns show a value only where it differs from the default
/// target's.
#[derive(Parser)]
#[command(name = "plist-scraper", version, about, long_about = None)]
struct Cli {
    /// Path to the Xcode project bundle or its project.pbxproj file.
    project: Utf8PathBuf,

    /// Target treated as the default/baseline column.
    #[arg(
        short = 'm',
        long = "main",
        value_name = "TARGET",
        env = "PLIST_SCRAPER_MAIN"
    )]
    main: Option<String>,

    /// Build configuration consulted for settings lookups.
    #[arg(
        short,
        long,
        default_value = "Debug",
        env = "PLIST_SCRAPER_CONFIGURATION"
    )]
    configuration: String,

    /// Output CSV path.
    #[arg(short, long, default_value = "output.csv")]
    output: Utf8PathBuf,

    /// Also process targets whose name contains "Tests".
    #[arg(long)]
    include_tests: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds a [`ScrapeConfig`] from CLI arguments.
///
/// # Errors
///
/// Returns an error if the project path does not exist.
fn build_config(cli: &Cli) -> color_eyre::Result<ScrapeConfig> {
    if !cli.project.exists() {
        return Err(color_eyre::eyre::eyre!(
            "Project does not exist: {}",
            cli.project
        ));
    }

    Ok(ScrapeConfig {
        project_path: cli.project.clone(),
        default_target: cli.main.clone(),
        configuration: cli.configuration.clone(),
        ignore_tests: !cli.include_tests,
        output_path: cli.output.clone(),
        ..ScrapeConfig::default()
    })
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // Install color-eyre first so startup failures already report nicely
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    info!(project = %cli.project, "parsing project");
    let config = build_config(&cli)?;

    let scraper = Scraper::from_config(config)?;
    let outcome = scraper.scrape();
    let written = scraper.export_csv(&outcome)?;

    info!(
        path = %written,
        rows = outcome.table.row_count(),
        targets = outcome.targets.len(),
        "comparison written"
    );
    Ok(())
}
