//! status-page-checker binary entrypoint.
//!
//! Checks one service's status feed and prints a report. Exit code 1 on
//! unknown service or any fetch/parse failure, 0 otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use status_page_checker::classify::DEFAULT_RECENT_HOURS;
use status_page_checker::report::DEFAULT_REPORT_LIMIT;
use status_page_checker::{
    build_client, default_services_path, fetch_feed, format_incidents, parse_feed, CatalogLoader,
    FeedCache, MAX_FEED_ENTRIES, MAX_FEED_SIZE_BYTES,
};

const DEFAULT_SERVICE: &str = "claude";

/// Check a service's status page for incidents.
#[derive(Parser, Debug)]
#[command(name = "status-page-checker", version, about)]
struct Cli {
    /// Service key or alias to check.
    #[arg(default_value = DEFAULT_SERVICE)]
    service: String,

    /// Path to the service catalog (defaults to $STATUS_SERVICES_PATH,
    /// then config/services.toml).
    #[arg(long)]
    services: Option<PathBuf>,

    /// Serve a cached feed without refetching if it is younger than this.
    #[arg(long, default_value_t = 60)]
    max_age: i64,

    /// How many incidents the history section shows.
    #[arg(long, default_value_t = DEFAULT_REPORT_LIMIT)]
    limit: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let services_path = cli.services.unwrap_or_else(default_services_path);
    let mut loader = CatalogLoader::new();
    let catalog = loader
        .load(&services_path)
        .with_context(|| format!("loading service catalog from {}", services_path.display()))?;

    let Some((service_key, service)) = catalog.find(&cli.service) else {
        println!("Unknown service: {}", cli.service);
        println!(
            "Available services: {}",
            catalog.keys().collect::<Vec<_>>().join(", ")
        );
        return Ok(ExitCode::FAILURE);
    };

    let cache = FeedCache::new(FeedCache::default_dir()).context("initializing feed cache")?;
    let client = build_client().context("building http client")?;

    let content = match fetch_feed(
        &client,
        &service.feed,
        Some(&cache),
        Some(service_key),
        cli.max_age,
        MAX_FEED_SIZE_BYTES,
    )
    .await
    {
        Ok(content) => content,
        Err(e) => {
            println!("Error fetching {} status: {e}", service.name);
            return Ok(ExitCode::FAILURE);
        }
    };

    let incidents = match parse_feed(service.feed_type, &content, MAX_FEED_ENTRIES) {
        Ok(incidents) => incidents,
        Err(e) => {
            println!("Error parsing {} feed: {e}", service.name);
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::debug!(
        service = service_key,
        incidents = incidents.len(),
        recent_hours = DEFAULT_RECENT_HOURS,
        "feed parsed"
    );

    println!("{}", format_incidents(&service.name, &incidents, cli.limit));
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op elsewhere. Lets STATUS_SERVICES_PATH and
    // STATUS_CACHE_DIR come from a local .env file.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
