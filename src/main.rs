//! # Galerij CLI Application
//!
//! Command-line entry point for the webshop crawler. A bare invocation runs
//! the full crawl with the built-in shop configuration; the `crawl`
//! subcommand exposes overrides for the base URL, output locations and
//! network behaviour.
//!
//! ## Features
//!
//! - Crawl with sensible defaults and no arguments
//! - Configurable politeness delay, retry budget and timeout
//! - Progress and failures logged to stderr; final counts on stdout
//!
//! Partial failures (an unreachable page, a broken image) are logged and
//! skipped rather than surfaced as distinct exit codes; only a run that
//! produces nothing at all, or cannot write the manifest, exits non-zero.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::instrument;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(author, version, about = "Mirror the painting webshop into a JSON manifest and image archive", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl the webshop and write the manifest
    Crawl(CrawlArgs),
}

#[derive(Args, Debug, Default)]
struct CrawlArgs {
    /// Base URL of the webshop (default: the configured shop)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Directory downloaded images are stored under (default: assets/images/paintings)
    #[arg(short, long)]
    image_dir: Option<PathBuf>,

    /// Manifest output path (default: manifest.json)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Politeness delay in milliseconds between detail-page requests (default: 500)
    #[arg(short, long)]
    rate: Option<u64>,

    /// Fetch attempts per page (default: 3)
    #[arg(long)]
    retries: Option<u32>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // A bare invocation is a full crawl with defaults
    match cli.command {
        Some(Commands::Crawl(args)) => crawl_command(args).await?,
        None => crawl_command(CrawlArgs::default()).await?,
    }

    Ok(())
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let mut builder = galerij::crawler::CrawlerConfig::builder();
    if let Some(base_url) = args.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(image_dir) = args.image_dir {
        builder = builder.image_dir(image_dir);
    }
    if let Some(manifest) = args.manifest {
        builder = builder.manifest_path(manifest);
    }
    if let Some(rate) = args.rate {
        builder = builder.rate_limit_ms(rate);
    }
    if let Some(retries) = args.retries {
        builder = builder.max_attempts(retries);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout_secs(timeout);
    }
    let config = builder.build();

    println!("Crawling {}...", config.base_url);

    let paintings = galerij::crawler::crawl_site(&config).await?;
    galerij::manifest::write_manifest(&config.manifest_path, &paintings).await?;

    println!("Done! Scraped {} paintings.", paintings.len());
    println!("Manifest written to: {}", config.manifest_path.display());

    Ok(())
}

fn init_tracing() {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(console_layer).init();
}
