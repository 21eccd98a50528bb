//! Seo-Mirror main entry point
//!
//! This is the command-line interface for the Seo-Mirror origin crawler and
//! metadata extractor.

use anyhow::Context;
use clap::{Parser, Subcommand};
use seo_mirror::config::{load_config, validate, Config};
use seo_mirror::crawler::user_agent_string;
use seo_mirror::output::{
    format_export_summary, format_revalidation_summary, render_sitemap_xml, write_json, write_text,
};
use seo_mirror::Coordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seo-Mirror: origin discovery and metadata extraction for an SEO gateway
///
/// Seo-Mirror reads an origin site's sitemap (or its homepage links), extracts
/// bounded SEO summaries from each page, and produces a mirrored sitemap and
/// static-route exports for a gateway site.
#[derive(Parser, Debug)]
#[command(name = "seo-mirror")]
#[command(version = "1.0.0")]
#[command(about = "Origin discovery and metadata extraction for an SEO gateway", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the origin base URL from the configuration
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the origin's pages and print them
    Pages {
        /// Print at most this many pages
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the local route paths projected from the origin's pages
    Paths,

    /// Extract one page and print its content summary as JSON
    Extract {
        /// Page URL; defaults to the origin home page
        url: Option<String>,
    },

    /// Write the mirrored sitemap for the gateway
    Sitemap {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract every page and write a JSON export
    Export {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Refresh every known page, bypassing the cache
    Revalidate,

    /// Validate the configuration and show the effective settings
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).with_context(|| format!("loading {}", cli.config.display()));
        }
    };

    if let Some(origin) = cli.origin {
        tracing::info!("Origin overridden on command line: {}", origin);
        config.origin.url = origin;
        validate(&config).context("invalid --origin")?;
    }

    if let Command::Check = cli.command {
        handle_check(&config);
        return Ok(());
    }

    let coordinator = Coordinator::new(config)?;

    match cli.command {
        Command::Pages { limit } => handle_pages(&coordinator, limit).await,
        Command::Paths => {
            for path in coordinator.page_paths().await {
                println!("{}", path);
            }
            Ok(())
        }
        Command::Extract { url } => {
            let summary = coordinator.extract(url.as_deref()).await;
            if let Some(error) = &summary.extraction_error {
                tracing::warn!("{}", error);
            }
            write_json(&summary, None).context("writing extraction")?;
            Ok(())
        }
        Command::Sitemap { output } => {
            let urls = coordinator.mirrored_sitemap().await;
            let xml = render_sitemap_xml(&urls).context("rendering sitemap")?;
            write_text(&xml, output.as_deref()).context("writing sitemap")?;
            tracing::info!("Mirrored sitemap has {} entries", urls.len());
            Ok(())
        }
        Command::Export { output } => {
            let export = coordinator.bulk_export().await;
            write_json(&export, output.as_deref()).context("writing export")?;
            if output.is_some() && !cli.quiet {
                print!("{}", format_export_summary(&export));
            }
            Ok(())
        }
        Command::Revalidate => {
            let report = coordinator.revalidate().await;
            if !cli.quiet {
                print!("{}", format_revalidation_summary(&report));
            }
            Ok(())
        }
        Command::Check => Ok(()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_mirror=info,warn"),
            1 => EnvFilter::new("seo_mirror=debug,info"),
            2 => EnvFilter::new("seo_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the `check` command: shows the validated configuration
fn handle_check(config: &Config) {
    println!("=== Seo-Mirror Configuration ===\n");

    println!("Origin: {}", config.origin.url);
    println!("Gateway site URL: {}", config.gateway.site_url);

    println!("\nCrawler:");
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    println!("  Max sitemap fan-out: {}", config.crawler.max_sitemap_fanout);
    println!(
        "  Max batch concurrency: {}",
        config.crawler.max_batch_concurrency
    );

    println!("\nCache:");
    println!("  TTL: {}s", config.cache.ttl_secs);

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nFallback Content:");
    println!("  Title: {}", config.fallback.title);
    println!("  Headings: {}", config.fallback.headings.len());
    println!("  Paragraphs: {}", config.fallback.paragraphs.len());

    println!("\n✓ Configuration is valid");
}

/// Handles the `pages` command: prints resolved page descriptors
async fn handle_pages(
    coordinator: &Coordinator,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let pages = coordinator.resolve_pages().await;
    let shown = limit.unwrap_or(pages.len()).min(pages.len());

    println!("Resolved {} pages from {}\n", pages.len(), coordinator.config().origin.url);
    for page in &pages[..shown] {
        let priority = page
            .priority
            .map(|p| format!("{:.1}", p))
            .unwrap_or_else(|| "-".to_string());
        let changefreq = page.change_frequency.as_deref().unwrap_or("-");
        println!("  {:<5} {:<8} {}", priority, changefreq, page.url);
    }
    if shown < pages.len() {
        println!("\n... and {} more", pages.len() - shown);
    }

    let paths = coordinator.project(&pages);
    println!("\n{} distinct local paths", paths.len());

    Ok(())
}
