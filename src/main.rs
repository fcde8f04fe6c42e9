//! parcrawl main entry point
//!
//! This is the command-line interface for the parallel web crawler.

use anyhow::Context;
use clap::Parser;
use parcrawl::config::{load_config_with_hash, Config};
use parcrawl::crawler::{build_crawler, WebCrawler};
use parcrawl::output::{write_result, write_result_to_path, CrawlResult};
use parcrawl::profiler::Profiler;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// parcrawl: a deadline-bounded parallel web crawler
///
/// parcrawl crawls outward from the configured start pages on a pool of
/// workers until the depth budget or the time budget runs out, then reports
/// the most popular words it saw and how many URLs it visited.
#[derive(Parser, Debug)]
#[command(name = "parcrawl")]
#[command(version = "1.0.0")]
#[command(about = "A deadline-bounded parallel web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("parcrawl=info,warn"),
            1 => EnvFilter::new("parcrawl=debug,info"),
            2 => EnvFilter::new("parcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so a result written to stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings
fn handle_dry_run(config: &Config) {
    println!("=== parcrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!("  Popular word count: {}", config.crawler.popular_word_count);
    match config.crawler.parallelism {
        Some(parallelism) => println!("  Parallelism: {}", parallelism),
        None => println!("  Parallelism: host default"),
    }
    println!(
        "  Host parallelism: {}",
        parcrawl::crawler::host_parallelism()
    );

    println!("\nUser Agent:");
    println!(
        "  {}",
        parcrawl::crawler::user_agent_string(&config.user_agent)
    );

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.output.result_path.as_deref().unwrap_or("<stdout>")
    );
    println!(
        "  Profile: {}",
        config
            .output
            .profile_output_path
            .as_deref()
            .unwrap_or("<stdout>")
    );

    println!("\nStart Pages ({}):", config.crawler.start_pages.len());
    for page in &config.crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URL Patterns ({}):", config.crawler.ignored_urls.len());
    for pattern in &config.crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!(
        "\nIgnored Word Patterns ({}):",
        config.crawler.ignored_words.len()
    );
    for pattern in &config.crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let profiler = Profiler::new();
    let crawler = profiler.wrap(build_crawler(config).context("Failed to build crawler")?);

    tracing::info!(
        "Total start pages: {}, host parallelism: {}",
        config.crawler.start_pages.len(),
        crawler.max_parallelism()
    );

    let result = crawler
        .crawl(&config.crawler.start_pages)
        .await
        .context("Crawl failed")?;

    tracing::info!(
        "Crawl completed: {} URLs visited, {} failed fetches",
        result.urls_visited(),
        result.failed_fetches()
    );

    emit_result(&result, config.output.result_path.as_deref())?;
    emit_profile(&profiler, config.output.profile_output_path.as_deref())?;

    Ok(())
}

/// Writes the crawl result to its configured path or to stdout
fn emit_result(result: &CrawlResult, path: Option<&str>) -> anyhow::Result<()> {
    match path {
        Some(path) => write_result_to_path(result, Path::new(path))
            .with_context(|| format!("Failed to write result to {}", path)),
        None => write_result(result, &mut std::io::stdout().lock())
            .context("Failed to write result to stdout"),
    }
}

/// Appends the profiling report to its configured path or writes it to stdout
fn emit_profile(profiler: &Profiler, path: Option<&str>) -> anyhow::Result<()> {
    match path {
        Some(path) => profiler
            .write_data(Path::new(path))
            .with_context(|| format!("Failed to write profiling data to {}", path)),
        None => profiler
            .write_to(&mut std::io::stdout().lock())
            .context("Failed to write profiling data to stdout"),
    }
}
