//! Docsweep main entry point
//!
//! Command-line interface for the document discovery and download pipeline:
//! discover PDFs reachable from a seed page, download them exactly once,
//! and report on both stages.

use anyhow::{bail, Context};
use clap::Parser;
use docsweep::config::{load_config_with_hash, Config};
use docsweep::crawler::{
    run_discovery, ChallengeDetector, CrawlFrontier, CrawlOutcome, FanOutPolicy,
    HtmlLinkExtractor, HttpPageFetcher,
};
use docsweep::download::{DownloadOrchestrator, HttpDownloader};
use docsweep::state::DiscoveryState;
use docsweep::storage::{load_discovery_state, load_manifest, save_manifest};
use docsweep::{report, DownloadManifest};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Docsweep: discover and retrieve linked documents from a site
///
/// Docsweep crawls same-site navigation from a seed page up to a bounded
/// depth, records every PDF link it finds, and downloads each discovered
/// document exactly once. Both stages persist their state and can be
/// re-invoked to resume or retry without repeating completed work.
#[derive(Parser, Debug)]
#[command(name = "docsweep")]
#[command(version)]
#[command(about = "Discover and retrieve linked documents from a site", long_about = None)]
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

    /// Run the discovery crawl (default mode)
    #[arg(long, conflicts_with_all = ["download", "report", "dry_run"])]
    discover: bool,

    /// Download documents recorded in the discovery state
    #[arg(long, conflicts_with_all = ["discover", "report", "dry_run"])]
    download: bool,

    /// Print the current pipeline status and reports
    #[arg(long, conflicts_with_all = ["discover", "download", "dry_run"])]
    report: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["discover", "download", "report"])]
    dry_run: bool,

    /// Resume from existing discovery state (default behavior)
    #[arg(long, conflicts_with = "fresh")]
    resume: bool,

    /// Start a fresh discovery, ignoring previous state
    #[arg(long, conflicts_with = "resume")]
    fresh: bool,

    /// Override the seed URL from the config (discovery only)
    #[arg(long)]
    seed: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("failed to load configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else if cli.report {
        handle_report(&config);
        Ok(())
    } else if cli.download {
        handle_download(&config).await
    } else {
        handle_discover(&config, &config_hash, cli.fresh, cli.seed).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docsweep=info,warn"),
            1 => EnvFilter::new("docsweep=debug,info"),
            2 => EnvFilter::new("docsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Sets a shared flag when the operator interrupts the process
///
/// The pipeline checks the flag between units of work, so the in-flight
/// page or download finishes and persisted state stays consistent.
fn spawn_interrupt_watcher() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let watcher = Arc::clone(&flag);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received; finishing the current item");
            watcher.store(true, Ordering::Relaxed);
        }
    });
    flag
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Docsweep Dry Run ===\n");

    println!("Target:");
    println!("  Domain: {}", config.target.domain);
    println!("  Seed: {}", config.target.seed);

    println!("\nCrawl:");
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Fan-out cap: {}", config.crawl.fan_out_cap);

    println!("\nDownload:");
    println!("  Output dir: {}", config.download.output_dir);
    println!("  Max concurrent: {}", config.download.max_concurrent);
    println!("  Pacing: {}ms", config.download.pacing_ms);
    match &config.download.session_url {
        Some(url) => println!("  Session URL: {}", url),
        None => println!("  Session URL: (none)"),
    }

    println!("\nOutput:");
    println!("  State: {}", config.output.state_path);
    println!("  Manifest: {}", config.output.manifest_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the discovery mode
async fn handle_discover(
    config: &Config,
    config_hash: &str,
    fresh: bool,
    seed_override: Option<String>,
) -> anyhow::Result<()> {
    let state_path = Path::new(&config.output.state_path);
    let seed = seed_override.unwrap_or_else(|| config.target.seed.clone());

    let state = if fresh {
        tracing::info!("Starting fresh discovery (ignoring previous state)");
        DiscoveryState::new(seed.clone(), config.crawl.max_depth, config_hash)
    } else {
        match load_state_tolerant(state_path) {
            Some(existing) => {
                if existing.seed_url != seed {
                    bail!(
                        "existing state at {} was created for seed {}; pass --fresh to start over",
                        state_path.display(),
                        existing.seed_url
                    );
                }
                if existing.config_hash != config_hash {
                    tracing::warn!("Configuration changed since the state file was written");
                }
                tracing::info!(
                    "Resuming discovery: {} page(s) visited, {} document(s) known",
                    existing.visited.len(),
                    existing.documents.len()
                );
                existing
            }
            None => {
                tracing::info!("No previous state found, starting new discovery");
                DiscoveryState::new(seed.clone(), config.crawl.max_depth, config_hash)
            }
        }
    };

    let fetcher = HttpPageFetcher::new(&config.http)?;
    let frontier = CrawlFrontier::new(
        fetcher,
        HtmlLinkExtractor,
        ChallengeDetector::default(),
        config.target.domain.clone(),
    );
    let policy = FanOutPolicy {
        cap: config.crawl.fan_out_cap,
    };

    let cancel = spawn_interrupt_watcher();
    let run = run_discovery(&frontier, &policy, state, state_path, cancel).await?;

    println!("{}", report::render_discovery_report(&run.state));

    if run.interrupted {
        println!("Interrupted; progress saved to {}", state_path.display());
        return Ok(());
    }

    match run.seed_outcome {
        Some(CrawlOutcome::Error { detail }) => {
            bail!("seed page could not be fetched: {}", detail)
        }
        Some(CrawlOutcome::Blocked) => {
            bail!("seed page is behind a bot challenge; nothing discovered")
        }
        _ => Ok(()),
    }
}

/// Handles the --download mode
async fn handle_download(config: &Config) -> anyhow::Result<()> {
    let state_path = Path::new(&config.output.state_path);
    let manifest_path = Path::new(&config.output.manifest_path);

    let state = load_state_tolerant(state_path).with_context(|| {
        format!(
            "no discovery state at {}; run discovery first",
            state_path.display()
        )
    })?;

    let urls = state.document_urls();
    if urls.is_empty() {
        bail!("discovery state contains no documents; nothing to download");
    }

    tracing::info!("Loaded {} document URL(s) from discovery state", urls.len());

    let downloader = HttpDownloader::new(&config.http, config.download.session_url.clone())?;
    let orchestrator = DownloadOrchestrator::new(downloader, &config.download);

    let cancel = spawn_interrupt_watcher();
    let mut manifest = orchestrator.download_all(&urls, cancel).await?;

    save_manifest(&mut manifest, manifest_path)?;
    println!("{}", report::render_download_report(&manifest));
    println!("Manifest saved to {}", manifest_path.display());

    if manifest.is_complete_failure() {
        bail!("every download failed; see the manifest for details");
    }

    Ok(())
}

/// Handles the --report mode
fn handle_report(config: &Config) {
    let state = load_state_tolerant(Path::new(&config.output.state_path));
    let manifest = load_manifest_tolerant(Path::new(&config.output.manifest_path));

    println!("{}", report::render_status(state.as_ref(), manifest.as_ref()));

    if let Some(state) = &state {
        println!("{}", report::render_discovery_report(state));
    }
    if let Some(manifest) = &manifest {
        println!("{}", report::render_download_report(manifest));
    }
}

/// Loads discovery state, treating an unreadable file as "no prior state"
fn load_state_tolerant(path: &Path) -> Option<DiscoveryState> {
    match load_discovery_state(path) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Ignoring unreadable state file {}: {}", path.display(), e);
            None
        }
    }
}

/// Loads a manifest, treating an unreadable file as absent
fn load_manifest_tolerant(path: &Path) -> Option<DownloadManifest> {
    match load_manifest(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!("Ignoring unreadable manifest file {}: {}", path.display(), e);
            None
        }
    }
}
