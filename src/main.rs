//! clipfetch - look up a video through the metadata API and download its best variant
//!
//! JSON results go to stdout, logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use clipfetch::{AppSettings, DownloadProgress, VideoFetchClient};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Video page URL
    url: String,

    /// Output directory (defaults to the configured download location)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print metadata only, do not download
    #[arg(long)]
    info: bool,

    /// Metadata API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Metadata request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "clipfetch=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(&args)?;
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| settings.download_location.clone());

    let mut client = VideoFetchClient::with_settings(&args.url, &output_dir, &settings)?;
    client.fetch_metadata().await?;

    let metadata = client.get_metadata()?;
    if args.info {
        println!("{}", metadata);
        return Ok(());
    }
    info!("Metadata:\n{}", metadata);

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<DownloadProgress>(100);
    let reporter = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            log_progress(&progress);
        }
    });

    let report = client.download_best_with_progress(Some(&progress_tx)).await;
    drop(progress_tx);
    if let Err(e) = reporter.await {
        warn!("Progress reporter stopped: {}", e);
    }

    println!("{}", clipfetch::client::to_pretty_json(&report?)?);
    Ok(())
}

fn load_settings(args: &Args) -> Result<AppSettings> {
    let mut settings = match &args.config {
        Some(path) => AppSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => AppSettings::default(),
    };

    if let Some(endpoint) = &args.endpoint {
        settings.api_endpoint = endpoint.clone();
    }
    if let Some(timeout) = args.timeout {
        settings.metadata_timeout_secs = timeout;
    }
    if args.insecure {
        settings.accept_invalid_certs = true;
    }

    settings.validate()?;
    Ok(settings)
}

fn log_progress(progress: &DownloadProgress) {
    if progress.total_bytes > 0 {
        info!(
            "Progress: {:.1}%, Speed: {:.2} MB/s",
            progress.percentage() * 100.0,
            progress.speed / 1024.0 / 1024.0
        );
    } else {
        info!(
            "Progress: {:.2} MB, Speed: {:.2} MB/s",
            progress.downloaded_bytes as f64 / 1024.0 / 1024.0,
            progress.speed / 1024.0 / 1024.0
        );
    }
}
