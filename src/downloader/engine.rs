//! Streaming download engine

use crate::downloader::progress::{DownloadProgress, DownloadStatus};
use crate::utils::config::AppSettings;
use crate::utils::error::{FetchError, Result};
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Streams a single remote resource into a local file
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    client: Client,
}

impl DownloadEngine {
    /// Create a download engine. Media transfers carry no overall timeout.
    pub fn new(settings: &AppSettings) -> Result<Self> {
        if settings.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for media downloads");
        }

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::NetworkError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Download `url` into `output_path`, returning the number of bytes written.
    ///
    /// The file is created before the request is sent. On a transport failure the
    /// handle is closed and whatever was written so far stays on disk.
    /// A non-2xx answer is a `ProtocolError`; its body is not written to the file.
    pub async fn download(
        &self,
        url: &str,
        output_path: &Path,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<u64> {
        let mut file = File::create(output_path).await.map_err(|e| {
            error!("Failed to create {:?}: {}", output_path, e);
            FetchError::StorageError(format!(
                "failed to create local file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        debug!("Downloading {} -> {:?}", url, output_path);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Download request failed: {}", e);
            FetchError::NetworkError(format!("download failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(FetchError::ProtocolError(format!(
                "media server returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let mut progress = DownloadProgress::new(response.content_length().unwrap_or(0));
        progress.status = DownloadStatus::Downloading;
        report(progress_tx, &progress).await;

        let mut downloaded = 0u64;
        let start_time = Instant::now();
        let mut last_update_time = start_time;

        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(e) => {
                    error!("Download interrupted after {} bytes: {}", downloaded, e);
                    progress.failed(e.to_string());
                    report(progress_tx, &progress).await;
                    return Err(FetchError::NetworkError(format!("download failed: {}", e)));
                }
            };
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            // Update progress every second
            let now = Instant::now();
            if now.duration_since(last_update_time) >= Duration::from_secs(1) {
                progress.update(downloaded, bytes_per_second(downloaded, start_time));
                report(progress_tx, &progress).await;
                last_update_time = now;
            }
        }

        file.flush().await?;

        progress.update(downloaded, bytes_per_second(downloaded, start_time));
        progress.complete();
        report(progress_tx, &progress).await;

        info!("Wrote {} bytes to {:?}", downloaded, output_path);
        Ok(downloaded)
    }
}

fn bytes_per_second(downloaded: u64, start_time: Instant) -> f64 {
    let elapsed = start_time.elapsed().as_secs_f64();
    if elapsed > 0.0 {
        downloaded as f64 / elapsed
    } else {
        0.0
    }
}

async fn report(progress_tx: Option<&mpsc::Sender<DownloadProgress>>, progress: &DownloadProgress) {
    if let Some(tx) = progress_tx {
        if let Err(e) = tx.send(progress.clone()).await {
            warn!("Failed to send progress update: {}", e);
        }
    }
}
