//! Video fetch client: metadata lookup and best-quality download
//!
//! A client is bound to one video URL and one output directory. It starts out
//! unfetched; a successful [`VideoFetchClient::fetch_metadata`] stores the API
//! response, after which metadata and downloads become available.

use crate::downloader::{DownloadEngine, DownloadProgress};
use crate::extractor::models::size_in_mb;
use crate::extractor::{ApiExtractor, DownloadReport, MediaVariant, VideoMetadata, VideoResponse};
use crate::utils::config::AppSettings;
use crate::utils::error::{FetchError, Result};
use crate::utils::filename::media_filename;
use crate::utils::paths::ensure_output_dir;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub struct VideoFetchClient {
    video_url: String,
    output_dir: PathBuf,
    extractor: ApiExtractor,
    engine: DownloadEngine,
    response: Option<VideoResponse>,
}

impl VideoFetchClient {
    /// Create a client with default settings.
    pub fn new(video_url: &str, output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_settings(video_url, output_dir, &AppSettings::default())
    }

    /// Create a client with explicit settings.
    ///
    /// The URL is validated before anything touches the filesystem; the output
    /// directory is then created with its parents if needed.
    pub fn with_settings(
        video_url: &str,
        output_dir: impl AsRef<Path>,
        settings: &AppSettings,
    ) -> Result<Self> {
        reqwest::Url::parse(video_url)
            .map_err(|e| FetchError::InvalidInput(format!("invalid URL {:?}: {}", video_url, e)))?;
        settings.validate()?;

        let output_dir = ensure_output_dir(output_dir.as_ref())?;

        Ok(Self {
            video_url: video_url.to_string(),
            output_dir,
            extractor: ApiExtractor::new(settings)?,
            engine: DownloadEngine::new(settings)?,
            response: None,
        })
    }

    /// The video page URL this client was built for
    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    /// Absolute directory downloads are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether a metadata fetch has succeeded
    pub fn is_fetched(&self) -> bool {
        self.response.is_some()
    }

    /// Query the metadata API and keep the response for later calls.
    pub async fn fetch_metadata(&mut self) -> Result<&VideoResponse> {
        let response = self.extractor.extract_info(&self.video_url).await?;
        Ok(&*self.response.insert(response))
    }

    /// Normalized metadata of the fetched video
    pub fn metadata(&self) -> Result<VideoMetadata> {
        Ok(VideoMetadata::from(self.fetched()?))
    }

    /// Normalized metadata as pretty-printed JSON
    pub fn get_metadata(&self) -> Result<String> {
        to_pretty_json(&self.metadata()?)
    }

    /// Download the highest-bitrate variant and return the result as JSON.
    pub async fn download_best(&mut self) -> Result<String> {
        let report = self.download_best_with_progress(None).await?;
        to_pretty_json(&report)
    }

    /// Download the highest-bitrate variant, optionally reporting progress.
    pub async fn download_best_with_progress(
        &mut self,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<DownloadReport> {
        let response = self
            .response
            .as_mut()
            .ok_or_else(|| not_fetched("download_best"))?;
        if response.medias.is_empty() {
            return Err(FetchError::NoContentError(
                "no formats available for download".to_string(),
            ));
        }

        rank_by_bitrate(&mut response.medias);
        let best = &response.medias[0];
        info!(
            "Selected variant {:?} at bitrate {}",
            best.label.as_deref().unwrap_or("unknown"),
            best.bitrate_value()
        );

        let media_url = best
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| FetchError::ProtocolError("selected variant has no URL".to_string()))?;

        let filename = media_filename(
            response.title.as_deref().unwrap_or(""),
            best.file_extension(),
        );
        let file_path = self.output_dir.join(filename);

        self.engine
            .download(media_url, &file_path, progress_tx)
            .await?;

        let size = tokio::fs::metadata(&file_path).await?.len();
        let file = tokio::fs::canonicalize(&file_path)
            .await
            .unwrap_or_else(|_| file_path.clone());
        debug!("Download finished: {:?} ({} bytes)", file, size);

        Ok(DownloadReport {
            downloaded: true,
            file: file.to_string_lossy().into_owned(),
            size_mb: size_in_mb(size),
            format: best.label.clone().unwrap_or_else(|| "unknown".to_string()),
        })
    }

    fn fetched(&self) -> Result<&VideoResponse> {
        self.response
            .as_ref()
            .ok_or_else(|| not_fetched("get_metadata"))
    }
}

/// Construct a client, fetch, and return the metadata JSON in one call.
///
/// Without `output_dir` the default download location is used.
pub async fn fetch_metadata_json(video_url: &str, output_dir: Option<&Path>) -> Result<String> {
    fetch_metadata_json_with(video_url, output_dir, &AppSettings::default()).await
}

/// [`fetch_metadata_json`] with explicit settings
pub async fn fetch_metadata_json_with(
    video_url: &str,
    output_dir: Option<&Path>,
    settings: &AppSettings,
) -> Result<String> {
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.download_location.clone());

    let mut client = VideoFetchClient::with_settings(video_url, dir, settings)?;
    client.fetch_metadata().await?;
    client.get_metadata()
}

/// Stable sort, highest bitrate first
pub fn rank_by_bitrate(medias: &mut [MediaVariant]) {
    medias.sort_by(|a, b| b.bitrate_value().total_cmp(&a.bitrate_value()));
}

/// Pretty JSON with four-space indentation; slashes are never escaped
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| FetchError::ProtocolError(e.to_string()))
}

fn not_fetched(operation: &str) -> FetchError {
    FetchError::StateError(format!(
        "{} called before fetch_metadata succeeded",
        operation
    ))
}
