//! Metadata extraction through the remote video API
//!
//! The API does the actual extraction work: it receives the page URL in a JSON POST
//! body and answers with the title, author, duration and the list of media variants.

use crate::extractor::models::VideoResponse;
use crate::utils::config::AppSettings;
use crate::utils::error::{FetchError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

/// Client for the metadata endpoint
#[derive(Debug, Clone)]
pub struct ApiExtractor {
    client: Client,
    endpoint: String,
}

impl ApiExtractor {
    /// Build an extractor from settings. The metadata request is bounded by
    /// `metadata_timeout_secs`.
    pub fn new(settings: &AppSettings) -> Result<Self> {
        if settings.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for metadata requests");
        }

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.metadata_timeout())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::NetworkError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.api_endpoint.clone(),
        })
    }

    /// Metadata endpoint requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `{"url": video_url}` and decode the answer.
    ///
    /// Anything but HTTP 200, a body that is not JSON, or a payload whose
    /// `success` flag is absent or falsy is a protocol error.
    pub async fn extract_info(&self, video_url: &str) -> Result<VideoResponse> {
        debug!("Requesting metadata for {} from {}", video_url, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExtractRequest { url: video_url })
            .send()
            .await
            .map_err(|e| {
                error!("Metadata request failed: {}", e);
                FetchError::NetworkError(format!("metadata request failed: {}", e))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Metadata endpoint answered HTTP {}", status);
            return Err(FetchError::ProtocolError(format!(
                "metadata endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkError(format!("failed to read metadata body: {}", e)))?;
        let video: VideoResponse = serde_json::from_slice(&body)?;

        if !video.success {
            error!("Metadata endpoint reported failure for {}", video_url);
            return Err(FetchError::ProtocolError(
                "API returned an unsuccessful response".to_string(),
            ));
        }

        info!(
            "Fetched metadata: {:?} ({} variants)",
            video.title.as_deref().unwrap_or(""),
            video.medias.len()
        );
        Ok(video)
    }
}
