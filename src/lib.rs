//! clipfetch library
//!
//! Thin client for a remote video-metadata API: look a video up, inspect its
//! variants, and stream the highest-bitrate one to disk.

pub mod client;
pub mod downloader;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use client::{fetch_metadata_json, fetch_metadata_json_with, VideoFetchClient};
pub use downloader::{DownloadEngine, DownloadProgress, DownloadStatus};
pub use extractor::{ApiExtractor, DownloadReport, MediaVariant, VideoMetadata, VideoResponse};
pub use utils::{AppSettings, ErrorKind, FetchError};
