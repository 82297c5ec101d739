pub mod api;
pub mod models;

pub use api::ApiExtractor;
pub use models::{DownloadReport, FormatSummary, MediaVariant, VideoMetadata, VideoResponse};
