//! Download engine module

pub mod engine;
pub mod progress;

// Re-export for convenience
pub use engine::DownloadEngine;
pub use progress::{DownloadProgress, DownloadStatus};
