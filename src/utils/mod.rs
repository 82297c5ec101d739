//! Utility modules for error handling, configuration and file naming

pub mod config;
pub mod error;
pub mod filename;
pub mod paths;

// Re-export for convenience
pub use config::AppSettings;
pub use error::{ErrorKind, FetchError, Result};
pub use filename::{media_filename, sanitize_filename};
pub use paths::{ensure_output_dir, get_downloads_dir};
