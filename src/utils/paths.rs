//! Download directory resolution
//!
//! Defaults come from the platform Downloads directory. Every output directory handed
//! to a client is made absolute before use.

use crate::utils::error::{FetchError, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the default downloads directory.
///
/// Returns: `<platform Downloads>/clipfetch`, or `./downloads` when the platform
/// lookup fails.
pub fn get_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .map(|dir| dir.join("clipfetch"))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using ./downloads");
            PathBuf::from("./downloads")
        })
}

/// Make `dir` absolute and create it (with parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    let absolute = dir
        .absolutize()
        .map_err(|e| FetchError::StorageError(format!("cannot resolve {}: {}", dir.display(), e)))?
        .into_owned();

    if !absolute.is_dir() {
        std::fs::create_dir_all(&absolute).map_err(|e| {
            FetchError::StorageError(format!(
                "failed to create download directory {}: {}",
                absolute.display(),
                e
            ))
        })?;
        debug!("Created download directory: {:?}", absolute);
    }

    Ok(absolute)
}
