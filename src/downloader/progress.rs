//! Progress tracking for downloads

use std::time::Duration;

/// Progress tracking structure
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    pub total_bytes: u64, // 0 when the server sent no Content-Length
    pub downloaded_bytes: u64,
    pub speed: f64, // bytes per second
    pub eta: Option<Duration>,
    pub status: DownloadStatus,
}

impl DownloadProgress {
    /// Create a new progress tracker
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            downloaded_bytes: 0,
            speed: 0.0,
            eta: None,
            status: DownloadStatus::Initializing,
        }
    }

    /// Update progress with new data
    pub fn update(&mut self, downloaded_bytes: u64, speed: f64) {
        self.downloaded_bytes = downloaded_bytes;
        self.speed = speed;
        self.status = DownloadStatus::Downloading;

        if self.total_bytes == 0 {
            self.eta = None;
        } else if speed > 0.0 && self.downloaded_bytes < self.total_bytes {
            let remaining = self.total_bytes - self.downloaded_bytes;
            self.eta = Some(Duration::from_secs_f64((remaining as f64) / speed));
        } else if self.downloaded_bytes >= self.total_bytes {
            self.eta = Some(Duration::from_secs(0));
        } else {
            self.eta = None;
        }
    }

    /// Mark as completed
    pub fn complete(&mut self) {
        self.status = DownloadStatus::Completed;
        self.total_bytes = self.total_bytes.max(self.downloaded_bytes);
        self.eta = Some(Duration::from_secs(0));
    }

    /// Mark as failed
    pub fn failed(&mut self, error: String) {
        self.status = DownloadStatus::Failed(error);
    }

    /// Get progress percentage (0.0 to 1.0)
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.downloaded_bytes as f64 / self.total_bytes as f64
    }
}

/// Download status
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DownloadStatus {
    #[default]
    Initializing,
    Downloading,
    Completed,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_progress_new() {
        let progress = DownloadProgress::new(1000);

        assert_eq!(progress.total_bytes, 1000);
        assert_eq!(progress.downloaded_bytes, 0);
        assert_eq!(progress.eta, None);
        assert_eq!(progress.status, DownloadStatus::Initializing);
    }

    #[test]
    fn test_progress_update_basic() {
        let mut progress = DownloadProgress::new(1000);
        progress.update(500, 100.0);

        assert_eq!(progress.status, DownloadStatus::Downloading);
        assert_eq!(
            progress.eta.unwrap().as_secs(),
            5,
            "ETA should be 5 seconds (500 bytes remaining at 100 B/s)"
        );
    }

    #[test]
    fn test_progress_unknown_total() {
        let mut progress = DownloadProgress::new(0);
        progress.update(4096, 1024.0);

        assert_eq!(progress.eta, None);
        assert_eq!(progress.percentage(), 0.0);

        progress.complete();
        assert_eq!(progress.total_bytes, 4096);
        assert_eq!(progress.downloaded_bytes, 4096);
        assert_eq!(progress.percentage(), 1.0);
    }

    #[test]
    fn test_progress_failed() {
        let mut progress = DownloadProgress::new(10);
        progress.failed("connection reset".to_string());
        assert_eq!(
            progress.status,
            DownloadStatus::Failed("connection reset".to_string())
        );
    }
}
