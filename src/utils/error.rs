//! Error handling for clipfetch

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, FetchError>;

/// Main error type for clipfetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Invalid state: {0}")]
    StateError(String),

    #[error("No content: {0}")]
    NoContentError(String),
}

/// Coarse classification of a [`FetchError`], stable for callers that match on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Storage,
    Network,
    Protocol,
    State,
    NoContent,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidInput(_) => ErrorKind::InvalidInput,
            FetchError::StorageError(_) => ErrorKind::Storage,
            FetchError::NetworkError(_) => ErrorKind::Network,
            FetchError::ProtocolError(_) => ErrorKind::Protocol,
            FetchError::StateError(_) => ErrorKind::State,
            FetchError::NoContentError(_) => ErrorKind::NoContent,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::NetworkError(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::ProtocolError(format!("malformed JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_storage() {
        let err: FetchError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn json_errors_map_to_protocol() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }
}
