use reqwest::StatusCode;
use thiserror::Error;

/// Failures a remote call can produce.
///
/// The controller handles all three locally; none of them propagate to the
/// user interface. Transport failures on add/delete are logged and dropped,
/// any failure on a list fetch resets the snapshot to empty.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(StatusCode),
    #[error("response body was not valid JSON: {0}")]
    Shape(#[from] serde_json::Error),
}

impl ApiError {
    /// True for network-level failures (unreachable host, connection reset).
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
