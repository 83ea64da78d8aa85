/// Error types shared across the WCA crates.
///
/// These errors represent failures talking to the WCA website API. Application-specific
/// errors are defined in each binary crate and wrap `CommonError` via `#[from]`.
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} body={body}")]
    Upstream { status: StatusCode, body: String },
}

impl CommonError {
    /// True when the request was cut off by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CommonError::Request(e) if e.is_timeout())
    }
}
