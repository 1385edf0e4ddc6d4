use http::StatusCode;
use thiserror::Error;

/// Failures surfaced by [`crate::client::NoclistClient`] and the retry executor.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A signed operation was attempted without the data it needs (token, path).
    /// Raised before any request is sent.
    #[error("precondition failed: {0}")]
    Precondition(&'static str),

    /// The server answered successfully but broke the expected contract.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Every allowed attempt came back with an error status.
    #[error("request to '{endpoint}' exceeded retry count ({retries} retries, last status {last_status})")]
    RetriesExhausted {
        endpoint: String,
        retries: u32,
        last_status: StatusCode,
    },

    /// Connection / transport failure. Never retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// `true` for the terminal retry-ceiling failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClientError::RetriesExhausted { .. })
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::Precondition(_))
    }
}
