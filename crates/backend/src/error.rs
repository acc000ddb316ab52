//! Backend client errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Connection refused, DNS failure, timeout, broken body stream.
    #[error("{0}")]
    Transport(String),

    /// A 200 response whose body is not what the endpoint promises.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::Transport(e.to_string())
    }
}
