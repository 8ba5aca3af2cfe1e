use thiserror::Error;

/// Failures talking to the diagnostic backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}
