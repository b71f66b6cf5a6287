//! Error types for the upstream API clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Longest upstream error body kept in an error message
const MAX_BODY_LEN: usize = 200;

/// Errors that can occur when talking to an upstream API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint could not be reached or the transfer broke off
    #[error("endpoint unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with an unexpected status code
    #[error("endpoint returned status {status}: {message}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// The response body was not valid JSON
    #[error("response is not valid JSON: {0}")]
    Decode(String),

    /// The bot API accepted the request but refused to carry it out
    #[error("bot API rejected the request: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Create an upstream status error, truncating long bodies
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.len() > MAX_BODY_LEN {
            let mut end = MAX_BODY_LEN;
            while !message.is_char_boundary(end) {
                end -= 1;
            }
            message.truncate(end);
            message.push_str("...");
        }
        Self::UpstreamStatus { status, message }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UpstreamStatus { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::UpstreamStatus { status, .. } if *status >= 500)
    }
}
