//! Error types for the generation API client

use thiserror::Error;

/// Fallback message used when a failed response carries no `error` field
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors that can occur when talking to the generation API
///
/// Every request is a single attempt: there is no retry, timeout or
/// circuit breaking at this layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("Request failed (status {status}): {message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Server-supplied `error` field, or [`GENERIC_ERROR_MESSAGE`]
        message: String,
    },

    /// The network was unreachable or the body could not be parsed
    #[error("Transport failed: {0}")]
    TransportFailed(String),

    /// A binary download answered with a non-2xx status
    #[error("Download failed (status {status})")]
    DownloadFailed {
        /// HTTP status code
        status: u16,
    },

    /// A 2xx envelope reported `success: false` or carried no `data`
    #[error("Empty response: {}", message.as_deref().unwrap_or("no data returned"))]
    EmptyResponse {
        /// Envelope `error` or `message` field, if any
        message: Option<String>,
    },

    /// A header value (e.g. the bearer token) could not be encoded
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// Message supplied by the server, when there was one
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { message, .. } if message != GENERIC_ERROR_MESSAGE => {
                Some(message)
            },
            Self::EmptyResponse { message } => message.as_deref(),
            _ => None,
        }
    }

    /// True for failures below the HTTP layer
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailed(_))
    }
}
