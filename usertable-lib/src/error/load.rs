//! Load error types

/// Errors that can occur while fetching or decoding the record payload.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// HTTP error response from the endpoint.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload is not a JSON array of records.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading a local payload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl LoadError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }
}
