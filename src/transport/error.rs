use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network request failed for {url}")]
    NetworkRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to read response body from {url}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// The HTTP status code, when the service answered with a failure status.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            UpstreamError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body, when the service answered with a failure status.
    pub fn body(&self) -> Option<&str> {
        match self {
            UpstreamError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}
