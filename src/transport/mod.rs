//! HTTP plumbing between [`crate::ObservationClient`] and the Observation Database.
//!
//! The client only ever talks to an [`HttpTransport`]. The default implementation,
//! [`ReqwestTransport`], wraps a `reqwest::Client`; any other implementation can be
//! injected through [`crate::ObservationClient::with_transport`].

pub mod error;
mod reqwest_transport;

#[cfg(test)]
pub(crate) mod mock;

use crate::transport::error::UpstreamError;
use async_trait::async_trait;
use log::warn;
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub use reqwest_transport::ReqwestTransport;

/// A fully received HTTP response: status code and the body as text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Turns a failure status into [`UpstreamError::HttpStatus`] and parses the body otherwise.
    pub(crate) fn into_json<T: DeserializeOwned>(self, url: &str) -> Result<T, UpstreamError> {
        if !self.status.is_success() {
            warn!("HTTP error for {}: status {}", url, self.status);
            return Err(UpstreamError::HttpStatus {
                url: url.to_string(),
                status: self.status,
                body: self.body,
            });
        }
        serde_json::from_str(&self.body).map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// The two HTTP calls the Observation Database API needs.
///
/// Implementations must return the response even for failure statuses; mapping
/// statuses to errors is done by the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(
        &self,
        url: &str,
        authorization: &HeaderValue,
    ) -> Result<TransportResponse, UpstreamError>;

    async fn post_json(
        &self,
        url: &str,
        authorization: &HeaderValue,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_into_json_success() {
        let response = TransportResponse::new(StatusCode::OK, r#"[{"a": 1}]"#);
        let parsed: Vec<Value> = response.into_json("http://test").unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_into_json_failure_status_keeps_body() {
        let response = TransportResponse::new(StatusCode::UNAUTHORIZED, "bad token");
        let err = response.into_json::<Vec<Value>>("http://test").unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.body(), Some("bad token"));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_into_json_bad_body() {
        let response = TransportResponse::new(StatusCode::OK, "<html>");
        let err = response.into_json::<Vec<Value>>("http://test").unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { .. }));
        assert_eq!(err.status(), None);
    }
}
