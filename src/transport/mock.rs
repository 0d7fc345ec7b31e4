//! In-memory transport that replays canned responses and records every request.

use crate::transport::error::UpstreamError;
use crate::transport::{HttpTransport, TransportResponse};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub authorization: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.responses
            .lock()
            .unwrap()
            .push_back(TransportResponse::new(status, body));
        self
    }

    pub fn respond_json(self, body: &Value) -> Self {
        self.respond(200, body.to_string())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn replay(&self, request: RecordedRequest) -> Result<TransportResponse, UpstreamError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| panic!("unexpected request to {url}")))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(
        &self,
        url: &str,
        authorization: &HeaderValue,
    ) -> Result<TransportResponse, UpstreamError> {
        self.replay(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            authorization: authorization.to_str().unwrap_or_default().to_string(),
            body: None,
        })
    }

    async fn post_json(
        &self,
        url: &str,
        authorization: &HeaderValue,
        body: &Value,
    ) -> Result<TransportResponse, UpstreamError> {
        self.replay(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            authorization: authorization.to_str().unwrap_or_default().to_string(),
            body: Some(body.clone()),
        })
    }
}
