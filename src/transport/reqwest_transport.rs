use crate::config::error::ConfigError;
use crate::config::ClientConfig;
use crate::transport::error::UpstreamError;
use crate::transport::{HttpTransport, TransportResponse};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};

/// [`HttpTransport`] backed by an async `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Wraps an already configured `reqwest::Client`.
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Builds a client with the timeout and user agent from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ConfigError::ClientBuild)?;
        Ok(Self::new(http))
    }

    async fn execute(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> Result<TransportResponse, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|source| UpstreamError::NetworkRequest {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::BodyRead {
                url: url.to_string(),
                source,
            })?;
        debug!("{} answered {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        authorization: &HeaderValue,
    ) -> Result<TransportResponse, UpstreamError> {
        let request = self.http.get(url).header(AUTHORIZATION, authorization.clone());
        self.execute(url, request).await
    }

    async fn post_json(
        &self,
        url: &str,
        authorization: &HeaderValue,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, UpstreamError> {
        let request = self
            .http
            .post(url)
            .header(AUTHORIZATION, authorization.clone())
            .json(body);
        self.execute(url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// A request as it arrived on the socket.
    struct CapturedRequest {
        head: String,
        body: String,
    }

    impl CapturedRequest {
        fn request_line(&self) -> &str {
            self.head.lines().next().unwrap_or_default()
        }

        fn header(&self, name: &str) -> Option<&str> {
            self.head.lines().skip(1).find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
            })
        }
    }

    /// Accepts a single connection, records the request and answers with `status` and `reply`.
    async fn serve_once(
        status: &'static str,
        reply: &'static str,
    ) -> (String, JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 1024];
            let head_end = loop {
                let read = socket.read(&mut chunk).await.unwrap();
                assert!(read > 0, "connection closed before the headers were complete");
                buffer.extend_from_slice(&chunk[..read]);
                if let Some(end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                    break end;
                }
            };

            let mut captured = CapturedRequest {
                head: String::from_utf8_lossy(&buffer[..head_end]).to_string(),
                body: String::new(),
            };
            let content_length: usize = captured
                .header("content-length")
                .and_then(|value| value.parse().ok())
                .unwrap_or(0);
            let mut body = buffer[head_end + 4..].to_vec();
            while body.len() < content_length {
                let read = socket.read(&mut chunk).await.unwrap();
                assert!(read > 0, "connection closed before the body was complete");
                body.extend_from_slice(&chunk[..read]);
            }
            captured.body = String::from_utf8(body).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            captured
        });

        (url, handle)
    }

    fn transport_for(url: &str) -> (ReqwestTransport, HeaderValue) {
        let config = ClientConfig::builder()
            .api_key("k")
            .base_url(url)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let transport = ReqwestTransport::from_config(&config).unwrap();
        (transport, config.authorization().unwrap())
    }

    #[tokio::test]
    async fn test_get_sends_bearer_header() {
        let (url, server) = serve_once("200 OK", "[]").await;
        let (transport, authorization) = transport_for(&url);

        let response = transport
            .get(&format!("{}/Api/Datasets", url), &authorization)
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.body, "[]");
        assert_eq!(request.request_line(), "GET /Api/Datasets HTTP/1.1");
        assert_eq!(request.header("authorization"), Some("Bearer k"));
        assert!(request
            .header("user-agent")
            .is_some_and(|agent| agent.starts_with("saeon-obs-rs/")));
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_post_json_sends_json_body() {
        let (url, server) = serve_once("200 OK", "[]").await;
        let (transport, authorization) = transport_for(&url);
        let body = json!({"startDate": "2020-12-01T00:00:00", "endDate": "2020-12-07T00:00:00"});

        let response = transport
            .post_json(
                &format!("{}/Api/Datasets/ds-1/Observations", url),
                &authorization,
                &body,
            )
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(
            request.request_line(),
            "POST /Api/Datasets/ds-1/Observations HTTP/1.1"
        );
        assert_eq!(request.header("authorization"), Some("Bearer k"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(serde_json::from_str::<Value>(&request.body).unwrap(), body);
    }

    #[tokio::test]
    async fn test_failure_status_is_returned_with_body() {
        let (url, server) = serve_once("500 Internal Server Error", "boom").await;
        let (transport, authorization) = transport_for(&url);

        let response = transport
            .post_json(
                &format!("{}/x/Observations", url),
                &authorization,
                &json!({}),
            )
            .await
            .unwrap();
        server.await.unwrap();

        assert_eq!(response.status.as_u16(), 500);
        assert_eq!(response.body, "boom");
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/Api/Datasets", listener.local_addr().unwrap());
        drop(listener);
        let (transport, authorization) = transport_for(&url);

        let err = transport.get(&url, &authorization).await.unwrap_err();

        assert!(matches!(
            err,
            UpstreamError::NetworkRequest { url: ref failed, .. } if *failed == url
        ));
    }
}
