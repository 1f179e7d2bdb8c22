//! Pass-through client for the external visual-search API
//!
//! The multipart body received from the browser is forwarded byte for byte,
//! together with its `Content-Type` (and therefore its boundary). Whatever
//! JSON comes back is returned along with the upstream status code.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::UpstreamConfig;

/// Failures that prevented a usable upstream reply.
///
/// A non-2xx upstream status with a JSON body is *not* an error here; it is
/// returned as an [`UpstreamReply`] so the status can be relayed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never completed (DNS, connect, TLS, reset, timeout)
    #[error("Upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The upstream answered, but not with JSON
    #[error("Upstream returned a non-JSON body with status {status}: {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// Short machine-readable tag used in proxy error headers
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "upstream-unreachable",
            Self::InvalidBody { .. } => "upstream-invalid-body",
        }
    }
}

/// A completed upstream exchange
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Forwards uploads to the configured search endpoint
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: String,
}

impl UpstreamClient {
    /// Build the HTTP client. Fails only at startup, never per request.
    pub fn new(config: &UpstreamConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        info!("Upstream search endpoint: {}", config.endpoint);

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `body` unchanged and decode the JSON reply.
    pub async fn forward(
        &self,
        content_type: Option<&str>,
        body: Bytes,
    ) -> Result<UpstreamReply, UpstreamError> {
        debug!(
            "Forwarding {} bytes to {} (content-type: {:?})",
            body.len(),
            self.endpoint,
            content_type
        );

        let mut request = self.client.post(&self.endpoint).body(body);
        if let Some(ct) = content_type {
            request = request.header(CONTENT_TYPE, ct);
        }

        let response = request.send().await.map_err(UpstreamError::Unreachable)?;
        let status = response.status().as_u16();
        let raw = response.bytes().await.map_err(UpstreamError::Unreachable)?;

        let body = serde_json::from_slice(&raw)
            .map_err(|source| UpstreamError::InvalidBody { status, source })?;

        debug!("Upstream replied with status {}", status);
        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(endpoint: String) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            endpoint,
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn forwards_body_and_content_type_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("content-type", "multipart/form-data; boundary=xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [], "caption": "a red chair"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(format!("{}/search", server.uri()));
        let body = Bytes::from_static(b"--xyz\r\nraw multipart\r\n--xyz--\r\n");
        let reply = client
            .forward(Some("multipart/form-data; boundary=xyz"), body.clone())
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["caption"], "a red chair");

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].body, body.to_vec());
    }

    #[tokio::test]
    async fn relays_error_status_with_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(serde_json::json!({"error": "no product found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(format!("{}/search", server.uri()));
        let reply = client.forward(None, Bytes::new()).await.unwrap();
        assert_eq!(reply.status, 422);
        assert_eq!(reply.body["error"], "no product found");
    }

    #[tokio::test]
    async fn non_json_body_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let client = client_for(format!("{}/search", server.uri()));
        let err = client.forward(None, Bytes::new()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBody { status: 500, .. }));
        assert_eq!(err.kind(), "upstream-invalid-body");
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/search", addr));
        let err = client.forward(None, Bytes::new()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unreachable(_)), "got {:?}", err);
        assert_eq!(err.kind(), "upstream-unreachable");
    }

    #[test]
    fn builds_with_configured_timeout() {
        let client = UpstreamClient::new(&UpstreamConfig {
            timeout_secs: Some(5),
            ..UpstreamConfig::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), UpstreamConfig::default().endpoint);
    }
}
