//! Client Connection
//!
//! HTTP transport to a running proxy's `POST /api/search`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{ClientError, SearchReply, SearchRequest, SearchTransport};
use crate::http::types::PROXY_ERROR_HEADER;

/// Error body returned by the server on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the proxy's search endpoint
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    search_url: String,
}

impl ProxyClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`)
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            search_url: format!("{}/api/search", base_url.trim_end_matches('/')),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl SearchTransport for ProxyClient {
    async fn send(&self, request: &SearchRequest) -> Result<SearchReply, ClientError> {
        let form = request.to_form()?;

        debug!(
            "POST {} ({} bytes, field {})",
            self.search_url,
            request.image.size(),
            request.image_field()
        );

        let response = self
            .client
            .post(&self.search_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        // Failures raised by the proxy itself carry no user-facing text
        let proxy_failure = response.headers().contains_key(PROXY_ERROR_HEADER);
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = if proxy_failure {
                None
            } else {
                serde_json::from_slice::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.error)
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        SearchReply::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SearchFields;
    use crate::upload::UploadedImage;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(fields: SearchFields) -> SearchRequest {
        SearchRequest {
            ticket: 1,
            image: UploadedImage::new(b"\x89PNG".to_vec(), "image/png", "a.png"),
            fields,
        }
    }

    #[test]
    fn search_url_is_joined_once() {
        let client = ProxyClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.search_url(), "http://localhost:3000/api/search");
    }

    #[tokio::test]
    async fn sends_multipart_with_expected_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "1", "title": "Lamp"}],
                "caption": "a lamp"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri()).unwrap();
        let reply = client
            .send(&request(SearchFields::Passthrough { caption: Some("desk lamp".into()) }))
            .await
            .unwrap();
        assert_eq!(reply.items[0].title, "Lamp");
        assert_eq!(reply.caption.as_deref(), Some("a lamp"));

        let received = server.received_requests().await.unwrap();
        let content_type = received[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&received[0].body);
        assert!(body.contains(r#"name="file""#));
        assert!(body.contains(r#"name="caption""#));
        assert!(body.contains("desk lamp"));
        assert!(!body.contains(r#"name="page""#));
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "No image provided"})),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri()).unwrap();
        let err = client
            .send(&request(SearchFields::Catalog { page: 1 }))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::Status { status: 400, message: Some("No image provided".into()) }
        );
    }

    #[tokio::test]
    async fn proxy_failure_hides_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502)
                    .insert_header(PROXY_ERROR_HEADER, "upstream-unreachable")
                    .set_body_json(serde_json::json!({"error": "Search service is unavailable."})),
            )
            .mount(&server)
            .await;

        let client = ProxyClient::new(&server.uri()).unwrap();
        let err = client
            .send(&request(SearchFields::Passthrough { caption: None }))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Status { status: 502, message: None });
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ProxyClient::new(&format!("http://{}", addr)).unwrap();
        let err = client
            .send(&request(SearchFields::Catalog { page: 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
