//! HTTP publisher and publisher selection from config.

use crate::api::MockApi;
use crate::error::{PublishError, ReelCoreError};
use crate::publish::Publisher;
use async_trait::async_trait;
use log::{debug, warn};
use reel_config::{ConfigError, PublisherConfig, PublisherKind};
use reel_protocol::{PostReceipt, PublishRequest};
use std::sync::Arc;
use std::time::Duration;

/// Publisher that POSTs each request as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPublisher {
    /// Build a publisher whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Publisher for HttpPublisher {
    async fn post(&self, request: PublishRequest) -> Result<PostReceipt, PublishError> {
        let publish = request.publish;
        debug!(
            "posting record (endpoint={}, publish={})",
            self.endpoint, publish
        );
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| PublishError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        if !status.is_success() {
            warn!(
                "endpoint rejected record (endpoint={}, status={})",
                self.endpoint,
                status.as_u16()
            );
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Endpoints are not required to answer with a receipt.
        Ok(serde_json::from_str::<PostReceipt>(&body)
            .unwrap_or_else(|_| PostReceipt::accepted(publish)))
    }
}

/// Build the publisher selected by `config`.
pub fn publisher_from_config(
    config: &PublisherConfig,
) -> Result<Arc<dyn Publisher>, ReelCoreError> {
    match config.kind {
        PublisherKind::Mock => Ok(Arc::new(MockApi::from_config(&config.mock))),
        PublisherKind::Http => {
            let endpoint = config
                .endpoint
                .clone()
                .ok_or(ConfigError::MissingEndpoint)?;
            let publisher =
                HttpPublisher::new(endpoint, Duration::from_millis(config.timeout_ms))?;
            Ok(Arc::new(publisher))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpPublisher, publisher_from_config};
    use crate::error::{PublishError, ReelCoreError};
    use crate::publish::Publisher;
    use pretty_assertions::assert_eq;
    use reel_config::{ConfigError, PublisherConfig, PublisherKind};
    use reel_protocol::{PublishRequest, Record};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single HTTP request with `status` and `body`, returning the
    /// raw request text once the response is written.
    async fn respond_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let read = socket.read(&mut chunk).await.expect("read");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
                if request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/api/movies"), server)
    }

    /// Headers have ended and `content-length` body bytes have arrived.
    fn request_complete(request: &[u8]) -> bool {
        let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= end + 4 + length
    }

    fn request(publish: bool) -> PublishRequest {
        let mut record = Record::default();
        record.title = "Arrival".to_string();
        PublishRequest::new(record, publish)
    }

    #[test]
    fn http_kind_without_endpoint_is_rejected() {
        let config = PublisherConfig {
            kind: PublisherKind::Http,
            ..PublisherConfig::default()
        };
        assert!(matches!(
            publisher_from_config(&config),
            Err(ReelCoreError::Config(ConfigError::MissingEndpoint))
        ));
    }

    #[test]
    fn http_kind_with_endpoint_builds() {
        let config = PublisherConfig {
            kind: PublisherKind::Http,
            endpoint: Some("http://127.0.0.1:9/api/movies".to_string()),
            ..PublisherConfig::default()
        };
        assert!(publisher_from_config(&config).is_ok());
    }

    #[test]
    fn default_config_uses_mock() {
        assert!(publisher_from_config(&PublisherConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn error_status_is_reported_as_rejected() {
        let (endpoint, server) = respond_once("500 Internal Server Error", "boom").await;
        let publisher = HttpPublisher::new(endpoint, Duration::from_secs(5)).expect("publisher");

        let result = publisher.post(request(false)).await;
        assert_eq!(
            result,
            Err(PublishError::Rejected {
                status: 500,
                body: "boom".to_string(),
            })
        );
        server.await.expect("server");
    }

    #[tokio::test]
    async fn success_without_receipt_body_is_accepted() {
        let (endpoint, server) = respond_once("200 OK", r#""ok""#).await;
        let publisher = HttpPublisher::new(endpoint, Duration::from_secs(5)).expect("publisher");

        let receipt = publisher.post(request(true)).await.expect("receipt");
        assert!(receipt.published);

        let sent = server.await.expect("server");
        assert!(sent.starts_with("POST /api/movies "));
        assert!(sent.contains(r#""publish":true"#));
        assert!(sent.contains(r#""title":"Arrival""#));
    }

    #[tokio::test]
    async fn success_with_receipt_body_is_passed_through() {
        let (endpoint, server) = respond_once(
            "201 Created",
            r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","received_at":"2024-01-01T00:00:00Z","published":false}"#,
        )
        .await;
        let publisher = HttpPublisher::new(endpoint, Duration::from_secs(5)).expect("publisher");

        let receipt = publisher.post(request(false)).await.expect("receipt");
        assert_eq!(
            receipt.id.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert!(!receipt.published);
        server.await.expect("server");
    }
}
