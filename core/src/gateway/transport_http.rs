//! Real HTTP transport using reqwest

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::gateway::errors::TransportError;
use crate::gateway::transport::GenerationTransport;
use crate::gateway::wire::ApiErrorBody;

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create transport with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError> {
        debug!(url, body_len = body.len(), "POST");

        let mut request = self.client.post(url);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.body(body.to_string()).send().await?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;
        debug!(status, response_len = text.len(), "response");

        if (200..300).contains(&status) {
            Ok(text)
        } else {
            Err(status_error(status, &text, retry_after))
        }
    }
}

/// Map a non-2xx status and its body to a transport error
///
/// The message is the API's `error.message` when the body carries the
/// standard error envelope, otherwise the raw body.
pub fn status_error(status: u16, body: &str, retry_after: Option<String>) -> TransportError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 => TransportError::Authentication(message),
        429 => TransportError::RateLimited { retry_after },
        _ => TransportError::Http { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_auth() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            status_error(403, body, None),
            TransportError::Authentication("API key not valid".to_string())
        );
        assert!(matches!(
            status_error(401, "", None),
            TransportError::Authentication(_)
        ));
    }

    #[test]
    fn test_status_error_rate_limited() {
        assert_eq!(
            status_error(429, "{}", Some("17".to_string())),
            TransportError::RateLimited {
                retry_after: Some("17".to_string())
            }
        );
    }

    #[test]
    fn test_status_error_other_uses_raw_body() {
        assert_eq!(
            status_error(503, " overloaded ", None),
            TransportError::Http {
                status: 503,
                message: "overloaded".to_string()
            }
        );
    }

    #[test]
    fn test_new_transport_keeps_timeout() {
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(5));
    }
}
