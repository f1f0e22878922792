//! AI Gateway
//!
//! Typed front for the generation capability. Every operation has the same
//! shape: render a prompt, call the capability with an output contract,
//! validate, and return either a typed value or a typed failure.

pub mod errors;
pub mod parse;
pub mod prompts;
pub mod schema;
pub mod transport;
pub mod transport_fake;
pub mod transport_http;
pub mod wire;

pub use errors::{ErrorKind, GatewayError, GenerationFailure, TransportError};
pub use transport::{FakeTransport, GenerationTransport, HttpTransport, RecordedCall, Transport};

use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{ArchitectConfig, ModelConfig, DEFAULT_BASE_URL};
use crate::listing::{AppListing, IconRef};
use crate::types::{AuditIssue, OptimizationResult};
use wire::{GenerateContentRequest, GenerateContentResponse};

/// Connection settings for the gateway
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub models: ModelConfig,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            models: ModelConfig::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GatewayConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl From<&ArchitectConfig> for GatewayConfig {
    fn from(config: &ArchitectConfig) -> Self {
        Self {
            api_key: config
                .provider
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            base_url: config.provider.base_url.trim_end_matches('/').to_string(),
            models: config.models.clone(),
            timeout: Duration::from_secs(config.provider.timeout_seconds),
        }
    }
}

/// Gateway to the generation capability
#[derive(Debug)]
pub struct Gateway {
    config: GatewayConfig,
    transport: Transport,
}

impl Gateway {
    /// Create a gateway backed by the HTTP transport
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let transport = HttpTransport::new(config.timeout)
            .map_err(|e| GatewayError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self::with_transport(config, Transport::Http(transport)))
    }

    /// Create a gateway with an explicit transport (tests use `Transport::Fake`)
    pub fn with_transport(config: GatewayConfig, transport: Transport) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Whether a credential is present
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn credential(&self) -> Result<&str, GatewayError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            GatewayError::Configuration(
                "no API key configured (set API_KEY or provider.api_key)".to_string(),
            )
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    /// Send one generateContent request and decode the envelope
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let key = self.credential()?;
        let body = serde_json::to_string(request)
            .map_err(|e| TransportError::Json(e.to_string()))?;
        let request_id = Uuid::new_v4();
        debug!(%request_id, model, request_len = body.len(), "generateContent");

        let headers = [("x-goog-api-key", key), ("Content-Type", "application/json")];
        let text = self
            .transport
            .post_json(&self.endpoint(model), &headers, &body)
            .await?;
        debug!(%request_id, response_len = text.len(), "generateContent response");

        serde_json::from_str(&text)
            .map_err(|e| GenerationFailure::Unparseable(e.to_string()).into())
    }

    /// Answer text of a response, or why there is none
    fn require_text(response: &GenerateContentResponse) -> Result<String, GenerationFailure> {
        match response.text() {
            Some(text) => Ok(text),
            None => Err(match response.block_reason() {
                Some(reason) => GenerationFailure::Blocked(reason.to_string()),
                None => GenerationFailure::EmptyResponse,
            }),
        }
    }

    /// Draft title and descriptions
    ///
    /// `app_name_or_idea` may be empty. No length limit is enforced on the
    /// result.
    pub async fn generate_metadata(
        &self,
        app_name_or_idea: &str,
        keywords: &str,
        tone: &str,
    ) -> Result<OptimizationResult, GatewayError> {
        let model = self.config.models.metadata.clone();
        info!(operation = "generate_metadata", model = %model, "gateway call");

        let request = GenerateContentRequest::structured(
            prompts::metadata_prompt(app_name_or_idea, keywords, tone),
            schema::optimization_schema(),
        );

        let result = async {
            let response = self.generate(&model, &request).await?;
            let text = Self::require_text(&response)?;
            Ok::<_, GatewayError>(parse::parse_optimization(&text)?)
        }
        .await;

        log_outcome("generate_metadata", &result);
        result
    }

    /// Generate an app icon image
    pub async fn generate_icon(
        &self,
        description: &str,
        style: &str,
    ) -> Result<IconRef, GatewayError> {
        let model = self.config.models.icon.clone();
        info!(operation = "generate_icon", model = %model, "gateway call");

        let request = GenerateContentRequest::prompt(prompts::icon_prompt(description, style));

        let result = async {
            let response = self.generate(&model, &request).await?;
            match wire::find_first_image(&response.candidates) {
                Some(image) => Ok::<_, GatewayError>(IconRef::from_inline(
                    &image.mime_type,
                    &image.data,
                )),
                None => Err(match response.block_reason() {
                    Some(reason) => GenerationFailure::Blocked(reason.to_string()),
                    None => GenerationFailure::NoImage,
                }
                .into()),
            }
        }
        .await;

        log_outcome("generate_icon", &result);
        result
    }

    /// Policy / ASO audit of a listing snapshot
    ///
    /// An empty list means no issues. A response without text is a failure,
    /// never an empty list.
    pub async fn audit_listing(
        &self,
        listing: &AppListing,
    ) -> Result<Vec<AuditIssue>, GatewayError> {
        let model = self.config.models.audit.clone();
        info!(operation = "audit_listing", model = %model, "gateway call");

        let request =
            GenerateContentRequest::structured(prompts::audit_prompt(listing), schema::audit_schema());

        let result = async {
            let response = self.generate(&model, &request).await?;
            let text = Self::require_text(&response)?;
            Ok::<_, GatewayError>(parse::parse_audit(&text)?)
        }
        .await;

        log_outcome("audit_listing", &result);
        result
    }
}

fn log_outcome<T>(operation: &str, result: &Result<T, GatewayError>) {
    match result {
        Ok(_) => debug!(operation, "gateway call succeeded"),
        Err(GatewayError::Generation(GenerationFailure::ValidationMismatch(detail))) => {
            warn!(operation, detail = %detail, "response failed validation")
        }
        Err(e) => warn!(operation, error = %e, "gateway call failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_gateway(reply: &str) -> Gateway {
        Gateway::with_transport(
            GatewayConfig::default().with_api_key("test-key"),
            Transport::Fake(FakeTransport::new(reply)),
        )
    }

    #[test]
    fn test_config_from_architect_config() {
        let mut config = ArchitectConfig::default();
        config.provider.base_url = "http://localhost:8080/v1/".to_string();
        config.provider.api_key = Some("  ".to_string());
        config.provider.timeout_seconds = 5;

        let gateway_config = GatewayConfig::from(&config);
        assert_eq!(gateway_config.base_url, "http://localhost:8080/v1");
        assert_eq!(gateway_config.api_key, None);
        assert_eq!(gateway_config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_endpoint() {
        let gateway = fake_gateway("{}");
        assert_eq!(
            gateway.endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unparseable_envelope() {
        let gateway = fake_gateway("<html>oops</html>");
        let err = gateway.audit_listing(&AppListing::new()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Generation(GenerationFailure::Unparseable(_))
        ));
    }

    #[tokio::test]
    async fn test_blocked_prompt() {
        let gateway = fake_gateway(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = gateway.generate_metadata("x", "", "Fun").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::Generation(GenerationFailure::Blocked("SAFETY".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_generation_failure() {
        let gateway = Gateway::with_transport(
            GatewayConfig::default().with_api_key("k"),
            Transport::Fake(FakeTransport::with_error(TransportError::RateLimited {
                retry_after: None,
            })),
        );
        let err = gateway.generate_icon("", "Pixel Art").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generation);
    }
}
