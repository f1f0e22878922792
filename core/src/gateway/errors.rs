//! Gateway error taxonomy
//!
//! - `GatewayError::Configuration`: the capability cannot be reached at all
//!   (missing credential). Fatal for every operation of the session.
//! - `GatewayError::Generation`: the call ran (or tried to) and produced
//!   nothing usable. `ValidationMismatch` is the sub-kind for JSON that
//!   parses but breaks the required-fields / enum contract.

/// HTTP transport errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Credential rejected (401 / 403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Quota exhausted (429)
    #[error("Rate limited{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<String> },

    /// Request body could not be encoded
    #[error("JSON error: {0}")]
    Json(String),
}

fn retry_hint(retry_after: &Option<String>) -> String {
    match retry_after {
        Some(after) => format!(" (retry after {})", after),
        None => String::new(),
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return TransportError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        TransportError::Network(err.to_string())
    }
}

/// The capability produced no usable payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("capability returned no text")]
    EmptyResponse,

    #[error("request blocked by the capability: {0}")]
    Blocked(String),

    #[error("response is not valid JSON: {0}")]
    Unparseable(String),

    #[error("response does not match the expected shape: {0}")]
    ValidationMismatch(String),

    #[error("no image part in the response")]
    NoImage,
}

/// Error returned by every gateway operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        GatewayError::Generation(GenerationFailure::Transport(err))
    }
}

/// Coarse error kind (for logs and tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Generation,
    ValidationMismatch,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Configuration(_) => ErrorKind::Configuration,
            GatewayError::Generation(GenerationFailure::ValidationMismatch(_)) => {
                ErrorKind::ValidationMismatch
            }
            GatewayError::Generation(_) => ErrorKind::Generation,
        }
    }

    pub fn is_validation_mismatch(&self) -> bool {
        self.kind() == ErrorKind::ValidationMismatch
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}
