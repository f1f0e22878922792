//! HTTP transport for the gateway
//!
//! `GenerationTransport` abstracts the POST so gateway tests can run against
//! `FakeTransport` fixtures instead of the network.

use async_trait::async_trait;

pub use crate::gateway::errors::TransportError;
pub use crate::gateway::transport_fake::{FakeTransport, RecordedCall};
pub use crate::gateway::transport_http::HttpTransport;

/// POST-a-JSON-body transport
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// POST `body` to `url` and return the 2xx response body
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError>;
}

/// Concrete transport enum
#[derive(Debug)]
pub enum Transport {
    Http(HttpTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl GenerationTransport for Transport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError> {
        match self {
            Transport::Http(t) => t.post_json(url, headers, body).await,
            Transport::Fake(t) => t.post_json(url, headers, body).await,
        }
    }
}

impl Transport {
    /// The fake transport, when one is installed
    pub fn as_fake(&self) -> Option<&FakeTransport> {
        match self {
            Transport::Fake(t) => Some(t),
            Transport::Http(_) => None,
        }
    }
}
