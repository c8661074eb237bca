//! Provider adapters for the Smithery registry and OpenAI web search.
//!
//! Adapters never consult the source directory; they only translate a
//! [`DiscoveryQuery`] into one outbound request and hand back the raw result.

pub mod retry;
pub mod smithery;
pub mod web_search;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use crate::lib::errors::{DispatchError, ProviderError};

pub use retry::RetryPolicy;
pub use smithery::SmitheryClient;
pub use web_search::OpenAiWebSearch;

pub const DEFAULT_LIMIT: u32 = 10;

/// Opaque structured payload returned verbatim by the registry adapter.
pub type RegistryResult = Value;

/// Unstructured text that may mention candidate URLs.
pub type SearchResult = String;

/// A single discovery request. `limit` is carried but not enforced by either provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryQuery {
    pub text: String,
    pub limit: u32,
}

impl DiscoveryQuery {
    pub fn new(text: impl Into<String>, limit: u32) -> Result<Self, DispatchError> {
        if limit == 0 {
            return Err(DispatchError::InvalidArguments {
                capability: "discovery_query".into(),
                message: "`limit` must be at least 1".into(),
            });
        }
        Ok(Self {
            text: text.into(),
            limit,
        })
    }
}

/// Structured catalog lookup.
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    async fn search(&self, query: &DiscoveryQuery) -> Result<RegistryResult, ProviderError>;
}

/// Generative search returning free-form text.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &DiscoveryQuery) -> Result<SearchResult, ProviderError>;
}

/// Build the shared reqwest client, applying the optional request timeout.
pub(crate) fn build_http_client(
    provider: &'static str,
    timeout: Option<Duration>,
) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|source| ProviderError::Network { provider, source })
}

/// Attach a bearer credential when one is configured.
pub(crate) fn authorize(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

/// Send `request` and classify any failure.
pub(crate) async fn send_checked(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<Response, ProviderError> {
    let response = request.send().await.map_err(|source| {
        tracing::warn!(
            target: "mcp_discovery::providers",
            provider,
            error = %source,
            "Provider request failed"
        );
        ProviderError::Network { provider, source }
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(
        target: "mcp_discovery::providers",
        provider,
        status = status.as_u16(),
        "Provider returned an error status"
    );
    let body = excerpt(&body);
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        Err(ProviderError::Authentication {
            provider,
            status: status.as_u16(),
            body,
        })
    } else {
        Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body,
        })
    }
}

const BODY_EXCERPT_LIMIT: usize = 512;

fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_LIMIT {
        return body.to_string();
    }
    body.chars().take(BODY_EXCERPT_LIMIT).collect()
}
