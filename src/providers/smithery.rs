//! Smithery registry adapter.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{lib::errors::ProviderError, server::config::SmitherySection};

use super::{
    authorize, build_http_client, send_checked, DiscoveryQuery, RegistryProvider, RegistryResult,
    RetryPolicy,
};

pub const PROVIDER: &str = "smithery";

/// Only the first page is ever requested.
const FIRST_PAGE: u32 = 1;

/// Looks up MCP servers in the Smithery registry.
#[derive(Clone)]
pub struct SmitheryClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl SmitheryClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client(PROVIDER, None)?,
            base_url: base_url.into(),
            api_key,
            retry: RetryPolicy::none(),
        })
    }

    pub fn from_config(
        section: &SmitherySection,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client(PROVIDER, section.timeout)?,
            base_url: section.base_url.clone(),
            api_key,
            retry: RetryPolicy::new(section.max_retries),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn servers_url(&self) -> String {
        format!("{}/servers", self.base_url.trim_end_matches('/'))
    }

    async fn search_once(&self, query: &DiscoveryQuery) -> Result<RegistryResult, ProviderError> {
        let request = self
            .http_client
            .get(self.servers_url())
            .query(&[("q", query.text.as_str())])
            .query(&[("page", FIRST_PAGE)]);
        let response = send_checked(PROVIDER, authorize(request, self.api_key.as_deref())).await?;

        response
            .json::<RegistryResult>()
            .await
            .map_err(|err| ProviderError::Decode {
                provider: PROVIDER,
                message: err.to_string(),
            })
    }
}

#[async_trait]
impl RegistryProvider for SmitheryClient {
    async fn search(&self, query: &DiscoveryQuery) -> Result<RegistryResult, ProviderError> {
        debug!(
            target: "mcp_discovery::providers",
            provider = PROVIDER,
            query = %query.text,
            limit = query.limit,
            authenticated = self.api_key.is_some(),
            "Querying Smithery registry"
        );
        self.retry.run(|| self.search_once(query)).await
    }
}
