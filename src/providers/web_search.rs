//! OpenAI Responses API adapter using the `web_search_preview` tool.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{lib::errors::ProviderError, server::config::WebSearchSection};

use super::{
    authorize, build_http_client, send_checked, DiscoveryQuery, RetryPolicy, SearchProvider,
    SearchResult,
};

pub const PROVIDER: &str = "web_search";

const WEB_SEARCH_TOOL: &str = "web_search_preview";

/// Asks a search-augmented model for MCP server URLs.
#[derive(Clone)]
pub struct OpenAiWebSearch {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    tools: [ToolSpec; 1],
    input: String,
}

#[derive(Debug, Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    /// Concatenate every `output_text` part of every message item.
    fn into_text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }
        self.output
            .into_iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}

/// The single instruction sent to the model for `query`.
pub fn build_instruction(query: &DiscoveryQuery) -> String {
    format!(
        "List the urls of the mcp servers that are related to {}",
        query.text
    )
}

impl OpenAiWebSearch {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client(PROVIDER, None)?,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            retry: RetryPolicy::none(),
        })
    }

    pub fn from_config(
        section: &WebSearchSection,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client(PROVIDER, section.timeout)?,
            base_url: section.base_url.clone(),
            model: section.model.clone(),
            api_key,
            retry: RetryPolicy::new(section.max_retries),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }

    async fn search_once(&self, query: &DiscoveryQuery) -> Result<SearchResult, ProviderError> {
        let body = ResponsesRequest {
            model: &self.model,
            tools: [ToolSpec {
                kind: WEB_SEARCH_TOOL,
            }],
            input: build_instruction(query),
        };
        let request = self.http_client.post(self.responses_url()).json(&body);
        let response = send_checked(PROVIDER, authorize(request, self.api_key.as_deref())).await?;

        let reply: ResponsesReply = response.json().await.map_err(|err| ProviderError::Decode {
            provider: PROVIDER,
            message: err.to_string(),
        })?;
        Ok(reply.into_text())
    }
}

#[async_trait]
impl SearchProvider for OpenAiWebSearch {
    async fn search(&self, query: &DiscoveryQuery) -> Result<SearchResult, ProviderError> {
        debug!(
            target: "mcp_discovery::providers",
            provider = PROVIDER,
            model = %self.model,
            query = %query.text,
            limit = query.limit,
            "Querying web search model"
        );
        self.retry.run(|| self.search_once(query)).await
    }
}
