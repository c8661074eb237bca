//! `list_mcps_from_smithery` and `list_mcp_from_web_search`.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    capabilities::{ToolHandler, ToolOutput},
    lib::errors::DispatchError,
    providers::{DiscoveryQuery, RegistryProvider, SearchProvider, DEFAULT_LIMIT},
};

pub const SMITHERY_TOOL: &str = "list_mcps_from_smithery";
pub const WEB_SEARCH_TOOL: &str = "list_mcp_from_web_search";

/// Input shared by both discovery tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiscoveryArgs {
    /// Free-text description of the MCP servers to look for.
    pub query: String,
    /// Accepted for compatibility; providers do not enforce it.
    #[serde(default = "default_limit")]
    #[schemars(range(min = 1))]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl DiscoveryArgs {
    pub fn parse(tool: &str, args: JsonObject) -> Result<DiscoveryQuery, DispatchError> {
        let parsed: DiscoveryArgs = serde_json::from_value(Value::Object(args))
            .map_err(|err| DispatchError::invalid_arguments(tool, err.to_string()))?;
        DiscoveryQuery::new(parsed.query, parsed.limit)
            .map_err(|_| DispatchError::invalid_arguments(tool, "`limit` must be at least 1"))
    }

    pub fn schema() -> JsonObject {
        match serde_json::to_value(schemars::schema_for!(DiscoveryArgs)) {
            Ok(Value::Object(map)) => map,
            _ => JsonObject::new(),
        }
    }
}

/// Pass-through lookup against the structured registry.
pub struct SmitheryTool {
    provider: Arc<dyn RegistryProvider>,
}

impl SmitheryTool {
    pub fn new(provider: Arc<dyn RegistryProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ToolHandler for SmitheryTool {
    fn description(&self) -> &str {
        "List MCP servers from the Smithery registry matching the query. \
         Returns the registry's first page of results unmodified."
    }

    fn input_schema(&self) -> JsonObject {
        DiscoveryArgs::schema()
    }

    async fn call(&self, args: JsonObject) -> Result<ToolOutput, DispatchError> {
        let query = DiscoveryArgs::parse(SMITHERY_TOOL, args)?;
        let payload = self.provider.search(&query).await?;
        Ok(ToolOutput::Structured(payload))
    }
}

/// Free-text lookup through the search-augmented model.
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl WebSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ToolHandler for WebSearchTool {
    fn description(&self) -> &str {
        "List the urls of the MCP servers that are related to the query, found through web search."
    }

    fn input_schema(&self) -> JsonObject {
        DiscoveryArgs::schema()
    }

    async fn call(&self, args: JsonObject) -> Result<ToolOutput, DispatchError> {
        let query = DiscoveryArgs::parse(WEB_SEARCH_TOOL, args)?;
        let text = self.provider.search(&query).await?;
        Ok(ToolOutput::Text(text))
    }
}
