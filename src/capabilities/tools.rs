//! Tool handlers and their output shape.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::Value;

use crate::lib::errors::DispatchError;

/// Result of a tool invocation before it is wrapped into an MCP response.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Provider payload returned without alteration.
    Structured(Value),
    /// Free-form generated text.
    Text(String),
}

impl ToolOutput {
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            ToolOutput::Structured(value) => CallToolResult::structured(value),
            ToolOutput::Text(text) => CallToolResult::success(vec![Content::text(text)]),
        }
    }
}

/// A callable operation registered in the tool namespace.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn description(&self) -> &str;

    /// JSON schema describing the accepted arguments.
    fn input_schema(&self) -> JsonObject;

    async fn call(&self, args: JsonObject) -> Result<ToolOutput, DispatchError>;
}
