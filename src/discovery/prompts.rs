//! `prompt_for_mcp_server`: a user message steering the agent to both discovery tools.

use rmcp::model::JsonObject;

use crate::{
    capabilities::{required_string_argument, Message, PromptArgumentSpec, PromptHandler},
    discovery::tools::{SMITHERY_TOOL, WEB_SEARCH_TOOL},
    lib::errors::DispatchError,
};

pub const MCP_SERVER_PROMPT: &str = "prompt_for_mcp_server";

/// Advisory message pointing an agent at both discovery tools.
pub fn prompt_for_mcp_server(query: &str) -> Message {
    Message::user(format!(
        "You are a helpful assistant that helps the user find the best Model Context Protocol (MCP) servers for {query}.\n\
         You will need to use the {SMITHERY_TOOL} tool to find the best MCP servers.\n\
         You will need to use the {WEB_SEARCH_TOOL} tool to find the best MCP servers."
    ))
}

pub struct McpServerPrompt;

impl PromptHandler for McpServerPrompt {
    fn description(&self) -> &str {
        "Find the best MCP servers for a given query."
    }

    fn arguments(&self) -> Vec<PromptArgumentSpec> {
        vec![PromptArgumentSpec {
            name: "query",
            description: "What the MCP servers should help with",
            required: true,
        }]
    }

    fn render(&self, args: &JsonObject) -> Result<Message, DispatchError> {
        let query = required_string_argument(MCP_SERVER_PROMPT, args, "query")?;
        Ok(prompt_for_mcp_server(query))
    }
}
