use crate::discovery::{
    MCP_SERVER_PROMPT, SMITHERY_TOOL, SOURCES_URI, VALIDATE_SOURCES_TEMPLATE, WEB_SEARCH_TOOL,
};

pub const SERVER_NAME: &str = "MCP Discovery Server";

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions() -> String {
    format!(
        "This server helps you discover and find the best Model Context Protocol (MCP) servers.\n\
         Use the {SMITHERY_TOOL} tool to search the Smithery registry.\n\
         Use the {WEB_SEARCH_TOOL} tool to find MCP server urls through web search.\n\
         Read {SOURCES_URI} for the known sources and {VALIDATE_SOURCES_TEMPLATE} to check one.\n\
         Use the {MCP_SERVER_PROMPT} prompt to get guidance for a specific use case."
    )
}
