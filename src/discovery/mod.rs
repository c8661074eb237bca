//! The discovery capabilities and their registration into a [`CapabilityRegistry`].

pub mod prompts;
pub mod resources;
pub mod sources;
pub mod tools;

use std::sync::Arc;

use crate::{
    capabilities::CapabilityRegistry,
    lib::errors::TemplateError,
    providers::{RegistryProvider, SearchProvider},
};

pub use prompts::{prompt_for_mcp_server, McpServerPrompt, MCP_SERVER_PROMPT};
pub use resources::{
    ListSourcesResource, ValidateSourceResource, SOURCES_URI, VALIDATE_SOURCES_TEMPLATE,
};
pub use sources::{SourceDirectory, ValidationResult, ValidationStatus};
pub use tools::{DiscoveryArgs, SmitheryTool, WebSearchTool, SMITHERY_TOOL, WEB_SEARCH_TOOL};

/// Register every discovery tool, resource and prompt against the injected providers.
pub fn build_registry(
    registry_provider: Arc<dyn RegistryProvider>,
    search_provider: Arc<dyn SearchProvider>,
) -> Result<CapabilityRegistry, TemplateError> {
    let directory = SourceDirectory::new();
    let mut registry = CapabilityRegistry::new();

    registry.register_tool(SMITHERY_TOOL, Arc::new(SmitheryTool::new(registry_provider)));
    registry.register_tool(WEB_SEARCH_TOOL, Arc::new(WebSearchTool::new(search_provider)));

    registry.register_resource(SOURCES_URI, Arc::new(ListSourcesResource::new(directory)))?;
    registry.register_resource(
        VALIDATE_SOURCES_TEMPLATE,
        Arc::new(ValidateSourceResource::new(directory)),
    )?;

    registry.register_prompt(MCP_SERVER_PROMPT, Arc::new(McpServerPrompt));

    Ok(registry)
}
