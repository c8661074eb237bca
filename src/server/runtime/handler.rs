use std::{future::Future, sync::Arc};

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorData, GetPromptRequestParam, GetPromptResult,
        Implementation, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    RoleServer,
};

use crate::capabilities::CapabilityRegistry;

use super::server_info::SERVER_NAME;

/// MCP front end over a [`CapabilityRegistry`]. Cheap to clone per connection.
#[derive(Clone)]
pub struct DiscoveryServer {
    registry: Arc<CapabilityRegistry>,
    instructions: Arc<String>,
}

impl DiscoveryServer {
    pub fn new(registry: CapabilityRegistry, instructions: String) -> Self {
        Self {
            registry: Arc::new(registry),
            instructions: Arc::new(instructions),
        }
    }
}

impl ServerHandler for DiscoveryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(
            self.registry.list_tools(),
        )))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let args = request.arguments.unwrap_or_default();
            self.registry
                .invoke_tool(&request.name, args)
                .await
                .map(|output| output.into_call_result())
                .map_err(|err| err.to_error_data())
        }
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourcesResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListResourcesResult::with_all_items(
            self.registry.list_resources(),
        )))
    }

    fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourceTemplatesResult, ErrorData>> + Send + '_ {
        std::future::ready(
            self.registry
                .list_resource_templates()
                .map(ListResourceTemplatesResult::with_all_items)
                .map_err(|err| err.to_error_data()),
        )
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ReadResourceResult, ErrorData>> + Send + '_ {
        async move {
            self.registry
                .resolve_resource(&request.uri)
                .await
                .and_then(|body| body.into_read_result())
                .map_err(|err| err.to_error_data())
        }
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListPromptsResult, ErrorData>> + Send + '_ {
        std::future::ready(
            self.registry
                .list_prompts()
                .map(ListPromptsResult::with_all_items)
                .map_err(|err| err.to_error_data()),
        )
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<GetPromptResult, ErrorData>> + Send + '_ {
        let args = request.arguments.unwrap_or_default();
        let result = self
            .registry
            .render_prompt(&request.name, &args)
            .map(|message| GetPromptResult {
                description: self.registry.prompt_description(&request.name),
                messages: vec![message.into_prompt_message()],
            })
            .map_err(|err| err.to_error_data());
        std::future::ready(result)
    }
}
