//! Capability registry: tools, resources (static and templated), and prompts.
//!
//! Registration happens once at startup. Dispatch is an exact-name lookup for
//! tools and prompts, and an exact-URI then template match for resources,
//! followed by exactly one handler call.

pub mod prompts;
pub mod resources;
pub mod tools;

use std::{collections::BTreeMap, sync::Arc};

use rmcp::model::{
    AnnotateAble, JsonObject, Prompt, RawResource, ReadResourceResult, Resource,
    ResourceTemplate, Tool,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{warn, Instrument};

use crate::lib::{
    errors::{DispatchError, TemplateError},
    telemetry::InvocationSpan,
    uri_template::UriTemplate,
};

pub use prompts::{
    required_string_argument, Message, MessageRole, PromptArgumentSpec, PromptHandler,
};
pub use resources::{ResourceBody, ResourceHandler};
pub use tools::{ToolHandler, ToolOutput};

use resources::TemplatedResource;

/// Holds the three capability namespaces and dispatches into them.
#[derive(Default)]
pub struct CapabilityRegistry {
    tools: BTreeMap<String, Arc<dyn ToolHandler>>,
    resources: BTreeMap<String, Arc<dyn ResourceHandler>>,
    templates: Vec<TemplatedResource>,
    prompts: BTreeMap<String, Arc<dyn PromptHandler>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; an existing tool with the same name is replaced.
    pub fn register_tool(&mut self, name: impl Into<String>, handler: Arc<dyn ToolHandler>) {
        self.tools.insert(name.into(), handler);
    }

    /// Register a static URI or a single-placeholder URI template.
    pub fn register_resource(
        &mut self,
        uri_or_template: &str,
        handler: Arc<dyn ResourceHandler>,
    ) -> Result<(), TemplateError> {
        if !UriTemplate::is_template(uri_or_template) {
            self.resources.insert(uri_or_template.to_string(), handler);
            return Ok(());
        }

        let template = UriTemplate::parse(uri_or_template)?;
        match self
            .templates
            .iter_mut()
            .find(|entry| entry.template == template)
        {
            Some(existing) => existing.handler = handler,
            None => self.templates.push(TemplatedResource { template, handler }),
        }
        Ok(())
    }

    /// Register a prompt; an existing prompt with the same name is replaced.
    pub fn register_prompt(&mut self, name: impl Into<String>, handler: Arc<dyn PromptHandler>) {
        self.prompts.insert(name.into(), handler);
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    /// Call the tool registered under `name` with `args`.
    pub async fn invoke_tool(
        &self,
        name: &str,
        args: JsonObject,
    ) -> Result<ToolOutput, DispatchError> {
        let span = InvocationSpan::start("tool", name);
        let Some(handler) = self.tools.get(name).cloned() else {
            warn!(target: "mcp_discovery::dispatch", tool = name, "Unknown tool requested");
            span.finish("unknown");
            return Err(DispatchError::UnknownCapability {
                name: name.to_string(),
            });
        };

        let result = handler.call(args).instrument(span.span().clone()).await;
        span.finish(outcome(&result));
        result
    }

    /// Read the resource addressed by `uri`.
    pub async fn resolve_resource(&self, uri: &str) -> Result<ResourceBody, DispatchError> {
        let span = InvocationSpan::start("resource", uri);
        let Some((handler, argument)) = self.match_resource(uri) else {
            warn!(target: "mcp_discovery::dispatch", uri, "Unknown resource requested");
            span.finish("unknown");
            return Err(DispatchError::UnknownResource {
                uri: uri.to_string(),
            });
        };

        let result = handler
            .read(argument)
            .instrument(span.span().clone())
            .await
            .map(|text| ResourceBody {
                uri: uri.to_string(),
                mime_type: handler.mime_type().to_string(),
                text,
            });
        span.finish(outcome(&result));
        result
    }

    fn match_resource(&self, uri: &str) -> Option<(Arc<dyn ResourceHandler>, Option<String>)> {
        if let Some(handler) = self.resources.get(uri) {
            return Some((handler.clone(), None));
        }
        self.templates.iter().find_map(|entry| {
            entry
                .template
                .extract(uri)
                .map(|value| (entry.handler.clone(), Some(value)))
        })
    }

    /// Render the prompt registered under `name`.
    pub fn render_prompt(&self, name: &str, args: &JsonObject) -> Result<Message, DispatchError> {
        let span = InvocationSpan::start("prompt", name);
        let Some(handler) = self.prompts.get(name) else {
            warn!(target: "mcp_discovery::dispatch", prompt = name, "Unknown prompt requested");
            span.finish("unknown");
            return Err(DispatchError::UnknownPrompt {
                name: name.to_string(),
            });
        };

        let result = {
            let _entered = span.span().enter();
            handler.render(args)
        };
        span.finish(outcome(&result));
        result
    }

    pub fn prompt_description(&self, name: &str) -> Option<String> {
        self.prompts
            .get(name)
            .map(|handler| handler.description().to_string())
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|(name, handler)| {
                Tool::new(
                    name.clone(),
                    handler.description().to_string(),
                    handler.input_schema(),
                )
            })
            .collect()
    }

    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|(uri, handler)| {
                let mut raw = RawResource::new(uri.clone(), handler.name().to_string());
                raw.description = Some(handler.description().to_string());
                raw.mime_type = Some(handler.mime_type().to_string());
                raw.no_annotation()
            })
            .collect()
    }

    pub fn list_resource_templates(&self) -> Result<Vec<ResourceTemplate>, DispatchError> {
        self.templates
            .iter()
            .map(|entry| {
                from_wire(
                    entry.template.as_str(),
                    json!({
                        "uriTemplate": entry.template.as_str(),
                        "name": entry.handler.name(),
                        "description": entry.handler.description(),
                        "mimeType": entry.handler.mime_type(),
                    }),
                )
            })
            .collect()
    }

    pub fn list_prompts(&self) -> Result<Vec<Prompt>, DispatchError> {
        self.prompts
            .iter()
            .map(|(name, handler)| {
                from_wire(
                    name,
                    json!({
                        "name": name,
                        "description": handler.description(),
                        "arguments": handler.arguments(),
                    }),
                )
            })
            .collect()
    }
}

impl ResourceBody {
    pub fn into_read_result(self) -> Result<ReadResourceResult, DispatchError> {
        let uri = self.uri.clone();
        from_wire(
            &uri,
            json!({
                "contents": [{
                    "uri": self.uri,
                    "mimeType": self.mime_type,
                    "text": self.text,
                }]
            }),
        )
    }
}

/// Build an rmcp model value from its MCP wire representation.
fn from_wire<T: DeserializeOwned>(capability: &str, value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value).map_err(|source| DispatchError::Serialization {
        capability: capability.to_string(),
        source,
    })
}

fn outcome<T>(result: &Result<T, DispatchError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(DispatchError::Provider(_)) => "provider_error",
        Err(_) => "error",
    }
}
