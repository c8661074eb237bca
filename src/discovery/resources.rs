//! `resource://sources` and `resource://{source_name}/validate_sources`.

use async_trait::async_trait;

use crate::{
    capabilities::ResourceHandler, discovery::sources::SourceDirectory,
    lib::errors::DispatchError,
};

pub const SOURCES_URI: &str = "resource://sources";
pub const VALIDATE_SOURCES_TEMPLATE: &str = "resource://{source_name}/validate_sources";

pub struct ListSourcesResource {
    directory: SourceDirectory,
}

impl ListSourcesResource {
    pub fn new(directory: SourceDirectory) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ResourceHandler for ListSourcesResource {
    fn name(&self) -> &str {
        "list_sources"
    }

    fn description(&self) -> &str {
        "List the sources of mcp servers."
    }

    async fn read(&self, _argument: Option<String>) -> Result<String, DispatchError> {
        serde_json::to_string(&self.directory.list_sources()).map_err(|source| {
            DispatchError::Serialization {
                capability: SOURCES_URI.into(),
                source,
            }
        })
    }
}

pub struct ValidateSourceResource {
    directory: SourceDirectory,
}

impl ValidateSourceResource {
    pub fn new(directory: SourceDirectory) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ResourceHandler for ValidateSourceResource {
    fn name(&self) -> &str {
        "validate_sources"
    }

    fn description(&self) -> &str {
        "Validate whether the named source is a trusted source of mcp servers."
    }

    async fn read(&self, argument: Option<String>) -> Result<String, DispatchError> {
        let source_name = argument.unwrap_or_default();
        serde_json::to_string(&self.directory.validate(&source_name)).map_err(|source| {
            DispatchError::Serialization {
                capability: VALIDATE_SOURCES_TEMPLATE.into(),
                source,
            }
        })
    }
}
