//! Resource handlers for static URIs and single-placeholder URI templates.

use async_trait::async_trait;

use crate::lib::{errors::DispatchError, uri_template::UriTemplate};

/// Text body of a resource read, tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBody {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// An addressable document registered in the resource namespace.
///
/// Static resources are read with `argument == None`; templated resources
/// receive the value bound to their placeholder.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn mime_type(&self) -> &str {
        "application/json"
    }

    async fn read(&self, argument: Option<String>) -> Result<String, DispatchError>;
}

pub(crate) struct TemplatedResource {
    pub template: UriTemplate,
    pub handler: std::sync::Arc<dyn ResourceHandler>,
}
