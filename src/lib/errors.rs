use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::{ErrorCode, ErrorData};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration sources.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize the merged document into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Malformed resource URI templates rejected at registration time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("URI template `{template}` has an unclosed placeholder")]
    UnclosedPlaceholder { template: String },
    #[error("URI template `{template}` has an unexpected `}}`")]
    UnopenedPlaceholder { template: String },
    #[error("URI template `{template}` has an empty placeholder name")]
    EmptyPlaceholder { template: String },
    #[error("URI template `{template}` has more than one placeholder")]
    MultiplePlaceholders { template: String },
}

/// Failures raised by the Smithery and web-search adapters.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} rejected the credentials (status {status}): {body}")]
    Authentication {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("request to {provider} failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned an unreadable payload: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Authentication { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Network { provider, .. }
            | ProviderError::Decode { provider, .. } => provider,
        }
    }

    /// Network failures, rate limiting and 5xx responses may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Network { .. } => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Authentication { .. } | ProviderError::Decode { .. } => false,
        }
    }
}

/// Errors surfaced by the capability registry to the dispatch boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool `{name}`")]
    UnknownCapability { name: String },
    #[error("Unknown resource `{uri}`")]
    UnknownResource { uri: String },
    #[error("Unknown prompt `{name}`")]
    UnknownPrompt { name: String },
    #[error("Invalid arguments for `{capability}`: {message}")]
    InvalidArguments { capability: String, message: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Failed to serialize the result of `{capability}`: {source}")]
    Serialization {
        capability: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DispatchError {
    pub fn invalid_arguments(capability: &str, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            capability: capability.to_string(),
            message: message.into(),
        }
    }

    /// Convert into the MCP error returned to the client.
    pub fn to_error_data(&self) -> ErrorData {
        let message = self.to_string();
        let built = match self {
            DispatchError::UnknownCapability { name } => UNKNOWN_TOOL_ERROR
                .builder()
                .message(message.clone())
                .retryable(false)
                .details(json!({ "name": name }))
                .build(),
            DispatchError::UnknownResource { uri } => UNKNOWN_RESOURCE_ERROR
                .builder()
                .message(message.clone())
                .retryable(false)
                .details(json!({ "uri": uri }))
                .build(),
            DispatchError::UnknownPrompt { name } => UNKNOWN_PROMPT_ERROR
                .builder()
                .message(message.clone())
                .retryable(false)
                .details(json!({ "name": name }))
                .build(),
            DispatchError::InvalidArguments { capability, .. } => INVALID_ARGUMENTS_ERROR
                .builder()
                .message(message.clone())
                .retryable(false)
                .details(json!({ "capability": capability }))
                .build(),
            DispatchError::Provider(err) => {
                let descriptor = match err {
                    ProviderError::Authentication { .. } => &PROVIDER_AUTH_ERROR,
                    _ => &PROVIDER_TRANSPORT_ERROR,
                };
                let mut builder = descriptor
                    .builder()
                    .message(message.clone())
                    .retryable(err.is_transient())
                    .provider(err.provider());
                if let ProviderError::Authentication { status, .. }
                | ProviderError::Status { status, .. } = err
                {
                    builder = builder.with_context_field("status", json!(status));
                }
                builder.build()
            }
            DispatchError::Serialization { capability, .. } => SERIALIZATION_ERROR
                .builder()
                .message(message.clone())
                .retryable(false)
                .details(json!({ "capability": capability }))
                .build(),
        };
        built.unwrap_or_else(|_| ErrorData::internal_error(message, None))
    }
}

/// Structured error metadata returned by MCP capabilities.
#[derive(Debug, Clone)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// User-facing message.
    pub message: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    /// JSON-RPC error code.
    pub rpc_code: ErrorCode,
}

impl ToolErrorDescriptor {
    pub const fn new(
        code: &'static str,
        message: &'static str,
        remediation: &'static str,
        rpc_code: ErrorCode,
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            rpc_code,
        }
    }

    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    message: Option<String>,
    retryable: Option<bool>,
    provider: Option<&'static str>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            message: None,
            retryable: None,
            provider: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    /// Replace the descriptor's static message.
    pub fn message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn provider(mut self, provider: &'static str) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(provider) = self.provider {
            data.insert("provider".into(), Value::String(provider.into()));
        }
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        let message = self
            .message
            .unwrap_or_else(|| self.descriptor.message.to_string());
        Ok(ErrorData::new(
            self.descriptor.rpc_code,
            message,
            Some(Value::Object(data)),
        ))
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

pub const UNKNOWN_TOOL_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "unknown_capability",
    "No tool is registered under this name",
    "Call tools/list and use one of the advertised tool names.",
    ErrorCode::INVALID_PARAMS,
);

pub const UNKNOWN_RESOURCE_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "unknown_resource",
    "No resource or resource template matches this URI",
    "Call resources/list or resources/templates/list and use an advertised URI.",
    ErrorCode::RESOURCE_NOT_FOUND,
);

pub const UNKNOWN_PROMPT_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "unknown_prompt",
    "No prompt is registered under this name",
    "Call prompts/list and use one of the advertised prompt names.",
    ErrorCode::INVALID_PARAMS,
);

pub const INVALID_ARGUMENTS_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "invalid_arguments",
    "The arguments do not match the capability's input schema",
    "Check the input schema; `query` must be a string and `limit` at least 1.",
    ErrorCode::INVALID_PARAMS,
);

pub const PROVIDER_AUTH_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "provider_authentication",
    "The discovery provider rejected the configured credentials",
    "Set SMITHERY_API_KEY / OPENAI_API_KEY in the environment or .env and restart the server.",
    ErrorCode::INTERNAL_ERROR,
);

pub const PROVIDER_TRANSPORT_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "provider_transport",
    "The discovery provider could not be reached or returned an error",
    "Retry later or raise max_retries / timeout_secs for the provider in config.toml.",
    ErrorCode::INTERNAL_ERROR,
);

pub const SERIALIZATION_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "serialization_failed",
    "The capability result could not be serialized",
    "Report the failing capability; this indicates a server bug.",
    ErrorCode::INTERNAL_ERROR,
);
