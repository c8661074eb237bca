//! Telemetry initialization and capability invocation span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one capability invocation.
pub struct InvocationSpan {
    span: Span,
    started_at: Instant,
    invocation_id: Uuid,
    kind: &'static str,
}

impl InvocationSpan {
    /// Start a span for a tool, resource or prompt dispatch.
    pub fn start(kind: &'static str, name: &str) -> Self {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            target: "mcp_discovery::dispatch",
            "capability_invocation",
            %invocation_id,
            kind,
            capability = name
        );
        Self {
            span,
            started_at: Instant::now(),
            invocation_id,
            kind,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    /// Close the span while recording status and elapsed time.
    pub fn finish(self, status: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "mcp_discovery::dispatch",
            invocation_id = %self.invocation_id,
            kind = self.kind,
            status = status,
            elapsed_ms = elapsed_ms,
            "Completed capability invocation"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: &'a str,
    pub tools: usize,
    pub resources: usize,
    pub resource_templates: usize,
    pub prompts: usize,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "mcp_discovery::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path,
        tools = telemetry.tools,
        resources = telemetry.resources,
        resource_templates = telemetry.resource_templates,
        prompts = telemetry.prompts,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
