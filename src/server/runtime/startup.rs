use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::ServiceExt;
use tokio::net::TcpListener;

use crate::{
    capabilities::CapabilityRegistry,
    cli::{LaunchProfile, TransportMode},
    discovery,
    lib::telemetry::{emit_runtime_mode, RuntimeModeTelemetry},
    providers::{OpenAiWebSearch, SmitheryClient},
    server::{
        config::ServerConfig,
        runtime::{build_instructions, DiscoveryServer},
    },
};

/// Bundles a runtime error message with the process exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// Print the message on stderr and hand back the exit code.
    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}

/// Wire the configured providers into a fully registered capability set.
pub fn build_capabilities(
    profile: &LaunchProfile,
    config: &ServerConfig,
) -> Result<CapabilityRegistry, RuntimeExit> {
    let smithery = SmitheryClient::from_config(
        &config.smithery,
        profile.credentials.smithery_api_key.clone(),
    )
    .context("failed to build the Smithery client")
    .map_err(RuntimeExit::from_error)?;
    let web_search = OpenAiWebSearch::from_config(
        &config.web_search,
        profile.credentials.openai_api_key.clone(),
    )
    .context("failed to build the web search client")
    .map_err(RuntimeExit::from_error)?;

    discovery::build_registry(Arc::new(smithery), Arc::new(web_search))
        .context("failed to register discovery capabilities")
        .map_err(RuntimeExit::from_error)
}

/// Start the MCP server and select stdio/TCP based on the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    if profile.credentials.smithery_api_key.is_none() {
        tracing::warn!(
            target: "mcp_discovery::runtime",
            "SMITHERY_API_KEY is not set; registry requests will be sent unauthenticated"
        );
    }
    if profile.credentials.openai_api_key.is_none() {
        tracing::warn!(
            target: "mcp_discovery::runtime",
            "OPENAI_API_KEY is not set; web search requests will be rejected upstream"
        );
    }

    let registry = build_capabilities(&profile, &config)?;
    let instructions = build_instructions();

    emit_runtime_mode(&RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        config_path: config.source_path.to_string_lossy().as_ref(),
        tools: registry.tool_count(),
        resources: registry.resource_count(),
        resource_templates: registry.template_count(),
        prompts: registry.prompt_count(),
        launch_args: &profile.launch_args,
    });

    let server = DiscoveryServer::new(registry, instructions);
    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    }
}

async fn run_stdio(server: DiscoveryServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_tcp(server: DiscoveryServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "mcp_discovery::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error)?;
        tracing::info!(
            target: "mcp_discovery::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );

        let connection = server.clone();
        tokio::spawn(async move {
            let outcome = match connection.serve(stream).await {
                Ok(running) => running.waiting().await.map(|_| ()).map_err(Error::from),
                Err(err) => Err(Error::from(err)),
            };
            if let Err(err) = outcome {
                tracing::warn!(
                    target: "mcp_discovery::runtime",
                    peer = %peer,
                    error = %err,
                    "MCP session ended with an error"
                );
            } else {
                tracing::info!(
                    target: "mcp_discovery::runtime",
                    peer = %peer,
                    "MCP session closed"
                );
            }
        });
    }
}
