use std::{io, path::PathBuf, process::Stdio, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rmcp::{
    model::ClientInfo, serve_client, service::RunningService, RoleClient, ServiceExt,
};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    process::{Child, ChildStdin, ChildStdout, Command},
    task::JoinHandle,
};

use mcp_discovery::{
    discovery::build_registry,
    lib::errors::ProviderError,
    providers::{DiscoveryQuery, RegistryProvider, RegistryResult, SearchProvider, SearchResult},
    server::runtime::{build_instructions, DiscoveryServer},
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_mcp-discovery");

pub async fn spawn_server_process() -> Result<(Child, ChildIoBridge, Option<JoinHandle<()>>)> {
    let mut command = Command::new(BINARY_PATH);
    command
        .env(
            "MCP_DISCOVERY_CONFIG",
            fixture("tests/fixtures/config_valid.toml"),
        )
        .env_remove("SMITHERY_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = command.spawn().context("failed to spawn server process")?;
    let stdout = child.stdout.take().expect("child stdout");
    let stdin = child.stdin.take().expect("child stdin");
    let bridge = ChildIoBridge::new(stdout, stdin);
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
        })
    });
    Ok((child, bridge, stderr_handle))
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

/// Registry payload shaped like a Smithery `/servers` page.
pub fn registry_payload() -> Value {
    json!({
        "servers": [
            {
                "qualifiedName": "@acme/video-mcp",
                "displayName": "Video Editing MCP",
                "description": "Trim, cut and render clips",
                "homepage": "https://smithery.ai/server/@acme/video-mcp",
                "useCount": 1234,
                "isDeployed": true,
                "createdAt": "2025-03-01T12:00:00.000Z"
            },
            {
                "qualifiedName": "@studio/ffmpeg",
                "displayName": "FFmpeg",
                "description": null,
                "useCount": 7,
                "isDeployed": false
            }
        ],
        "pagination": { "currentPage": 1, "pageSize": 10, "totalPages": 4, "totalCount": 37 }
    })
}

pub struct FixedRegistry(pub Value);

#[async_trait]
impl RegistryProvider for FixedRegistry {
    async fn search(&self, _query: &DiscoveryQuery) -> Result<RegistryResult, ProviderError> {
        Ok(self.0.clone())
    }
}

pub struct RejectingRegistry;

#[async_trait]
impl RegistryProvider for RejectingRegistry {
    async fn search(&self, _query: &DiscoveryQuery) -> Result<RegistryResult, ProviderError> {
        Err(ProviderError::Authentication {
            provider: "smithery",
            status: 401,
            body: "{\"error\":\"invalid api key\"}".into(),
        })
    }
}

pub struct EchoSearch;

#[async_trait]
impl SearchProvider for EchoSearch {
    async fn search(&self, query: &DiscoveryQuery) -> Result<SearchResult, ProviderError> {
        Ok(format!(
            "https://github.com/example/{}-mcp",
            query.text.replace(' ', "-")
        ))
    }
}

pub type TestClient = RunningService<RoleClient, ClientInfo>;

/// Serve a [`DiscoveryServer`] over an in-memory duplex pipe and connect a client to it.
pub async fn connect_in_process(
    registry_provider: Arc<dyn RegistryProvider>,
    search_provider: Arc<dyn SearchProvider>,
) -> Result<(TestClient, JoinHandle<Result<()>>)> {
    let registry = build_registry(registry_provider, search_provider)?;
    let server = DiscoveryServer::new(registry, build_instructions());
    let (server_transport, client_transport) = tokio::io::duplex(16 * 1024);
    let server_task = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        Result::<_, anyhow::Error>::Ok(())
    });
    let client = serve_client(ClientInfo::default(), client_transport).await?;
    Ok((client, server_task))
}

pub struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl ChildIoBridge {
    pub fn new(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self { stdout, stdin }
    }
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        data: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        std::pin::Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::pin::Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}
