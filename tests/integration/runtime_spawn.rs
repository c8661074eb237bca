use std::{
    process::{Command as StdCommand, Stdio},
    time::Duration,
};

use anyhow::Result;
use rmcp::{
    model::{ClientInfo, ReadResourceRequestParam},
    serve_client,
};
use serde_json::Value;
use tokio::time::timeout;

use crate::common::{fixture, spawn_server_process, BINARY_PATH};

#[tokio::test]
async fn inspector_style_spawn_lists_capabilities() -> Result<()> {
    let (mut child, transport, stderr_task) = spawn_server_process().await?;

    let client = serve_client(ClientInfo::default(), transport).await?;

    let info = client.peer_info().expect("server info after handshake");
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
    assert!(info.capabilities.prompts.is_some());

    let tools = client.list_tools(None).await?;
    let mut names: Vec<_> = tools.tools.iter().map(|tool| tool.name.to_string()).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["list_mcp_from_web_search", "list_mcps_from_smithery"]
    );

    let resources = client.list_resources(None).await?;
    assert!(
        resources
            .resources
            .iter()
            .any(|resource| resource.uri == "resource://sources"),
        "list_resources should include resource://sources: {:?}",
        resources.resources
    );

    let templates = client.list_resource_templates(None).await?;
    assert!(templates
        .resource_templates
        .iter()
        .any(|template| template.uri_template == "resource://{source_name}/validate_sources"));

    let prompts = client.list_prompts(None).await?;
    assert!(prompts
        .prompts
        .iter()
        .any(|prompt| prompt.name == "prompt_for_mcp_server"));

    let validation = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://Smithery/validate_sources".into(),
        })
        .await?;
    let body = serde_json::to_value(&validation)?;
    let text = body["contents"][0]["text"].as_str().expect("text contents");
    let parsed: Value = serde_json::from_str(text)?;
    assert_eq!(parsed["status"], "success");

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let _ = handle.await;
    }
    Ok(())
}

#[test]
fn sources_subcommand_prints_json() {
    let output = StdCommand::new(BINARY_PATH)
        .arg("sources")
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert!(output.status.success(), "status: {:?}", output.status);

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(
        parsed["smithery"]["description"],
        "The smithery mcp server"
    );
    assert_eq!(
        parsed["web_search"]["description"],
        "The openai web search mcp server"
    );
}

#[test]
fn validate_subcommand_reports_caution() {
    let output = StdCommand::new(BINARY_PATH)
        .args(["validate", "NotARealSource"])
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert!(output.status.success(), "status: {:?}", output.status);

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(parsed["status"], "caution");
    assert_eq!(
        parsed["message"],
        "The source name notarealsource might not be a valid source of mcp servers"
    );
}

#[test]
fn invalid_config_exits_with_failure() {
    let output = StdCommand::new(BINARY_PATH)
        .env(
            "MCP_DISCOVERY_CONFIG",
            fixture("tests/fixtures/config_invalid_port.toml"),
        )
        .stdin(Stdio::null())
        .output()
        .expect("process should start");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("server.port"), "stderr: {stderr}");
}
