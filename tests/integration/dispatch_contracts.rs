use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    model::{CallToolRequestParam, ErrorCode, GetPromptRequestParam, ReadResourceRequestParam},
    service::ServiceError,
};
use serde_json::{json, Value};

use mcp_discovery::discovery::SourceDirectory;

use crate::common::{
    connect_in_process, registry_payload, EchoSearch, FixedRegistry, RejectingRegistry,
};

fn object(value: Value) -> rmcp::model::JsonObject {
    value.as_object().cloned().expect("json object")
}

fn mcp_error(error: ServiceError) -> Result<rmcp::model::ErrorData> {
    match error {
        ServiceError::McpError(inner) => Ok(inner),
        other => anyhow::bail!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn smithery_payload_is_passed_through_byte_identical() -> Result<()> {
    let payload = registry_payload();
    let (client, server_task) = connect_in_process(
        Arc::new(FixedRegistry(payload.clone())),
        Arc::new(EchoSearch),
    )
    .await?;

    let response = client
        .call_tool(CallToolRequestParam {
            name: "list_mcps_from_smithery".into(),
            arguments: Some(object(json!({ "query": "video editing", "limit": 10 }))),
        })
        .await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    assert_ne!(response.is_error, Some(true));
    let structured = response
        .structured_content
        .expect("smithery results are structured");
    assert_eq!(
        serde_json::to_string(&structured)?,
        serde_json::to_string(&payload)?
    );
    Ok(())
}

#[tokio::test]
async fn web_search_returns_text_content() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(FixedRegistry(json!({}))), Arc::new(EchoSearch)).await?;

    let response = client
        .call_tool(CallToolRequestParam {
            name: "list_mcp_from_web_search".into(),
            arguments: Some(object(json!({ "query": "video editing" }))),
        })
        .await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let text = response
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.clone())
        .expect("web search returns a text block");
    assert_eq!(text, "https://github.com/example/video-editing-mcp");
    Ok(())
}

#[tokio::test]
async fn validate_template_matches_direct_validation() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(FixedRegistry(json!({}))), Arc::new(EchoSearch)).await?;
    let directory = SourceDirectory::new();

    for name in ["smithery", "WEB_SEARCH", "Web_Search", "pulsemcp", "glama"] {
        let result = client
            .read_resource(ReadResourceRequestParam {
                uri: format!("resource://{name}/validate_sources"),
            })
            .await?;
        let body = serde_json::to_value(&result)?;
        assert_eq!(body["contents"][0]["mimeType"], "application/json");
        let text = body["contents"][0]["text"].as_str().expect("text contents");
        let via_resource: Value = serde_json::from_str(text)?;
        assert_eq!(
            via_resource,
            serde_json::to_value(directory.validate(name))?,
            "source name: {name}"
        );
    }

    let _ = client.cancel().await;
    let _ = server_task.await;
    Ok(())
}

#[tokio::test]
async fn percent_encoded_source_name_is_decoded_before_validation() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(FixedRegistry(json!({}))), Arc::new(EchoSearch)).await?;

    let result = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://web%5Fsearch/validate_sources".into(),
        })
        .await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let body = serde_json::to_value(&result)?;
    let text = body["contents"][0]["text"].as_str().expect("text contents");
    let validation: Value = serde_json::from_str(text)?;
    assert_eq!(validation["status"], "success");
    Ok(())
}

#[tokio::test]
async fn sources_resource_lists_the_directory() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(FixedRegistry(json!({}))), Arc::new(EchoSearch)).await?;

    let result = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://sources".into(),
        })
        .await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let body = serde_json::to_value(&result)?;
    let text = body["contents"][0]["text"].as_str().expect("text contents");
    let parsed: Value = serde_json::from_str(text)?;
    assert_eq!(
        parsed,
        json!({
            "smithery": { "description": "The smithery mcp server" },
            "web_search": { "description": "The openai web search mcp server" }
        })
    );
    Ok(())
}

#[tokio::test]
async fn prompt_names_query_and_both_tools() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(FixedRegistry(json!({}))), Arc::new(EchoSearch)).await?;

    let result = client
        .get_prompt(GetPromptRequestParam {
            name: "prompt_for_mcp_server".into(),
            arguments: Some(object(json!({ "query": "video editing" }))),
        })
        .await?;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let body = serde_json::to_value(&result)?;
    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    let text = messages[0]["content"]["text"].as_str().expect("text message");
    assert!(text.contains("video editing"));
    assert!(text.contains("list_mcps_from_smithery"));
    assert!(text.contains("list_mcp_from_web_search"));
    Ok(())
}

#[tokio::test]
async fn unknown_names_map_to_protocol_errors() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(FixedRegistry(json!({}))), Arc::new(EchoSearch)).await?;

    let tool_error = client
        .call_tool(CallToolRequestParam {
            name: "search_mcps".into(),
            arguments: None,
        })
        .await
        .expect_err("unknown tool should error");
    let resource_error = client
        .read_resource(ReadResourceRequestParam {
            uri: "resource://unknown".into(),
        })
        .await
        .expect_err("unknown resource should error");
    let prompt_error = client
        .get_prompt(GetPromptRequestParam {
            name: "recommend_mcps".into(),
            arguments: None,
        })
        .await
        .expect_err("unknown prompt should error");
    let _ = client.cancel().await;
    let _ = server_task.await;

    let tool_error = mcp_error(tool_error)?;
    assert_eq!(tool_error.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(
        tool_error.data.as_ref().and_then(|data| data.get("code")),
        Some(&json!("unknown_capability"))
    );

    let resource_error = mcp_error(resource_error)?;
    assert_eq!(resource_error.code, ErrorCode::RESOURCE_NOT_FOUND);

    let prompt_error = mcp_error(prompt_error)?;
    assert_eq!(prompt_error.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(
        prompt_error.data.as_ref().and_then(|data| data.get("code")),
        Some(&json!("unknown_prompt"))
    );
    Ok(())
}

#[tokio::test]
async fn provider_failure_surfaces_structured_error() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(RejectingRegistry), Arc::new(EchoSearch)).await?;

    let error = client
        .call_tool(CallToolRequestParam {
            name: "list_mcps_from_smithery".into(),
            arguments: Some(object(json!({ "query": "video editing" }))),
        })
        .await
        .expect_err("provider rejection should error");
    let _ = client.cancel().await;
    let _ = server_task.await;

    let error = mcp_error(error)?;
    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    let data = error.data.expect("structured error data");
    assert_eq!(data["code"], "provider_authentication");
    assert_eq!(data["provider"], "smithery");
    assert_eq!(data["retryable"], false);
    Ok(())
}

#[tokio::test]
async fn zero_limit_is_rejected_before_any_provider_call() -> Result<()> {
    let (client, server_task) =
        connect_in_process(Arc::new(RejectingRegistry), Arc::new(EchoSearch)).await?;

    let error = client
        .call_tool(CallToolRequestParam {
            name: "list_mcps_from_smithery".into(),
            arguments: Some(object(json!({ "query": "video editing", "limit": 0 }))),
        })
        .await
        .expect_err("limit 0 should error");
    let _ = client.cancel().await;
    let _ = server_task.await;

    let error = mcp_error(error)?;
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(
        error.data.as_ref().and_then(|data| data.get("code")),
        Some(&json!("invalid_arguments"))
    );
    Ok(())
}
