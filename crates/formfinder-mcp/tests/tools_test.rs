//! Integration tests for MCP tools and request dispatch

use formfinder_core::corpus::{build_records, ChunkEntry, FormEntry};
use formfinder_core::{
    FormFinder, FormFinderError, HashedEmbedder, Mode, Service, TemplateComposer,
};
use formfinder_mcp::protocol::{JsonRpcRequest, ToolResult};
use formfinder_mcp::tools::*;
use formfinder_mcp::McpServer;
use serde_json::{json, Value};
use std::sync::Arc;

fn forms() -> Vec<FormEntry> {
    vec![
        FormEntry {
            form_number: "1040".to_string(),
            title: "U.S. Individual Income Tax Return".to_string(),
            description: "Annual income tax return for individuals.".to_string(),
            use_cases: vec!["individual tax return".to_string()],
            file_url: "https://www.irs.gov/pub/irs-pdf/f1040.pdf".to_string(),
            chunks: vec![
                ChunkEntry {
                    chunk_type: "line_item".to_string(),
                    text: "Wages, salaries, tips".to_string(),
                    page: Some(1),
                    line_number: Some("1a".to_string()),
                    chunk_id: "1040-1".to_string(),
                },
                ChunkEntry {
                    chunk_type: "section_header".to_string(),
                    text: "Income".to_string(),
                    page: Some(1),
                    line_number: None,
                    chunk_id: "1040-2".to_string(),
                },
            ],
        },
        FormEntry {
            form_number: "W-9".to_string(),
            title: "Request for Taxpayer Identification Number".to_string(),
            description: "Give your TIN to a requester.".to_string(),
            use_cases: vec!["freelance work".to_string()],
            file_url: "https://www.irs.gov/pub/irs-pdf/fw9.pdf".to_string(),
            chunks: Vec::new(),
        },
    ]
}

async fn ready_service() -> Service {
    let records = build_records(&forms(), Mode::Enhanced).unwrap();
    let finder = FormFinder::from_records(
        records,
        Mode::Enhanced,
        Arc::new(HashedEmbedder::new(128)),
        Arc::new(TemplateComposer::enhanced()),
    )
    .await
    .unwrap();
    Service::ready(finder)
}

fn text_of(result: &ToolResult) -> &str {
    match &result.content[0] {
        formfinder_mcp::protocol::Content::Text { text } => text,
    }
}

#[tokio::test]
async fn test_ask_tool() {
    let service = ready_service().await;
    let result = handle_ask(&service, json!({ "query": "what form reports wages", "top_k": 2 }))
        .await
        .unwrap();

    assert!(result.is_error.is_none());
    let structured = result.structured_content.as_ref().unwrap();
    assert_eq!(structured["results"].as_array().unwrap().len(), 2);
    assert_eq!(structured["mode"], "enhanced");
    assert_eq!(structured["total_documents"], 4);
    assert!(text_of(&result).starts_with("That would be **Form "));
}

#[tokio::test]
async fn test_ask_requires_query() {
    let service = ready_service().await;
    assert!(handle_ask(&service, json!({})).await.is_err());
}

#[tokio::test]
async fn test_ask_rejects_invalid_top_k() {
    let service = ready_service().await;

    for top_k in [json!(-1), json!(2.5), json!("2")] {
        let err = handle_ask(&service, json!({ "query": "wages", "top_k": top_k }))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormFinderError>(),
            Some(FormFinderError::InvalidInput(_))
        ));
    }

    let result = handle_ask(&service, json!({ "query": "wages", "top_k": 0 }))
        .await
        .unwrap();
    assert_eq!(
        result.structured_content.unwrap()["results"]
            .as_array()
            .unwrap()
            .len(),
        0
    );
}

#[tokio::test]
async fn test_ask_while_loading_is_not_ready() {
    let service = Service::starting();
    let err = handle_ask(&service, json!({ "query": "wages" }))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not ready"));
}

#[tokio::test]
async fn test_status_while_loading() {
    let service = Service::starting();
    let result = handle_status(&service).await.unwrap();
    assert_eq!(result.structured_content.unwrap()["status"], "starting");
}

#[tokio::test]
async fn test_list_and_get_form() {
    let service = ready_service().await;

    let listing = handle_list_forms(&service).await.unwrap();
    let structured = listing.structured_content.unwrap();
    assert_eq!(structured["unique_forms"], 2);
    assert_eq!(structured["forms"][1]["form_number"], "W-9");

    let details = handle_get_form(&service, json!({ "form_number": "1040" }))
        .await
        .unwrap();
    assert!(text_of(&details).contains("2 sections extracted"));
    let structured = details.structured_content.unwrap();
    assert_eq!(structured["chunks"]["by_type"]["line_items"], 1);
    assert_eq!(structured["metadata"]["type"], "metadata");

    assert!(handle_get_form(&service, json!({ "form_number": "8962" }))
        .await
        .is_err());
}

async fn call(server: &McpServer, request: Value) -> Value {
    let request: JsonRpcRequest = serde_json::from_value(request).unwrap();
    serde_json::to_value(server.handle_request(&request).await).unwrap()
}

#[tokio::test]
async fn test_tools_list_and_unknown_method() {
    let server = McpServer::new(Arc::new(ready_service().await));

    let response = call(
        &server,
        json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }),
    )
    .await;
    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ask", "status", "list_forms", "get_form", "switch_mode"]);

    let response = call(
        &server,
        json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/list" }),
    )
    .await;
    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn test_not_ready_tool_call_is_retryable_error() {
    let server = McpServer::new(Arc::new(Service::starting()));

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "ask", "arguments": { "query": "wages" } }
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
    assert_eq!(response["result"]["structuredContent"]["retryable"], true);
}

#[tokio::test]
async fn test_form_not_found_is_not_retryable() {
    let server = McpServer::new(Arc::new(ready_service().await));

    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": { "name": "get_form", "arguments": { "form_number": "8962" } }
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
    assert!(response["result"].get("structuredContent").is_none());
}

#[test]
fn test_notification_detection() {
    let request: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }))
    .unwrap();
    assert!(request.is_notification());
}
