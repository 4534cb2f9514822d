//! MCP tool definitions and handlers

use crate::protocol::*;
use anyhow::Result;
use formfinder_core::{FormFinderError, Service};
use serde_json::Value;

pub fn ask_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "ask".to_string(),
        description: "Ask a question about IRS tax forms and get an answer with the matching forms"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Question in plain language"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Number of results (default: 3 in simple mode, 5 in enhanced mode)",
                    "minimum": 0
                },
                "use_generation": {
                    "type": "boolean",
                    "description": "Write an answer instead of listing matched forms (default: true)",
                    "default": true
                }
            },
            "required": ["query"]
        }),
    }
}

pub fn status_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "status".to_string(),
        description: "Show loading state, mode and corpus size".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub fn list_forms_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_forms".to_string(),
        description: "List every form in the corpus".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub fn get_form_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_form".to_string(),
        description: "Show the metadata and extracted sections of one form".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "form_number": {
                    "type": "string",
                    "description": "Form number, e.g. 1040 or W-2"
                }
            },
            "required": ["form_number"]
        }),
    }
}

pub fn switch_mode_tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "switch_mode".to_string(),
        description: "Report whether a restart could switch between simple and enhanced mode"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub fn all_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ask_tool_definition(),
        status_tool_definition(),
        list_forms_tool_definition(),
        get_form_tool_definition(),
        switch_mode_tool_definition(),
    ]
}

pub async fn handle_ask(service: &Service, args: Value) -> Result<ToolResult> {
    let query = args
        .get("query")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing query"))?;
    let top_k = match args.get("top_k") {
        None | Some(Value::Null) => None,
        Some(v) => {
            let k = v.as_u64().ok_or_else(|| {
                FormFinderError::InvalidInput(format!(
                    "top_k must be a non-negative integer, got {}",
                    v
                ))
            })?;
            Some(k as usize)
        }
    };
    let use_generation = args
        .get("use_generation")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    let finder = service.engine()?;
    let response = finder.query(query, use_generation, top_k).await?;

    let mut summary = response.answer.clone();
    if !response.results.is_empty() {
        summary.push_str("\n\nMatches:");
        for result in &response.results {
            summary.push_str(&format!(
                "\n- {} ({:.3})",
                result.filename(),
                result.similarity
            ));
        }
    }

    Ok(ToolResult::success(summary, serde_json::to_value(&response)?))
}

/// Answers while loading too, with `status: "starting"`.
pub async fn handle_status(service: &Service) -> Result<ToolResult> {
    let finder = match service.engine() {
        Ok(finder) => finder,
        Err(_) => {
            return Ok(ToolResult::success(
                "Corpus is still loading",
                serde_json::json!({ "status": "starting" }),
            ))
        }
    };

    let status = finder.status();
    let summary = format!(
        "Mode: {}\n\
         Documents: {} ({} forms, {} chunks)\n\
         Answers: {}\n\
         Embeddings: {} ({} dims)\n\
         Enhanced data: {}",
        status.mode,
        status.total_documents,
        status.total_forms,
        status.total_chunks,
        status.composer,
        status.embedding_model,
        status.dimensions,
        if status.enhanced_available {
            "available"
        } else {
            "not found"
        }
    );

    Ok(ToolResult::success(summary, serde_json::to_value(&status)?))
}

pub async fn handle_list_forms(service: &Service) -> Result<ToolResult> {
    let listing = service.engine()?.list_forms();

    let mut summary = format!(
        "{} forms ({} documents, {} mode)",
        listing.unique_forms, listing.total, listing.mode
    );
    for form in &listing.forms {
        summary.push_str(&format!("\n- {}", form.filename));
    }

    Ok(ToolResult::success(summary, serde_json::to_value(&listing)?))
}

pub async fn handle_get_form(service: &Service, args: Value) -> Result<ToolResult> {
    let form_number = args
        .get("form_number")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing form_number"))?;

    let details = service.engine()?.form_details(form_number)?;

    let mut summary = format!("Form {}", details.form_number);
    if let Some(meta) = details.form_metadata() {
        summary.push_str(&format!(": {}\n{}", meta.title, meta.description));
    }
    if details.has_chunks {
        let counts = &details.chunks.by_type;
        summary.push_str(&format!(
            "\n\n{} sections extracted: {} line items, {} section headers, {} instructions",
            details.chunks.total, counts.line_items, counts.sections, counts.instructions
        ));
    }

    Ok(ToolResult::success(summary, serde_json::to_value(&details)?))
}

pub async fn handle_switch_mode(service: &Service) -> Result<ToolResult> {
    let report = service.engine()?.switch_mode();
    Ok(ToolResult::success(
        report.message.clone(),
        serde_json::to_value(&report)?,
    ))
}
