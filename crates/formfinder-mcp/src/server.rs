//! MCP server implementation

use crate::protocol::*;
use crate::tools;
use anyhow::Result;
use formfinder_core::{
    embedder_from_config, generator_from_config, Config, FormFinder, FormFinderError, Service,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

pub struct McpServer {
    service: Arc<Service>,
}

impl McpServer {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }

    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let mut reader = BufReader::new(stdin);
        let mut writer = BufWriter::new(stdout);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    let response =
                        JsonRpcResponse::error(None, -32700, &format!("Parse error: {}", e));
                    self.write_response(&mut writer, &response).await?;
                    continue;
                }
            };

            if request.is_notification() {
                tracing::debug!("Notification: {}", request.method);
                continue;
            }

            let response = self.handle_request(&request).await;
            self.write_response(&mut writer, &response).await?;
        }

        Ok(())
    }

    async fn write_response<W: AsyncWriteExt + Unpin>(
        &self,
        writer: &mut W,
        response: &JsonRpcResponse,
    ) -> Result<()> {
        let json = serde_json::to_string(response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    pub async fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            "ping" => JsonRpcResponse::success(request.id.clone(), serde_json::json!({})),
            _ => JsonRpcResponse::error(
                request.id.clone(),
                -32601,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let result = serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "formfinder",
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        JsonRpcResponse::success(request.id.clone(), result)
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id.clone(),
            serde_json::json!({ "tools": tools::all_tool_definitions() }),
        )
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let name = request
            .params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let arguments = request
            .params
            .get("arguments")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let service = self.service.as_ref();
        let result = match name {
            "ask" => tools::handle_ask(service, arguments).await,
            "status" => tools::handle_status(service).await,
            "list_forms" => tools::handle_list_forms(service).await,
            "get_form" => tools::handle_get_form(service, arguments).await,
            "switch_mode" => tools::handle_switch_mode(service).await,
            _ => Err(anyhow::anyhow!("Unknown tool: {}", name)),
        };

        let tool_result = result.unwrap_or_else(|e| {
            let retryable = e
                .downcast_ref::<FormFinderError>()
                .is_some_and(|err| err.is_retryable());
            ToolResult::failure(format!("Error: {}", e), retryable)
        });

        match serde_json::to_value(tool_result) {
            Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
            Err(e) => JsonRpcResponse::error(
                request.id.clone(),
                -32603,
                &format!("Internal error: {}", e),
            ),
        }
    }
}

/// Serve over stdio while the corpus loads in the background.
///
/// Tool calls made before loading finishes get a retryable `NotReady`
/// error. A failed load stops the server.
pub async fn start_server(config: Config) -> Result<()> {
    let embedder = embedder_from_config(&config)?;
    let generator = generator_from_config(&config)?;
    let service = Arc::new(Service::starting());

    let load = {
        let service = Arc::clone(&service);
        async move {
            let finder = FormFinder::start(&config, embedder, generator).await?;
            service.set_ready(finder);
            Ok::<(), FormFinderError>(())
        }
    };

    let server = McpServer::new(Arc::clone(&service));
    let serve = server.run();
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => return result,
        loaded = load => {
            if let Err(e) = loaded {
                tracing::error!("Corpus load failed: {}", e);
                return Err(e.into());
            }
        }
    }

    serve.await
}
