//! Stdio transport for the MCP protocol.
//!
//! Handles JSON-RPC 2.0 over stdin/stdout, one message per line. Tool
//! failures become error-flagged content payloads carrying the tool name, a
//! human-readable message, and a timestamp; raw error chains stay in the logs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::ToolError;
use crate::tools::{McpTool, ToolContext};

/// Characters of an upstream error message kept in the client-facing excerpt.
const ERROR_EXCERPT_MAX_CHARS: usize = 500;

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    /// JSON-RPC version constant.
    const VERSION: &'static str = "2.0";

    #[must_use]
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self { jsonrpc: Cow::Borrowed(Self::VERSION), result: Some(result), error: None, id }
    }

    #[must_use]
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(Self::VERSION),
            result: None,
            error: Some(JsonRpcError { code, message: message.into() }),
            id,
        }
    }
}

/// MCP tool info for the tools/list response.
#[derive(Debug, Serialize)]
pub struct McpToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Handle the MCP protocol over stdio until stdin closes.
///
/// # Errors
///
/// Returns error on I/O failure.
pub async fn run_stdio(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(req) => req,
            Err(e) => {
                let error_response =
                    JsonRpcResponse::error(None, -32700, format!("Parse error: {e}"));
                write_response(&mut stdout, &error_response).await?;
                continue;
            }
        };

        tracing::debug!(method = %request.method, "Received request");

        let is_notification = request.id.is_none();

        let response = match request.method.as_str() {
            "initialize" => handle_initialize(request.id, &request.params),
            "initialized" | "notifications/initialized" => {
                if is_notification {
                    continue;
                }
                JsonRpcResponse::success(request.id, serde_json::json!({}))
            }
            "tools/list" => handle_tools_list(request.id, &tools),
            "tools/call" => handle_tools_call(request.id, &request.params, &tools, &ctx).await,
            "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
            _ => {
                if is_notification {
                    continue;
                }
                JsonRpcResponse::error(
                    request.id,
                    -32601,
                    format!("Method not found: {}", request.method),
                )
            }
        };

        write_response(&mut stdout, &response).await?;
    }

    Ok(())
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    response: &JsonRpcResponse,
) -> anyhow::Result<()> {
    let response_json = serde_json::to_string(response)?;
    stdout.write_all(response_json.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

fn handle_initialize(id: Option<serde_json::Value>, params: &serde_json::Value) -> JsonRpcResponse {
    let protocol_version =
        params.get("protocolVersion").and_then(|v| v.as_str()).unwrap_or("2024-11-05");

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "openalex-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(id: Option<serde_json::Value>, tools: &[Box<dyn McpTool>]) -> JsonRpcResponse {
    let tool_list: Vec<McpToolInfo> = tools
        .iter()
        .map(|t| McpToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            input_schema: t.input_schema(),
        })
        .collect();

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "tools": tool_list
        }),
    )
}

async fn handle_tools_call(
    id: Option<serde_json::Value>,
    params: &serde_json::Value,
    tools: &[Box<dyn McpTool>],
    ctx: &ToolContext,
) -> JsonRpcResponse {
    let tool_name = match params.get("name").and_then(|v| v.as_str()) {
        Some(name) => name,
        None => {
            return JsonRpcResponse::error(id, -32602, "Missing 'name' parameter");
        }
    };

    let arguments = params.get("arguments").cloned().unwrap_or(serde_json::json!({}));

    let tool = match tools.iter().find(|t| t.name() == tool_name) {
        Some(t) => t,
        None => {
            return JsonRpcResponse::error(id, -32602, format!("Tool not found: {tool_name}"));
        }
    };

    tracing::info!(tool = %tool_name, "Executing tool");

    match tool.execute(ctx, arguments).await {
        Ok(result) => JsonRpcResponse::success(
            id,
            serde_json::json!({
                "content": [{
                    "type": "text",
                    "text": result
                }]
            }),
        ),
        Err(e) => {
            tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
            JsonRpcResponse::success(id, tool_error_payload(tool_name, &e))
        }
    }
}

/// Build the error-flagged content payload for a failed tool call.
fn tool_error_payload(tool_name: &str, error: &ToolError) -> serde_json::Value {
    let body = serde_json::json!({
        "tool": tool_name,
        "error": excerpt(&error.to_user_message()),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    serde_json::json!({
        "content": [{
            "type": "text",
            "text": body.to_string()
        }],
        "isError": true
    })
}

/// Bound an error message to a short excerpt.
fn excerpt(message: &str) -> String {
    if message.chars().count() <= ERROR_EXCERPT_MAX_CHARS {
        return message.to_string();
    }

    let mut out: String = message.chars().take(ERROR_EXCERPT_MAX_CHARS).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_carries_tool_and_timestamp() {
        let error = ToolError::internal("boom");
        let payload = tool_error_payload("search_works", &error);

        assert_eq!(payload["isError"], true);

        let text = payload["content"][0]["text"].as_str().unwrap();
        let body: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(body["tool"], "search_works");
        assert!(body["error"].as_str().unwrap().contains("boom"));
        assert!(body["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_excerpt_bounds_long_messages() {
        let long = "x".repeat(2000);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), ERROR_EXCERPT_MAX_CHARS + 3);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_json_rpc_response_shapes() {
        let ok = JsonRpcResponse::success(Some(serde_json::json!(1)), serde_json::json!({}));
        assert!(ok.error.is_none());

        let err = JsonRpcResponse::error(None, -32601, "nope");
        assert!(err.result.is_none());
        assert_eq!(err.error.unwrap().code, -32601);
    }
}
