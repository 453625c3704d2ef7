pub mod add_note;
pub mod get_notes;
pub mod latest_note;
pub mod note_summary;

use serde::Serialize;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::protocol::{
    AddNoteParams, InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode,
    McpErrorResponse, PromptGetParams, ResourceReadParams, ToolCallParams, ToolResult,
};
use crate::schema;
use crate::store::{NoteStore, NoteStoreError};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, config: &ServerConfig) -> Option<JsonRpcResponse> {
    tracing::debug!(method = %req.method, id = ?req.id, "dispatch");

    match req.method.as_str() {
        "initialize" => {
            if let Some(params) = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v.clone()).ok())
            {
                let client = params.client_info.as_ref();
                tracing::info!(
                    protocol_version = params.protocol_version.as_deref().unwrap_or("unknown"),
                    client_name = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    "client initializing"
                );
            }

            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {},
                    "resources": {},
                    "prompts": {}
                },
                "serverInfo": {
                    "name": "sticky-notes-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({
                "tools": [
                    {
                        "name": add_note::NAME,
                        "description": "Append a new note to the sticky notes file",
                        "inputSchema": add_note::input_schema()
                    },
                    {
                        "name": get_notes::NAME,
                        "description": "Read and return all notes from the sticky notes file",
                        "inputSchema": get_notes::input_schema()
                    }
                ]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req, "tools/call") {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };

            let tool_result = dispatch_tool_call(&params, config).await;
            Some(to_response(req, &tool_result))
        }

        "resources/list" => {
            let result = serde_json::json!({
                "resources": [latest_note::descriptor()]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "resources/read" => {
            let params: ResourceReadParams = match parse_params(req, "resources/read") {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };

            let outcome = match params.uri.as_str() {
                latest_note::URI => latest_note::handle(config).await,
                other => Err(McpErrorResponse::new(
                    McpErrorCode::UnknownResource,
                    format!("Unknown resource: {other}"),
                )),
            };

            Some(match outcome {
                Ok(result) => to_response(req, &result),
                Err(mcp_err) => JsonRpcResponse::error(req.id.clone(), mcp_err.into()),
            })
        }

        "prompts/list" => {
            let result = serde_json::json!({
                "prompts": [note_summary::descriptor()]
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "prompts/get" => {
            let params: PromptGetParams = match parse_params(req, "prompts/get") {
                Ok(p) => p,
                Err(resp) => return Some(resp),
            };

            let outcome = match params.name.as_str() {
                note_summary::NAME => note_summary::handle(config).await,
                other => Err(McpErrorResponse::new(
                    McpErrorCode::UnknownPrompt,
                    format!("Unknown prompt: {other}"),
                )),
            };

            Some(match outcome {
                Ok(result) => to_response(req, &result),
                Err(mcp_err) => JsonRpcResponse::error(req.id.clone(), mcp_err.into()),
            })
        }

        _ => {
            // Unknown notifications are ignored rather than answered.
            if req.id.is_none() {
                return None;
            }
            Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::method_not_found(&req.method),
            ))
        }
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, config: &ServerConfig) -> ToolResult {
    let arguments = params
        .arguments
        .clone()
        .unwrap_or_else(|| Value::Object(Default::default()));

    match params.name.as_str() {
        add_note::NAME => {
            if let Err(err) = check_arguments(add_note::NAME, &add_note::input_schema(), &arguments) {
                return err.into();
            }
            let add_params: AddNoteParams = match serde_json::from_value(arguments) {
                Ok(p) => p,
                Err(e) => {
                    return McpErrorResponse::new(
                        McpErrorCode::InvalidArguments,
                        format!("Invalid arguments for {}: {e}", add_note::NAME),
                    )
                    .into();
                }
            };
            add_note::handle(add_params, config).await
        }

        get_notes::NAME => {
            if let Err(err) = check_arguments(get_notes::NAME, &get_notes::input_schema(), &arguments) {
                return err.into();
            }
            get_notes::handle(config).await
        }

        other => McpErrorResponse::new(
            McpErrorCode::UnknownTool,
            format!("Unknown tool: {other}"),
        )
        .into(),
    }
}

/// Validate tool arguments against the tool's advertised `inputSchema`.
fn check_arguments(tool: &str, input_schema: &Value, arguments: &Value) -> Result<(), McpErrorResponse> {
    schema::validate_value(input_schema, arguments).map_err(|e| {
        tracing::debug!(tool, error = %e, "tool arguments rejected");
        McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Invalid arguments for {tool}: {e}"),
        )
    })
}

/// Run a blocking note store operation off the async loop, bounded by the
/// configured tool timeout.
///
/// A timed-out operation is not cancelled; the blocking task runs to
/// completion in the background.
pub(crate) async fn run_store_op<T, F>(config: &ServerConfig, op: F) -> Result<T, McpErrorResponse>
where
    T: Send + 'static,
    F: FnOnce(&NoteStore) -> Result<T, NoteStoreError> + Send + 'static,
{
    let store = NoteStore::new(config.notes_file.clone());
    let timeout = config.tool_timeout;
    let task = tokio::task::spawn_blocking(move || op(&store));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(store_err))) => {
            tracing::error!(error = %store_err, "note store operation failed");
            Err(McpErrorResponse::canonical(McpErrorCode::IoError))
        }
        Ok(Err(join_err)) => {
            tracing::error!(error = %join_err, "note store task failed");
            Err(McpErrorResponse::canonical(McpErrorCode::InternalError))
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = timeout.as_secs(),
                "note store operation timed out"
            );
            Err(McpErrorResponse::canonical(McpErrorCode::InternalError))
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    req: &JsonRpcRequest,
    method: &str,
) -> Result<T, JsonRpcResponse> {
    match &req.params {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_params(format!("Invalid {method} params: {e}")),
            )
        }),
        None => Err(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::invalid_params(format!("Missing params for {method}")),
        )),
    }
}

fn to_response<T: Serialize>(req: &JsonRpcRequest, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(req.id.clone(), value),
        Err(e) => {
            tracing::error!(error = %e, "result serialization failed");
            JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::internal_error(format!("Serialization failed: {e}")),
            )
        }
    }
}
