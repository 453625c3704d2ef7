use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::protocol::ToolResult;

use super::run_store_op;

pub const NAME: &str = "get_notes";

pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {}
    })
}

/// Handle a `get_notes` tool call.
///
/// Returns every note as one newline-separated string, or the
/// "No notes yet." sentinel when the store is empty.
pub async fn handle(config: &ServerConfig) -> ToolResult {
    match run_store_op(config, |store| store.read_all()).await {
        Ok(notes) => ToolResult::text(notes),
        Err(mcp_err) => mcp_err.into(),
    }
}
