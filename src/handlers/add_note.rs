use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::protocol::{AddNoteParams, ToolResult};

use super::run_store_op;

pub const NAME: &str = "add_note";

/// `inputSchema` advertised in `tools/list` and enforced in `tools/call`.
pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "required": ["message"],
        "properties": {
            "message": {
                "type": "string",
                "description": "The message to add to the notes file"
            }
        }
    })
}

/// Handle an `add_note` tool call.
///
/// Appends the message as a single note. Content is not validated; empty
/// strings are stored as empty lines.
pub async fn handle(params: AddNoteParams, config: &ServerConfig) -> ToolResult {
    let message = params.message;
    match run_store_op(config, move |store| store.append(&message)).await {
        Ok(confirmation) => ToolResult::text(confirmation),
        Err(mcp_err) => mcp_err.into(),
    }
}
