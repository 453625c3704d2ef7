use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::protocol::{McpErrorResponse, ResourceReadResult};

use super::run_store_op;

pub const URI: &str = "notes://latest";
pub const NAME: &str = "latest_note";

/// Entry advertised in `resources/list`.
pub fn descriptor() -> Value {
    json!({
        "uri": URI,
        "name": NAME,
        "description": "The most recently added note",
        "mimeType": "text/plain"
    })
}

/// Handle a `resources/read` of `notes://latest`.
pub async fn handle(config: &ServerConfig) -> Result<ResourceReadResult, McpErrorResponse> {
    let latest = run_store_op(config, |store| store.read_last()).await?;
    Ok(ResourceReadResult::text(URI, latest))
}
