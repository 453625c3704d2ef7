use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::protocol::{McpErrorResponse, PromptGetResult};

use super::run_store_op;

pub const NAME: &str = "note_summary_prompt";

const DESCRIPTION: &str = "Ask the model to summarize all current notes";

/// Entry advertised in `prompts/list`.
pub fn descriptor() -> Value {
    json!({
        "name": NAME,
        "description": DESCRIPTION,
        "arguments": []
    })
}

/// Handle a `prompts/get` of `note_summary_prompt`.
pub async fn handle(config: &ServerConfig) -> Result<PromptGetResult, McpErrorResponse> {
    let text = run_store_op(config, |store| store.summary_prompt()).await?;
    Ok(PromptGetResult::user_text(DESCRIPTION, text))
}
