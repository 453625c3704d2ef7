pub mod request;
pub mod response;

pub use request::{
    AddNoteParams, ClientInfo, InitializeParams, JsonRpcRequest, PromptGetParams,
    ResourceReadParams, RpcId, ToolCallParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, PromptGetResult,
    PromptMessage, ResourceContent, ResourceReadResult, ToolResult, ToolResultContent,
};
