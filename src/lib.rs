//! MCP server for a plain-text sticky note store.
//!
//! Exposes the `add_note` and `get_notes` tools, the `notes://latest`
//! resource and the `note_summary_prompt` prompt over JSON-RPC 2.0 stdio
//! transport, compatible with any MCP-aware AI agent.

pub mod config;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod store;

pub mod schema;
