//! End-to-end tests of the newline-delimited JSON-RPC loop over in-memory
//! pipes.

use serde_json::Value;

use sticky_notes_mcp::config::ServerConfig;
use sticky_notes_mcp::server::McpServer;

const INITIALIZE: &str = r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#;
const INITIALIZED: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

async fn run_session(config: ServerConfig, lines: &[&str]) -> Vec<Value> {
    let mut input = lines.join("\n");
    input.push('\n');

    let mut output = Vec::new();
    let mut server = McpServer::new(config);
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn full_session_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_notes_file(tmp.path().join("notes.txt"));

    let responses = run_session(
        config,
        &[
            INITIALIZE,
            INITIALIZED,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"add_note","arguments":{"message":"hello"}}}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"add_note","arguments":{"message":"world"}}}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"resources/read","params":{"uri":"notes://latest"}}"#,
            r#"{"jsonrpc":"2.0","id":"four","method":"prompts/get","params":{"name":"note_summary_prompt"}}"#,
        ],
    )
    .await;

    // The initialized notification produces no output.
    assert_eq!(responses.len(), 5);
    assert_eq!(responses[0]["id"], 0);
    assert_eq!(responses[1]["result"]["content"][0]["text"], "Note saved!");
    assert_eq!(responses[3]["result"]["contents"][0]["text"], "world");
    assert_eq!(responses[4]["id"], "four");
    assert_eq!(
        responses[4]["result"]["messages"][0]["content"]["text"],
        "Summarize the current notes: hello\nworld"
    );
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let notes = tmp.path().join("notes.txt");
    let config = ServerConfig::with_notes_file(&notes);

    let responses = run_session(
        config,
        &[
            INITIALIZED,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"add_note","arguments":{"message":"too early"}}}"#,
            INITIALIZE,
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");
    assert_eq!(responses[2]["result"], serde_json::json!({}));
    assert!(!notes.exists(), "rejected request must not create the store");
}

#[tokio::test]
async fn malformed_lines_get_parse_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_notes_file(tmp.path().join("notes.txt"));

    let responses = run_session(
        config,
        &[
            "this is not json",
            "",
            "   ",
            r#"{"jsonrpc":"1.0","id":5,"method":"ping"}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 2, "blank lines are skipped");
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0].get("id").is_none());
    assert_eq!(responses[1]["id"], 5);
    assert_eq!(responses[1]["error"]["code"], -32600);
}

#[tokio::test]
async fn invalid_utf8_is_a_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_notes_file(tmp.path().join("notes.txt"));

    let input: &[u8] = b"\xff\xfe{}\n";
    let mut output = Vec::new();
    McpServer::new(config).serve(input, &mut output).await.unwrap();

    let response: Value = serde_json::from_str(String::from_utf8(output).unwrap().trim()).unwrap();
    assert_eq!(response["error"]["code"], -32700);
}

#[tokio::test]
async fn oversized_message_is_rejected_and_session_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_notes_file(tmp.path().join("notes.txt"));

    let oversized = "x".repeat(3 * 1024 * 1024);
    let responses = run_session(
        config,
        &[
            INITIALIZE,
            oversized.as_str(),
            r#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[2]["id"], 7);
    assert_eq!(responses[2]["result"], serde_json::json!({}));
}

#[tokio::test]
async fn oversized_message_at_eof_ends_cleanly() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_notes_file(tmp.path().join("notes.txt"));

    let input = "y".repeat(2 * 1024 * 1024);
    let mut output = Vec::new();
    McpServer::new(config)
        .serve(input.as_bytes(), &mut output)
        .await
        .unwrap();

    let response: Value = serde_json::from_str(String::from_utf8(output).unwrap().trim()).unwrap();
    assert_eq!(response["error"]["code"], -32700);
}

#[tokio::test]
async fn eof_without_input_ends_cleanly() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_notes_file(tmp.path().join("notes.txt"));

    let mut output = Vec::new();
    McpServer::new(config).serve(&b""[..], &mut output).await.unwrap();
    assert!(output.is_empty());
}
