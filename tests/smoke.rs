use rmcp::ServerHandler;

use gloss::client::ModelClient;
use gloss::response::{ToolMetadata, ToolResponse};
use gloss::server::GlossServer;

fn metadata(duration_seconds: f64) -> ToolMetadata {
    ToolMetadata {
        tool_name: "generate_comments".to_string(),
        model_used: "gemini-pro".to_string(),
        creativity: "low".to_string(),
        duration_seconds,
    }
}

#[test]
fn success_envelope_serializes_correctly() {
    let response = ToolResponse::success("// a well commented snippet".to_string(), metadata(4.2));

    let json_str = serde_json::to_string(&response).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["content"], "// a well commented snippet");
    assert_eq!(parsed["content_type"], "text");
    assert_eq!(parsed["metadata"]["tool_name"], "generate_comments");
    assert_eq!(parsed["metadata"]["model_used"], "gemini-pro");
    assert_eq!(parsed["metadata"]["creativity"], "low");
    assert!(parsed["metadata"]["duration_seconds"].is_f64());
}

#[test]
fn error_envelope_serializes_correctly() {
    let response = ToolResponse::error(
        "Model not loaded properly. Check your API key and configuration.".to_string(),
        metadata(0.001),
    );

    let json_str = serde_json::to_string(&response).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

    assert_eq!(parsed["status"], "error");
    assert_eq!(
        parsed["content"],
        "Model not loaded properly. Check your API key and configuration."
    );
}

#[test]
fn non_finite_duration_is_clamped_to_zero() {
    let response = ToolResponse::success("ok".to_string(), metadata(f64::NAN));
    let parsed: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
    assert_eq!(parsed["metadata"]["duration_seconds"], 0.0);
}

#[test]
fn payload_errors_do_not_set_mcp_level_is_error() {
    let response = ToolResponse::error("upstream exploded".to_string(), metadata(1.0));
    let result = response.into_call_tool_result();
    assert!(
        result.is_error != Some(true),
        "failed generations must read as data, not protocol faults"
    );
}

#[test]
fn server_identifies_as_gloss_with_cargo_version() {
    let server = GlossServer::new(ModelClient::new());
    let info = server.get_info();
    assert_eq!(info.server_info.name, "gloss");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(info.instructions.is_some());
}
