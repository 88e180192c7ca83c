use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// JSON envelope returned by the `generate_comments` tool. UI clients parse
/// this shape; all results return Content::text(json_string).
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub status: &'static str,
    pub content: String,
    pub content_type: &'static str,
    pub metadata: ToolMetadata,
}

#[derive(Debug, Serialize)]
pub struct ToolMetadata {
    pub tool_name: String,
    pub model_used: String,
    pub creativity: String,
    #[serde(serialize_with = "serialize_finite_f64")]
    pub duration_seconds: f64,
}

/// Serialize f64, clamping non-finite values (NaN, Inf) to 0.0.
fn serialize_finite_f64<S: serde::Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(if v.is_finite() { *v } else { 0.0 })
}

impl ToolResponse {
    pub fn success(content: String, metadata: ToolMetadata) -> Self {
        Self {
            status: "success",
            content,
            content_type: "text",
            metadata,
        }
    }

    pub fn error(message: String, metadata: ToolMetadata) -> Self {
        Self {
            status: "error",
            content: message,
            content_type: "text",
            metadata,
        }
    }

    /// Convert to MCP CallToolResult.
    /// Always returns success at the MCP transport level so a failed
    /// generation reads as data, not as a protocol fault; the caller checks
    /// `"status"` in the JSON payload.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let json = serde_json::to_string(&self).unwrap_or_else(|e| {
            // Fallback envelope assembled with json!, which cannot itself fail.
            serde_json::json!({
                "status": "error",
                "content": format!("response serialization failed: {e}"),
                "content_type": "text",
                "metadata": {},
            })
            .to_string()
        });
        CallToolResult::success(vec![Content::text(json)])
    }
}
