use std::sync::Arc;
use std::time::Instant;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::client::{MODEL_ID, ModelClient};
use crate::generate::{GenerationResult, Generator};
use crate::generation::Creativity;
use crate::response::{ToolMetadata, ToolResponse};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CommentRequest {
    /// The code snippet to comment. Any language, any length — the snippet
    /// is sent to the model unmodified, and the model decides whether it is
    /// valid code.
    pub code: String,
    /// Creativity preset: "low" (temperature 0.30, default) or "high"
    /// (temperature 0.95). Output length is capped identically either way.
    pub creativity: Option<Creativity>,
}

#[derive(Clone)]
pub struct GlossServer {
    generator: Arc<Generator>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GlossServer {
    pub fn new(client: ModelClient) -> Self {
        Self {
            generator: Arc::new(Generator::new(client)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "generate_comments",
        description = "Generate explanatory comments for a code snippet. Returns commentary only — never new or modified code.",
        annotations(read_only_hint = true)
    )]
    async fn generate_comments(
        &self,
        Parameters(req): Parameters<CommentRequest>,
    ) -> Result<CallToolResult, McpError> {
        let creativity = req.creativity.unwrap_or_default();
        let start = Instant::now();

        let metadata = |duration_seconds| ToolMetadata {
            tool_name: "generate_comments".to_string(),
            model_used: MODEL_ID.to_string(),
            creativity: creativity.as_str().to_string(),
            duration_seconds,
        };

        let response = match self.generator.generate(&req.code, creativity).await {
            GenerationResult::Success(text) => {
                ToolResponse::success(text, metadata(start.elapsed().as_secs_f64()))
            }
            GenerationResult::Failure(message) => {
                tracing::warn!("generate_comments failed: {message}");
                ToolResponse::error(message, metadata(start.elapsed().as_secs_f64()))
            }
        };

        Ok(response.into_call_tool_result())
    }
}

#[tool_handler]
impl ServerHandler for GlossServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "gloss".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Gloss: AI code comment generation.\n\n\
                 Call `generate_comments` with a code snippet and an optional \
                 creativity preset (\"low\" or \"high\"). The response is a JSON \
                 envelope: `status` is \"success\" with the commentary in `content`, \
                 or \"error\" with a displayable message in `content`.\n\n\
                 The generated output may not always meet your expectations — \
                 resubmitting the same snippet can produce an improved result, \
                 especially with the \"high\" creativity preset."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
