use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::config::Secrets;
use crate::error::GlossError;
use crate::generation::{GenerationConfig, SafetySetting};

/// The fixed model version every handle is bound to.
pub const MODEL_ID: &str = "gemini-pro";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Conservative whole-request timeout. Hardening only — the upstream call
/// is still treated as atomic request/response.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Seam between the orchestrator and the hosted model, so tests can
/// substitute a scripted model for the HTTP handle.
pub trait GenerativeModel: Send + Sync {
    /// One atomic generation call: full prompt in, full text out.
    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        safety: &[SafetySetting],
    ) -> impl Future<Output = Result<String, GlossError>> + Send;
}

// --- wire types -------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Parse a `generateContent` response body into the candidate text.
/// An empty or missing candidate (e.g. blocked with a finishReason) is an
/// upstream failure, never a success with empty text.
fn parse_response(bytes: &[u8]) -> Result<String, GlossError> {
    let response: GenerateContentResponse = serde_json::from_slice(bytes)
        .map_err(|e| GlossError::SchemaParse(format!("failed to parse response: {e}")))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GlossError::Upstream {
            message: "no candidates in response".to_string(),
            status: None,
        })?;

    let finish_reason = candidate.finish_reason;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(GlossError::Upstream {
            message: format!("model returned no text (finish reason: {reason})"),
            status: None,
        });
    }

    Ok(text)
}

// --- handle -----------------------------------------------------------------

/// An authorized, reusable connection to one hosted model version.
/// Created at most once per process and never mutated afterwards, so
/// sharing `&ModelHandle` across concurrent requests is safe.
pub struct ModelHandle {
    http: Client,
    api_key: String,
    model_id: &'static str,
}

impl ModelHandle {
    fn new(secrets: Secrets) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            api_key: secrets.api_key().to_string(),
            model_id: MODEL_ID,
        }
    }

    pub fn model_id(&self) -> &'static str {
        self.model_id
    }

    fn endpoint(&self) -> String {
        format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model_id, self.api_key
        )
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model_id", &self.model_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GenerativeModel for ModelHandle {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        safety: &[SafetySetting],
    ) -> Result<String, GlossError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
            safety_settings: safety,
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GlossError::RateLimited);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(GlossError::AuthFailed {
                message: format!("{status}"),
            });
        }

        // Catch-all for any non-success status. Cap error body reads to
        // MAX_RESPONSE_BYTES to prevent memory exhaustion.
        if !status.is_success() {
            let error_bytes = response.bytes().await.unwrap_or_default();
            let truncated = &error_bytes[..error_bytes.len().min(MAX_RESPONSE_BYTES)];
            let text = String::from_utf8_lossy(truncated);
            return Err(GlossError::Upstream {
                message: format!("{status}: {text}"),
                status: Some(status.as_u16()),
            });
        }

        // Enforce response size limit before parsing.
        let bytes = response.bytes().await.map_err(|e| GlossError::Upstream {
            message: format!("failed to read response body: {e}"),
            status: None,
        })?;

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(GlossError::Upstream {
                message: format!(
                    "response too large: {} bytes (max {})",
                    bytes.len(),
                    MAX_RESPONSE_BYTES
                ),
                status: None,
            });
        }

        parse_response(&bytes)
    }
}

// --- client -----------------------------------------------------------------

/// Lazily initializes and memoizes the process-wide [`ModelHandle`].
///
/// Memoization policy: success only. A failed load (missing secrets file,
/// absent or empty key) is not cached — the next call re-reads the
/// configuration and tries again, so fixing the credential does not require
/// a restart.
#[derive(Default)]
pub struct ModelClient {
    handle: OnceCell<ModelHandle>,
}

impl ModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared handle, creating it on first use.
    pub async fn get(&self) -> Result<&ModelHandle, GlossError> {
        self.handle
            .get_or_try_init(|| async {
                let secrets = Secrets::load()?;
                tracing::info!(model = MODEL_ID, "model handle initialized");
                Ok(ModelHandle::new(secrets))
            })
            .await
    }
}
