use crate::client::{GenerativeModel, ModelClient};
use crate::error::MODEL_NOT_LOADED;
use crate::generation::{Creativity, GenerationConfig, permissive_safety_policy};
use crate::prompt::build_prompt;

/// Outcome of one generation request: commentary text or a displayable
/// failure message, never both and never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure(String),
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The text shown to the user in either case.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

/// Coordinates prompt construction, config resolution, and the model call.
/// Stateless across calls; the only persistent state is the memoized
/// handle inside [`ModelClient`].
pub struct Generator {
    client: ModelClient,
}

impl Generator {
    pub fn new(client: ModelClient) -> Self {
        Self { client }
    }

    /// Generate commentary for `code`. Every failure path is converted to a
    /// displayable message; this never returns an error to the caller.
    pub async fn generate(&self, code: &str, choice: Creativity) -> GenerationResult {
        let model = match self.client.get().await {
            Ok(model) => model,
            Err(e) => {
                // Short-circuit: no invocation is attempted without a handle.
                tracing::warn!("model handle unavailable: {e}");
                return GenerationResult::Failure(MODEL_NOT_LOADED.to_string());
            }
        };

        run_generation(model, code, choice).await
    }
}

/// Invoke `model` with the fixed prompt template, the resolved config, and
/// the fully-permissive safety policy.
pub async fn run_generation<M: GenerativeModel>(
    model: &M,
    code: &str,
    choice: Creativity,
) -> GenerationResult {
    let prompt = build_prompt(code);
    let config = GenerationConfig::resolve(choice);
    let safety = permissive_safety_policy();

    match model.generate(&prompt, &config, &safety).await {
        Ok(text) => GenerationResult::Success(text),
        Err(e) => {
            tracing::warn!("generation failed: {e}");
            GenerationResult::Failure(e.user_message())
        }
    }
}
