use thiserror::Error;

/// Fixed text returned when generation is attempted without a model handle.
pub const MODEL_NOT_LOADED: &str =
    "Model not loaded properly. Check your API key and configuration.";

#[derive(Debug, Error)]
pub enum GlossError {
    #[error("API key not found in {origin}. Please check your secrets configuration.")]
    CredentialMissing { origin: String },

    #[error("API key is empty. Please check your secrets configuration.")]
    CredentialEmpty,

    #[error("secrets file unavailable at {path}: {reason}")]
    ConfigUnavailable { path: String, reason: String },

    #[error("rate limited by upstream")]
    RateLimited,

    #[error("auth failed: {message}")]
    AuthFailed { message: String },

    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    #[error("schema parse error: {0}")]
    SchemaParse(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl GlossError {
    /// Produce a sanitized error message safe for returning to UI clients.
    /// Does not leak the credential, internal URLs, or full upstream bodies.
    pub fn user_message(&self) -> String {
        match self {
            Self::CredentialMissing { .. }
            | Self::CredentialEmpty
            | Self::ConfigUnavailable { .. } => self.to_string(),
            Self::RateLimited => {
                "rate limited by the model provider — try again shortly".to_string()
            }
            Self::AuthFailed { message } => {
                format!("authentication failed with the model provider: {message}")
            }
            Self::Upstream { message, .. } => format!("model provider error: {message}"),
            Self::SchemaParse(_) => "failed to parse the model response".to_string(),
            Self::Request(_) => "request to the model provider failed".to_string(),
        }
    }
}
