use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GlossError;

/// Env var that supplies the credential directly, bypassing the secrets file.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Env var that overrides the secrets file location.
pub const SECRETS_PATH_ENV: &str = "GLOSS_SECRETS";

/// Default secrets file, relative to the working directory.
pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

#[derive(Deserialize)]
struct SecretsFile {
    general: Option<GeneralSection>,
}

#[derive(Deserialize)]
struct GeneralSection {
    #[serde(rename = "GOOGLE_API_KEY")]
    google_api_key: Option<String>,
}

/// The provider credential, read once at first model use and held for the
/// process lifetime. Resolution order: `GOOGLE_API_KEY` from the
/// environment, then the `[general]` table of the secrets file.
pub struct Secrets {
    api_key: String,
}

impl Secrets {
    pub fn load() -> Result<Self, GlossError> {
        if let Ok(key) = env::var(API_KEY_ENV) {
            if key.trim().is_empty() {
                return Err(GlossError::CredentialEmpty);
            }
            return Ok(Self { api_key: key });
        }
        Self::from_file(&secrets_path())
    }

    /// Read the credential from a specific secrets file.
    /// File-level failures (missing, unreadable, unparseable) are
    /// configuration errors; a readable file without the key is a
    /// missing-credential error. The two are reported distinctly.
    pub fn from_file(path: &Path) -> Result<Self, GlossError> {
        let raw = std::fs::read_to_string(path).map_err(|e| GlossError::ConfigUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let parsed: SecretsFile =
            toml::from_str(&raw).map_err(|e| GlossError::ConfigUnavailable {
                path: path.display().to_string(),
                reason: format!("invalid TOML: {e}"),
            })?;

        let key = parsed
            .general
            .and_then(|g| g.google_api_key)
            .ok_or_else(|| GlossError::CredentialMissing {
                origin: path.display().to_string(),
            })?;

        if key.trim().is_empty() {
            return Err(GlossError::CredentialEmpty);
        }

        Ok(Self { api_key: key })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn secrets_path() -> PathBuf {
    env::var(SECRETS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH))
}
