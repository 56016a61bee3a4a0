use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use yup_oauth2::ServiceAccountKey;

use crate::config::{AppConfig, CredentialSource, RelayConfigFile};
use crate::core::error::AppError;

/// Service-account key plus the Firebase project it sends on behalf of.
#[derive(Clone)]
pub struct FirebaseCredentials {
    pub key: ServiceAccountKey,
    pub project_id: String,
}

impl std::fmt::Debug for FirebaseCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseCredentials")
            .field("client_email", &self.key.client_email)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// Loads the service-account key before the server starts accepting requests.
pub async fn resolve_credentials(config: &AppConfig) -> Result<FirebaseCredentials, AppError> {
    let key = match &config.credentials {
        CredentialSource::Inline(encoded) => decode_inline_key(encoded)?,
        CredentialSource::File(path) => read_key_file(path).await?,
        CredentialSource::ConfigFile(path) => {
            let key_path = credentials_path_from_config(path).await?;
            read_key_file(&key_path).await?
        }
    };

    let project_id = config
        .project_id
        .clone()
        .or_else(|| key.project_id.clone())
        .ok_or_else(|| {
            AppError::configuration(
                "service account key has no project_id and FIREBASE_PROJECT_ID is unset"
                    .to_string(),
            )
        })?;

    tracing::info!(client_email = %key.client_email, %project_id, "firebase credentials loaded");

    Ok(FirebaseCredentials { key, project_id })
}

pub fn decode_inline_key(encoded: &str) -> Result<ServiceAccountKey, AppError> {
    let cleaned: String = encoded
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    let decoded = STANDARD
        .decode(cleaned.trim())
        .map_err(|err| AppError::configuration(format!("base64 decode error: {err}")))?;

    yup_oauth2::parse_service_account_key(decoded)
        .map_err(|err| AppError::configuration(format!("invalid service account key: {err}")))
}

async fn read_key_file(path: &Path) -> Result<ServiceAccountKey, AppError> {
    let raw = tokio::fs::read(path).await.map_err(|err| {
        AppError::configuration(format!(
            "failed to read credentials at {}: {err}",
            path.display()
        ))
    })?;

    yup_oauth2::parse_service_account_key(raw).map_err(|err| {
        AppError::configuration(format!(
            "invalid service account key at {}: {err}",
            path.display()
        ))
    })
}

async fn credentials_path_from_config(path: &Path) -> Result<PathBuf, AppError> {
    let raw = tokio::fs::read(path).await.map_err(|err| {
        AppError::configuration(format!(
            "failed to read config file {}: {err}",
            path.display()
        ))
    })?;

    let parsed: RelayConfigFile = serde_json::from_slice(&raw).map_err(|err| {
        AppError::configuration(format!("invalid config file {}: {err}", path.display()))
    })?;

    if parsed.credentials_path.is_absolute() {
        return Ok(parsed.credentials_path);
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(base.join(parsed.credentials_path))
}
