use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TOPIC: &str = "all_users";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Shared secret expected in `X-API-Key`. `None` leaves `/send` open.
    pub api_key: Option<String>,
    pub topic: String,
    pub credentials: CredentialSource,
    pub project_id: Option<String>,
    /// Upper bound on a single FCM send, token exchange excluded.
    pub request_timeout_secs: u64,
    pub disable_proxy: bool,
}

/// Where the Firebase service-account key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Base64-encoded service-account JSON held directly in the environment.
    Inline(String),
    /// Path to a service-account JSON file.
    File(PathBuf),
    /// Path to a relay config file naming the service-account file.
    ConfigFile(PathBuf),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfigFile {
    pub credentials_path: PathBuf,
}
