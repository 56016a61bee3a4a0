use std::env;
use std::path::PathBuf;

use crate::config::dto::{
    AppConfig, CredentialSource, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOPIC,
};
use crate::core::error::AppError;

pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();
    load_config_from(|key| env::var(key).ok())
}

/// Builds the config from an arbitrary variable lookup. Empty values count as unset.
/// Values are trimmed, except the API key, which is compared byte for byte.
pub fn load_config_from<F>(lookup: F) -> Result<AppConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let port = match var("PORT") {
        Some(value) => value
            .parse::<u16>()
            .map_err(|err| AppError::configuration(format!("invalid port: {err}")))?,
        None => DEFAULT_PORT,
    };

    let api_key = lookup("SERVER_API_KEY").filter(|value| !value.is_empty());
    let topic = var("FCM_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string());
    let project_id = var("FIREBASE_PROJECT_ID");

    let credentials = if let Some(encoded) = var("FIREBASE_CRED_BASE64") {
        CredentialSource::Inline(encoded)
    } else if let Some(path) = var("FIREBASE_CRED_PATH")
        .or_else(|| var("GOOGLE_APPLICATION_CREDENTIALS"))
    {
        CredentialSource::File(PathBuf::from(path))
    } else if let Some(path) = var("FIREBASE_CONFIG_FILE") {
        CredentialSource::ConfigFile(PathBuf::from(path))
    } else {
        return Err(AppError::configuration(
            "one of FIREBASE_CRED_BASE64, FIREBASE_CRED_PATH, GOOGLE_APPLICATION_CREDENTIALS or FIREBASE_CONFIG_FILE is required"
                .to_string(),
        ));
    };

    let request_timeout_secs = match var("FCM_TIMEOUT_SECS") {
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                AppError::configuration(format!("invalid FCM_TIMEOUT_SECS: {value}"))
            })?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    let disable_proxy = var("HTTP_DISABLE_PROXY")
        .map(|value| matches!(value.as_str(), "true" | "1" | "TRUE" | "True"))
        .unwrap_or(false);

    Ok(AppConfig {
        port,
        api_key,
        topic,
        credentials,
        project_id,
        request_timeout_secs,
        disable_proxy,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = load_config_from(lookup(&[("FIREBASE_CRED_BASE64", "e30=")])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.topic, "all_users");
        assert_eq!(config.api_key, None);
        assert!(!config.disable_proxy);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.credentials, CredentialSource::Inline("e30=".to_string()));
    }

    #[test]
    fn empty_api_key_disables_check() {
        let config = load_config_from(lookup(&[
            ("SERVER_API_KEY", ""),
            ("FIREBASE_CRED_PATH", "/etc/relay/key.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, None);
    }

    #[test]
    fn api_key_keeps_surrounding_whitespace() {
        let config = load_config_from(lookup(&[
            ("SERVER_API_KEY", " secret "),
            ("FCM_TOPIC", "  store_status  "),
            ("FIREBASE_CRED_BASE64", "e30="),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some(" secret "));
        assert_eq!(config.topic, "store_status");
    }

    #[test]
    fn reads_fcm_timeout() {
        let config = load_config_from(lookup(&[
            ("FCM_TIMEOUT_SECS", "3"),
            ("FIREBASE_CRED_BASE64", "e30="),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout_secs, 3);

        let err = load_config_from(lookup(&[
            ("FCM_TIMEOUT_SECS", "0"),
            ("FIREBASE_CRED_BASE64", "e30="),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn inline_credentials_take_precedence() {
        let config = load_config_from(lookup(&[
            ("FIREBASE_CONFIG_FILE", "/etc/relay/config.json"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/relay/key.json"),
            ("FIREBASE_CRED_BASE64", "e30="),
        ]))
        .unwrap();

        assert!(matches!(config.credentials, CredentialSource::Inline(_)));
    }

    #[test]
    fn explicit_path_beats_config_file() {
        let config = load_config_from(lookup(&[
            ("FIREBASE_CONFIG_FILE", "/etc/relay/config.json"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/relay/key.json"),
            ("PORT", "9000"),
            ("FCM_TOPIC", "store_status"),
            ("HTTP_DISABLE_PROXY", "1"),
        ]))
        .unwrap();

        assert_eq!(
            config.credentials,
            CredentialSource::File(PathBuf::from("/etc/relay/key.json"))
        );
        assert_eq!(config.port, 9000);
        assert_eq!(config.topic, "store_status");
        assert!(config.disable_proxy);
    }

    #[test]
    fn missing_credentials_is_a_configuration_error() {
        let err = load_config_from(lookup(&[("PORT", "8080")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn rejects_invalid_port() {
        let err = load_config_from(lookup(&[
            ("PORT", "eighty"),
            ("FIREBASE_CRED_BASE64", "e30="),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
