use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use yup_oauth2::ServiceAccountAuthenticator;
use yup_oauth2::authenticator::DefaultAuthenticator;

use crate::config::AppConfig;
use crate::core::credentials::FirebaseCredentials;
use crate::core::error::AppError;
use crate::core::http_client::build_http_client;
use crate::features::relay::dto::{FcmSendRequest, FcmSendResponse, TopicMessage};

const FCM_API_BASE: &str = "https://fcm.googleapis.com";
const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Delivers a data message to every subscriber of a topic.
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Returns the provider's name for the accepted message.
    async fn send_to_topic(&self, message: &TopicMessage) -> Result<String, AppError>;
}

#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, AppError>;
}

#[async_trait]
impl AccessTokenSource for DefaultAuthenticator {
    async fn access_token(&self) -> Result<String, AppError> {
        let token = self
            .token(&[FCM_SCOPE])
            .await
            .map_err(|err| AppError::upstream(format!("failed to obtain access token: {err}")))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| AppError::upstream("access token response was empty".to_string()))
    }
}

pub struct FcmClient {
    http_client: reqwest::Client,
    tokens: Arc<dyn AccessTokenSource>,
    send_url: String,
}

impl FcmClient {
    pub async fn from_credentials(
        credentials: FirebaseCredentials,
        config: &AppConfig,
    ) -> Result<Self, AppError> {
        let http_client = build_http_client(
            Duration::from_secs(config.request_timeout_secs),
            config.disable_proxy,
        )
        .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

        let authenticator = ServiceAccountAuthenticator::builder(credentials.key)
            .build()
            .await
            .map_err(|err| {
                AppError::configuration(format!("failed to build FCM authenticator: {err}"))
            })?;

        Ok(Self::new(
            http_client,
            Arc::new(authenticator),
            FCM_API_BASE,
            &credentials.project_id,
        ))
    }

    pub fn new(
        http_client: reqwest::Client,
        tokens: Arc<dyn AccessTokenSource>,
        api_base: &str,
        project_id: &str,
    ) -> Self {
        let send_url = format!(
            "{}/v1/projects/{project_id}/messages:send",
            api_base.trim_end_matches('/')
        );

        Self {
            http_client,
            tokens,
            send_url,
        }
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send_to_topic(&self, message: &TopicMessage) -> Result<String, AppError> {
        let access_token = self.tokens.access_token().await?;

        let response = self
            .http_client
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&FcmSendRequest { message })
            .send()
            .await
            .map_err(|err| AppError::upstream(format!("failed to reach FCM: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "FCM returned {status}: {body}"
            )));
        }

        let parsed: FcmSendResponse = response
            .json()
            .await
            .map_err(|err| AppError::upstream(format!("failed to parse FCM response: {err}")))?;

        Ok(parsed.name)
    }
}
