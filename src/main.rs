use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use status_push_relay::config::load_config;
use status_push_relay::core::credentials::resolve_credentials;
use status_push_relay::core::error::AppError;
use status_push_relay::features::relay::{FcmClient, PushSender, RelayService};
use status_push_relay::server::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = load_config()?;
    let credentials = resolve_credentials(&config).await?;
    let sender: Arc<dyn PushSender> =
        Arc::new(FcmClient::from_credentials(credentials, &config).await?);

    let relay = Arc::new(RelayService::new(sender, config.topic.clone()));
    if config.api_key.is_none() {
        tracing::warn!("SERVER_API_KEY is not set; /send accepts unauthenticated requests");
    }
    let app = build_router(AppState::new(relay.clone(), config.api_key.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, topic = relay.topic(), "starting server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();
}
