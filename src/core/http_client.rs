use std::time::Duration;

use reqwest::Client;

/// Outbound client for FCM sends. The timeout bounds each send; token
/// exchange runs on the authenticator's own client.
pub fn build_http_client(timeout: Duration, disable_proxy: bool) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(concat!("status-push-relay/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout);

    if disable_proxy {
        builder = builder.no_proxy();
    }

    builder.build()
}
