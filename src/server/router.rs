use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::features::relay::{handle_healthcheck, handle_method_not_allowed, handle_send};
use crate::server::{AppState, require_api_key};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_healthcheck))
        .route(
            "/send",
            post(handle_send)
                .fallback(handle_method_not_allowed)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_api_key,
                )),
        )
        .with_state(state)
}
