use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::core::error::AppError;
use crate::server::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// Runs before method dispatch, so a bad key is a 401 even for non-POST requests.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(value) if value == expected.as_str() => Ok(next.run(request).await),
        _ => {
            tracing::warn!(
                key_present = provided.is_some(),
                method = %request.method(),
                "rejected request with invalid api key"
            );
            Err(AppError::Unauthorized)
        }
    }
}
