//! Capability token API handler

use super::call_handler::AppState;
use super::dto::{TokenErrorResponse, TokenResponse};
use super::metrics_handler::record_token_issued;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

/// Issue a capability token for the browser client.
///
/// Failures are reported with a fixed generic message so no credential
/// detail leaks through the error body.
pub async fn generate_token(State(state): State<AppState>) -> Response {
    info!("API: Generating capability token");

    match state.token_issuer.issue(None) {
        Ok(signed) => {
            record_token_issued();
            Json(TokenResponse { token: signed.jwt }).into_response()
        }
        Err(e) => {
            error!("API: Failed to generate token: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TokenErrorResponse {
                    error: "Failed to generate token".to_string(),
                }),
            )
                .into_response()
        }
    }
}
