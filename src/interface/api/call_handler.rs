//! Call control API handlers

use super::dto::{
    AckResponse, ApiErrorResponse, CallCreatedResponse, DialRequest, HangupRequest, MuteRequest,
};
use super::metrics_handler::{record_call_command, record_call_failed, record_call_initiated};
use crate::application::{CallControlService, TokenIssuer};
use crate::domain::shared::DomainError;
use crate::infrastructure::twiml::TwimlSerializer;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub call_control: Arc<CallControlService>,
    pub token_issuer: Arc<TokenIssuer>,
    pub twiml: Arc<TwimlSerializer>,
}

/// Health check
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Place an outbound call
pub async fn dial_call(State(state): State<AppState>, Json(req): Json<DialRequest>) -> Response {
    info!("API: Dial request");

    let number = req.phone_number.as_deref().unwrap_or_default();
    match state.call_control.dial(number).await {
        Ok(session) => {
            record_call_initiated(session.direction.as_str());
            Json(CallCreatedResponse::new(
                session.call_sid().unwrap_or_default(),
            ))
            .into_response()
        }
        Err(e) => {
            error!("API: Failed to dial: {}", e);
            record_call_failed("dial");
            error_response(&e)
        }
    }
}

/// Trigger a simulated inbound call
pub async fn test_incoming_call(State(state): State<AppState>) -> Response {
    info!("API: Triggering simulated incoming call");

    match state.call_control.simulate_inbound().await {
        Ok(session) => {
            record_call_initiated(session.direction.as_str());
            Json(CallCreatedResponse::new(
                session.call_sid().unwrap_or_default(),
            ))
            .into_response()
        }
        Err(e) => {
            error!("API: Failed to trigger simulated call: {}", e);
            record_call_failed("test-incoming-call");
            error_response(&e)
        }
    }
}

/// Mute or unmute a call leg
pub async fn mute_call(State(state): State<AppState>, Json(req): Json<MuteRequest>) -> Response {
    info!("API: Mute request (mute={})", req.mute);

    let call_sid = req.call_sid.as_deref().unwrap_or_default();
    match state.call_control.set_mute(call_sid, req.mute).await {
        Ok(()) => {
            record_call_command("mute");
            Json(AckResponse::ok()).into_response()
        }
        Err(e) => {
            error!("API: Failed to update mute status: {}", e);
            record_call_failed("mute");
            error_response(&e)
        }
    }
}

/// Hang up a call leg
pub async fn hangup_call(
    State(state): State<AppState>,
    Json(req): Json<HangupRequest>,
) -> Response {
    info!("API: Hangup request");

    let call_sid = req.call_sid.as_deref().unwrap_or_default();
    match state.call_control.hangup(call_sid).await {
        Ok(()) => {
            record_call_command("hangup");
            Json(AckResponse::ok()).into_response()
        }
        Err(e) => {
            error!("API: Failed to hang up: {}", e);
            record_call_failed("hangup");
            error_response(&e)
        }
    }
}

/// Map a domain failure to the JSON error envelope
fn error_response(err: &DomainError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiErrorResponse::new(err.to_string()))).into_response()
}
