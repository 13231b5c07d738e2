//! Provider voice callback handlers
//!
//! The provider POSTs to these endpoints to ask how a call leg should be
//! handled; the response body is the TwiML document, not JSON. The callback
//! request body is ignored.

use super::call_handler::AppState;
use crate::domain::voice_response::VoiceResponse;
use crate::infrastructure::twiml::TWIML_CONTENT_TYPE;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

/// Instructions for a connected outbound call
pub async fn outbound_voice(State(state): State<AppState>) -> Response {
    info!("API: Outbound voice callback");
    twiml_response(&state, &state.call_control.outbound_connected())
}

/// Instructions routing an inbound call to the browser client
pub async fn receive_call(State(state): State<AppState>) -> Response {
    info!("API: Inbound call callback");
    twiml_response(&state, &state.call_control.inbound_call())
}

fn twiml_response(state: &AppState, document: &VoiceResponse) -> Response {
    match state.twiml.serialize(document) {
        Ok(xml) => ([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            error!("API: Failed to serialize voice document: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
