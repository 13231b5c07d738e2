//! API DTOs

use serde::{Deserialize, Serialize};

/// Request body for placing an outbound call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Request body for muting or unmuting a call leg
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteRequest {
    #[serde(default)]
    pub call_sid: Option<String>,
    #[serde(default)]
    pub mute: bool,
}

/// Request body for hanging up a call leg
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangupRequest {
    #[serde(default)]
    pub call_sid: Option<String>,
}

/// Successful call creation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCreatedResponse {
    pub success: bool,
    pub call_sid: String,
}

impl CallCreatedResponse {
    pub fn new(call_sid: impl Into<String>) -> Self {
        Self {
            success: true,
            call_sid: call_sid.into(),
        }
    }
}

/// Successful fire-and-forget command
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Failed API call
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Issued capability token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Failed token issuance. The token endpoint predates the `success`
/// envelope and keeps its original shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
}
