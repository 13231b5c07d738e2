//! Telephony provider gateway
//!
//! The provider is the external service that actually creates and mutates
//! call legs. The orchestrator only ever talks to it through the
//! `TelephonyProvider` trait so it never depends on any particular client
//! library shape.

pub mod twilio;

pub use twilio::TwilioGateway;

use crate::domain::shared::Result;

/// Parameters for creating a new call leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCallParams {
    /// Destination phone number or client address
    pub to: String,
    /// Caller ID presented to the destination
    pub from: String,
    /// URL the provider fetches call handling instructions from
    pub instruction_url: String,
}

/// A mutation applied to an existing call leg.
///
/// Mutations are fire-and-forget: the provider is told once and its answer
/// is surfaced unchanged. If the call has already ended, whatever the
/// provider returns (error or no-op) propagates to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMutation {
    /// Mute or unmute the leg
    SetMuted(bool),
    /// Move the call to its terminated status
    Terminate,
}

impl CallMutation {
    /// Wire form of the mutation, as provider form parameters
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        match self {
            CallMutation::SetMuted(muted) => vec![("Muted", muted.to_string())],
            CallMutation::Terminate => vec![("Status", "completed".to_string())],
        }
    }
}

/// Handle to a call the provider has accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHandle {
    /// Provider-assigned call SID
    pub sid: String,
}

/// Uniform adapter over the provider's call operations.
///
/// Implementations normalize every provider-side failure into a single
/// `Provider` error so callers never branch on provider-specific error
/// types. No retries, no circuit breaking.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// Ask the provider to create a call leg
    async fn create_call(&self, params: CreateCallParams) -> Result<CallHandle>;

    /// Apply a mutation to an existing call leg
    async fn update_call(&self, call_sid: &str, mutation: CallMutation) -> Result<()>;
}
