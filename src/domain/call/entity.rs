//! Call session entity

use super::value_object::{CallDirection, CallState};
use crate::domain::shared::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One telephony call leg known to this system.
///
/// Sessions are transient: one is created when a dial or receive event
/// arrives, carried through the handling of that request, and dropped when
/// the response is sent. The provider remains the source of truth for call
/// state; a session only records what this system asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSession {
    /// Internal identifier for this session
    pub id: Uuid,
    /// Provider-assigned call SID, once the provider has created the call
    pub call_sid: Option<String>,
    pub direction: CallDirection,
    pub state: CallState,
    /// Phone number or client identity on the far side of this leg
    pub counterparty: String,
    pub created_at: DateTime<Utc>,
}

impl CallSession {
    /// Start tracking an outbound leg toward `counterparty`
    pub fn outbound(counterparty: impl Into<String>) -> Self {
        Self::new(CallDirection::Outbound, counterparty)
    }

    /// Start tracking an inbound leg from `counterparty`
    pub fn inbound(counterparty: impl Into<String>) -> Self {
        Self::new(CallDirection::Inbound, counterparty)
    }

    fn new(direction: CallDirection, counterparty: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            call_sid: None,
            direction,
            state: CallState::Requested,
            counterparty: counterparty.into(),
            created_at: Utc::now(),
        }
    }

    /// Record the SID the provider assigned to this leg
    pub fn assign_sid(&mut self, sid: impl Into<String>) {
        self.call_sid = Some(sid.into());
    }

    /// Move the session to `new_state`, rejecting invalid transitions
    pub fn transition_to(&mut self, new_state: CallState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(DomainError::InvalidStateTransition(format!(
                "{} -> {}",
                self.state.as_str(),
                new_state.as_str()
            )));
        }
        self.state = new_state;
        Ok(())
    }

    pub fn call_sid(&self) -> Option<&str> {
        self.call_sid.as_deref()
    }
}
