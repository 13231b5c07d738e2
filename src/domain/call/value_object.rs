//! Call value objects

use serde::{Deserialize, Serialize};

/// Call direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    /// Inbound call from the carrier network
    Inbound,
    /// Outbound call placed through the provider
    Outbound,
}

impl CallDirection {
    pub fn as_str(&self) -> &str {
        match self {
            CallDirection::Inbound => "inbound",
            CallDirection::Outbound => "outbound",
        }
    }
}

/// Call leg state, as observed by this system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallState {
    /// Call creation has been requested from the provider
    Requested,
    /// Counterparty is being alerted
    Ringing,
    /// Call has been answered and media is flowing
    Connected,
    /// Call is connected with the microphone muted
    Muted,
    /// Call has ended
    Terminated,
}

impl CallState {
    /// Check if a state transition is valid
    pub fn can_transition_to(&self, new_state: CallState) -> bool {
        use CallState::*;

        match (self, new_state) {
            // From Requested
            (Requested, Ringing) => true,
            (Requested, Terminated) => true,

            // From Ringing
            (Ringing, Connected) => true,
            (Ringing, Terminated) => true,

            // From Connected
            (Connected, Muted) => true,
            (Connected, Terminated) => true,

            // From Muted
            (Muted, Connected) => true,
            (Muted, Terminated) => true,

            // Can't transition out of Terminated
            (Terminated, _) => false,

            // All other transitions are invalid
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, CallState::Terminated)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CallState::Requested => "requested",
            CallState::Ringing => "ringing",
            CallState::Connected => "connected",
            CallState::Muted => "muted",
            CallState::Terminated => "terminated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_transitions() {
        assert!(CallState::Requested.can_transition_to(CallState::Ringing));
        assert!(CallState::Requested.can_transition_to(CallState::Terminated));
        assert!(!CallState::Requested.can_transition_to(CallState::Muted));
        assert!(!CallState::Requested.can_transition_to(CallState::Requested));
    }

    #[test]
    fn test_mute_is_reversible() {
        assert!(CallState::Connected.can_transition_to(CallState::Muted));
        assert!(CallState::Muted.can_transition_to(CallState::Connected));
    }

    #[test]
    fn test_terminated_is_final() {
        for state in [
            CallState::Requested,
            CallState::Ringing,
            CallState::Connected,
            CallState::Muted,
        ] {
            assert!(!CallState::Terminated.can_transition_to(state));
        }
    }

    #[test]
    fn test_active_states() {
        assert!(CallState::Requested.is_active());
        assert!(CallState::Muted.is_active());
        assert!(!CallState::Terminated.is_active());
    }
}
