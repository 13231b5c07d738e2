//! Voice response documents
//!
//! A voice response is the ordered instruction list this system hands back
//! to the provider when it asks how a call leg should be handled. The
//! provider's markup serialization lives in the infrastructure layer so the
//! document itself stays a plain data structure.

use crate::domain::shared::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// One call handling instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceInstruction {
    /// Speak `text` to the leg
    Say { text: String },
    /// Bridge the leg to the named browser client. Terminal: once the
    /// provider dials out to the client, no later instruction applies.
    DialClient { identity: String },
    /// Park the leg silently
    Hold,
}

impl VoiceInstruction {
    /// Whether no further instruction may follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self, VoiceInstruction::DialClient { .. })
    }
}

/// An ordered, at-most-once-terminal sequence of instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceResponse {
    instructions: Vec<VoiceInstruction>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Greeting returned when an outbound call connects
    pub fn outbound_greeting() -> Self {
        Self {
            instructions: vec![VoiceInstruction::Say {
                text: "Hello! This call is working correctly.".to_string(),
            }],
        }
    }

    /// Routing document bridging an inbound call to the browser client
    pub fn inbound_routing(target_identity: impl Into<String>) -> Self {
        Self {
            instructions: vec![
                VoiceInstruction::Say {
                    text: "You have an incoming call. Please hold.".to_string(),
                },
                VoiceInstruction::DialClient {
                    identity: target_identity.into(),
                },
            ],
        }
    }

    /// Append a Say instruction
    pub fn say(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        self.push(VoiceInstruction::Say { text: text.into() })
    }

    /// Append the terminal DialClient instruction
    pub fn dial_client(&mut self, identity: impl Into<String>) -> Result<&mut Self> {
        self.push(VoiceInstruction::DialClient {
            identity: identity.into(),
        })
    }

    /// Append a Hold instruction
    pub fn hold(&mut self) -> Result<&mut Self> {
        self.push(VoiceInstruction::Hold)
    }

    fn push(&mut self, instruction: VoiceInstruction) -> Result<&mut Self> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStateTransition(
                "no instruction may follow a dial".to_string(),
            ));
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Whether the document already ends in a terminal instruction
    pub fn is_terminal(&self) -> bool {
        self.instructions
            .last()
            .is_some_and(|instruction| instruction.is_terminal())
    }

    pub fn instructions(&self) -> &[VoiceInstruction] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl Default for VoiceResponse {
    fn default() -> Self {
        Self::new()
    }
}
