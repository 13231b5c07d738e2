//! Capability token model
//!
//! A capability token is a signed, time-boxed grant allowing a named client
//! to place and receive calls through the provider. This system never stores
//! issued tokens; the provider verifies them independently.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// A single calling permission carried by a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallGrant {
    /// The client may receive calls routed to its identity
    ReceiveCalls,
    /// The client may originate calls through the provider
    PlaceCalls,
}

/// An unsigned capability grant for one client identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityToken {
    pub identity: String,
    pub grants: Vec<CallGrant>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CapabilityToken {
    /// Create a token granting both calling directions to `identity`,
    /// expiring after the default TTL.
    pub fn for_identity(identity: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            identity: identity.into(),
            grants: vec![CallGrant::ReceiveCalls, CallGrant::PlaceCalls],
            issued_at: now,
            expires_at: now + Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS),
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.expires_at = self.issued_at + Duration::seconds(ttl_seconds);
        self
    }

    pub fn allows_incoming(&self) -> bool {
        self.grants.contains(&CallGrant::ReceiveCalls)
    }

    pub fn allows_outgoing(&self) -> bool {
        self.grants.contains(&CallGrant::PlaceCalls)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn ttl_seconds(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// A capability token together with its signed wire form
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: CapabilityToken,
    /// Provider-verifiable JWT; opaque to this system
    pub jwt: String,
}
