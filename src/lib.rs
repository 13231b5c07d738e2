//! Dialtone - Browser softphone signaling backend
//!
//! Bridges a browser-based softphone client with a telephony carrier's
//! voice network: issues short-lived capability tokens, places outbound
//! calls, routes inbound calls to the waiting browser client, and relays
//! in-call control (mute, hang-up) to the telephony provider.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
