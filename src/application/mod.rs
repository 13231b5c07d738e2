//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases:
//! - Translating call control intents into provider operations
//! - Issuing signed capability tokens

pub mod call_control;
pub mod token_issuer;

pub use call_control::CallControlService;
pub use token_issuer::TokenIssuer;
