//! Interface layer - HTTP surface
//!
//! This layer handles:
//! - REST API endpoints
//! - Provider voice callbacks
//! - Request/response formatting

pub mod api;
