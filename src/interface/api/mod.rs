//! API interface implementations

pub mod call_handler;
pub mod dto;
pub mod metrics_handler;
pub mod router;
pub mod token_handler;
pub mod voice_handler;

pub use call_handler::AppState;
pub use metrics_handler::init_metrics;
pub use router::build_router;
