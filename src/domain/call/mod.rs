//! Call session model

pub mod entity;
pub mod value_object;

pub use entity::CallSession;
pub use value_object::{CallDirection, CallState};
