//! Cart and order types
//!
//! - Cart lines: one distinct (product, variant configuration) entry
//! - Requests: payload sent to the order endpoint
//! - Confirmations: what the endpoint returns on success

pub mod request;
pub mod types;

// Re-exports
pub use request::*;
pub use types::*;
