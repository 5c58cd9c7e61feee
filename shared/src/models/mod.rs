//! Catalog models
//!
//! Read-only snapshots of what the catalog service returns. Identifiers are
//! opaque strings owned by the backend.

pub mod category;
pub mod payment_method;
pub mod product;

// Re-exports
pub use category::*;
pub use payment_method::*;
pub use product::*;
