//! Shared types for the POS workspace
//!
//! Catalog models, cart line and order DTOs, and the API error body shared
//! between the HTTP client and the terminal engine.

pub mod models;
pub mod order;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Category, Deal, Item, PaymentMethod, Product, ProductRef, Variant, VariantOption};
pub use order::{CartLine, OrderConfirmation, OrderRequest, SelectedVariant};
pub use response::ApiErrorBody;
