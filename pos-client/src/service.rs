//! Backend service interfaces
//!
//! The terminal engine only talks to the backend through these traits, so a
//! session can run against the HTTP client or an in-memory double.

use crate::ClientResult;
use async_trait::async_trait;
use shared::models::{Category, Deal, Item, PaymentMethod};
use shared::order::{OrderConfirmation, OrderRequest};

/// Catalog retrieval, scoped to the caller's tenant
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Active categories
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;

    /// Items, optionally restricted to one category
    async fn fetch_items(&self, category: Option<&str>) -> ClientResult<Vec<Item>>;

    /// Deals
    async fn fetch_deals(&self) -> ClientResult<Vec<Deal>>;

    /// Active payment methods
    async fn fetch_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>>;
}

/// Order submission
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order. Called once per submit; never retried.
    async fn create_order(&self, request: &OrderRequest) -> ClientResult<OrderConfirmation>;
}
