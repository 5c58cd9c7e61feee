//! Order endpoint payloads

use super::types::SelectedVariant;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer name sent when the operator leaves the field blank
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

/// Item line in an order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemLine {
    pub item_id: String,
    pub quantity: i32,
    #[serde(default)]
    pub selected_variants: Vec<SelectedVariant>,
}

/// Deal line in an order request (deals carry no variant data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDealLine {
    pub deal_id: String,
    pub quantity: i32,
}

/// Create order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderItemLine>,
    pub deals: Vec<OrderDealLine>,
    /// Payment method reference
    pub payment_method: String,
    /// Absolute discount in currency unit, never negative
    pub discount_amount: Decimal,
    pub customer_name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_contact: Option<String>,
}

/// Create order response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    /// Order ID (backend reference)
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Base64-encoded PDF invoice
    #[serde(default, alias = "invoice", skip_serializing_if = "Option::is_none")]
    pub invoice_pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
