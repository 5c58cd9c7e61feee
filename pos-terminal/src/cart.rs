//! Cart engine
//!
//! The single mutable aggregate of a register session. Grid taps and barcode
//! scans both funnel through [`Cart::add`], so merge and pricing rules are the
//! same regardless of entry method.

use crate::error::SelectionError;
use crate::pricing::compute_line;
use crate::selection::VariantSelections;
use rust_decimal::Decimal;
use shared::models::{Product, ProductRef};
use shared::order::{CartLine, SelectedVariant};
use tracing::debug;

/// Generate a content-addressed line ID from the merge signature
///
/// The signature is `(product id, is_deal, selected variants)`. Variant
/// entries are sorted before hashing so two configurations that differ only
/// in selection order land on the same line. Each string is length-prefixed
/// so adjacent fields cannot run together.
pub fn line_signature(product: &ProductRef, selected_variants: &[SelectedVariant]) -> String {
    use sha2::{Digest, Sha256};

    let mut sorted: Vec<&SelectedVariant> = selected_variants.iter().collect();
    sorted.sort();

    let mut hasher = Sha256::new();
    let mut write = |s: &str| {
        hasher.update((s.len() as u64).to_le_bytes());
        hasher.update(s.as_bytes());
    };

    write(&product.id);
    write(if product.is_deal { "deal" } else { "item" });
    for entry in sorted {
        write(&entry.variant_name);
        write(&entry.selected_option);
    }

    let result = hasher.finalize();
    hex::encode(&result[..16]) // Use first 16 bytes for shorter ID
}

/// Result of a quantity change
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityUpdate {
    Updated { quantity: i32 },
    Removed(CartLine),
}

/// Active cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    /// Operator-entered absolute discount; clamped at totals/submission time
    discount_amount: Decimal,
    customer_name: String,
    customer_email: String,
    notes: String,
    payment_method: Option<String>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product configuration
    ///
    /// Merges into an existing line with the same signature (quantity + 1) or
    /// appends a new line with quantity 1. Refused when a required variant has
    /// no selection.
    pub fn add(
        &mut self,
        product: &Product,
        selections: &VariantSelections,
    ) -> Result<&CartLine, SelectionError> {
        if let Some(variant) = selections.missing_required(product.variants()) {
            return Err(SelectionError::MissingRequired {
                variant: variant.name.clone(),
            });
        }

        let priced = compute_line(product, selections);
        let product_ref = product.product_ref();
        let line_id = line_signature(&product_ref, &priced.selected_variants);

        let index = match self.lines.iter().position(|l| l.line_id == line_id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                debug!(line_id = %line.line_id, quantity = line.quantity, "merged into existing line");
                index
            }
            None => {
                debug!(
                    %line_id,
                    product_id = %product_ref.id,
                    unit_price = %priced.unit_final_price,
                    "new cart line"
                );
                self.lines.push(CartLine {
                    line_id,
                    product_ref,
                    name: product.name().to_string(),
                    quantity: 1,
                    unit_final_price: priced.unit_final_price,
                    variant_description: priced.description,
                    selected_variants: priced.selected_variants,
                });
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Replace a line's quantity; `n < 1` removes the line
    ///
    /// No upper bound: overselling is decided by the backend at submit time.
    /// Returns `None` for an unknown line.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i32) -> Option<QuantityUpdate> {
        if quantity < 1 {
            return self.remove(line_id).map(QuantityUpdate::Removed);
        }
        let line = self.lines.iter_mut().find(|l| l.line_id == line_id)?;
        line.quantity = quantity;
        Some(QuantityUpdate::Updated { quantity })
    }

    /// Delete a line, returning it
    pub fn remove(&mut self, line_id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.line_id == line_id)?;
        Some(self.lines.remove(index))
    }

    /// Full session reset: lines, discount, customer, notes, payment method
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    // ========== Order details ==========

    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    pub fn set_discount_amount(&mut self, amount: Decimal) {
        self.discount_amount = amount;
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn set_customer_email(&mut self, email: impl Into<String>) {
        self.customer_email = email.into();
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    pub fn set_payment_method(&mut self, method: Option<String>) {
        self.payment_method = method;
    }
}
