//! Cart line types

use crate::models::ProductRef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One chosen option of one variant
///
/// Required variants contribute exactly one entry; optional variants
/// contribute one entry per chosen option.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariant {
    pub variant_name: String,
    pub selected_option: String,
}

impl SelectedVariant {
    pub fn new(variant_name: impl Into<String>, selected_option: impl Into<String>) -> Self {
        Self {
            variant_name: variant_name.into(),
            selected_option: selected_option.into(),
        }
    }
}

/// Cart line snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line ID (content-addressed hash of the merge signature)
    pub line_id: String,
    pub product_ref: ProductRef,
    /// Product name snapshot
    pub name: String,
    pub quantity: i32,
    /// Base price plus every chosen option modifier
    pub unit_final_price: Decimal,
    /// Comma-joined chosen option names (display only)
    pub variant_description: String,
    pub selected_variants: Vec<SelectedVariant>,
}

impl CartLine {
    /// Line total (unit_final_price * quantity)
    pub fn line_total(&self) -> Decimal {
        self.unit_final_price * Decimal::from(self.quantity)
    }

    pub fn is_deal(&self) -> bool {
        self.product_ref.is_deal
    }

    /// Name with variant description, e.g. "Latte (Large, Oat Milk)"
    pub fn display_name(&self) -> String {
        if self.variant_description.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.variant_description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_and_display_name() {
        let line = CartLine {
            line_id: "abc".to_string(),
            product_ref: ProductRef::item("itm-1"),
            name: "Latte".to_string(),
            quantity: 3,
            unit_final_price: Decimal::new(1200, 2),
            variant_description: "Large".to_string(),
            selected_variants: vec![SelectedVariant::new("Size", "Large")],
        };

        assert_eq!(line.line_total(), Decimal::new(3600, 2));
        assert_eq!(line.display_name(), "Latte (Large)");
        assert!(!line.is_deal());
    }

    #[test]
    fn test_selected_variant_wire_names() {
        let json = serde_json::to_value(SelectedVariant::new("Size", "Large")).unwrap();
        assert_eq!(json["variantName"], "Size");
        assert_eq!(json["selectedOption"], "Large");
    }
}
