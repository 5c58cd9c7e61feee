//! Variant pricing and money helpers
//!
//! All arithmetic is done with `Decimal`; rounding happens only when a value
//! is displayed.

use crate::selection::VariantSelections;
use rust_decimal::prelude::*;
use shared::models::Product;
use shared::order::SelectedVariant;

/// Rounding for displayed monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Result of pricing one product configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Base price plus every chosen option modifier
    pub unit_final_price: Decimal,
    /// Chosen option names joined with ", "
    pub description: String,
    /// One entry per chosen option, in variant declaration order
    pub selected_variants: Vec<SelectedVariant>,
}

/// Price a product under a variant configuration
///
/// Variants are walked in declaration order, and options within a variant in
/// declaration order, so the description is stable regardless of the order
/// the operator tapped options. Selections naming unknown variants or options
/// contribute nothing. Required-variant completeness is the caller's concern.
pub fn compute_line(product: &Product, selections: &VariantSelections) -> PricedLine {
    let mut unit_final_price = product.unit_price();
    let mut names: Vec<&str> = Vec::new();
    let mut selected_variants = Vec::new();

    for variant in product.variants() {
        for option in &variant.options {
            if selections.is_selected(&variant.name, &option.name) {
                unit_final_price += option.price_modifier;
                names.push(&option.name);
                selected_variants.push(SelectedVariant::new(&variant.name, &option.name));
            }
        }
    }

    PricedLine {
        unit_final_price,
        description: names.join(", "),
        selected_variants,
    }
}

/// Round to cents for display
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as currency, e.g. "$12.00" or "-$3.50"
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    let rounded = round_money(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, deal_combo, latte};

    #[test]
    fn test_no_variants_yields_base_price() {
        let line = compute_line(&deal_combo(), &VariantSelections::default());
        assert_eq!(line.unit_final_price, dec("9.99"));
        assert!(line.description.is_empty());
        assert!(line.selected_variants.is_empty());
    }

    #[test]
    fn test_required_option_modifier() {
        let mut selections = VariantSelections::default();
        selections.select_one("Size", "Large");

        let line = compute_line(&latte(), &selections);
        assert_eq!(line.unit_final_price, dec("12.00"));
        assert_eq!(line.description, "Large");
        assert_eq!(line.selected_variants, vec![SelectedVariant::new("Size", "Large")]);
    }

    #[test]
    fn test_description_follows_declaration_order() {
        let mut selections = VariantSelections::default();
        selections.toggle("Extras", "Syrup");
        selections.toggle("Extras", "Oat Milk");
        selections.select_one("Size", "Small");

        let line = compute_line(&latte(), &selections);
        // 10.00 + 0 + 0.50 - 0.25
        assert_eq!(line.unit_final_price, dec("10.25"));
        assert_eq!(line.description, "Small, Oat Milk, Syrup");
        assert_eq!(line.selected_variants.len(), 3);
    }

    #[test]
    fn test_price_independent_of_selection_order() {
        let mut forward = VariantSelections::default();
        forward.select_one("Size", "Large");
        forward.toggle("Extras", "Oat Milk");
        forward.toggle("Extras", "Extra Shot");

        let mut backward = VariantSelections::default();
        backward.toggle("Extras", "Extra Shot");
        backward.toggle("Extras", "Oat Milk");
        backward.select_one("Size", "Large");

        let a = compute_line(&latte(), &forward);
        let b = compute_line(&latte(), &backward);
        assert_eq!(a.unit_final_price, dec("13.25"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_selections_are_ignored() {
        let mut selections = VariantSelections::default();
        selections.select_one("Colour", "Red");
        selections.toggle("Extras", "Gold Leaf");

        let line = compute_line(&latte(), &selections);
        assert_eq!(line.unit_final_price, dec("10.00"));
        assert!(line.description.is_empty());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", dec("36")), "$36.00");
        assert_eq!(format_money("$", dec("0.005")), "$0.01");
        assert_eq!(format_money("$", dec("-3.5")), "-$3.50");
        assert_eq!(format_money("€", Decimal::ZERO), "€0.00");
    }
}
