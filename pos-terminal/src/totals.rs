//! Order totals calculator
//!
//! Pure function of cart state and the session tax rate; recomputed on every
//! read, never cached.

use crate::cart::Cart;
use rust_decimal::Decimal;
use shared::order::CartLine;

/// Derived order totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Σ(unit_final_price × quantity)
    pub subtotal: Decimal,
    /// subtotal × tax_rate_percent / 100
    pub tax: Decimal,
    /// Operator discount, clamped to ≥ 0
    pub discount: Decimal,
    /// subtotal + tax − discount
    pub total: Decimal,
    /// Units across all lines
    pub item_count: i64,
}

impl Totals {
    /// Calculate totals from lines, a raw discount and a tax percentage
    ///
    /// A negative discount (keyboard slip) counts as zero.
    pub fn calculate(
        lines: &[CartLine],
        discount_amount: Decimal,
        tax_rate_percent: Decimal,
    ) -> Self {
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal * tax_rate_percent / Decimal::ONE_HUNDRED;
        let discount = discount_amount.max(Decimal::ZERO);
        let item_count = lines.iter().map(|l| i64::from(l.quantity)).sum();

        Self {
            subtotal,
            tax,
            discount,
            total: subtotal + tax - discount,
            item_count,
        }
    }

    pub fn for_cart(cart: &Cart, tax_rate_percent: Decimal) -> Self {
        Self::calculate(cart.lines(), cart.discount_amount(), tax_rate_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::VariantSelections;
    use crate::test_support::{dec, deal_combo, latte, mug};
    use shared::models::ProductRef;

    fn line(price: &str, quantity: i32) -> CartLine {
        CartLine {
            line_id: format!("line-{price}-{quantity}"),
            product_ref: ProductRef::item("x"),
            name: "X".to_string(),
            quantity,
            unit_final_price: dec(price),
            variant_description: String::new(),
            selected_variants: vec![],
        }
    }

    #[test]
    fn test_tax_and_discount_scenario() {
        let totals = Totals::calculate(&[line("100.00", 1)], dec("5.00"), dec("8"));

        assert_eq!(totals.subtotal, dec("100.00"));
        assert_eq!(totals.tax, dec("8.00"));
        assert_eq!(totals.total, dec("103.00"));
    }

    #[test]
    fn test_negative_discount_is_clamped() {
        let totals = Totals::calculate(&[line("20", 2)], dec("-10"), Decimal::ZERO);

        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.total, dec("40"));
    }

    #[test]
    fn test_total_identity_holds_for_mixed_carts() {
        let lines = [line("12.00", 3), line("0.99", 7), line("7.50", 1)];
        for (discount, rate) in [("0", "0"), ("2.5", "8"), ("-1", "21"), ("1000", "5.5")] {
            let discount = dec(discount);
            let totals = Totals::calculate(&lines, discount, dec(rate));
            assert_eq!(
                totals.total,
                totals.subtotal + totals.tax - discount.max(Decimal::ZERO)
            );
        }
    }

    #[test]
    fn test_empty_cart() {
        let totals = Totals::for_cart(&Cart::new(), dec("8"));
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_for_cart_counts_units() {
        let mut cart = Cart::new();
        let mut large = VariantSelections::default();
        large.select_one("Size", "Large");

        cart.add(&latte(), &large).unwrap();
        cart.add(&latte(), &large).unwrap();
        cart.add(&mug(), &VariantSelections::default()).unwrap();
        cart.add(&deal_combo(), &VariantSelections::default()).unwrap();

        let totals = Totals::for_cart(&cart, Decimal::ZERO);
        assert_eq!(totals.item_count, 4);
        // 2 × 12.00 + 6.50 + 9.99
        assert_eq!(totals.subtotal, dec("40.49"));
    }
}
