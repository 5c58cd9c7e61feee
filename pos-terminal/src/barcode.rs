//! Barcode resolution
//!
//! Scanners disagree on formatting (dashes, spaces, check-digit separators),
//! so both sides are reduced to their digits before comparing. Items are
//! searched before deals: a code present in both catalogs is the item.

use crate::catalog::CatalogSnapshot;
use crate::error::ScanError;
use shared::models::{Deal, Item, Product};

/// Keep only ASCII digits
pub fn normalize_barcode(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Outcome of matching a scan against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Item(&'a Item),
    Deal(&'a Deal),
    NotFound,
}

impl Resolution<'_> {
    pub fn into_product(self) -> Option<Product> {
        match self {
            Resolution::Item(item) => Some(Product::Item(item.clone())),
            Resolution::Deal(deal) => Some(Product::Deal(deal.clone())),
            Resolution::NotFound => None,
        }
    }
}

fn matches(stored: Option<&str>, code: &str) -> bool {
    stored.is_some_and(|b| normalize_barcode(b) == code)
}

/// Match a raw scan against items, then deals
pub fn resolve<'a>(catalog: &'a CatalogSnapshot, raw: &str) -> Resolution<'a> {
    let code = normalize_barcode(raw);
    if code.is_empty() {
        return Resolution::NotFound;
    }

    if let Some(item) = catalog
        .items
        .iter()
        .find(|i| matches(i.barcode.as_deref(), &code))
    {
        return Resolution::Item(item);
    }

    catalog
        .deals
        .iter()
        .find(|d| matches(d.barcode.as_deref(), &code))
        .map_or(Resolution::NotFound, Resolution::Deal)
}

/// Resolve a scan to something that may go into the cart
///
/// Rejects unknown codes (naming the raw text) and items with no stock, before
/// any cart mutation.
pub fn resolve_orderable(catalog: &CatalogSnapshot, raw: &str) -> Result<Product, ScanError> {
    let product = resolve(catalog, raw)
        .into_product()
        .ok_or_else(|| ScanError::NotFound {
            raw: raw.to_string(),
        })?;
    ensure_in_stock(&product)?;
    Ok(product)
}

pub fn ensure_in_stock(product: &Product) -> Result<(), ScanError> {
    if product.is_out_of_stock() {
        return Err(ScanError::OutOfStock {
            name: product.name().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(normalize_barcode(" 123-456 "), "123456");
        assert_eq!(normalize_barcode("ABC"), "");
        assert_eq!(normalize_barcode("0 12 3"), "0123");
    }

    #[test]
    fn test_formatted_scan_matches_plain_barcode() {
        let catalog = sample_catalog();
        match resolve(&catalog, "123-456") {
            Resolution::Item(item) => assert_eq!(item.id, "itm-latte"),
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_scan_matches_formatted_barcode() {
        // deal barcode is stored as "9-990-001"
        let catalog = sample_catalog();
        assert!(matches!(
            resolve(&catalog, "9990001"),
            Resolution::Deal(d) if d.id == "deal-combo"
        ));
    }

    #[test]
    fn test_items_win_collisions() {
        let mut catalog = sample_catalog();
        catalog.deals[0].barcode = Some("123456".to_string());
        assert!(matches!(resolve(&catalog, "123456"), Resolution::Item(_)));
    }

    #[test]
    fn test_not_found_names_raw_text() {
        let catalog = sample_catalog();
        let err = resolve_orderable(&catalog, "77-00 X").unwrap_err();
        assert_eq!(
            err,
            ScanError::NotFound {
                raw: "77-00 X".to_string()
            }
        );
        assert!(err.to_string().contains("77-00 X"));
    }

    #[test]
    fn test_digitless_scan_never_matches() {
        let mut catalog = sample_catalog();
        catalog.items[0].barcode = Some("N/A".to_string());
        assert_eq!(resolve(&catalog, "---"), Resolution::NotFound);
    }

    #[test]
    fn test_out_of_stock_item_rejected() {
        let catalog = sample_catalog();
        let err = resolve_orderable(&catalog, "5550000").unwrap_err();
        assert_eq!(
            err,
            ScanError::OutOfStock {
                name: "Croissant".to_string()
            }
        );
    }

    #[test]
    fn test_deals_always_orderable() {
        let catalog = sample_catalog();
        let product = resolve_orderable(&catalog, "9-990-001").unwrap();
        assert!(product.is_deal());
    }
}
