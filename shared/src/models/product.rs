//! Product Models
//!
//! Two disjoint catalogs feed the register: individually stocked items (which
//! may carry variants) and fixed-price deals (bundles, never configurable).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Variant option (embedded in Variant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    pub name: String,
    /// Price modifier in currency unit (positive=add, negative=subtract)
    #[serde(default)]
    pub price_modifier: Decimal,
}

/// Product customization axis (e.g. Size)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub name: String,
    /// Required variants take exactly one option; optional ones take any number
    #[serde(default, alias = "isRequired")]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

impl Variant {
    pub fn option(&self, name: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// Inventory item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Units on hand
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Category reference
    #[serde(default)]
    pub category: Option<String>,
}

/// Deal entity (fixed-price bundle)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Number of items bundled (informational)
    #[serde(default, alias = "itemCount")]
    pub bundled_item_count: u32,
}

/// Identity of an orderable product across both catalogs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    pub is_deal: bool,
}

impl ProductRef {
    pub fn item(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_deal: false,
        }
    }

    pub fn deal(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_deal: true,
        }
    }
}

/// Orderable product: either an item or a deal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Product {
    Item(Item),
    Deal(Deal),
}

impl Product {
    pub fn product_ref(&self) -> ProductRef {
        match self {
            Product::Item(item) => ProductRef::item(&item.id),
            Product::Deal(deal) => ProductRef::deal(&deal.id),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Product::Item(item) => &item.id,
            Product::Deal(deal) => &deal.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Product::Item(item) => &item.name,
            Product::Deal(deal) => &deal.name,
        }
    }

    pub fn unit_price(&self) -> Decimal {
        match self {
            Product::Item(item) => item.price,
            Product::Deal(deal) => deal.price,
        }
    }

    pub fn barcode(&self) -> Option<&str> {
        match self {
            Product::Item(item) => item.barcode.as_deref(),
            Product::Deal(deal) => deal.barcode.as_deref(),
        }
    }

    /// Deals never carry variants
    pub fn variants(&self) -> &[Variant] {
        match self {
            Product::Item(item) => &item.variants,
            Product::Deal(_) => &[],
        }
    }

    pub fn is_deal(&self) -> bool {
        matches!(self, Product::Deal(_))
    }

    /// Stock on hand; `None` for deals, which are always orderable
    pub fn stock_quantity(&self) -> Option<i64> {
        match self {
            Product::Item(item) => Some(item.quantity),
            Product::Deal(_) => None,
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity().is_some_and(|q| q <= 0)
    }
}

impl From<Item> for Product {
    fn from(item: Item) -> Self {
        Product::Item(item)
    }
}

impl From<Deal> for Product {
    fn from(deal: Deal) -> Self {
        Product::Deal(deal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_backend_shape() {
        let json = r#"{
            "_id": "itm-1",
            "name": "Latte",
            "price": 4.5,
            "barcode": "0012-3456",
            "quantity": 12,
            "variants": [
                {"name": "Size", "isRequired": true, "options": [
                    {"name": "Small", "priceModifier": 0},
                    {"name": "Large", "priceModifier": 1.25}
                ]}
            ]
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "itm-1");
        assert_eq!(item.price, Decimal::new(45, 1));
        assert!(item.variants[0].required);
        assert_eq!(
            item.variants[0].option("Large").unwrap().price_modifier,
            Decimal::new(125, 2)
        );
    }

    #[test]
    fn test_deal_defaults() {
        let deal: Deal = serde_json::from_str(r#"{"id":"d1","name":"Combo","price":9}"#).unwrap();
        assert_eq!(deal.bundled_item_count, 0);
        assert!(deal.barcode.is_none());

        let product = Product::from(deal);
        assert!(product.is_deal());
        assert!(product.variants().is_empty());
        assert!(!product.is_out_of_stock());
        assert_eq!(product.product_ref(), ProductRef::deal("d1"));
    }

    #[test]
    fn test_item_out_of_stock() {
        let item = Item {
            id: "i".into(),
            name: "Mug".into(),
            price: Decimal::ONE,
            barcode: None,
            quantity: 0,
            variants: vec![],
            category: None,
        };
        assert!(Product::Item(item).is_out_of_stock());
    }
}
