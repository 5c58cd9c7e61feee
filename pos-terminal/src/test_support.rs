//! Fixtures and fakes for unit tests

use crate::catalog::CatalogSnapshot;
use crate::error::InvoiceError;
use crate::invoice::{InvoiceDocument, InvoiceViewer};
use async_trait::async_trait;
use pos_client::{CatalogService, ClientError, ClientResult, OrderService};
use rust_decimal::Decimal;
use shared::models::{Category, Deal, Item, PaymentMethod, Product, Variant, VariantOption};
use shared::order::{OrderConfirmation, OrderRequest};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

/// "%PDF-1.4" minimal document, base64
pub const PDF_B64: &str = "JVBERi0xLjQKJeLjz9MKMSAwIG9iago8PD4+CmVuZG9iagolJUVPRgo=";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn option(name: &str, modifier: &str) -> VariantOption {
    VariantOption {
        name: name.to_string(),
        price_modifier: dec(modifier),
    }
}

fn latte_item() -> Item {
    Item {
        id: "itm-latte".to_string(),
        name: "Latte".to_string(),
        price: dec("10.00"),
        barcode: Some("123456".to_string()),
        quantity: 10,
        variants: vec![
            Variant {
                name: "Size".to_string(),
                required: true,
                options: vec![option("Small", "0"), option("Large", "2.00")],
            },
            Variant {
                name: "Extras".to_string(),
                required: false,
                options: vec![
                    option("Oat Milk", "0.50"),
                    option("Extra Shot", "0.75"),
                    option("Syrup", "-0.25"),
                ],
            },
        ],
        category: Some("cat-drinks".to_string()),
    }
}

fn mug_item() -> Item {
    Item {
        id: "itm-mug".to_string(),
        name: "Mug".to_string(),
        price: dec("6.50"),
        barcode: Some("400200".to_string()),
        quantity: 25,
        variants: vec![],
        category: Some("cat-goods".to_string()),
    }
}

fn croissant_item() -> Item {
    Item {
        id: "itm-croissant".to_string(),
        name: "Croissant".to_string(),
        price: dec("3.25"),
        barcode: Some("555-0000".to_string()),
        quantity: 0,
        variants: vec![],
        category: Some("cat-bakery".to_string()),
    }
}

fn combo_deal() -> Deal {
    Deal {
        id: "deal-combo".to_string(),
        name: "Breakfast Combo".to_string(),
        price: dec("9.99"),
        barcode: Some("9-990-001".to_string()),
        bundled_item_count: 2,
    }
}

pub fn latte() -> Product {
    Product::Item(latte_item())
}

pub fn mug() -> Product {
    Product::Item(mug_item())
}

pub fn deal_combo() -> Product {
    Product::Deal(combo_deal())
}

pub fn sample_catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        categories: vec![
            Category {
                id: "cat-drinks".to_string(),
                name: "Drinks".to_string(),
                description: None,
                is_active: true,
            },
            Category {
                id: "cat-goods".to_string(),
                name: "Goods".to_string(),
                description: None,
                is_active: true,
            },
        ],
        items: vec![latte_item(), mug_item(), croissant_item()],
        deals: vec![combo_deal()],
        payment_methods: vec![
            PaymentMethod {
                id: "pm-cash".to_string(),
                name: "Cash".to_string(),
                is_active: true,
            },
            PaymentMethod {
                id: "pm-card".to_string(),
                name: "Card".to_string(),
                is_active: true,
            },
        ],
        category: None,
        fetched_at: None,
    }
}

fn unavailable() -> ClientError {
    ClientError::Rejected {
        status: 503u16.try_into().unwrap(),
        message: None,
    }
}

/// Catalog service backed by a fixed snapshot
pub struct FakeCatalog {
    snapshot: CatalogSnapshot,
    available: Mutex<bool>,
    item_requests: Mutex<Vec<Option<String>>>,
}

impl FakeCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
            available: Mutex::new(true),
            item_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }

    pub fn item_requests(&self) -> Vec<Option<String>> {
        self.item_requests.lock().unwrap().clone()
    }

    fn check(&self) -> ClientResult<()> {
        if *self.available.lock().unwrap() {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.check()?;
        Ok(self.snapshot.categories.clone())
    }

    async fn fetch_items(&self, category: Option<&str>) -> ClientResult<Vec<Item>> {
        self.item_requests
            .lock()
            .unwrap()
            .push(category.map(str::to_string));
        self.check()?;
        Ok(self
            .snapshot
            .items
            .iter()
            .filter(|i| category.is_none() || i.category.as_deref() == category)
            .cloned()
            .collect())
    }

    async fn fetch_deals(&self) -> ClientResult<Vec<Deal>> {
        self.check()?;
        Ok(self.snapshot.deals.clone())
    }

    async fn fetch_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>> {
        self.check()?;
        Ok(self.snapshot.payment_methods.clone())
    }
}

enum OrderReply {
    Confirm(OrderConfirmation),
    Reject(u16, Option<String>),
}

/// Order service with a canned reply
pub struct FakeOrders {
    reply: OrderReply,
    delay: Option<Duration>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl FakeOrders {
    pub fn succeeding(order_number: &str, invoice_pdf: Option<&str>) -> Self {
        Self::with_reply(OrderReply::Confirm(OrderConfirmation {
            order_number: order_number.to_string(),
            id: Some(format!("id-{order_number}")),
            invoice_pdf: invoice_pdf.map(str::to_string),
            created_at: None,
        }))
    }

    pub fn rejecting(status: u16, message: Option<&str>) -> Self {
        Self::with_reply(OrderReply::Reject(status, message.map(str::to_string)))
    }

    fn with_reply(reply: OrderReply) -> Self {
        Self {
            reply,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderService for FakeOrders {
    async fn create_order(&self, request: &OrderRequest) -> ClientResult<OrderConfirmation> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            OrderReply::Confirm(confirmation) => Ok(confirmation.clone()),
            OrderReply::Reject(status, message) => Err(ClientError::Rejected {
                status: (*status).try_into().unwrap(),
                message: message.clone(),
            }),
        }
    }
}

/// Viewer that records what it was asked to open
#[derive(Default)]
pub struct RecordingViewer {
    opened: Mutex<Vec<String>>,
}

impl RecordingViewer {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl InvoiceViewer for RecordingViewer {
    fn open_and_print(&self, document: &InvoiceDocument) -> Result<(), InvoiceError> {
        self.opened.lock().unwrap().push(document.order_number.clone());
        Ok(())
    }
}

/// Viewer that is never available (popup blocked)
pub struct BlockedViewer;

impl InvoiceViewer for BlockedViewer {
    fn open_and_print(&self, _document: &InvoiceDocument) -> Result<(), InvoiceError> {
        Err(InvoiceError::ViewerUnavailable("blocked".to_string()))
    }
}
