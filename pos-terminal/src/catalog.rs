//! Catalog snapshot
//!
//! Immutable per fetch. The store keeps the last good snapshot so the register
//! keeps selling from stale data when a refresh fails.

use chrono::{DateTime, Utc};
use pos_client::{CatalogService, ClientResult};
use shared::models::{Category, Deal, Item, PaymentMethod, Product, ProductRef};
use tracing::{info, warn};

/// One fetch of everything the register sells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
    pub deals: Vec<Deal>,
    pub payment_methods: Vec<PaymentMethod>,
    /// Category filter the items were fetched with
    pub category: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Fetch all four lists concurrently
    pub async fn fetch(service: &dyn CatalogService, category: Option<&str>) -> ClientResult<Self> {
        let (categories, items, deals, payment_methods) = tokio::try_join!(
            service.fetch_categories(),
            service.fetch_items(category),
            service.fetch_deals(),
            service.fetch_payment_methods(),
        )?;

        Ok(Self {
            categories,
            items,
            deals,
            payment_methods,
            category: category.map(str::to_string),
            fetched_at: Some(Utc::now()),
        })
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn deal(&self, id: &str) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    pub fn product(&self, product_ref: &ProductRef) -> Option<Product> {
        if product_ref.is_deal {
            self.deal(&product_ref.id).cloned().map(Product::Deal)
        } else {
            self.item(&product_ref.id).cloned().map(Product::Item)
        }
    }

    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.deals.is_empty()
    }
}

/// Holder of the current snapshot
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: CatalogSnapshot,
    stale: bool,
}

impl CatalogStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: snapshot,
            stale: false,
        }
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.current
    }

    /// True when the last refresh failed and the snapshot is last-known data
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Replace the snapshot; on failure keep the old one and mark it stale
    pub async fn refresh(
        &mut self,
        service: &dyn CatalogService,
        category: Option<&str>,
    ) -> ClientResult<&CatalogSnapshot> {
        match CatalogSnapshot::fetch(service, category).await {
            Ok(snapshot) => {
                info!(
                    items = snapshot.items.len(),
                    deals = snapshot.deals.len(),
                    payment_methods = snapshot.payment_methods.len(),
                    category = ?category,
                    "catalog refreshed"
                );
                self.current = snapshot;
                self.stale = false;
                Ok(&self.current)
            }
            Err(e) => {
                warn!(error = %e, category = ?category, "catalog refresh failed, keeping last snapshot");
                self.stale = true;
                Err(e)
            }
        }
    }
}
