//! Register session
//!
//! Owns the catalog, the cart and the selection flow for one operator, and
//! routes every outcome to the notifier. All mutation happens through
//! `&mut self`, so cart operations are applied one at a time in arrival order.

use crate::barcode::{ensure_in_stock, resolve_orderable};
use crate::cart::{Cart, QuantityUpdate};
use crate::catalog::{CatalogSnapshot, CatalogStore};
use crate::checkout::CheckoutSubmitter;
use crate::config::SessionConfig;
use crate::error::{OrderError, ScanError, SelectionError};
use crate::invoice::{
    InvoiceDispatcher, InvoiceDownloads, InvoiceOutcome, InvoiceViewer, SystemViewer,
};
use crate::notify::{Notice, Notifier};
use crate::scanner::ScanReceiver;
use crate::selection::{SelectionState, VariantSelection, VariantSelections};
use crate::totals::Totals;
use pos_client::{CatalogService, OrderService};
use rust_decimal::Decimal;
use shared::models::{Product, ProductRef};
use shared::order::CartLine;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What happened to a scanned or tapped product
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Went straight into the cart
    Added { line_id: String, quantity: i32 },
    /// Has variants; waiting for the operator to configure it
    AwaitingSelection,
}

/// Result of a successful checkout
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub order_number: String,
    pub order_id: Option<String>,
    /// Totals the order was submitted with
    pub totals: Totals,
    /// `None` when the backend returned no invoice
    pub invoice: Option<InvoiceOutcome>,
}

/// One register session
pub struct PosSession {
    id: Uuid,
    config: SessionConfig,
    catalog_service: Arc<dyn CatalogService>,
    catalog: CatalogStore,
    cart: Cart,
    selection: SelectionState,
    submitter: CheckoutSubmitter,
    invoices: InvoiceDispatcher,
    notifier: Arc<dyn Notifier>,
}

impl PosSession {
    /// Create a session with an empty catalog; call [`Self::start`] next
    pub fn new(
        config: SessionConfig,
        catalog_service: Arc<dyn CatalogService>,
        order_service: Arc<dyn OrderService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let invoices = InvoiceDispatcher::new(
            Box::new(SystemViewer),
            InvoiceDownloads::new(config.invoice_dir.clone()),
        );
        let id = Uuid::new_v4();
        info!(session_id = %id, tax_rate = %config.tax_rate_percent, "register session opened");

        Self {
            id,
            config,
            catalog_service,
            catalog: CatalogStore::default(),
            cart: Cart::new(),
            selection: SelectionState::default(),
            submitter: CheckoutSubmitter::new(order_service),
            invoices,
            notifier,
        }
    }

    /// Replace the invoice viewer (kiosk printers, tests)
    pub fn with_invoice_viewer(mut self, viewer: Box<dyn InvoiceViewer>) -> Self {
        self.invoices = InvoiceDispatcher::new(
            viewer,
            InvoiceDownloads::new(self.config.invoice_dir.clone()),
        );
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ========== Catalog ==========

    /// Initial catalog load
    pub async fn start(&mut self) -> bool {
        self.refresh_catalog(None).await
    }

    /// Refetch the catalog, optionally filtered to one category
    ///
    /// On failure the previous snapshot stays in use and a banner notice is
    /// emitted. Returns whether fresh data was loaded.
    pub async fn refresh_catalog(&mut self, category: Option<&str>) -> bool {
        match self
            .catalog
            .refresh(self.catalog_service.as_ref(), category)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                self.notifier.notify(Notice::CatalogUnavailable {
                    message: e.to_string(),
                });
                false
            }
        }
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        self.catalog.snapshot()
    }

    pub fn is_catalog_stale(&self) -> bool {
        self.catalog.is_stale()
    }

    // ========== Product entry ==========

    /// Handle one raw barcode detection
    pub fn handle_scan(&mut self, raw: &str) -> Result<ScanOutcome, ScanError> {
        debug!(session_id = %self.id, raw, "scan received");
        let product = match resolve_orderable(self.catalog.snapshot(), raw) {
            Ok(product) => product,
            Err(e) => {
                self.notify_scan_error(&e);
                return Err(e);
            }
        };
        Ok(self.enter_product(product))
    }

    /// Handle a tap on a product in the grid
    pub fn choose_product(&mut self, product_ref: &ProductRef) -> Result<ScanOutcome, ScanError> {
        let product = self
            .catalog
            .snapshot()
            .product(product_ref)
            .ok_or_else(|| ScanError::UnknownProduct {
                id: product_ref.id.clone(),
            })?;
        if let Err(e) = ensure_in_stock(&product) {
            self.notify_scan_error(&e);
            return Err(e);
        }
        Ok(self.enter_product(product))
    }

    fn notify_scan_error(&self, err: &ScanError) {
        let notice = match err {
            ScanError::NotFound { raw } => Notice::BarcodeNotFound { raw: raw.clone() },
            ScanError::OutOfStock { name } => Notice::OutOfStock { name: name.clone() },
            ScanError::UnknownProduct { .. } => return,
        };
        self.notifier.notify(notice);
    }

    /// Products with variants wait for configuration; the rest go straight in
    fn enter_product(&mut self, product: Product) -> ScanOutcome {
        if let Some(abandoned) = self.selection.cancel() {
            debug!(product = abandoned.name(), "pending selection replaced");
        }

        if product.variants().is_empty() {
            if let Ok(outcome) = self.add_to_cart(&product, &VariantSelections::default()) {
                return outcome;
            }
        }

        self.selection.begin(product);
        ScanOutcome::AwaitingSelection
    }

    fn add_to_cart(
        &mut self,
        product: &Product,
        selections: &VariantSelections,
    ) -> Result<ScanOutcome, SelectionError> {
        let line = self.cart.add(product, selections)?;
        let outcome = ScanOutcome::Added {
            line_id: line.line_id.clone(),
            quantity: line.quantity,
        };
        let name = line.display_name();
        self.notifier.notify(Notice::ItemAdded { name });
        Ok(outcome)
    }

    // ========== Variant selection ==========

    pub fn pending_selection(&self) -> Option<&VariantSelection> {
        self.selection.pending()
    }

    pub fn select_option(&mut self, variant: &str, option: &str) -> Result<(), SelectionError> {
        self.selection
            .pending_mut()
            .ok_or(SelectionError::NothingPending)?
            .select(variant, option)
    }

    /// Add the configured product; stays pending while a required variant is unset
    pub fn confirm_selection(&mut self) -> Result<ScanOutcome, SelectionError> {
        let (product, selections) = self.selection.confirm()?;
        self.add_to_cart(&product, &selections)
    }

    pub fn cancel_selection(&mut self) -> Option<Product> {
        self.selection.cancel()
    }

    // ========== Cart edits ==========

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn set_quantity(&mut self, line_id: &str, quantity: i32) -> Option<QuantityUpdate> {
        let update = self.cart.set_quantity(line_id, quantity)?;
        if let QuantityUpdate::Removed(line) = &update {
            self.notifier.notify(Notice::ItemRemoved {
                name: line.display_name(),
            });
        }
        Some(update)
    }

    pub fn remove_line(&mut self, line_id: &str) -> Option<CartLine> {
        let line = self.cart.remove(line_id)?;
        self.notifier.notify(Notice::ItemRemoved {
            name: line.display_name(),
        });
        Some(line)
    }

    /// Clear lines and order details
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notifier.notify(Notice::CartCleared);
    }

    // ========== Order details ==========

    pub fn set_discount(&mut self, amount: Decimal) {
        self.cart.set_discount_amount(amount);
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.cart.set_customer_name(name);
    }

    pub fn set_customer_email(&mut self, email: impl Into<String>) {
        self.cart.set_customer_email(email);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.cart.set_notes(notes);
    }

    /// Choose a payment method from the catalog; unknown ids are ignored
    pub fn select_payment_method(&mut self, id: &str) -> bool {
        if self.catalog.snapshot().payment_method(id).is_none() {
            warn!(session_id = %self.id, payment_method = id, "unknown payment method");
            return false;
        }
        self.cart.set_payment_method(Some(id.to_string()));
        true
    }

    pub fn totals(&self) -> Totals {
        Totals::for_cart(&self.cart, self.config.tax_rate_percent)
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        self.config.format_amount(amount)
    }

    // ========== Scanner ==========

    /// Process every queued scan, in arrival order
    pub fn drain_scans(&mut self, scans: &mut ScanReceiver) -> Vec<Result<ScanOutcome, ScanError>> {
        let mut outcomes = Vec::new();
        while let Some(event) = scans.try_next() {
            outcomes.push(self.handle_scan(&event.raw));
        }
        outcomes
    }

    /// Consume scans until every sender is dropped
    pub async fn run_scanner(&mut self, mut scans: ScanReceiver) {
        while let Some(event) = scans.next().await {
            // Failures are already reported through the notifier
            let _ = self.handle_scan(&event.raw);
        }
        debug!(session_id = %self.id, "scan queue closed");
    }

    // ========== Checkout ==========

    /// Submit the cart as an order
    ///
    /// On success the invoice (if any) is printed or downloaded and the cart is
    /// cleared. On any failure the cart is left exactly as it was. The session
    /// is exclusively borrowed until the submit resolves, so a second checkout
    /// cannot start from the same session.
    pub async fn checkout(&mut self) -> Result<CheckoutReceipt, OrderError> {
        let totals = self.totals();
        let confirmation = match self.submitter.submit(&self.cart, &totals).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                self.notifier.notify(Notice::OrderFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        self.notifier.notify(Notice::OrderPlaced {
            order_number: confirmation.order_number.clone(),
        });

        let invoice = confirmation
            .invoice_pdf
            .as_deref()
            .map(|pdf| self.invoices.dispatch(&confirmation.order_number, pdf));
        match &invoice {
            Some(InvoiceOutcome::Downloaded(path)) => {
                self.notifier
                    .notify(Notice::InvoiceDownloaded { path: path.clone() });
            }
            Some(InvoiceOutcome::Failed(reason)) => {
                self.notifier.notify(Notice::InvoiceFailed {
                    reason: reason.clone(),
                });
            }
            Some(InvoiceOutcome::Printed) | None => {}
        }

        self.cart.clear();
        info!(
            session_id = %self.id,
            order_number = %confirmation.order_number,
            total = %totals.total,
            "checkout complete"
        );

        Ok(CheckoutReceipt {
            order_number: confirmation.order_number,
            order_id: confirmation.id,
            totals,
            invoice,
        })
    }

    /// End the session; an unsubmitted cart is discarded
    pub fn close(self) {
        if !self.cart.is_empty() {
            warn!(
                session_id = %self.id,
                lines = self.cart.lines().len(),
                "session closed with an unsubmitted cart"
            );
        }
        info!(session_id = %self.id, "register session closed");
    }
}

impl std::fmt::Debug for PosSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosSession")
            .field("id", &self.id)
            .field("lines", &self.cart.lines().len())
            .field("selection", &self.selection)
            .field("stale", &self.catalog.is_stale())
            .finish_non_exhaustive()
    }
}
