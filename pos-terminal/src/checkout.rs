//! Checkout submitter
//!
//! Builds the order payload from the cart and calls the order endpoint exactly
//! once per submit. The cart is only borrowed here: whatever happens, this
//! module cannot change it.

use crate::cart::Cart;
use crate::error::OrderError;
use crate::totals::Totals;
use pos_client::OrderService;
use shared::order::{
    OrderConfirmation, OrderDealLine, OrderItemLine, OrderRequest, WALK_IN_CUSTOMER,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Build the order payload
///
/// Items and deals go into separate lists; deals carry no variant data.
/// `discountAmount` is the clamped value from `totals`.
pub fn build_order_request(cart: &Cart, totals: &Totals) -> Result<OrderRequest, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    let payment_method = cart
        .payment_method()
        .filter(|m| !m.trim().is_empty())
        .ok_or(OrderError::MissingPaymentMethod)?;

    let (deal_lines, item_lines): (Vec<_>, Vec<_>) = cart.lines().iter().partition(|l| l.is_deal());

    let items = item_lines
        .into_iter()
        .map(|l| OrderItemLine {
            item_id: l.product_ref.id.clone(),
            quantity: l.quantity,
            selected_variants: l.selected_variants.clone(),
        })
        .collect();
    let deals = deal_lines
        .into_iter()
        .map(|l| OrderDealLine {
            deal_id: l.product_ref.id.clone(),
            quantity: l.quantity,
        })
        .collect();

    let customer_name = match cart.customer_name().trim() {
        "" => WALK_IN_CUSTOMER.to_string(),
        name => name.to_string(),
    };
    let customer_contact = Some(cart.customer_email().trim())
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    Ok(OrderRequest {
        items,
        deals,
        payment_method: payment_method.to_string(),
        discount_amount: totals.discount,
        customer_name,
        notes: cart.notes().trim().to_string(),
        customer_contact,
    })
}

/// Releases the in-flight flag when dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Submits orders, one at a time
#[derive(Clone)]
pub struct CheckoutSubmitter {
    service: Arc<dyn OrderService>,
    in_flight: Arc<AtomicBool>,
}

impl CheckoutSubmitter {
    pub fn new(service: Arc<dyn OrderService>) -> Self {
        Self {
            service,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a submit is outstanding (checkout button disabled)
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the cart
    ///
    /// Refused with `SubmissionInProgress` while another submit is
    /// outstanding. No retry and no timeout beyond the HTTP client's own.
    pub async fn submit(
        &self,
        cart: &Cart,
        totals: &Totals,
    ) -> Result<OrderConfirmation, OrderError> {
        let request = build_order_request(cart, totals)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("checkout already in progress, ignoring submit");
            return Err(OrderError::SubmissionInProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        info!(
            items = request.items.len(),
            deals = request.deals.len(),
            subtotal = %totals.subtotal,
            tax = %totals.tax,
            discount = %totals.discount,
            total = %totals.total,
            "placing order"
        );

        match self.service.create_order(&request).await {
            Ok(confirmation) => {
                info!(
                    order_number = %confirmation.order_number,
                    has_invoice = confirmation.invoice_pdf.is_some(),
                    "order placed"
                );
                Ok(confirmation)
            }
            Err(e) => {
                warn!(error = %e, "order submission failed");
                Err(OrderError::from(e))
            }
        }
    }
}

impl std::fmt::Debug for CheckoutSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutSubmitter")
            .field("in_flight", &self.is_submitting())
            .finish_non_exhaustive()
    }
}
