//! POS Terminal - cart and checkout engine for a register session
//!
//! # Layout
//!
//! - [`catalog`] - catalog snapshot with stale fallback
//! - [`barcode`] - scan normalization and lookup
//! - [`selection`] - variant selection state machine
//! - [`pricing`] / [`cart`] / [`totals`] - line pricing, merge rules, totals
//! - [`checkout`] - order payload and single-flight submit
//! - [`invoice`] - print-or-download of the returned PDF
//! - [`scanner`] - queue between the barcode decoder and the session
//! - [`session`] - everything above wired into one register session

pub mod barcode;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod invoice;
pub mod logger;
pub mod notify;
pub mod pricing;
pub mod scanner;
pub mod selection;
pub mod session;
pub mod totals;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use cart::{Cart, QuantityUpdate};
pub use catalog::{CatalogSnapshot, CatalogStore};
pub use checkout::CheckoutSubmitter;
pub use config::SessionConfig;
pub use error::{InvoiceError, OrderError, ScanError, SelectionError};
pub use invoice::{
    InvoiceDispatcher, InvoiceDownloads, InvoiceOutcome, InvoiceViewer, SystemViewer,
};
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use scanner::{ScanEvent, ScanReceiver, ScanSender, scan_channel};
pub use selection::{SelectionState, VariantSelection, VariantSelections};
pub use session::{CheckoutReceipt, PosSession, ScanOutcome};
pub use totals::Totals;
