//! Operator notifications
//!
//! The engine emits `Notice`s; a UI shows them as toasts or banners. The
//! default notifier writes them to the log.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Human-facing event emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ItemAdded { name: String },
    ItemRemoved { name: String },
    OutOfStock { name: String },
    /// Carries the raw scanned text, verbatim
    BarcodeNotFound { raw: String },
    CartCleared,
    OrderPlaced { order_number: String },
    OrderFailed { message: String },
    /// Invoice could not be opened and was saved instead
    InvoiceDownloaded { path: PathBuf },
    InvoiceFailed { reason: String },
    /// Banner: the catalog could not be refreshed
    CatalogUnavailable { message: String },
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::ItemAdded { .. } | Notice::OrderPlaced { .. } => NoticeLevel::Success,
            Notice::ItemRemoved { .. } | Notice::CartCleared | Notice::InvoiceDownloaded { .. } => {
                NoticeLevel::Info
            }
            Notice::OutOfStock { .. } | Notice::CatalogUnavailable { .. } => NoticeLevel::Warning,
            Notice::BarcodeNotFound { .. }
            | Notice::OrderFailed { .. }
            | Notice::InvoiceFailed { .. } => NoticeLevel::Error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ItemAdded { name } => write!(f, "{name} added to cart"),
            Notice::ItemRemoved { name } => write!(f, "{name} removed from cart"),
            Notice::OutOfStock { name } => write!(f, "{name} is out of stock"),
            Notice::BarcodeNotFound { raw } => write!(f, "No product found for barcode: {raw}"),
            Notice::CartCleared => write!(f, "Cart cleared"),
            Notice::OrderPlaced { order_number } => {
                write!(f, "Order {order_number} placed successfully")
            }
            Notice::OrderFailed { message } => write!(f, "{message}"),
            Notice::InvoiceDownloaded { path } => write!(
                f,
                "Could not open the invoice for printing; saved to {}",
                path.display()
            ),
            Notice::InvoiceFailed { reason } => write!(f, "Invoice unavailable: {reason}"),
            Notice::CatalogUnavailable { message } => {
                write!(f, "Catalog unavailable, showing last known products ({message})")
            }
        }
    }
}

/// Sink for notices (toast layer)
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level() {
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!(notice = %notice, "notice"),
            NoticeLevel::Warning => tracing::warn!(notice = %notice, "notice"),
            NoticeLevel::Error => tracing::error!(notice = %notice, "notice"),
        }
    }
}

/// Buffers notices until the UI drains them
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(notice = %notice, "buffered notice");
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Notice::BarcodeNotFound {
                raw: "12 3-x".to_string()
            }
            .to_string(),
            "No product found for barcode: 12 3-x"
        );
        assert_eq!(
            Notice::OrderFailed {
                message: "Insufficient stock".to_string()
            }
            .to_string(),
            "Insufficient stock"
        );
        assert_eq!(Notice::CartCleared.level(), NoticeLevel::Info);
    }

    #[test]
    fn test_memory_notifier_drains_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::CartCleared);
        notifier.notify(Notice::ItemAdded {
            name: "Mug".to_string(),
        });

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Notice::CartCleared);
        assert!(notifier.drain().is_empty());
    }
}
