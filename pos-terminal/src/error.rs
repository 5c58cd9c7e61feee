//! Error types for the terminal engine
//!
//! Every variant is a recoverable outcome: the triggering action is rejected
//! and prior cart state is left intact.

use pos_client::ClientError;
use thiserror::Error;

/// Generic text shown when the backend gives no usable message
pub const ORDER_FAILED_FALLBACK: &str = "Failed to place order. Please try again.";

/// Product lookup failures (barcode scan or grid selection)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Raw scanned text, verbatim, so the operator can spot a miskeyed entry
    #[error("No product found for barcode: {raw}")]
    NotFound { raw: String },

    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    #[error("Product {id} is not in the catalog")]
    UnknownProduct { id: String },
}

/// Variant selection failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select an option for {variant}")]
    MissingRequired { variant: String },

    #[error("No product is awaiting variant selection")]
    NothingPending,

    #[error("{product} has no variant named {variant}")]
    UnknownVariant { product: String, variant: String },

    #[error("{variant} has no option named {option}")]
    UnknownOption { variant: String, option: String },
}

/// Order submission failures; the cart is never touched on any of these
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Please select a payment method")]
    MissingPaymentMethod,

    #[error("An order is already being submitted")]
    SubmissionInProgress,

    /// Backend rejected the order; message is shown verbatim
    #[error("{0}")]
    Rejected(String),

    /// Network failure or a rejection without a usable message
    #[error("{}", ORDER_FAILED_FALLBACK)]
    Failed(#[source] ClientError),
}

impl From<ClientError> for OrderError {
    fn from(err: ClientError) -> Self {
        match err.server_message() {
            Some(message) => OrderError::Rejected(message.to_string()),
            None => OrderError::Failed(err),
        }
    }
}

/// Invoice rendering failures; never roll back the order
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Invoice is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invoice document is empty")]
    Empty,

    #[error("Could not open invoice viewer: {0}")]
    ViewerUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
