//! POS Client - HTTP client for the backend of record
//!
//! Provides catalog retrieval and order submission over REST.

pub mod config;
pub mod error;
pub mod http;
pub mod service;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use service::{CatalogService, OrderService};
