//! Session configuration
//!
//! Read-only context injected into a `PosSession`. Nothing in the engine
//! reads process-wide state; everything comes through this struct.

use crate::pricing::format_money;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Default bound of the scan event queue
pub const DEFAULT_SCAN_QUEUE: usize = 64;

/// Session configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | POS_CURRENCY | $ | Currency symbol for display |
/// | POS_TAX_RATE | 0 | Tax rate in percent (8 = 8%) |
/// | POS_INVOICE_DIR | ./invoices | Where invoices are saved when they cannot be opened |
/// | POS_SCAN_QUEUE | 64 | Scan event queue capacity |
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Currency symbol prefix for display
    pub currency_symbol: String,
    /// Tax rate as a raw percentage (e.g., 8 = 8%)
    pub tax_rate_percent: Decimal,
    /// Download directory for the invoice fallback
    pub invoice_dir: PathBuf,
    /// Scan event queue capacity
    pub scan_queue_capacity: usize,
}

impl SessionConfig {
    pub fn new(currency_symbol: impl Into<String>, tax_rate_percent: Decimal) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            tax_rate_percent,
            invoice_dir: PathBuf::from("invoices"),
            scan_queue_capacity: DEFAULT_SCAN_QUEUE,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(symbol) = std::env::var("POS_CURRENCY") {
            config.currency_symbol = symbol;
        }
        if let Some(rate) = std::env::var("POS_TAX_RATE")
            .ok()
            .and_then(|v| Decimal::from_str(v.trim()).ok())
        {
            config.tax_rate_percent = rate;
        }
        if let Ok(dir) = std::env::var("POS_INVOICE_DIR") {
            config.invoice_dir = PathBuf::from(dir);
        }
        if let Some(capacity) = std::env::var("POS_SCAN_QUEUE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&c: &usize| c > 0)
        {
            config.scan_queue_capacity = capacity;
        }
        config
    }

    pub fn with_tax_rate(mut self, percent: Decimal) -> Self {
        self.tax_rate_percent = percent;
        self
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_invoice_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invoice_dir = dir.into();
        self
    }

    pub fn with_scan_queue_capacity(mut self, capacity: usize) -> Self {
        self.scan_queue_capacity = capacity.max(1);
        self
    }

    /// Format an amount with the session currency, e.g. "$12.00"
    pub fn format_amount(&self, amount: Decimal) -> String {
        format_money(&self.currency_symbol, amount)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("$", Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_format() {
        let config = SessionConfig::default()
            .with_currency("€")
            .with_tax_rate(Decimal::from(8))
            .with_scan_queue_capacity(0);

        assert_eq!(config.tax_rate_percent, Decimal::from(8));
        assert_eq!(config.scan_queue_capacity, 1);
        assert_eq!(config.format_amount(Decimal::new(1205, 2)), "€12.05");
    }
}
