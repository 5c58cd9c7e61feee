//! API error body
//!
//! Non-2xx responses from the backend carry a machine-readable message:
//! ```json
//! { "error": "Insufficient stock" }
//! ```
//! Some endpoints use `message` instead of `error`.

use serde::{Deserialize, Serialize};

/// Error payload returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse a raw response body, `None` if it is not a JSON error object
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// The operator-facing message, `error` taking precedence over `message`
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|m| !m.trim().is_empty())
            .or(self.message.filter(|m| !m.trim().is_empty()))
    }
}
