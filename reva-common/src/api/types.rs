//! Shared API request/response types
//!
//! All successful responses are wrapped in the same envelope so clients can
//! branch on `success` before looking at the payload.

use serde::{Deserialize, Serialize};

/// Success envelope returned by every data-carrying endpoint
///
/// Serializes as `{"success": true, "data": <payload>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true for a 2xx response
    pub success: bool,
    /// Endpoint-specific payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
