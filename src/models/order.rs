use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order id returned in every acknowledgement. Orders are never persisted,
/// so the confirmation carries the constant id the clients expect.
pub const ORDER_CONFIRMATION_ID: u64 = 12345;

/// Orders arrive as arbitrary JSON; the service acknowledges them without
/// inspecting or storing the payload.
pub type OrderPayload = Value;

/// Fixed acknowledgement returned for every order submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAcknowledgement {
    pub message: String,
    pub order_id: u64,
    pub status: String,
}

impl OrderAcknowledgement {
    pub fn received() -> Self {
        Self {
            message: "Order received successfully".to_string(),
            order_id: ORDER_CONFIRMATION_ID,
            status: "processing".to_string(),
        }
    }
}
