//! Error types for the risk engine crate.
//!
//! Two families, matching where a failure can occur:
//!
//! - [`DecodeError`] — the inbound boundary rejected a message (malformed
//!   JSON or a field constraint violation). Orders carrying these never reach
//!   the engine.
//! - [`RiskError`] — a caller broke the engine contract (currently only
//!   accepting the same client order id twice). "Order not found" on
//!   cancel/execution is deliberately *not* an error; it is a designed no-op.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ClientOrderId;

/// Failure to decode or validate an inbound order-entry message.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Message body is not valid JSON or is missing required fields.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// Side code is not "B" or "S".
    #[error("invalid side: {0}")]
    InvalidSide(String),

    /// Market code is not a supported venue.
    #[error("invalid market: {0}")]
    InvalidMarket(String),

    /// Order price must be strictly positive.
    #[error("price must be positive, got: {0}")]
    NonPositivePrice(Decimal),

    /// Order quantity must be strictly positive.
    #[error("qty must be positive")]
    ZeroQuantity,

    /// Buy orders must be sized in round lots of 100.
    #[error("buy qty must be a multiple of 100, got: {0}")]
    OddLotBuy(u32),
}

/// Engine contract violation surfaced to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RiskError {
    /// An order with this client order id is already tracked by the index.
    #[error("duplicate client order id: {0}")]
    DuplicateClientOrderId(ClientOrderId),
}
