//! Inbound order-entry messages and their field validation.
//!
//! Messages arrive as JSON from the order-entry gateway. Decoding and field
//! validation happen here, before anything reaches the risk engine: an
//! [`Order`] obtained through [`Order::from_json`] is guaranteed to carry a
//! positive price, a positive quantity, and a round-lot quantity for buys.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClientOrderId, InstrumentId, Market, ShareholderId, Side};
use crate::error::DecodeError;

/// A new-order request.
///
/// Immutable input to the risk engine; the engine never mutates an order and
/// derives its own live-order state from it at accept time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Client-assigned order id, unique across the session.
    #[serde(rename = "clOrderId")]
    pub client_order_id: ClientOrderId,
    /// Venue the order is routed to.
    pub market: Market,
    /// Exchange security code.
    #[serde(rename = "securityId")]
    pub instrument_id: InstrumentId,
    /// Buy or sell.
    pub side: Side,
    /// Limit price. Strictly positive after validation.
    pub price: Decimal,
    /// Order quantity in shares. Strictly positive after validation;
    /// buys must be a multiple of 100.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Beneficial owner the order is placed for.
    pub shareholder_id: ShareholderId,
}

impl Order {
    /// Decode an order from its JSON wire form and validate its fields.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the JSON is malformed, a field carries an
    /// unknown code, or a field constraint is violated.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        let order: Self = serde_json::from_str(body)?;
        order.validate()?;
        Ok(order)
    }

    /// Validate field constraints on an already-decoded order.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the price is not strictly positive, the
    /// quantity is zero, or a buy quantity is not a multiple of 100.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.price <= Decimal::ZERO {
            return Err(DecodeError::NonPositivePrice(self.price));
        }
        if self.quantity == 0 {
            return Err(DecodeError::ZeroQuantity);
        }
        if self.side == Side::Buy && self.quantity % 100 != 0 {
            return Err(DecodeError::OddLotBuy(self.quantity));
        }
        Ok(())
    }
}

/// A cancel request for a previously submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrder {
    /// Client-assigned id of the cancel request itself.
    #[serde(rename = "clOrderId")]
    pub client_order_id: ClientOrderId,
    /// Client order id of the order being cancelled.
    #[serde(rename = "origClOrderId")]
    pub orig_client_order_id: ClientOrderId,
    /// Venue of the original order.
    pub market: Market,
    /// Exchange security code of the original order.
    #[serde(rename = "securityId")]
    pub instrument_id: InstrumentId,
    /// Beneficial owner of the original order.
    pub shareholder_id: ShareholderId,
    /// Side of the original order.
    pub side: Side,
}

impl CancelOrder {
    /// Decode a cancel request from its JSON wire form.
    ///
    /// Cancels carry no numeric fields, so no constraint validation applies.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the JSON is malformed or a field carries
    /// an unknown code.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(body)?)
    }
}
