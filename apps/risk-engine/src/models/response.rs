//! Outbound order-entry responses.
//!
//! The hosting gateway translates engine verdicts and market notifications
//! into these messages. Constructors echo the request fields so callers never
//! hand-assemble a response.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CancelOrder, ClientOrderId, ExecutionId, InstrumentId, Market, Order, ShareholderId, Side};

/// Reject codes carried by REJECT responses.
pub mod reject_codes {
    /// Pre-trade risk check flagged the order as a cross trade.
    pub const CROSS_TRADE: i32 = 101;
    /// Cancel referenced an order unknown to the gateway.
    pub const UNKNOWN_ORDER: i32 = 102;
}

/// Kind of an [`OrderResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderResponseType {
    /// Order accepted into the book.
    Confirm,
    /// Order rejected before entering the book.
    Reject,
    /// A fill (partial or full) against a live order.
    Execution,
}

/// Response to a new-order request, or an execution report for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Response kind.
    #[serde(rename = "type")]
    pub response_type: OrderResponseType,
    /// Client order id the response refers to.
    #[serde(rename = "clOrderId")]
    pub client_order_id: ClientOrderId,
    /// Venue of the order.
    pub market: Market,
    /// Exchange security code.
    #[serde(rename = "securityId")]
    pub instrument_id: InstrumentId,
    /// Side of the order.
    pub side: Side,
    /// Order quantity.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Order price.
    pub price: Decimal,
    /// Beneficial owner of the order.
    pub shareholder_id: ShareholderId,
    /// Reject code; 0 unless `response_type` is `Reject`.
    pub reject_code: i32,
    /// Human-readable reject reason; empty unless rejecting.
    pub reject_text: String,
    /// Execution id; empty unless `response_type` is `Execution`.
    pub exec_id: String,
    /// Executed quantity; 0 unless reporting an execution.
    pub exec_qty: u32,
    /// Executed price; 0 unless reporting an execution.
    pub exec_price: Decimal,
    /// Time the gateway produced this response.
    pub transact_time: DateTime<Utc>,
}

impl OrderResponse {
    fn base(order: &Order, response_type: OrderResponseType) -> Self {
        Self {
            response_type,
            client_order_id: order.client_order_id.clone(),
            market: order.market,
            instrument_id: order.instrument_id.clone(),
            side: order.side,
            quantity: order.quantity,
            price: order.price,
            shareholder_id: order.shareholder_id.clone(),
            reject_code: 0,
            reject_text: String::new(),
            exec_id: String::new(),
            exec_qty: 0,
            exec_price: Decimal::ZERO,
            transact_time: Utc::now(),
        }
    }

    /// Confirm acceptance of an order.
    #[must_use]
    pub fn confirm(order: &Order) -> Self {
        Self::base(order, OrderResponseType::Confirm)
    }

    /// Reject an order with an explicit code and reason.
    #[must_use]
    pub fn reject(order: &Order, reject_code: i32, reject_text: impl Into<String>) -> Self {
        Self {
            reject_code,
            reject_text: reject_text.into(),
            ..Self::base(order, OrderResponseType::Reject)
        }
    }

    /// Reject an order flagged by the cross-trade risk check.
    #[must_use]
    pub fn cross_trade_reject(order: &Order) -> Self {
        Self::reject(
            order,
            reject_codes::CROSS_TRADE,
            format!(
                "cross trade: shareholder {} holds live {} interest in {}",
                order.shareholder_id,
                order.side.opposite(),
                order.instrument_id
            ),
        )
    }

    /// Report an execution (fill) against a live order.
    #[must_use]
    pub fn execution(order: &Order, exec_qty: u32, exec_price: Decimal) -> Self {
        Self {
            exec_id: ExecutionId::generate().into_inner(),
            exec_qty,
            exec_price,
            ..Self::base(order, OrderResponseType::Execution)
        }
    }
}

/// Kind of a [`CancelResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelResponseType {
    /// Cancel applied.
    Confirm,
    /// Cancel rejected.
    Reject,
}

/// Response to a cancel request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    /// Response kind.
    #[serde(rename = "type")]
    pub response_type: CancelResponseType,
    /// Client id of the cancel request.
    #[serde(rename = "clOrderId")]
    pub client_order_id: ClientOrderId,
    /// Client order id of the order that was cancelled.
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
    /// Original order quantity; 0 on reject.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Original order price; 0 on reject.
    pub price: Decimal,
    /// Quantity already executed before the cancel; 0 on reject.
    pub cum_qty: u32,
    /// Quantity removed from the book by the cancel; 0 on reject.
    pub canceled_qty: u32,
    /// Reject code; 0 on confirm.
    pub reject_code: i32,
    /// Human-readable reject reason; empty on confirm.
    pub reject_text: String,
    /// Time the gateway produced this response.
    pub transact_time: DateTime<Utc>,
}

impl CancelResponse {
    fn base(cancel: &CancelOrder, response_type: CancelResponseType) -> Self {
        Self {
            response_type,
            client_order_id: cancel.client_order_id.clone(),
            orig_client_order_id: cancel.orig_client_order_id.clone(),
            market: cancel.market,
            instrument_id: cancel.instrument_id.clone(),
            shareholder_id: cancel.shareholder_id.clone(),
            side: cancel.side,
            quantity: 0,
            price: Decimal::ZERO,
            cum_qty: 0,
            canceled_qty: 0,
            reject_code: 0,
            reject_text: String::new(),
            transact_time: Utc::now(),
        }
    }

    /// Confirm a cancel, reporting the quantities it resolved against.
    #[must_use]
    pub fn confirm(
        cancel: &CancelOrder,
        quantity: u32,
        price: Decimal,
        cum_qty: u32,
        canceled_qty: u32,
    ) -> Self {
        Self {
            quantity,
            price,
            cum_qty,
            canceled_qty,
            ..Self::base(cancel, CancelResponseType::Confirm)
        }
    }

    /// Reject a cancel with an explicit code and reason.
    #[must_use]
    pub fn reject(cancel: &CancelOrder, reject_code: i32, reject_text: impl Into<String>) -> Self {
        Self {
            reject_code,
            reject_text: reject_text.into(),
            ..Self::base(cancel, CancelResponseType::Reject)
        }
    }

    /// Reject a cancel whose original order is unknown.
    #[must_use]
    pub fn unknown_order_reject(cancel: &CancelOrder) -> Self {
        Self::reject(
            cancel,
            reject_codes::UNKNOWN_ORDER,
            format!("unknown order: {}", cancel.orig_client_order_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_order() -> Order {
        Order {
            client_order_id: ClientOrderId::new("1001"),
            market: Market::Xshg,
            instrument_id: InstrumentId::new("600000"),
            side: Side::Buy,
            price: dec!(10.5),
            quantity: 1000,
            shareholder_id: ShareholderId::new("SH001"),
        }
    }

    fn make_cancel() -> CancelOrder {
        CancelOrder {
            client_order_id: ClientOrderId::new("2001"),
            orig_client_order_id: ClientOrderId::new("1001"),
            market: Market::Xshg,
            instrument_id: InstrumentId::new("600000"),
            shareholder_id: ShareholderId::new("SH001"),
            side: Side::Buy,
        }
    }

    #[test]
    fn confirm_echoes_order_fields() {
        let order = make_order();
        let response = OrderResponse::confirm(&order);

        assert_eq!(response.response_type, OrderResponseType::Confirm);
        assert_eq!(response.client_order_id, order.client_order_id);
        assert_eq!(response.quantity, 1000);
        assert_eq!(response.reject_code, 0);
        assert!(response.reject_text.is_empty());
        assert!(response.exec_id.is_empty());
    }

    #[test]
    fn cross_trade_reject_carries_code_and_text() {
        let order = make_order();
        let response = OrderResponse::cross_trade_reject(&order);

        assert_eq!(response.response_type, OrderResponseType::Reject);
        assert_eq!(response.reject_code, reject_codes::CROSS_TRADE);
        assert!(response.reject_text.contains("cross trade"));
        assert!(response.reject_text.contains("SH001"));
        assert!(response.reject_text.contains("SELL"));
    }

    #[test]
    fn execution_generates_exec_id() {
        let order = make_order();
        let r1 = OrderResponse::execution(&order, 500, dec!(10.4));
        let r2 = OrderResponse::execution(&order, 500, dec!(10.4));

        assert_eq!(r1.response_type, OrderResponseType::Execution);
        assert_eq!(r1.exec_qty, 500);
        assert_eq!(r1.exec_price, dec!(10.4));
        assert!(!r1.exec_id.is_empty());
        assert_ne!(r1.exec_id, r2.exec_id);
    }

    #[test]
    fn cancel_confirm_reports_quantities() {
        let cancel = make_cancel();
        let response = CancelResponse::confirm(&cancel, 1000, dec!(10.5), 300, 700);

        assert_eq!(response.response_type, CancelResponseType::Confirm);
        assert_eq!(response.cum_qty, 300);
        assert_eq!(response.canceled_qty, 700);
        assert_eq!(response.reject_code, 0);
    }

    #[test]
    fn cancel_unknown_order_reject() {
        let cancel = make_cancel();
        let response = CancelResponse::unknown_order_reject(&cancel);

        assert_eq!(response.response_type, CancelResponseType::Reject);
        assert_eq!(response.reject_code, reject_codes::UNKNOWN_ORDER);
        assert!(response.reject_text.contains("1001"));
    }

    #[test]
    fn order_response_serde_wire_names() {
        let order = make_order();
        let response = OrderResponse::confirm(&order);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"type\":\"CONFIRM\""));
        assert!(json.contains("\"clOrderId\":\"1001\""));
        assert!(json.contains("\"securityId\":\"600000\""));
        assert!(json.contains("\"qty\":1000"));
        assert!(json.contains("\"shareholderId\":\"SH001\""));
    }
}
