//! Cross-trade (wash trade) risk check.
//!
//! A cross trade is matched buy and sell interest from the same beneficial
//! owner in the same instrument. The engine keeps an index of every live
//! order and answers, before an order is accepted, whether its owner already
//! holds unfilled opposite-side interest in that instrument. Price plays no
//! part in the predicate: any live opposite-side order flags the candidate.
//!
//! # Usage
//!
//! ```
//! use risk_engine::models::Order;
//! use risk_engine::risk::{CrossTradeEngine, RiskVerdict};
//!
//! let mut engine = CrossTradeEngine::new();
//! let order = Order::from_json(r#"{
//!     "clOrderId": "1001", "market": "XSHG", "securityId": "600000",
//!     "side": "B", "price": 10.0, "qty": 1000, "shareholderId": "SH001"
//! }"#).unwrap();
//!
//! assert_eq!(engine.evaluate(&order), RiskVerdict::Pass);
//! engine.record_accept(&order).unwrap();
//! ```
//!
//! # Serialization of calls
//!
//! The engine holds no internal lock: `evaluate` borrows `&self` and the
//! recording operations take `&mut self`. The owner must serialize calls —
//! and must treat evaluate-then-accept as one critical section, or a
//! concurrent accept can stale the verdict between the two calls. Confining
//! the engine to the order-entry thread satisfies both; so does one mutex
//! held across the pair. Separate engine instances share nothing.

mod index;

pub use index::LiveOrder;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::RiskError;
use crate::models::{ClientOrderId, Order};
use index::LiveOrderIndex;

/// Outcome of a pre-trade risk evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskVerdict {
    /// No cross-trade exposure; the caller may accept the order.
    Pass,
    /// The order's owner holds live opposite-side interest in the same
    /// instrument; the caller should reject the order.
    CrossTrade,
}

impl RiskVerdict {
    /// True when the verdict allows acceptance.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Pre-trade cross-trade detector over a live-order index.
///
/// Owns all of its state; see the module docs for the serialization
/// contract. The index is fed exclusively through the three recording
/// operations, which the hosting system calls as the order book and market
/// report lifecycle events.
#[derive(Debug, Default)]
pub struct CrossTradeEngine {
    index: LiveOrderIndex,
    config: EngineConfig,
}

impl CrossTradeEngine {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            index: LiveOrderIndex::default(),
            config,
        }
    }

    /// Evaluate a candidate order against the index. Pure read; the candidate
    /// is not recorded.
    ///
    /// Returns [`RiskVerdict::CrossTrade`] iff the order's shareholder holds
    /// at least one live (unfilled, uncancelled) opposite-side order in the
    /// same instrument.
    #[must_use]
    pub fn evaluate(&self, order: &Order) -> RiskVerdict {
        if self.index.has_live_opposite(order) {
            debug!(
                client_order_id = %order.client_order_id,
                shareholder_id = %order.shareholder_id,
                instrument_id = %order.instrument_id,
                side = %order.side,
                "cross trade detected"
            );
            RiskVerdict::CrossTrade
        } else {
            RiskVerdict::Pass
        }
    }

    /// Record an order the caller has accepted into the book.
    ///
    /// The interface does not force a preceding [`evaluate`](Self::evaluate);
    /// the accept decision belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::DuplicateClientOrderId`] when the id is already
    /// tracked. The index is left untouched; upstream order-id generation
    /// guarantees uniqueness, so this indicates a caller bug.
    pub fn record_accept(&mut self, order: &Order) -> Result<(), RiskError> {
        self.index.insert(LiveOrder::from_order(order)).map_err(|e| {
            warn!(client_order_id = %order.client_order_id, "accept for already-tracked order id");
            e
        })?;
        debug!(
            client_order_id = %order.client_order_id,
            shareholder_id = %order.shareholder_id,
            instrument_id = %order.instrument_id,
            side = %order.side,
            qty = order.quantity,
            "order accepted into live index"
        );
        Ok(())
    }

    /// Record a cancel for the order with the given client order id.
    ///
    /// Returns the entry that was removed, or `None` when the id is unknown —
    /// a designed no-op, not an error: cancels can arrive out of order or
    /// refer to orders already pruned.
    pub fn record_cancel(&mut self, client_order_id: &ClientOrderId) -> Option<LiveOrder> {
        let removed = self.index.remove(client_order_id);
        match &removed {
            Some(entry) => debug!(
                client_order_id = %client_order_id,
                remaining_qty = entry.remaining_qty,
                "order cancelled, removed from live index"
            ),
            None => debug!(client_order_id = %client_order_id, "cancel for unknown order, ignored"),
        }
        removed
    }

    /// Record an execution (fill) of `exec_qty` against the order with the
    /// given client order id.
    ///
    /// Remaining quantity is floored at zero; a fill at or above the
    /// remainder exhausts the order without underflowing (late or duplicate
    /// fills land harmlessly). Returns the remaining quantity after the fill,
    /// or `None` when the id is unknown (designed no-op, as with cancel).
    ///
    /// Exhausted entries stop contributing to detection. They stay in the
    /// index unless [`EngineConfig::prune_exhausted`] is set, in which case
    /// they are removed on the spot.
    pub fn record_execution(
        &mut self,
        client_order_id: &ClientOrderId,
        exec_qty: u32,
    ) -> Option<u32> {
        let remaining = self.index.fill(client_order_id, exec_qty);
        match remaining {
            Some(0) if self.config.prune_exhausted => {
                self.index.remove(client_order_id);
                debug!(client_order_id = %client_order_id, "order fully filled, pruned");
            }
            Some(left) => debug!(
                client_order_id = %client_order_id,
                exec_qty,
                remaining_qty = left,
                "execution applied"
            ),
            None => {
                debug!(client_order_id = %client_order_id, "execution for unknown order, ignored");
            }
        }
        remaining
    }

    /// Look up a tracked entry by client order id.
    #[must_use]
    pub fn live_order(&self, client_order_id: &ClientOrderId) -> Option<&LiveOrder> {
        self.index.get(client_order_id)
    }

    /// Number of tracked entries, exhausted ones included.
    #[must_use]
    pub fn tracked_orders(&self) -> usize {
        self.index.len()
    }

    /// True when nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstrumentId, Market, ShareholderId, Side};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn make_order(
        id: &str,
        shareholder: &str,
        instrument: &str,
        side: Side,
        price: Decimal,
        qty: u32,
    ) -> Order {
        Order {
            client_order_id: ClientOrderId::new(id),
            market: Market::Xshg,
            instrument_id: InstrumentId::new(instrument),
            side,
            price,
            quantity: qty,
            shareholder_id: ShareholderId::new(shareholder),
        }
    }

    #[test]
    fn empty_index_passes() {
        let engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        assert_eq!(engine.evaluate(&buy), RiskVerdict::Pass);
        assert!(engine.is_empty());
    }

    #[test]
    fn evaluate_does_not_mutate() {
        let engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);

        let _ = engine.evaluate(&buy);
        let _ = engine.evaluate(&buy);
        assert_eq!(engine.tracked_orders(), 0);
    }

    #[test]
    fn opposite_side_same_shareholder_flags() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        let sell = make_order("1002", "SH001", "600000", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);
        assert!(!engine.evaluate(&sell).is_pass());
    }

    #[test]
    fn detection_is_direction_agnostic() {
        let mut engine = CrossTradeEngine::new();
        let sell = make_order("1001", "SH001", "600000", Side::Sell, dec!(10.0), 1000);
        engine.record_accept(&sell).unwrap();

        let buy = make_order("1002", "SH001", "600000", Side::Buy, dec!(11.0), 500);
        assert_eq!(engine.evaluate(&buy), RiskVerdict::CrossTrade);
    }

    #[test]
    fn price_is_not_part_of_the_predicate() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        // Far-away price still flags.
        let sell = make_order("1002", "SH001", "600000", Side::Sell, dec!(999.99), 100);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);
    }

    #[test]
    fn same_side_does_not_flag() {
        let mut engine = CrossTradeEngine::new();
        let buy1 = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy1).unwrap();

        let buy2 = make_order("1002", "SH001", "600000", Side::Buy, dec!(9.5), 500);
        assert_eq!(engine.evaluate(&buy2), RiskVerdict::Pass);
    }

    #[test]
    fn different_shareholder_does_not_flag() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        let sell = make_order("1002", "SH002", "600000", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::Pass);
    }

    #[test]
    fn different_instrument_does_not_flag() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        let sell = make_order("1002", "SH001", "600001", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::Pass);
    }

    #[test]
    fn cancel_clears_the_flag() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        let sell = make_order("1002", "SH001", "600000", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);

        let removed = engine.record_cancel(&ClientOrderId::new("1001")).unwrap();
        assert_eq!(removed.remaining_qty, 1000);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::Pass);
    }

    #[test]
    fn full_execution_clears_the_flag_but_keeps_the_entry() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        assert_eq!(
            engine.record_execution(&ClientOrderId::new("1001"), 1000),
            Some(0)
        );

        let sell = make_order("1002", "SH001", "600000", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::Pass);

        // Retained at zero by default; pruning is opt-in.
        let entry = engine.live_order(&ClientOrderId::new("1001")).unwrap();
        assert_eq!(entry.remaining_qty, 0);
        assert_eq!(entry.cum_qty(), 1000);
    }

    #[test]
    fn partial_execution_keeps_the_flag() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        assert_eq!(
            engine.record_execution(&ClientOrderId::new("1001"), 500),
            Some(500)
        );

        let sell = make_order("1002", "SH001", "600000", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);

        assert_eq!(
            engine.record_execution(&ClientOrderId::new("1001"), 500),
            Some(0)
        );
        assert_eq!(engine.evaluate(&sell), RiskVerdict::Pass);
    }

    #[test]
    fn over_execution_floors_at_zero() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        // Pathological late/duplicate fill above the remainder.
        assert_eq!(
            engine.record_execution(&ClientOrderId::new("1001"), 4000),
            Some(0)
        );
        let entry = engine.live_order(&ClientOrderId::new("1001")).unwrap();
        assert_eq!(entry.remaining_qty, 0);
    }

    #[test]
    fn cancel_unknown_is_silent_noop() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        assert!(engine.record_cancel(&ClientOrderId::new("9999")).is_none());

        // Index and future verdicts unchanged.
        assert_eq!(engine.tracked_orders(), 1);
        let sell = make_order("1002", "SH001", "600000", Side::Sell, dec!(9.0), 500);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);
    }

    #[test]
    fn execution_unknown_is_silent_noop() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        assert!(
            engine
                .record_execution(&ClientOrderId::new("9999"), 100)
                .is_none()
        );

        let entry = engine.live_order(&ClientOrderId::new("1001")).unwrap();
        assert_eq!(entry.remaining_qty, 1000);
    }

    #[test]
    fn duplicate_accept_is_rejected() {
        let mut engine = CrossTradeEngine::new();
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        let dup = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 200);
        assert_eq!(
            engine.record_accept(&dup),
            Err(RiskError::DuplicateClientOrderId(ClientOrderId::new(
                "1001"
            )))
        );
        assert_eq!(engine.tracked_orders(), 1);
        assert_eq!(
            engine
                .live_order(&ClientOrderId::new("1001"))
                .unwrap()
                .quantity,
            1000
        );
    }

    #[test]
    fn pruning_removes_exhausted_entries() {
        let mut engine = CrossTradeEngine::with_config(EngineConfig {
            prune_exhausted: true,
        });
        let buy = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy).unwrap();

        assert_eq!(
            engine.record_execution(&ClientOrderId::new("1001"), 1000),
            Some(0)
        );
        assert!(engine.live_order(&ClientOrderId::new("1001")).is_none());
        assert!(engine.is_empty());

        // A cancel arriving after the prune is still a harmless no-op.
        assert!(engine.record_cancel(&ClientOrderId::new("1001")).is_none());
    }

    #[test]
    fn multiple_live_orders_all_must_exhaust() {
        let mut engine = CrossTradeEngine::new();
        for (id, qty) in [("1001", 500), ("1002", 300), ("1003", 200)] {
            let buy = make_order(id, "SH001", "600000", Side::Buy, dec!(10.0), qty);
            engine.record_accept(&buy).unwrap();
        }

        let sell = make_order("1004", "SH001", "600000", Side::Sell, dec!(9.0), 1000);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);

        engine.record_execution(&ClientOrderId::new("1001"), 500);
        engine.record_execution(&ClientOrderId::new("1002"), 300);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::CrossTrade);

        engine.record_execution(&ClientOrderId::new("1003"), 200);
        assert_eq!(engine.evaluate(&sell), RiskVerdict::Pass);
    }

    #[test]
    fn shareholders_are_independent() {
        let mut engine = CrossTradeEngine::new();
        let buy1 = make_order("1001", "SH001", "600000", Side::Buy, dec!(10.0), 1000);
        let buy2 = make_order("1002", "SH002", "600000", Side::Buy, dec!(10.0), 1000);
        engine.record_accept(&buy1).unwrap();
        engine.record_accept(&buy2).unwrap();

        let sell1 = make_order("1003", "SH001", "600000", Side::Sell, dec!(9.0), 500);
        let sell2 = make_order("1004", "SH002", "600000", Side::Sell, dec!(9.0), 500);
        let sell3 = make_order("1005", "SH003", "600000", Side::Sell, dec!(9.0), 500);

        assert_eq!(engine.evaluate(&sell1), RiskVerdict::CrossTrade);
        assert_eq!(engine.evaluate(&sell2), RiskVerdict::CrossTrade);
        assert_eq!(engine.evaluate(&sell3), RiskVerdict::Pass);

        // Cancelling SH001's buy must not change SH002's verdict.
        engine.record_cancel(&ClientOrderId::new("1001"));
        assert_eq!(engine.evaluate(&sell1), RiskVerdict::Pass);
        assert_eq!(engine.evaluate(&sell2), RiskVerdict::CrossTrade);
    }
}
