//! Live-order index backing cross-trade detection.
//!
//! Two maps, kept in lockstep: a primary map from client order id to the
//! tracked [`LiveOrder`], and a bucket map from the composite
//! (shareholder, instrument, side) key to the ids parked in that bucket.
//! Opposite-side lookup hits one bucket; cancel and execution hit the primary
//! map. Every mutation updates both maps inside the same call.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::RiskError;
use crate::models::{ClientOrderId, InstrumentId, Order, ShareholderId, Side};

/// Composite key identifying one bucket of same-side interest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct BucketKey {
    shareholder_id: ShareholderId,
    instrument_id: InstrumentId,
    side: Side,
}

impl BucketKey {
    /// The opposite-side bucket a candidate order must be checked against.
    pub(crate) fn opposite_of(order: &Order) -> Self {
        Self {
            shareholder_id: order.shareholder_id.clone(),
            instrument_id: order.instrument_id.clone(),
            side: order.side.opposite(),
        }
    }

    fn for_live_order(entry: &LiveOrder) -> Self {
        Self {
            shareholder_id: entry.shareholder_id.clone(),
            instrument_id: entry.instrument_id.clone(),
            side: entry.side,
        }
    }
}

/// A live order tracked by the index.
///
/// Created from an accepted [`Order`]; only its remaining quantity ever
/// changes afterwards, and only downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOrder {
    /// Client order id, unique across the whole index.
    pub client_order_id: ClientOrderId,
    /// Beneficial owner of the order.
    pub shareholder_id: ShareholderId,
    /// Exchange security code.
    pub instrument_id: InstrumentId,
    /// Buy or sell.
    pub side: Side,
    /// Limit price at acceptance.
    pub price: Decimal,
    /// Quantity the order was accepted with.
    pub quantity: u32,
    /// Quantity not yet filled. Zero once fully executed.
    pub remaining_qty: u32,
}

impl LiveOrder {
    /// Build the tracked entry for a freshly accepted order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            client_order_id: order.client_order_id.clone(),
            shareholder_id: order.shareholder_id.clone(),
            instrument_id: order.instrument_id.clone(),
            side: order.side,
            price: order.price,
            quantity: order.quantity,
            remaining_qty: order.quantity,
        }
    }

    /// Quantity filled so far.
    #[must_use]
    pub const fn cum_qty(&self) -> u32 {
        self.quantity - self.remaining_qty
    }

    /// True while the order still has unfilled quantity.
    ///
    /// Exhausted entries stay in the index but no longer count toward
    /// cross-trade detection.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.remaining_qty > 0
    }
}

/// The two-map index. All mutations go through methods that touch both maps.
#[derive(Debug, Default)]
pub(crate) struct LiveOrderIndex {
    /// Orders indexed by client order id.
    orders: HashMap<ClientOrderId, LiveOrder>,
    /// Bucket membership: composite key -> ids parked in that bucket.
    buckets: HashMap<BucketKey, Vec<ClientOrderId>>,
}

impl LiveOrderIndex {
    /// Insert a new entry into its bucket.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::DuplicateClientOrderId`] when the id is already
    /// tracked; neither map is modified in that case.
    pub(crate) fn insert(&mut self, entry: LiveOrder) -> Result<(), RiskError> {
        if self.orders.contains_key(&entry.client_order_id) {
            return Err(RiskError::DuplicateClientOrderId(
                entry.client_order_id.clone(),
            ));
        }

        let key = BucketKey::for_live_order(&entry);
        let id = entry.client_order_id.clone();
        self.buckets.entry(key).or_default().push(id.clone());
        self.orders.insert(id, entry);
        Ok(())
    }

    /// Remove an entry wherever it resides. `None` when the id is unknown.
    pub(crate) fn remove(&mut self, client_order_id: &ClientOrderId) -> Option<LiveOrder> {
        let entry = self.orders.remove(client_order_id)?;

        let key = BucketKey::for_live_order(&entry);
        if let Some(ids) = self.buckets.get_mut(&key) {
            ids.retain(|id| id != client_order_id);
            if ids.is_empty() {
                self.buckets.remove(&key);
            }
        }
        Some(entry)
    }

    /// Apply a fill, flooring remaining quantity at zero.
    ///
    /// Returns the remaining quantity after the fill, or `None` when the id
    /// is unknown.
    pub(crate) fn fill(&mut self, client_order_id: &ClientOrderId, exec_qty: u32) -> Option<u32> {
        let entry = self.orders.get_mut(client_order_id)?;
        entry.remaining_qty = entry.remaining_qty.saturating_sub(exec_qty);
        Some(entry.remaining_qty)
    }

    /// True when the opposite-side bucket for this order holds any entry with
    /// unfilled quantity.
    pub(crate) fn has_live_opposite(&self, order: &Order) -> bool {
        let key = BucketKey::opposite_of(order);
        self.buckets.get(&key).is_some_and(|ids| {
            ids.iter()
                .any(|id| self.orders.get(id).is_some_and(LiveOrder::is_live))
        })
    }

    /// Look up an entry by client order id.
    pub(crate) fn get(&self, client_order_id: &ClientOrderId) -> Option<&LiveOrder> {
        self.orders.get(client_order_id)
    }

    /// Total number of tracked entries, exhausted ones included.
    pub(crate) fn len(&self) -> usize {
        self.orders.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
