//! Core domain models for the risk engine.
//!
//! These types mirror the order-entry gateway's JSON wire schemas and define
//! the data structures for orders, cancels, and responses.

mod identifiers;
mod market;
mod order;
mod response;
mod side;

pub use identifiers::{ClientOrderId, ExecutionId, InstrumentId, ShareholderId};
pub use market::Market;
pub use order::{CancelOrder, Order};
pub use response::{
    CancelResponse, CancelResponseType, OrderResponse, OrderResponseType, reject_codes,
};
pub use side::Side;
