// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Risk Engine - Rust Core Library
//!
//! Pre-trade cross-trade (wash trade) detection for the Sentinel trading
//! system.
//!
//! # Architecture
//!
//! The engine sits between the order-entry decoder and the book: the decoder
//! produces a validated [`models::Order`], the caller asks
//! [`risk::CrossTradeEngine::evaluate`] for a verdict, and — if it accepts
//! the order — feeds the accept and every subsequent cancel/execution back
//! into the engine so the live-order index tracks the book.
//!
//! ## Modules
//!
//! - [`models`]: wire-level order-entry messages (orders, cancels,
//!   responses), strongly-typed identifiers, and field validation
//! - [`risk`]: the cross-trade detector and its live-order index
//! - [`config`]: engine configuration
//! - [`observability`]: logging initialization for hosting processes
//! - [`error`]: decode and engine-contract error types
//!
//! The crate performs no I/O and spawns nothing: verdicts are in-process
//! values, and serialization of engine calls is the owner's responsibility
//! (see the [`risk`] module docs).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod risk;

pub use config::EngineConfig;
pub use error::{DecodeError, RiskError};
pub use models::{
    CancelOrder, CancelResponse, ClientOrderId, InstrumentId, Market, Order, OrderResponse,
    ShareholderId, Side,
};
pub use risk::{CrossTradeEngine, LiveOrder, RiskVerdict};
