//! `pointledger-ledger`: the balance mutation core.
//!
//! Serializes concurrent charge/use operations per user, enforces the point
//! policy atomically, and keeps each balance consistent with its append-only
//! transaction history. Storage is abstract: see [`PointStore`].

pub mod model;
pub mod service;
pub mod store;

pub use model::{BalanceSnapshot, PointBalance, PointHistory, PointReceipt, TransactionType};
pub use service::PointService;
pub use store::PointStore;
