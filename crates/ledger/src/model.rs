//! Ledger records and operation results.

use serde::{Deserialize, Serialize};

use pointledger_core::UserId;

/// Direction of a point transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Credit: points added to the balance.
    Charge,
    /// Debit: points spent from the balance.
    Use,
}

/// Current balance of one account.
///
/// Accounts are created implicitly: an account the store has never seen
/// reads as balance zero. Balances only change through the mutation core.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBalance {
    pub user_id: UserId,
    pub point: i64,
    pub updated_millis: i64,
}

/// One immutable entry of an account's transaction history.
///
/// `id` is assigned monotonically by the store; the sum of CHARGE amounts
/// minus the sum of USE amounts for a user always equals that user's
/// current balance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointHistory {
    pub id: i64,
    pub user_id: UserId,
    pub amount: i64,
    pub kind: TransactionType,
    pub time_millis: i64,
}

/// Result of a committed charge or use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointReceipt {
    pub user_id: UserId,
    /// Balance after the transaction.
    pub balance: i64,
    pub amount: i64,
    pub kind: TransactionType,
    pub time_millis: i64,
}

/// Result of a balance query.
///
/// Read without the per-user lock, so it may trail an in-flight mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub user_id: UserId,
    pub balance: i64,
    pub as_of_millis: i64,
}
