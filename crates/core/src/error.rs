//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger layers.
pub type PointResult<T> = Result<T, PointError>;

/// Failure of the underlying ledger store (read or write path).
///
/// Kept separate from [`PointError`] so store implementations can speak a
/// storage vocabulary without knowing the policy taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A balance or history read failed.
    #[error("read failed: {0}")]
    Read(String),

    /// The combined balance-update + history-append write failed.
    #[error("write failed: {0}")]
    Write(String),
}

impl StoreError {
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}

/// Point operation error.
///
/// One variant per rejection condition; the HTTP boundary maps each variant
/// to a stable machine-readable code. Validation variants are raised before
/// any store access except `MaxBalanceExceeded` and `InsufficientBalance`,
/// which require the balance read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointError {
    /// User id is zero or negative.
    #[error("invalid user id: {0}")]
    InvalidUserId(i64),

    /// User id is beyond the plausible range.
    #[error("user id {0} is too large")]
    UserIdTooLarge(i64),

    /// The request carried an amount that is not a whole number of points.
    #[error("amount must be a whole number of points")]
    NonIntegerAmount,

    /// Amount is negative.
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(i64),

    /// Amount is beyond the plausible range for a single transaction.
    #[error("amount {0} is too large")]
    AmountTooLarge(i64),

    /// A use of zero points is not a transaction.
    #[error("amount must be positive")]
    ZeroAmount,

    /// Charge amount is below the accepted minimum.
    #[error("charge amount {amount} is below the minimum of {minimum}")]
    BelowMinimumCharge { amount: i64, minimum: i64 },

    /// The post-charge balance would exceed the balance cap.
    #[error("balance {balance} would exceed the maximum of {maximum}")]
    MaxBalanceExceeded { balance: i64, maximum: i64 },

    /// Use amount exceeds the current balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    /// The underlying store failed; propagated as-is, never retried here.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}
