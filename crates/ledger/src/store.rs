//! Abstract ledger storage: a balance table paired with an append-only
//! history log.

use std::sync::Arc;

use async_trait::async_trait;

use pointledger_core::{StoreError, UserId};

use crate::model::{PointBalance, PointHistory, TransactionType};

/// Storage collaborator of the mutation core.
///
/// Each method is atomic relative to the store itself, but the store is NOT
/// assumed to serialize *across* calls. Read-modify-write sequences are only
/// safe under the core's per-user lock, which is why the core holds it even
/// over stores that happen to offer atomic single-row updates.
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Current balance, or `None` for an account the store has never seen.
    ///
    /// Absence is data, not an error; the core collapses it to zero.
    async fn read_balance(&self, user_id: UserId) -> Result<Option<PointBalance>, StoreError>;

    /// Upsert the balance and append the paired history record in one call.
    ///
    /// Implementations must commit both or neither, and must assign history
    /// ids monotonically. Failures propagate to the caller; the core never
    /// retries or compensates.
    async fn write_balance_with_history(
        &self,
        user_id: UserId,
        new_balance: i64,
        amount: i64,
        kind: TransactionType,
        time_millis: i64,
    ) -> Result<PointBalance, StoreError>;

    /// All history records for a user, in insertion order.
    ///
    /// Empty for unknown users, never an error.
    async fn list_histories(&self, user_id: UserId) -> Result<Vec<PointHistory>, StoreError>;
}

#[async_trait]
impl<S> PointStore for Arc<S>
where
    S: PointStore + ?Sized,
{
    async fn read_balance(&self, user_id: UserId) -> Result<Option<PointBalance>, StoreError> {
        (**self).read_balance(user_id).await
    }

    async fn write_balance_with_history(
        &self,
        user_id: UserId,
        new_balance: i64,
        amount: i64,
        kind: TransactionType,
        time_millis: i64,
    ) -> Result<PointBalance, StoreError> {
        (**self)
            .write_balance_with_history(user_id, new_balance, amount, kind, time_millis)
            .await
    }

    async fn list_histories(&self, user_id: UserId) -> Result<Vec<PointHistory>, StoreError> {
        (**self).list_histories(user_id).await
    }
}
