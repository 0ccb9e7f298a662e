//! Per-user serialized transaction engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;

use pointledger_core::{PointError, PointPolicy, UserId};

use crate::model::{BalanceSnapshot, PointHistory, PointReceipt, TransactionType};
use crate::store::PointStore;

/// The balance mutation core.
///
/// Guarantees that charge and use operations on one user observe a
/// serialized, consistent view of the balance: no lost updates, no
/// overdraft, no balance-cap violations, even under concurrent callers.
/// Operations on different users proceed fully in parallel; there is no
/// global critical section.
///
/// Balance and history queries bypass the lock and may trail an in-flight
/// mutation.
pub struct PointService<S> {
    store: S,
    policy: PointPolicy,
    user_locks: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl<S> PointService<S>
where
    S: PointStore,
{
    pub fn new(store: S) -> Self {
        Self::with_policy(store, PointPolicy::default())
    }

    pub fn with_policy(store: S, policy: PointPolicy) -> Self {
        Self {
            store,
            policy,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &PointPolicy {
        &self.policy
    }

    /// Lock handle for one user, created on first use and reused after.
    ///
    /// Entries are never evicted, so the table grows with the number of
    /// distinct users seen by this process.
    fn lock_for(&self, user_id: UserId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.user_locks.lock().unwrap();
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Absent accounts read as zero; the store reports absence as data.
    async fn read_current(&self, user_id: UserId) -> Result<i64, PointError> {
        let balance = self.store.read_balance(user_id).await?;
        Ok(balance.map(|b| b.point).unwrap_or(0))
    }

    /// Credit `amount` points to `user_id`.
    ///
    /// Input validation happens before the lock is taken; the balance-cap
    /// check needs the current balance and therefore runs inside the lock,
    /// against the prospective post-charge balance. On success exactly one
    /// store write commits the new balance together with its history record.
    pub async fn charge(&self, user_id: UserId, amount: i64) -> Result<PointReceipt, PointError> {
        self.policy.validate_user_id(user_id)?;
        self.policy.validate_amount(amount)?;
        self.policy.validate_charge_amount(amount)?;

        let lock = self.lock_for(user_id);
        let _guard = lock.lock().await;

        let current = self.read_current(user_id).await?;
        let new_balance = current + amount;
        self.policy.check_max_balance(new_balance)?;

        let now = Utc::now().timestamp_millis();
        let committed = self
            .store
            .write_balance_with_history(user_id, new_balance, amount, TransactionType::Charge, now)
            .await?;

        Ok(PointReceipt {
            user_id,
            balance: committed.point,
            amount,
            kind: TransactionType::Charge,
            time_millis: now,
        })
    }

    /// Debit `amount` points from `user_id`.
    ///
    /// Shares the charge path's lock, so charges and uses on one user are
    /// mutually exclusive. A use of the exact current balance is allowed and
    /// drains the account to zero.
    pub async fn use_points(
        &self,
        user_id: UserId,
        amount: i64,
    ) -> Result<PointReceipt, PointError> {
        self.policy.validate_user_id(user_id)?;
        self.policy.validate_amount(amount)?;
        self.policy.validate_use_amount(amount)?;

        let lock = self.lock_for(user_id);
        let _guard = lock.lock().await;

        let current = self.read_current(user_id).await?;
        if amount > current {
            return Err(PointError::InsufficientBalance {
                requested: amount,
                available: current,
            });
        }
        let new_balance = current - amount;

        let now = Utc::now().timestamp_millis();
        let committed = self
            .store
            .write_balance_with_history(user_id, new_balance, amount, TransactionType::Use, now)
            .await?;

        Ok(PointReceipt {
            user_id,
            balance: committed.point,
            amount,
            kind: TransactionType::Use,
            time_millis: now,
        })
    }

    /// Current balance without taking the per-user lock.
    pub async fn balance(&self, user_id: UserId) -> Result<BalanceSnapshot, PointError> {
        self.policy.validate_user_id(user_id)?;

        let current = self.read_current(user_id).await?;
        Ok(BalanceSnapshot {
            user_id,
            balance: current,
            as_of_millis: Utc::now().timestamp_millis(),
        })
    }

    /// Full transaction history in insertion order; empty for unknown users.
    pub async fn histories(&self, user_id: UserId) -> Result<Vec<PointHistory>, PointError> {
        self.policy.validate_user_id(user_id)?;

        Ok(self.store.list_histories(user_id).await?)
    }
}
