//! In-memory ledger store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pointledger_core::{StoreError, UserId};
use pointledger_ledger::{PointBalance, PointHistory, PointStore, TransactionType};

#[derive(Debug, Default)]
struct Tables {
    balances: HashMap<UserId, PointBalance>,
    histories: HashMap<UserId, Vec<PointHistory>>,
    /// Last assigned history id, shared across all users.
    cursor: i64,
}

/// In-memory balance table + append-only history log.
///
/// One lock guards both tables, so a balance upsert and its history append
/// commit together. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryPointStore {
    tables: RwLock<Tables>,
}

impl InMemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PointStore for InMemoryPointStore {
    async fn read_balance(&self, user_id: UserId) -> Result<Option<PointBalance>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::read("lock poisoned"))?;

        Ok(tables.balances.get(&user_id).copied())
    }

    async fn write_balance_with_history(
        &self,
        user_id: UserId,
        new_balance: i64,
        amount: i64,
        kind: TransactionType,
        time_millis: i64,
    ) -> Result<PointBalance, StoreError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::write("lock poisoned"))?;

        tables.cursor += 1;
        let id = tables.cursor;

        let balance = PointBalance {
            user_id,
            point: new_balance,
            updated_millis: time_millis,
        };
        tables.balances.insert(user_id, balance);
        tables.histories.entry(user_id).or_default().push(PointHistory {
            id,
            user_id,
            amount,
            kind,
            time_millis,
        });

        Ok(balance)
    }

    async fn list_histories(&self, user_id: UserId) -> Result<Vec<PointHistory>, StoreError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::read("lock poisoned"))?;

        Ok(tables.histories.get(&user_id).cloned().unwrap_or_default())
    }
}
