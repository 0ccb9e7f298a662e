//! Balance and amount policy.
//!
//! A single immutable value injected into the mutation core at construction.
//! Tests construct their own instances instead of patching globals.

use crate::error::PointError;
use crate::id::UserId;

/// Process-wide point policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PointPolicy {
    /// Minimum accepted charge amount.
    pub min_charge_amount: i64,
    /// Upper bound on any account balance.
    pub max_balance: i64,
    /// Rejects implausible user ids early.
    pub max_user_id: i64,
    /// Rejects implausible single-transaction amounts.
    pub max_points_amount: i64,
}

impl Default for PointPolicy {
    fn default() -> Self {
        Self {
            min_charge_amount: 1_000,
            max_balance: 1_000_000,
            max_user_id: 1_000_000_000,
            max_points_amount: 1_000_000_000,
        }
    }
}

impl PointPolicy {
    /// User ids must be positive and within the plausible range.
    pub fn validate_user_id(&self, user_id: UserId) -> Result<(), PointError> {
        let raw = user_id.get();
        if raw <= 0 {
            return Err(PointError::InvalidUserId(raw));
        }
        if raw > self.max_user_id {
            return Err(PointError::UserIdTooLarge(raw));
        }
        Ok(())
    }

    /// Shared amount checks for both charge and use.
    pub fn validate_amount(&self, amount: i64) -> Result<(), PointError> {
        if amount < 0 {
            return Err(PointError::NegativeAmount(amount));
        }
        if amount > self.max_points_amount {
            return Err(PointError::AmountTooLarge(amount));
        }
        Ok(())
    }

    /// A charge below the minimum is not a valid charge; zero included.
    pub fn validate_charge_amount(&self, amount: i64) -> Result<(), PointError> {
        if amount < self.min_charge_amount {
            return Err(PointError::BelowMinimumCharge {
                amount,
                minimum: self.min_charge_amount,
            });
        }
        Ok(())
    }

    /// Uses have no minimum, but zero is not a transaction.
    pub fn validate_use_amount(&self, amount: i64) -> Result<(), PointError> {
        if amount == 0 {
            return Err(PointError::ZeroAmount);
        }
        Ok(())
    }

    /// Checked against the *prospective* post-charge balance, after the
    /// balance read, inside the per-user lock. The debit path carries no
    /// symmetric recheck.
    pub fn check_max_balance(&self, prospective: i64) -> Result<(), PointError> {
        if prospective > self.max_balance {
            return Err(PointError::MaxBalanceExceeded {
                balance: prospective,
                maximum: self.max_balance,
            });
        }
        Ok(())
    }
}
