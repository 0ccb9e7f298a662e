use serde::Deserialize;
use serde_json::{json, Number, Value as JsonValue};

use pointledger_core::PointError;
use pointledger_ledger::{BalanceSnapshot, PointHistory, PointReceipt};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Number,
}

/// Convert the wire amount into a whole number of points.
///
/// JSON numbers can carry fractions and magnitudes the ledger cannot; both
/// are rejected here so the core only ever sees `i64` amounts.
pub fn parse_amount(amount: &Number) -> Result<i64, PointError> {
    if let Some(value) = amount.as_i64() {
        return Ok(value);
    }
    match amount.as_f64() {
        Some(value) if value.fract() != 0.0 => Err(PointError::NonIntegerAmount),
        // A whole-valued float (e.g. `100.0`) still names a whole number.
        Some(value) if value >= i64::MIN as f64 && value <= i64::MAX as f64 => Ok(value as i64),
        // Whole number outside the i64 range; certainly above any policy cap.
        _ => Err(PointError::AmountTooLarge(i64::MAX)),
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn receipt_to_json(receipt: &PointReceipt) -> JsonValue {
    json!({
        "user_id": receipt.user_id,
        "balance": receipt.balance,
        "amount": receipt.amount,
        "type": receipt.kind,
        "timestamp_millis": receipt.time_millis,
    })
}

pub fn snapshot_to_json(snapshot: &BalanceSnapshot) -> JsonValue {
    json!({
        "user_id": snapshot.user_id,
        "balance": snapshot.balance,
        "timestamp_millis": snapshot.as_of_millis,
    })
}

pub fn history_to_json(history: &PointHistory) -> JsonValue {
    json!({
        "id": history.id,
        "user_id": history.user_id,
        "amount": history.amount,
        "type": history.kind,
        "timestamp_millis": history.time_millis,
    })
}
