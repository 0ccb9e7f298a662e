use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pointledger_core::PointError;

/// Map a ledger error onto a stable machine-readable code and status.
pub fn point_error_to_response(err: PointError) -> axum::response::Response {
    let (status, code) = match &err {
        PointError::InvalidUserId(_) => (StatusCode::BAD_REQUEST, "invalid_user_id"),
        PointError::UserIdTooLarge(_) => (StatusCode::BAD_REQUEST, "user_id_too_large"),
        PointError::NonIntegerAmount => (StatusCode::BAD_REQUEST, "non_integer_amount"),
        PointError::NegativeAmount(_) => (StatusCode::BAD_REQUEST, "negative_amount"),
        PointError::AmountTooLarge(_) => (StatusCode::BAD_REQUEST, "amount_too_large"),
        PointError::ZeroAmount => (StatusCode::BAD_REQUEST, "zero_amount"),
        PointError::BelowMinimumCharge { .. } => (StatusCode::BAD_REQUEST, "below_minimum_charge"),
        PointError::MaxBalanceExceeded { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "max_balance_exceeded")
        }
        PointError::InsufficientBalance { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_balance")
        }
        PointError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
    };

    if matches!(err, PointError::Store(_)) {
        tracing::warn!("store failure surfaced to client: {err}");
    }

    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
