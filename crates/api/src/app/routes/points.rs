use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use pointledger_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:id", get(get_balance))
        .route("/:id/histories", get(list_histories))
        .route("/:id/charge", patch(charge))
        .route("/:id/use", patch(use_points))
}

pub async fn get_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.points().balance(UserId::new(id)).await {
        Ok(snapshot) => (StatusCode::OK, Json(dto::snapshot_to_json(&snapshot))).into_response(),
        Err(e) => errors::point_error_to_response(e),
    }
}

pub async fn list_histories(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.points().histories(UserId::new(id)).await {
        Ok(histories) => {
            let items = histories.iter().map(dto::history_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::point_error_to_response(e),
    }
}

pub async fn charge(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let amount = match dto::parse_amount(&body.amount) {
        Ok(v) => v,
        Err(e) => return errors::point_error_to_response(e),
    };

    match services.points().charge(UserId::new(id), amount).await {
        Ok(receipt) => (StatusCode::OK, Json(dto::receipt_to_json(&receipt))).into_response(),
        Err(e) => errors::point_error_to_response(e),
    }
}

pub async fn use_points(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let amount = match dto::parse_amount(&body.amount) {
        Ok(v) => v,
        Err(e) => return errors::point_error_to_response(e),
    };

    match services.points().use_points(UserId::new(id), amount).await {
        Ok(receipt) => (StatusCode::OK, Json(dto::receipt_to_json(&receipt))).into_response(),
        Err(e) => errors::point_error_to_response(e),
    }
}
