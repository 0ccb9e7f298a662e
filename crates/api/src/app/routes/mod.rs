use axum::Router;

pub mod points;
pub mod system;

/// Router for all ledger endpoints.
pub fn router() -> Router {
    Router::new().nest("/points", points::router())
}
