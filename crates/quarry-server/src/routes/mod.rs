//! `/api` endpoints

mod config;
mod extract;

use axum::{Router, routing};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the API router
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/extract",
            routing::post(extract::extract).fallback(method_not_allowed),
        )
        .route(
            "/api/config",
            routing::get(config::current)
                .post(config::update)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
