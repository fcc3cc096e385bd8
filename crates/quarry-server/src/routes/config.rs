//! `GET|POST /api/config`: read and change the active selection

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use quarry_llm::{Registry, Selection};
use quarry_store::StorageKind;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub(super) struct ConfigView {
    current: Selection,
    providers: Registry,
    storage: StorageKind,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateRequest {
    #[serde(default)]
    password: String,
    #[serde(default)]
    provider: String,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateResponse {
    success: bool,
    config: Selection,
}

/// Handle `GET /api/config`
pub(super) async fn current(State(state): State<AppState>) -> Json<ConfigView> {
    Json(ConfigView {
        current: state.store.get().await,
        providers: Registry,
        storage: state.store.kind(),
    })
}

/// Handle `POST /api/config`
pub(super) async fn update(
    State(state): State<AppState>,
    request: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(request) = request.map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;

    let expected = state
        .admin_password
        .as_deref()
        .ok_or(ApiError::AdminPasswordNotConfigured)?;

    if request.password != expected.expose_secret() {
        tracing::warn!("rejected selection change with invalid password");
        return Err(ApiError::Unauthorized);
    }

    let selection = Selection::validated(&request.provider, &request.model).map_err(ApiError::InvalidSelection)?;

    let stored = state.store.set(selection).await;
    tracing::info!(provider = %stored.provider, model = %stored.model, "selection updated");

    Ok(Json(UpdateResponse {
        success: true,
        config: stored,
    }))
}
