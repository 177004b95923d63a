//! Delete dialog endpoints

use axum::extract::{Path, State};
use axum::Json;
use cafe_core::{CoreError, DeleteOutcome, DeleteState};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub password: String,
}

/// Current dialog state
pub async fn api_delete_state(State(state): State<AppState>) -> Json<DeleteState> {
    let register = state.register.read().await;
    Json(register.delete_state().clone())
}

/// Open the dialog for one record
pub async fn api_request_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DeleteState> {
    let mut register = state.register.write().await;
    register.request_delete(&id);
    Json(register.delete_state().clone())
}

/// Check the password and delete the pending record
pub async fn api_confirm_delete(
    State(state): State<AppState>,
    Json(body): Json<ConfirmRequest>,
) -> ApiResult<Json<DeleteOutcome>> {
    let mut register = state.register.write().await;
    register.set_delete_password(&body.password);

    match register.confirm_delete().await {
        outcome @ DeleteOutcome::Deleted { .. } => Ok(Json(outcome)),
        DeleteOutcome::Rejected => Err(CoreError::Unauthorized.into()),
        DeleteOutcome::Failed => Err(ApiError::DeleteFailed),
        DeleteOutcome::Idle => Err(CoreError::InvalidState {
            message: "No delete is pending".to_string(),
        }
        .into()),
    }
}

/// Close the dialog
pub async fn api_cancel_delete(State(state): State<AppState>) -> Json<DeleteState> {
    let mut register = state.register.write().await;
    register.cancel_delete();
    Json(register.delete_state().clone())
}
