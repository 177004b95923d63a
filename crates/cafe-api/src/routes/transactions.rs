//! Transaction endpoints
//!
//! - api_transactions: filtered view of today's records
//! - api_clear_dates: drop the date/time filter
//! - api_create: submit the entry form
//! - api_toggle: flip the paid flag
//! - api_reload: re-fetch today's records

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::{EntryForm, FilterParams, FilteredReport, TransactionRow};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::AppState;

/// Body of a toggle request: the flag as currently shown
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub is_paid: bool,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub count: usize,
}

/// Get today's records under the active filter; query parameters update it
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<FilteredReport>> {
    let mut register = state.register.write().await;
    register.apply_filter_params(&params)?;
    Ok(Json(register.filtered_report()))
}

/// Clear the date/time filter, keeping the status filter
pub async fn api_clear_dates(State(state): State<AppState>) -> Json<FilteredReport> {
    let mut register = state.register.write().await;
    register.clear_date_range();
    Json(register.filtered_report())
}

/// Record a new order
pub async fn api_create(
    State(state): State<AppState>,
    Json(form): Json<EntryForm>,
) -> ApiResult<(StatusCode, Json<TransactionRow>)> {
    let mut register = state.register.write().await;
    register.set_entry_form(form);
    let record = register.submit_entry().await?;
    let row = TransactionRow::new_in(&record, register.money(), &Local);
    Ok((StatusCode::CREATED, Json(row)))
}

/// Flip the paid flag of one record
pub async fn api_toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> ApiResult<Json<TransactionRow>> {
    let mut register = state.register.write().await;
    let record = register.toggle_paid(&id, body.is_paid).await?;
    Ok(Json(TransactionRow::new_in(&record, register.money(), &Local)))
}

/// Re-fetch today's records
pub async fn api_reload(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    let mut register = state.register.write().await;
    let count = register.reload().await?;
    Ok(Json(ReloadResponse { success: true, count }))
}
