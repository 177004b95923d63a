//! Day totals endpoint

use axum::extract::State;
use axum::Json;
use cafe_core::SummaryReport;

use crate::AppState;

/// Get today's revenue, tips and counts
pub async fn api_summary(State(state): State<AppState>) -> Json<SummaryReport> {
    let register = state.register.read().await;
    Json(register.summary_report())
}
