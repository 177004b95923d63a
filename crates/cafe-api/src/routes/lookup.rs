//! Customer search endpoint

use axum::extract::{Query, State};
use axum::Json;
use cafe_core::LookupReport;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Search every date by customer name; a blank query returns the last results
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<LookupReport>> {
    let mut register = state.register.write().await;
    register.search(&params.q).await?;
    Ok(Json(register.lookup_report()))
}
