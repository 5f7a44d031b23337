//! Query history for the admin view.

use axum::{
    extract::{Query, State},
    Json,
};
use drugscout_common::error::ApiError;
use drugscout_discovery::HistoryEntry;
use serde::Deserialize;

use crate::state::SharedState;

const DEFAULT_LIMIT: usize = 20;

#[derive(Deserialize, Default)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

/// GET /admin/history?limit=
pub async fn admin_history(
    State(state): State<SharedState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let Some(history) = &state.history else {
        return Ok(Json(vec![]));
    };
    let entries = history
        .recent(params.limit.unwrap_or(DEFAULT_LIMIT))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(entries))
}
