//! Disease monitor endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use drugscout_common::error::ApiError;
use drugscout_discovery::MonitorReport;
use serde::Deserialize;

use crate::state::SharedState;

#[derive(Deserialize, Default)]
pub struct MonitorParams {
    #[serde(default)]
    pub disease: String,
}

/// GET /disease_monitor?disease=
pub async fn disease_monitor(
    State(state): State<SharedState>,
    Query(params): Query<MonitorParams>,
) -> Result<Json<MonitorReport>, ApiError> {
    let disease = params.disease.trim();
    if disease.is_empty() {
        return Err(ApiError::bad_request("disease must not be empty"));
    }

    let report = state.monitor.run(disease).await;
    state.record(disease, "disease_monitor", &report).await;
    Ok(Json(report))
}
