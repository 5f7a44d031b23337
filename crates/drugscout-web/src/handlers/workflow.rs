//! Root status and the full discovery workflow.

use axum::{
    extract::{Query, State},
    Json,
};
use drugscout_common::error::ApiError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::state::SharedState;

#[derive(Deserialize, Default)]
pub struct WorkflowParams {
    #[serde(default)]
    pub query: String,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "drugscout backend running" }))
}

/// Shape-compatible payload returned whenever the pipeline fails.
pub fn backend_error_payload() -> Value {
    json!({
        "discovery": {
            "suggested_targets": [],
            "structures": {},
            "pathways": [],
            "gene_compound_scores": {},
            "llm_summary": "Backend error occurred.",
        }
    })
}

/// GET /full_workflow?query=
pub async fn full_workflow(
    State(state): State<SharedState>,
    Query(params): Query<WorkflowParams>,
) -> Result<Json<Value>, ApiError> {
    let query = params.query.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }

    // A panic inside the pipeline surfaces as a JoinError.
    let pipeline = state.pipeline.clone();
    let task_query = query.clone();
    let outcome = tokio::spawn(async move { pipeline.run(&task_query).await }).await;

    let report = match outcome {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            error!(error = %e, query = %query, "Discovery pipeline failed");
            return Ok(Json(backend_error_payload()));
        }
        Err(e) => {
            error!(error = %e, query = %query, "Discovery pipeline task aborted");
            return Ok(Json(backend_error_payload()));
        }
    };

    let body = json!({ "discovery": report });
    state.record(&query, "full_workflow", &body).await;
    Ok(Json(body))
}
