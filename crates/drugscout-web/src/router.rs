//! Route table and middleware for the HTTP API.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::handlers::{
    engines::{admet, alphafold, clinical_trials, pathways, rag_explain},
    history::admin_history,
    monitor::disease_monitor,
    workflow::{full_workflow, root},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/",                get(root))
        .route("/full_workflow",   get(full_workflow))
        .route("/disease_monitor", get(disease_monitor))
        .route("/admin/history",   get(admin_history))

        // Single engines
        .route("/alphafold/{gene}", get(alphafold))
        .route("/admet",            post(admet))
        .route("/pathways",         post(pathways))
        .route("/clinical_trials",  get(clinical_trials))
        .route("/rag_explain",      get(rag_explain))

        // Middleware
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Permissive when no origin is configured.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
